use site_deploy::application::deploy::failures;
use site_deploy::application::{DeploymentResult, ResolvedDeployment, Rollback};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

/// Failed files listed individually before collapsing into a count
const MAX_LISTED_FAILURES: usize = 5;

pub fn render_deploy_header(
    resolved: &ResolvedDeployment,
    strict: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let target = &resolved.target;
    let mut header = CommandHeader::new(Icon::Deploy, format!("Deploy {}", target.domain()));
    header.add(
        "From",
        format!(
            "{} ({})",
            resolved.staging_host,
            target.source_root().join(target.domain()).display()
        ),
    );
    header.add(
        "To",
        format!(
            "{} ({})",
            resolved.live_host,
            target.destination_root().join(target.domain()).display()
        ),
    );
    header.add("Backup", target.backup_root().display().to_string());
    if strict {
        header.add("Mode", "strict");
    }
    header.render(supports_color, supports_unicode)
}

pub fn render_deploy_summary(
    result: &DeploymentResult,
    verbose: u8,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let copy_failures: Vec<_> = result.copy_failures().collect();
    let backup_failures = result.backup_failures().count();

    let mut summary = if !result.is_success() {
        ResultSummary::failed("Deploy Failed")
    } else if copy_failures.is_empty() && backup_failures == 0 {
        ResultSummary::success("Deploy Complete")
    } else {
        ResultSummary::partial("Deploy Completed with Errors")
    };

    summary.add_stat("files copied", result.copied_count());
    if !result.excluded.is_empty() {
        summary.add_stat("files excluded", result.excluded.len());
    }
    if !result.backup.is_empty() {
        summary.add_stat("files in snapshot", result.backup.len() - backup_failures);
    }

    if !result.is_success() {
        summary.add_warning(result.message.clone());
    }

    let limit = if verbose > 0 {
        usize::MAX
    } else {
        MAX_LISTED_FAILURES
    };
    for failure in copy_failures.iter().take(limit) {
        summary.add_warning(format!(
            "{}: {}",
            failure.path.display(),
            failure.error.as_deref().unwrap_or("failed")
        ));
    }
    if copy_failures.len() > limit {
        summary.add_warning(format!(
            "... and {} more failed file(s)",
            copy_failures.len() - limit
        ));
    }
    if backup_failures > 0 {
        summary.add_warning(format!("{backup_failures} file(s) missing from the snapshot"));
    }

    match &result.rollback {
        Rollback::Performed(report) => {
            let restored = report.restored.len() - failures(&report.restored).count();
            let removed = report.removed.len() - failures(&report.removed).count();
            if report.error.is_none() && report.failed_count() == 0 {
                summary.add_info(format!(
                    "live site restored from snapshot ({restored} restored, {removed} removed)"
                ));
            } else {
                summary.add_warning(format!(
                    "rollback incomplete: {} file(s) could not be restored",
                    report.failed_count()
                ));
            }
        }
        Rollback::Skipped => summary.add_warning("no snapshot was taken; live site not restored"),
        Rollback::NotNeeded if !result.is_success() => {
            summary.add_info("live site was not modified")
        }
        Rollback::NotNeeded => {}
    }

    if let Some(dir) = result.backup_dir() {
        if result.is_success() {
            summary.add_info(format!("snapshot kept at {}", dir.display()));
        }
    }
    if !result.is_success() {
        summary.with_next_step("Fix the cause above and run the deploy again");
    }

    summary.render(supports_color, supports_unicode)
}
