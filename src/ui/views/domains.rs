use std::path::Path;

use site_deploy::application::HostingOutcome;
use site_deploy::domain::entities::DomainRecord;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Table of registered domains
pub struct DomainsView<'a> {
    domains: &'a [DomainRecord],
    registry_path: &'a Path,
}

impl<'a> DomainsView<'a> {
    pub fn new(domains: &'a [DomainRecord], registry_path: &'a Path) -> Self {
        Self {
            domains,
            registry_path,
        }
    }

    pub fn render(&self, supports_color: bool, _supports_unicode: bool) -> String {
        if self.domains.is_empty() {
            return format!(
                "No domains registered ({})\n{}\n",
                self.registry_path.display(),
                ColoredText::dim("Add one with `site-deploy domains add <NAME>`")
                    .render(supports_color)
            );
        }

        let name_width = self
            .domains
            .iter()
            .map(|d| d.name.len())
            .max()
            .unwrap_or(0)
            .max("NAME".len());

        let mut out = format!(
            "{:>4}  {:<name_width$}  {:<8}  {:<10}  {}\n",
            "ID", "NAME", "STATUS", "SERVER", "RENEWAL"
        );
        for domain in self.domains {
            let (server, renewal) = match &domain.hosted_site {
                Some(site) => (site.server.clone(), site.renewal_date.to_string()),
                None => ("-".to_string(), "-".to_string()),
            };
            out.push_str(&format!(
                "{:>4}  {:<name_width$}  {:<8}  {:<10}  {}\n",
                domain.id,
                domain.name,
                domain.status.as_str(),
                server,
                renewal
            ));
        }
        out
    }
}

pub fn render_domain_added(
    record: &DomainRecord,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    format!(
        "{} Registered {} (id {})\n",
        Icon::Success.colored(supports_color, supports_unicode),
        ColoredText::info(record.name.as_str()).bold().render(supports_color),
        record.id
    )
}

pub fn render_domain_removed(
    record: &DomainRecord,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    format!(
        "{} Removed {} (id {})\n",
        Icon::Success.colored(supports_color, supports_unicode),
        record.name,
        record.id
    )
}

pub fn render_domain_hosted(
    outcome: &HostingOutcome,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = format!(
        "{} {} is hosted on {}\n",
        Icon::Success.colored(supports_color, supports_unicode),
        ColoredText::info(outcome.record.name.as_str()).bold().render(supports_color),
        outcome.server
    );
    let staging = if outcome.created_staging_dir {
        "created"
    } else {
        "already present"
    };
    out.push_str(&format!(
        "  {} staging directory {} ({})\n",
        Icon::Arrow.colored(supports_color, supports_unicode),
        outcome.staging_dir.display(),
        staging
    ));
    if let Some(site) = &outcome.record.hosted_site {
        out.push_str(&format!(
            "  {} renewal due {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            site.renewal_date
        ));
    }
    out
}
