//! Console Event Sink
//!
//! Prints deploy progress as one line per phase, plus per-file failures.
//! Per-file successes only show at `-v`.

use std::io::{self, Write};
use std::sync::Mutex;

use site_deploy::domain::ports::{DeployEvent, DeployEventSink};
use site_deploy::DeployPhase;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    color: bool,
    unicode: bool,
    verbose: u8,
}

impl ConsoleEventSink {
    pub fn stdout(ui: &UiContext) -> Self {
        Self::with_writer(io::stdout(), ui.color, ui.unicode, ui.verbose)
    }

    pub fn with_writer<W: Write + Send + 'static>(
        writer: W,
        color: bool,
        unicode: bool,
        verbose: u8,
    ) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            color,
            unicode,
            verbose,
        }
    }

    fn line(&self, icon: Icon, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{} {}", icon.colored(self.color, self.unicode), text);
            let _ = writer.flush();
        }
    }

    fn detail(&self, text: String) {
        self.line(Icon::Arrow, ColoredText::dim(text).render(self.color));
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        match event {
            // The command header already names the domain and hosts.
            DeployEvent::Started { .. } | DeployEvent::Completed { .. } => {}
            DeployEvent::PhaseEntered { phase } => match phase {
                DeployPhase::Init | DeployPhase::Succeeded | DeployPhase::Failed => {}
                DeployPhase::RollingBack => self.line(
                    Icon::Rollback,
                    ColoredText::warning(phase.label()).render(self.color),
                ),
                _ => self.line(Icon::Progress, format!("{}...", phase.label())),
            },
            DeployEvent::SnapshotTaken {
                backup_dir,
                file_count,
                failed_count,
            } => {
                let mut text = format!("{file_count} file(s) saved to {}", backup_dir.display());
                if failed_count > 0 {
                    text.push_str(&format!(", {failed_count} skipped"));
                }
                self.detail(text);
            }
            DeployEvent::Planned {
                file_count,
                excluded_count,
            } => self.detail(format!(
                "{file_count} file(s) to copy, {excluded_count} excluded"
            )),
            DeployEvent::FileCopied { path, bytes, .. } => {
                if self.verbose > 0 {
                    self.detail(format!("{} ({bytes} bytes)", path.display()));
                }
            }
            DeployEvent::FileFailed { phase, path, error } => self.line(
                Icon::Warning,
                format!(
                    "{} {}: {}",
                    ColoredText::warning(phase.as_str()).render(self.color),
                    path.display(),
                    error
                ),
            ),
            DeployEvent::RollbackStarted => {}
            DeployEvent::RollbackFinished {
                restored,
                removed,
                failed,
            } => {
                let text = format!("{restored} restored, {removed} removed, {failed} failed");
                if failed == 0 {
                    self.detail(text);
                } else {
                    self.line(Icon::Error, ColoredText::error(text).render(self.color));
                }
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose > 0
    }
}
