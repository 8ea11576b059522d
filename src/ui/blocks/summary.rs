use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Partial,
    Failed,
}

/// Closing block of a command: title, counters, notes
#[derive(Debug, Clone)]
pub struct ResultSummary {
    title: String,
    outcome: Outcome,
    stats: Vec<(String, usize)>,
    infos: Vec<String>,
    warnings: Vec<String>,
    next_step: Option<String>,
}

impl ResultSummary {
    fn new(title: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            title: title.into(),
            outcome,
            stats: Vec::new(),
            infos: Vec::new(),
            warnings: Vec::new(),
            next_step: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title, Outcome::Success)
    }

    pub fn partial(title: impl Into<String>) -> Self {
        Self::new(title, Outcome::Partial)
    }

    pub fn failed(title: impl Into<String>) -> Self {
        Self::new(title, Outcome::Failed)
    }

    pub fn add_stat(&mut self, label: impl Into<String>, count: usize) {
        self.stats.push((label.into(), count));
    }

    /// Add an informational message (shown with success icon)
    pub fn add_info(&mut self, message: impl Into<String>) {
        self.infos.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn with_next_step(&mut self, hint: impl Into<String>) {
        self.next_step = Some(hint.into());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let (icon, title) = match self.outcome {
            Outcome::Success => (Icon::Success, ColoredText::success(self.title.as_str())),
            Outcome::Partial => (Icon::Warning, ColoredText::warning(self.title.as_str())),
            Outcome::Failed => (Icon::Error, ColoredText::error(self.title.as_str())),
        };

        let mut out = format!(
            "\n{} {}\n",
            icon.colored(supports_color, supports_unicode),
            title.bold().render(supports_color)
        );

        for (label, count) in &self.stats {
            out.push_str(&format!("  {} {}\n", count, label));
        }
        for info in &self.infos {
            out.push_str(&format!(
                "  {} {}\n",
                Icon::Success.colored(supports_color, supports_unicode),
                info
            ));
        }
        for warning in &self.warnings {
            out.push_str(&format!(
                "  {} {}\n",
                Icon::Warning.colored(supports_color, supports_unicode),
                warning
            ));
        }
        if let Some(next_step) = &self.next_step {
            out.push_str(&format!(
                "  {} {} {}\n",
                Icon::Arrow.colored(supports_color, supports_unicode),
                ColoredText::dim("Next:").render(supports_color),
                next_step
            ));
        }
        out
    }
}
