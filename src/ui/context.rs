use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use site_deploy::config::{ColorMode, OutputSettings};
use site_deploy::presentation::ColorWhen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        output: &OutputSettings,
    ) -> Self {
        Self::from_caps(json, verbose, cli_color, output, detect_capabilities())
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        output: &OutputSettings,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = output.unicode && caps.supports_unicode;

        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => match output.color {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => caps.supports_color && !caps.is_ci,
            },
        };

        Self {
            json,
            verbose,
            caps,
            color,
            unicode,
        }
    }

    /// Whether a confirmation prompt can be shown
    pub fn can_prompt(&self) -> bool {
        !self.json && self.caps.stdin_is_tty
    }
}
