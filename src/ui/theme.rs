use crossterm::style::Color;
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};

/// Design tokens for site-deploy CLI output.
///
/// Only the five semantic colors below are used; icons come from
/// `icons` / `icons_ascii`.
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const PROGRESS: &str = "●";
    pub const ARROW: &str = "↳";

    pub const DEPLOY: &str = "📦";
    pub const ROLLBACK: &str = "↺";
    pub const HOST: &str = "📡";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const PROGRESS: &str = "[..]";
    pub const ARROW: &str = "[>]";

    pub const DEPLOY: &str = "[DEPLOY]";
    pub const ROLLBACK: &str = "[UNDO]";
    pub const HOST: &str = "[HOST]";
}

/// Prompt theme for dialoguer confirmations
pub fn prompt_theme(supports_color: bool) -> Box<dyn Theme> {
    if supports_color {
        Box::new(ColorfulTheme::default())
    } else {
        Box::new(SimpleTheme)
    }
}
