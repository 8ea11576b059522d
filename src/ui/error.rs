use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Human rendering of a command failure, cause chain included
pub fn render_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(format!("Error: {err}")).bold().render(supports_color)
    );
    for cause in err.chain().skip(1) {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            cause
        ));
    }
    out
}

/// NDJSON record for a command failure
pub fn error_json(err: &anyhow::Error) -> serde_json::Value {
    serde_json::json!({
        "event": "error",
        "message": err.to_string(),
        "causes": err.chain().skip(1).map(|c| c.to_string()).collect::<Vec<_>>(),
    })
}
