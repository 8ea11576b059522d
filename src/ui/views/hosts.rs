use site_deploy::config::Settings;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_hosts(settings: &Settings, supports_color: bool, supports_unicode: bool) -> String {
    if settings.hosts.is_empty() {
        return format!(
            "No hosts configured\n{}\n",
            ColoredText::dim("Add [hosts.<id>] sections to site-deploy.toml").render(supports_color)
        );
    }

    let mut out = String::new();
    for (id, host) in &settings.hosts {
        let role = if *id == settings.staging_host {
            ColoredText::info("staging").render(supports_color)
        } else {
            ColoredText::success("live").render(supports_color)
        };
        let via = match &host.ssh {
            Some(destination) => format!("{} {}", host.transport.as_str(), destination),
            None => host.transport.as_str().to_string(),
        };
        out.push_str(&format!(
            "{} {} [{}]\n  {} {} via {}\n",
            Icon::Host.colored(supports_color, supports_unicode),
            ColoredText::info(id.as_str()).bold().render(supports_color),
            role,
            Icon::Arrow.colored(supports_color, supports_unicode),
            host.root.display(),
            via
        ));
    }
    out
}
