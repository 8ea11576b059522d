//! Hosts command handler

use anyhow::Result;

use site_deploy::config::Settings;

use crate::ui::context::UiContext;
use crate::ui::views::hosts::render_hosts;

pub fn cmd_hosts(settings: &Settings, ui: &UiContext) -> Result<()> {
    if ui.json {
        let hosts: Vec<_> = settings
            .hosts
            .iter()
            .map(|(id, host)| {
                serde_json::json!({
                    "id": id,
                    "role": if *id == settings.staging_host { "staging" } else { "live" },
                    "root": host.root.display().to_string(),
                    "transport": host.transport.as_str(),
                    "ssh": host.ssh,
                })
            })
            .collect();
        println!("{}", serde_json::json!({ "event": "hosts", "hosts": hosts }));
        return Ok(());
    }

    print!("{}", render_hosts(settings, ui.color, ui.unicode));
    Ok(())
}
