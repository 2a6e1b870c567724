use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use weather_panel::{HostState, PanelSettings, WeatherPanel, logging};

const USAGE: &str = "usage: weather-panel <panel-config.json> <host-state.json> [--json]";

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn main() -> Result<()> {
    let mut json_output = false;
    let mut paths = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json_output = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => paths.push(PathBuf::from(arg)),
        }
    }
    let [config_path, state_path] = paths.as_slice() else {
        bail!(USAGE);
    };

    let settings = PanelSettings::load()?;
    logging::init(&settings.logging)?;

    let mut panel = WeatherPanel::new(&settings);
    panel
        .set_config(read_json(config_path)?)
        .context("Panel configuration rejected")?;

    let state: HostState = serde_json::from_value(read_json(state_path)?)
        .with_context(|| format!("{} is not a host state", state_path.display()))?;

    tracing::info!(
        entities = state.states.len(),
        language = state.active_language(),
        "Rendering panel"
    );

    let Some(view) = panel.update(state) else {
        bail!("Panel produced no view");
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{view}");
    }
    Ok(())
}
