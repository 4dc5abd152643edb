//! Light command handlers: `huectl list` and `huectl lights on|off`.

use tabled::Tabled;

use huectl_core::Device;

use crate::cli::{GlobalOpts, LightTarget, LightsArgs, LightsCommand};
use crate::error::CliError;
use crate::output;

use super::BridgeController;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LightRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "V1 ID")]
    id_v1: String,
    #[tabled(rename = "Mirek")]
    mirek: String,
    #[tabled(rename = "Gamut")]
    gamut: String,
}

impl From<&Device> for LightRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            state: d.state_summary(),
            id_v1: d.id_v1.clone().unwrap_or_default(),
            mirek: d
                .color_temperature_mirek
                .map(|m| m.to_string())
                .unwrap_or_default(),
            gamut: d.gamut_type.clone().unwrap_or_default(),
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

/// `huectl list`
pub async fn list(controller: &BridgeController, global: &GlobalOpts) -> Result<(), CliError> {
    let devices = controller.list_devices().await?;
    let out = output::render_list(
        &global.output,
        &devices,
        |d: &Device| LightRow::from(d),
        |d| d.id.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

/// `huectl lights on|off`
pub async fn handle(
    controller: &BridgeController,
    args: LightsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (target, on) = match args.command {
        LightsCommand::On(target) => (target, true),
        LightsCommand::Off(target) => (target, false),
    };

    let light_id = resolve_target(controller, target).await?;
    controller.set_light_state(&light_id, on).await?;

    if !global.quiet {
        let color = output::should_color(&global.color);
        let state = output::paint_power(if on { "on" } else { "off" }, on, color);
        eprintln!("Light {light_id} turned {state}");
    }
    Ok(())
}

/// An explicit id wins; otherwise the name is resolved against a fresh listing.
async fn resolve_target(
    controller: &BridgeController,
    target: LightTarget,
) -> Result<String, CliError> {
    match (target.light_id, target.name) {
        (Some(id), _) => Ok(id),
        (None, Some(name)) => Ok(controller.resolve_light_id(&name).await?),
        (None, None) => Err(CliError::Validation {
            field: "light".into(),
            reason: "pass a light name or --light-id".into(),
        }),
    }
}
