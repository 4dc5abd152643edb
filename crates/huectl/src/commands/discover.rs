//! `huectl discover`: find a bridge via mDNS and save its address.

use std::time::Duration;

use huectl_core::Bridge;

use crate::cli::{DiscoverArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{BridgeController, util};

fn detail(bridge: &Bridge) -> String {
    let mut lines = vec![
        format!("Bridge:    {}", bridge.id),
        format!("Address:   {}", bridge.internal_ip),
        format!("Port:      {}", bridge.port),
    ];
    if let Some(ref full_id) = bridge.bridge_id {
        lines.push(format!("Bridge ID: {full_id}"));
    }
    lines.join("\n")
}

pub async fn handle(
    controller: &mut BridgeController,
    args: &DiscoverArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let timeout = (args.wait > 0).then(|| Duration::from_secs(args.wait));
    let spinner = util::spinner("Searching for Hue bridges", global.quiet);

    let result = tokio::select! {
        result = controller.discover(timeout) => result,
        _ = tokio::signal::ctrl_c() => {
            spinner.finish_and_clear();
            return Err(CliError::Cancelled { operation: "Discovery".into() });
        }
    };
    spinner.finish_and_clear();

    let Some(bridge) = result? else {
        return Err(CliError::BridgeNotFound);
    };

    let out = output::render_single(&global.output, &bridge, detail, |b| {
        b.internal_ip.to_string()
    });
    output::print_output(&out, global.quiet);

    if !global.quiet && matches!(global.output, OutputFormat::Table) {
        let color = output::should_color(&global.color);
        let saved = format!("Saved to {}", controller.store().path().display());
        eprintln!("{}", output::paint_success(&saved, color));
    }
    Ok(())
}
