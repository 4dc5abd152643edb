//! Config subcommand handlers.

use std::fmt::Write as _;

use huectl_config::{Config, load_file};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Format config for display, masking keys.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();
    let mut line = |key: &str, value: Option<&str>| {
        let _ = writeln!(out, "{key}: {}", value.unwrap_or("-"));
    };

    line("hue_bridge_ip", cfg.hue_bridge_ip.as_deref());
    line("hue_bridge_id", cfg.hue_bridge_id.as_deref());
    line("hue_application_key", cfg.hue_application_key.as_ref().map(|_| "****"));
    line("hue_client_key", cfg.hue_client_key.as_ref().map(|_| "****"));
    if cfg.hue_username.is_some() {
        line("hue_username", Some("**** (legacy)"));
    }
    line("insecure", Some(if cfg.insecure { "true" } else { "false" }));
    let ca_cert = cfg.ca_cert.as_ref().map(|p| p.display().to_string());
    line("ca_cert", ca_cert.as_deref());
    let timeout = cfg.timeout.map(|t| format!("{t}s"));
    line("timeout", timeout.as_deref());

    out.trim_end().to_owned()
}

/// Copy of the config with secrets replaced, for structured output.
fn redacted(cfg: &Config) -> Config {
    let mask = |v: &Option<String>| v.as_ref().map(|_| "****".to_owned());
    Config {
        hue_application_key: mask(&cfg.hue_application_key),
        hue_client_key: mask(&cfg.hue_client_key),
        hue_username: mask(&cfg.hue_username),
        ..cfg.clone()
    }
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::resolve_config_path(global);
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
        }
        ConfigCommand::Show => {
            let cfg = redacted(&load_file(&path)?);
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |c| {
                c.hue_bridge_ip.clone().unwrap_or_default()
            });
            output::print_output(&out, global.quiet);
        }
    }
    Ok(())
}
