//! `huectl register`: link-button pairing.

use huectl_core::{RegistrationOutcome, device_type};

use crate::cli::{GlobalOpts, RegisterArgs};
use crate::error::CliError;
use crate::output;

use super::{BridgeController, util};

pub async fn handle(
    controller: &mut BridgeController,
    args: &RegisterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let device_type = device_type(args.device_name.as_deref());
    tracing::debug!(%device_type, "requesting application key");

    let registration = match controller.register(&device_type).await {
        Ok(registration) => registration,
        Err(err) => {
            if let Some(body) = err.body() {
                util::echo_response(body);
            }
            return Err(err.into());
        }
    };

    util::echo_response(&registration.response_body);

    match registration.outcome {
        RegistrationOutcome::Pending => Err(CliError::LinkButtonNotPressed),
        RegistrationOutcome::Paired(_) => {
            if !global.quiet {
                let color = output::should_color(&global.color);
                let saved = format!(
                    "Registered as {device_type}; key saved to {}",
                    controller.store().path().display()
                );
                eprintln!("{}", output::paint_success(&saved, color));
            }
            Ok(())
        }
    }
}
