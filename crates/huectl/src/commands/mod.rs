//! Command dispatch: CLI args -> controller operations -> output formatting.

pub mod config_cmd;
pub mod discover;
pub mod lights;
pub mod register;
pub mod util;

use huectl_config::FileStore;
use huectl_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// The controller as the binary uses it: backed by the YAML config file.
pub type BridgeController = Controller<FileStore>;

/// Dispatch a bridge-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &mut BridgeController,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Discover(args) => discover::handle(controller, &args, global).await,
        Command::Register(args) => register::handle(controller, &args, global).await,
        Command::List => lights::list(controller, global).await,
        Command::Lights(args) => lights::handle(controller, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
