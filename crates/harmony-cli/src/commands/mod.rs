//! Command implementations.
//!
//! Each handler runs against an already open session and never disconnects
//! it; that is the orchestrator's job.

pub mod current_activity;
pub mod show_config;
pub mod start_activity;
pub mod sync;

use std::io::Write;

use harmony_core::device::DeviceSession;
use harmony_core::types::ActivityRef;

use crate::cli::Commands;
use crate::error::CliError;

pub use current_activity::{run_get_current_activity_name, run_show_current_activity};
pub use show_config::run_show_config;
pub use start_activity::run_start_activity;
pub use sync::run_sync;

/// Run exactly one command on `session`.
pub async fn execute<S, W>(session: &mut S, command: Commands, out: &mut W) -> Result<(), CliError>
where
    S: DeviceSession + ?Sized,
    W: Write,
{
    match command {
        Commands::ShowConfig => run_show_config(session, out).await,
        Commands::ShowCurrentActivity => run_show_current_activity(session, out).await,
        Commands::GetCurrentActivityName => run_get_current_activity_name(session, out).await,
        Commands::StartActivity(args) => {
            run_start_activity(session, &ActivityRef::from(args.activity)).await
        }
        Commands::Sync => run_sync(session).await,
    }
}
