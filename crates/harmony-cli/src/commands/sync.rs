//! sync command implementation.

use harmony_core::device::DeviceSession;

use crate::error::CliError;

pub async fn run_sync<S>(session: &mut S) -> Result<(), CliError>
where
    S: DeviceSession + ?Sized,
{
    session.sync().await?;
    tracing::debug!("sync requested");
    Ok(())
}
