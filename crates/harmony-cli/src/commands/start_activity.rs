//! start_activity command implementation.

use harmony_core::device::DeviceSession;
use harmony_core::types::ActivityRef;

use crate::error::CliError;

/// Resolve `reference` against the hub configuration and switch to it.
pub async fn run_start_activity<S>(session: &mut S, reference: &ActivityRef) -> Result<(), CliError>
where
    S: DeviceSession + ?Sized,
{
    let config = session.get_config().await?;

    let Some(activity) = config.resolve(reference) else {
        tracing::error!("could not find activity: {}", reference);
        return Err(CliError::ActivityNotFound(reference.to_string()));
    };

    session.start_activity(&activity.id).await?;

    tracing::info!(
        "started activity: '{}' of id: '{}'",
        activity.label,
        activity.id
    );

    Ok(())
}
