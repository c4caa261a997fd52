//! Current activity commands.

use std::io::Write;

use harmony_core::device::DeviceSession;

use crate::error::CliError;
use crate::output::write_json;

/// Print the configuration block of the running activity.
///
/// An id the configuration does not know about is a handled failure.
pub async fn run_show_current_activity<S, W>(session: &mut S, out: &mut W) -> Result<(), CliError>
where
    S: DeviceSession + ?Sized,
    W: Write,
{
    let config = session.get_config().await?;
    let current = session.get_current_activity().await?;

    let Some(activity) = config.find_by_id(current) else {
        tracing::error!("current activity {} not found in config", current);
        return Err(CliError::CurrentActivityNotFound(current));
    };

    write_json(out, activity)
}

/// Print only the label of the running activity.
///
/// Prints nothing and succeeds when the id is unknown.
pub async fn run_get_current_activity_name<S, W>(
    session: &mut S,
    out: &mut W,
) -> Result<(), CliError>
where
    S: DeviceSession + ?Sized,
    W: Write,
{
    let config = session.get_config().await?;
    let current = session.get_current_activity().await?;

    for activity in config
        .activity
        .iter()
        .filter(|a| a.numeric_id() == Some(current))
    {
        writeln!(out, "{}", activity.label)?;
    }

    Ok(())
}
