//! show_config command implementation.

use std::io::Write;

use harmony_core::device::DeviceSession;

use crate::error::CliError;
use crate::output::write_json;

/// Print the hub configuration as JSON.
pub async fn run_show_config<S, W>(session: &mut S, out: &mut W) -> Result<(), CliError>
where
    S: DeviceSession + ?Sized,
    W: Write,
{
    let config = session.get_config().await?;
    write_json(out, &config)
}
