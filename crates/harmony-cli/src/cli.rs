//! CLI argument definitions using clap.

use std::fmt;

use clap::{Args, Parser, Subcommand};
use harmony_core::device::DEFAULT_PORT;

use crate::logging::LogLevel;

/// Harmony CLI - query and control a Logitech Harmony hub
#[derive(Parser, Debug)]
#[command(name = "harmony")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Logging level to print to the console
    #[arg(long, value_enum, default_value = "INFO", env = "HARMONY_LOGLEVEL", ignore_case = true)]
    pub loglevel: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection parameters shared by every sub-command.
#[derive(Args, Clone)]
pub struct CommonArgs {
    /// Logitech username in the form of an email address
    #[arg(long, env = "HARMONY_EMAIL")]
    pub email: String,

    /// Logitech password
    #[arg(long, env = "HARMONY_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// IP address of the Harmony device
    #[arg(long = "harmony_ip", env = "HARMONY_IP")]
    pub harmony_ip: String,

    /// Network port that the Harmony is listening on
    #[arg(long = "harmony_port", env = "HARMONY_PORT", default_value_t = DEFAULT_PORT)]
    pub harmony_port: u16,
}

impl fmt::Debug for CommonArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommonArgs")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("harmony_ip", &self.harmony_ip)
            .field("harmony_port", &self.harmony_port)
            .finish()
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the Harmony device configuration
    #[command(name = "show_config")]
    ShowConfig,

    /// Print the current activity config
    #[command(name = "show_current_activity")]
    ShowCurrentActivity,

    /// Switch to a different activity
    #[command(name = "start_activity")]
    StartActivity(StartActivityArgs),

    /// Sync the Harmony
    #[command(name = "sync")]
    Sync,

    /// Print the label of the current activity
    #[command(name = "get_current_activity_name")]
    GetCurrentActivityName,
}

#[derive(Args, Debug, Clone)]
pub struct StartActivityArgs {
    /// Activity to switch to, id or label
    pub activity: String,
}
