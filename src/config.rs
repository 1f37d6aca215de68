//! Configuration and CLI argument handling

use clap::Parser;

use crate::{
    constants::{DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_MINUTES},
    state::{clamp_break_minutes, clamp_focus_minutes},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "focus-swift")]
#[command(about = "A Pomodoro timer daemon that locks attention during breaks")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Focus duration in minutes (1-60)
    #[arg(short, long, default_value_t = DEFAULT_FOCUS_MINUTES)]
    pub focus: u32,

    /// Break duration in minutes (1-30)
    #[arg(short = 'b', long = "break-minutes", default_value_t = DEFAULT_BREAK_MINUTES)]
    pub break_minutes: u32,

    /// Number of displays to cover instead of detecting them
    #[arg(long)]
    pub displays: Option<usize>,

    /// Shell command that blocks keyboard and mouse input
    #[arg(long, requires = "unblock_cmd")]
    pub block_cmd: Option<String>,

    /// Shell command that restores keyboard and mouse input
    #[arg(long, requires = "block_cmd")]
    pub unblock_cmd: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn focus_minutes(&self) -> u32 {
        clamp_focus_minutes(self.focus)
    }

    pub fn break_minutes(&self) -> u32 {
        clamp_break_minutes(self.break_minutes)
    }
}
