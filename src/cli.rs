use clap::Parser;

/// Weather data backend for the department dashboard
#[derive(Parser, Debug)]
#[command(name = "weatherboard")]
#[command(version)]
pub struct Cli {
    /// Path to the toml configuration file
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    /// Run a single update cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Write the weather icon link table to the output directory and exit
    #[arg(long, conflicts_with = "once")]
    pub icon_links: bool,
}
