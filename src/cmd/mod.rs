mod booking;
mod drinks;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::config::PathSet;
use crate::logs;

#[derive(Parser)]
#[command(author, version = env!("ENCORE_VERSION"), about)]
pub struct App {
    #[command(subcommand)]
    pub commands: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Booking(booking::BookingArgs),
    Drinks(drinks::DrinksArgs),
}

impl App {
    pub async fn run(&self) -> Result<()> {
        match &self.commands {
            Commands::Booking(args) => args.run().await,
            Commands::Drinks(args) => args.run().await,
        }
    }
}

#[derive(Args)]
pub struct ConfigArgs {
    /// The config directory, default is `$ENCORE_CONFIG`, `/etc/encore` as root, or
    /// `~/.config/encore`.
    #[arg(long)]
    pub config_path: Option<PathBuf>,

    /// The data directory, default is `$ENCORE_DATA`, `/var/lib/encore` as root, or
    /// `~/.local/share/encore`.
    #[arg(long)]
    pub data_path: Option<PathBuf>,

    /// Print the completed configuration (JSON) and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl ConfigArgs {
    pub fn build_path_set(&self, name: &str) -> Result<PathSet> {
        PathSet::new(name, self.config_path.clone(), self.data_path.clone())
    }
}

#[derive(Args)]
pub struct LogArgs {
    /// The log level, one of `error`, `warn`, `info`, `debug`.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl LogArgs {
    pub fn init(&self) -> Result<()> {
        logs::init(&self.log_level)
    }
}

fn print_config<T: Serialize>(cfg: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(cfg)?);
    Ok(())
}
