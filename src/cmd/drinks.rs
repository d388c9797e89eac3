use anyhow::Result;
use clap::Args;
use log::info;

use crate::server::config::ServerConfig;
use crate::server::factory::ServerFactory;

use super::{print_config, ConfigArgs, LogArgs};

/// Start the drink menu API. Reads are public, writes and the detailed view
/// require a bearer token granting the matching permission.
#[derive(Args)]
pub struct DrinksArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub log: LogArgs,

    /// Drop every drink and seed the menu with water before serving.
    #[arg(long)]
    pub reset: bool,
}

impl DrinksArgs {
    const NAME: &str = "drinks";

    pub async fn run(&self) -> Result<()> {
        self.log.init()?;
        let ps = self.config.build_path_set(Self::NAME)?;
        let cfg: ServerConfig = ps.load_config(ServerConfig::default_drinks)?;
        if self.config.print_config {
            return print_config(&cfg);
        }

        let factory = ServerFactory::new(cfg)?;
        if self.reset {
            factory.reset_drinks()?;
            info!("Drink table reset");
        }

        let srv = factory.build_drinks_server()?;
        srv.run().await
    }
}
