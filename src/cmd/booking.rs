use anyhow::Result;
use clap::Args;

use crate::config::CommonConfig;
use crate::server::config::ServerConfig;
use crate::server::factory::ServerFactory;

use super::{print_config, ConfigArgs, LogArgs};

/// Start the booking site, which lists venues and artists and books shows
/// between them.
#[derive(Args)]
pub struct BookingArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

impl BookingArgs {
    const NAME: &str = "booking";

    pub async fn run(&self) -> Result<()> {
        self.log.init()?;
        let ps = self.config.build_path_set(Self::NAME)?;
        let cfg: ServerConfig = ps.load_config(ServerConfig::default)?;
        if self.config.print_config {
            return print_config(&cfg);
        }

        let factory = ServerFactory::new(cfg)?;
        let srv = factory.build_booking_server()?;
        srv.run().await
    }
}
