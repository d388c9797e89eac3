use std::sync::Arc;

use anyhow::{Context, Result};
use openssl::ssl::{SslAcceptor, SslAcceptorBuilder, SslMethod};

use super::auth::factory::AuthFactory;
use super::config::ServerConfig;
use super::context::{BookingContext, DrinksContext};
use super::db::factory::DbFactory;
use super::db::Database;
use super::restful::{RestfulApp, RestfulServer};

/// The water drink seeded by a drink table reset.
const SEED_DRINKS: &[(&str, &str)] = &[("water", r#"[{"name":"water","color":"blue","parts":1}]"#)];

pub struct ServerFactory {
    db: Arc<Database>,
    cfg: ServerConfig,
}

impl ServerFactory {
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        let db_factory = DbFactory::new();
        let db = db_factory.build_db(&cfg.db).context("init database")?;
        Ok(Self { cfg, db })
    }

    pub fn build_booking_server(&self) -> Result<RestfulServer> {
        self.build_server(self.build_booking_app())
    }

    pub fn build_drinks_server(&self) -> Result<RestfulServer> {
        let app = self.build_drinks_app()?;
        self.build_server(app)
    }

    pub fn build_booking_app(&self) -> RestfulApp {
        let ctx = BookingContext {
            db: self.db.clone(),
        };
        RestfulApp::Booking(Arc::new(ctx))
    }

    pub fn build_drinks_app(&self) -> Result<RestfulApp> {
        let auth_cfg = self
            .cfg
            .auth
            .as_ref()
            .context("auth config is required by the drink api")?;
        let authz = AuthFactory::new()
            .build_authorizer(auth_cfg)
            .context("init authorizer")?;
        let ctx = DrinksContext {
            db: self.db.clone(),
            authz,
        };
        Ok(RestfulApp::Drinks(Arc::new(ctx)))
    }

    /// Drops every drink and seeds the table with water.
    pub fn reset_drinks(&self) -> Result<()> {
        self.db
            .with_transaction(|tx| tx.reset_drinks(SEED_DRINKS))
            .context("reset drink table")
    }

    fn build_server(&self, app: RestfulApp) -> Result<RestfulServer> {
        let ssl = self.build_ssl()?;

        let mut srv = RestfulServer::new(self.cfg.bind.clone(), ssl, app, self.cfg.payload_limit_mib);
        if self.cfg.keep_alive_secs > 0 {
            srv.set_keep_alive_secs(self.cfg.keep_alive_secs);
        }
        if self.cfg.workers > 0 {
            srv.set_workers(self.cfg.workers);
        }

        Ok(srv)
    }

    fn build_ssl(&self) -> Result<Option<SslAcceptorBuilder>> {
        if !self.cfg.ssl {
            return Ok(None);
        }

        let mut builder =
            SslAcceptor::mozilla_intermediate(SslMethod::tls()).context("init ssl acceptor")?;

        builder
            .set_private_key_file(&self.cfg.key_path, openssl::ssl::SslFiletype::PEM)
            .context("load ssl key file")?;
        builder
            .set_certificate_chain_file(&self.cfg.cert_path)
            .context("load ssl cert file")?;

        Ok(Some(builder))
    }
}
