use std::sync::Arc;
use std::time::Duration;

use actix_web::http::Method;
use actix_web::middleware::{Condition, DefaultHeaders, Logger};
use actix_web::web::{self, Data, PayloadConfig, ServiceConfig};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use log::{info, warn};
use openssl::ssl::SslAcceptorBuilder;
use sd_notify::NotifyState;

use super::context::{BookingContext, DrinksContext};
use super::handlers::{artists, drinks, healthz, shows, venues};
use super::response::Response;

/// Which deployment a server runs, with its context.
#[derive(Clone)]
pub enum RestfulApp {
    Booking(Arc<BookingContext>),
    Drinks(Arc<DrinksContext>),
}

impl RestfulApp {
    const HEALTHZ_PATH: &str = "/healthz";

    /// Registers the routes and shared state of the deployment.
    pub fn configure(&self, cfg: &mut ServiceConfig) {
        cfg.service(resource(Self::HEALTHZ_PATH).route(web::get().to(healthz::healthz)));

        match self {
            RestfulApp::Booking(ctx) => {
                cfg.app_data(Data::from(ctx.clone()));
                Self::configure_booking(cfg);
            }
            RestfulApp::Drinks(ctx) => {
                cfg.app_data(Data::from(ctx.clone()));
                Self::configure_drinks(cfg);
            }
        }

        cfg.default_service(web::route().to(default_handler));
    }

    pub fn is_drinks(&self) -> bool {
        matches!(self, RestfulApp::Drinks(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            RestfulApp::Booking(_) => "booking",
            RestfulApp::Drinks(_) => "drinks",
        }
    }

    fn configure_booking(cfg: &mut ServiceConfig) {
        cfg.service(resource("/").route(web::get().to(healthz::home)))
            .service(resource("/venues").route(web::get().to(venues::list)))
            .service(resource("/venues/search").route(web::post().to(venues::search)))
            .service(
                resource("/venues/create")
                    .route(web::get().to(venues::create_form))
                    .route(web::post().to(venues::create)),
            )
            .service(
                resource("/venues/{id:\\d+}")
                    .route(web::get().to(venues::detail))
                    .route(web::delete().to(venues::delete)),
            )
            .service(
                resource("/venues/{id:\\d+}/edit")
                    .route(web::get().to(venues::edit_form))
                    .route(web::post().to(venues::edit)),
            )
            .service(resource("/artists").route(web::get().to(artists::list)))
            .service(resource("/artists/search").route(web::post().to(artists::search)))
            .service(
                resource("/artists/create")
                    .route(web::get().to(artists::create_form))
                    .route(web::post().to(artists::create)),
            )
            .service(
                resource("/artists/{id:\\d+}")
                    .route(web::get().to(artists::detail))
                    .route(web::delete().to(artists::delete)),
            )
            .service(
                resource("/artists/{id:\\d+}/edit")
                    .route(web::get().to(artists::edit_form))
                    .route(web::post().to(artists::edit)),
            )
            .service(resource("/shows").route(web::get().to(shows::list)))
            .service(
                resource("/shows/create")
                    .route(web::get().to(shows::create_form))
                    .route(web::post().to(shows::create)),
            );
    }

    fn configure_drinks(cfg: &mut ServiceConfig) {
        cfg.service(
            resource("/drinks")
                .route(web::get().to(drinks::list))
                .route(web::post().to(drinks::create))
                .route(preflight()),
        )
        .service(
            resource("/drinks-detail")
                .route(web::get().to(drinks::detail))
                .route(preflight()),
        )
        .service(
            resource("/drinks/{id:\\d+}")
                .route(web::patch().to(drinks::patch))
                .route(web::delete().to(drinks::delete))
                .route(preflight()),
        );
    }
}

/// A resource answering unsupported methods with a JSON 405.
fn resource(path: &str) -> actix_web::Resource {
    web::resource(path).default_service(web::route().to(method_not_allowed))
}

/// Answers CORS preflight requests. The allow headers themselves come from
/// [`cors_headers`], which wraps every response of the drink API.
fn preflight() -> actix_web::Route {
    web::method(Method::OPTIONS).to(preflight_handler)
}

/// Headers the drink API adds to every response so browser clients on
/// other origins can call it.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add((
            "Access-Control-Allow-Headers",
            "Content-Type,Authorization,true",
        ))
        .add((
            "Access-Control-Allow-Methods",
            "GET,PATCH,POST,DELETE,OPTIONS",
        ))
}

async fn default_handler(req: HttpRequest) -> HttpResponse {
    info!("No route to {} {}", req.method(), req.uri().path());
    Response::not_found().into()
}

async fn preflight_handler() -> HttpResponse {
    HttpResponse::Ok().finish()
}

async fn method_not_allowed() -> HttpResponse {
    Response::method_not_allowed().into()
}

pub struct RestfulServer {
    ssl: Option<SslAcceptorBuilder>,
    app: RestfulApp,

    keep_alive_secs: Option<u64>,
    workers: Option<u64>,

    bind: String,

    payload_limit_mib: usize,
}

impl RestfulServer {
    pub fn new(
        bind: String,
        ssl: Option<SslAcceptorBuilder>,
        app: RestfulApp,
        payload_limit_mib: usize,
    ) -> Self {
        Self {
            ssl,
            app,
            keep_alive_secs: None,
            workers: None,
            bind,
            payload_limit_mib,
        }
    }

    pub fn set_keep_alive_secs(&mut self, keep_alive_secs: u64) {
        self.keep_alive_secs = Some(keep_alive_secs);
    }

    pub fn set_workers(&mut self, workers: u64) {
        self.workers = Some(workers);
    }

    pub async fn run(mut self) -> Result<()> {
        let app = self.app.clone();
        let name = app.name();
        let payload_limit = self.payload_limit_mib * 1024 * 1024;
        let mut srv = HttpServer::new(move || {
            let app = app.clone();
            App::new()
                .app_data(PayloadConfig::new(payload_limit))
                .wrap(Condition::new(app.is_drinks(), cors_headers()))
                .wrap(Logger::default())
                .configure(|cfg| app.configure(cfg))
        });

        if let Some(ssl) = self.ssl.take() {
            info!("Binding to https://{}", self.bind);
            srv = srv.bind_openssl(&self.bind, ssl).context("bind with ssl")?
        } else {
            warn!("Using HTTP (without SSL). THIS IS DANGEROUS, DO NOT USE IN PRODUCTION");
            info!("Binding to http://{}", self.bind);
            srv = srv.bind(&self.bind).context("bind without ssl")?
        };

        if let Some(keep_alive) = self.keep_alive_secs {
            srv = srv.keep_alive(Duration::from_secs(keep_alive));
        }
        if let Some(workers) = self.workers {
            srv = srv.workers(workers as usize);
        }

        sd_notify::notify(true, &[NotifyState::Ready]).context("notify systemd")?;
        info!("Starting {name} server");
        srv.run().await.context("run server")?;

        info!("Server stopped by user");
        Ok(())
    }
}
