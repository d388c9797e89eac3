use actix_web::{HttpRequest, HttpResponse};
use chrono::Local;

use crate::server::response::Response;
use crate::time::SHOW_TIME_FORMAT;
use crate::types::healthz::{HealthzResponse, HomeResponse};

pub async fn healthz(req: HttpRequest) -> HttpResponse {
    let local = Local::now();
    let offset = format!("{}", local.offset());
    let now = local.timestamp() as u64;
    let response = HealthzResponse {
        now,
        time_zone: offset,
        client_ip: req.connection_info().peer_addr().map(|a| a.to_string()),
        version: Some(env!("ENCORE_VERSION").to_string()),
    };
    Response::json(response).into()
}

pub async fn home() -> HttpResponse {
    let response = HomeResponse {
        success: true,
        name: String::from("encore booking"),
        version: env!("ENCORE_VERSION").to_string(),
        now: Local::now().format(SHOW_TIME_FORMAT).to_string(),
    };
    Response::json(response).into()
}
