pub mod artists;
pub mod drinks;
pub mod healthz;
pub mod shows;
pub mod venues;

use actix_web::HttpResponse;

use crate::server::db::ShowDetailRecord;
use crate::server::response::{ApiError, Response, Surface};

/// Splits shows into those started before `now` and those starting after
/// it. A show starting exactly at `now` is in neither list.
fn split_shows<T, F>(shows: Vec<ShowDetailRecord>, now: i64, f: F) -> (Vec<T>, Vec<T>)
where
    F: Fn(ShowDetailRecord) -> T,
{
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for show in shows {
        if show.start_time < now {
            past.push(f(show));
        } else if show.start_time > now {
            upcoming.push(f(show));
        }
    }
    (past, upcoming)
}

fn booking_response(result: Result<Response, ApiError>) -> HttpResponse {
    match result {
        Ok(resp) => resp.into(),
        Err(err) => Response::api_error(&err, Surface::Booking).into(),
    }
}

fn drinks_response(result: Result<Response, ApiError>) -> HttpResponse {
    match result {
        Ok(resp) => resp.into(),
        Err(err) => Response::api_error(&err, Surface::Drinks).into(),
    }
}
