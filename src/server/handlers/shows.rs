use actix_web::web::{Bytes, Data};
use actix_web::HttpResponse;
use log::info;

use crate::server::context::BookingContext;
use crate::server::db::ShowRecord;
use crate::server::response::{ApiError, Response, Surface};
use crate::time::format_show_time;
use crate::types::form::{FormData, FormTemplate};
use crate::types::show::{ShowForm, ShowListing, ShowsResponse};

use super::booking_response;

pub async fn list(ctx: Data<BookingContext>) -> HttpResponse {
    let result = ctx.db.with_transaction(|tx| tx.list_shows());
    booking_response(result.map_err(ApiError::from).map(|shows| {
        let shows = shows
            .into_iter()
            .map(|show| ShowListing {
                venue_id: show.venue_id,
                venue_name: show.venue_name,
                artist_id: show.artist_id,
                artist_name: show.artist_name,
                artist_image_link: show.artist_image_link,
                start_time: format_show_time(show.start_time),
            })
            .collect();
        Response::json(ShowsResponse {
            success: true,
            shows,
        })
    }))
}

pub async fn create_form() -> HttpResponse {
    Response::json(FormTemplate::new(ShowForm::default())).into()
}

pub async fn create(body: Bytes, ctx: Data<BookingContext>) -> HttpResponse {
    let form = FormData::parse(&body);

    let result = ShowForm::from_form(&form)
        .map_err(ApiError::from)
        .and_then(|show| {
            let record = ShowRecord {
                id: 0,
                artist_id: show.artist_id,
                venue_id: show.venue_id,
                start_time: show.start_time,
            };
            let id = ctx.db.with_transaction(|tx| tx.create_show(&record))?;
            Ok(id)
        });

    match result {
        Ok(id) => {
            info!("Show {id} listed");
            Response::message("Show was successfully listed!").into()
        }
        Err(err) => {
            let message = "An error occurred. Show could not be listed.";
            Response::api_error_with(&err, Surface::Booking, message).into()
        }
    }
}
