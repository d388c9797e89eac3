use actix_web::web::{Bytes, Data, Path};
use actix_web::HttpResponse;
use log::info;

use crate::server::context::BookingContext;
use crate::server::db::ArtistRecord;
use crate::server::response::{ApiError, Response, Surface};
use crate::time::{current_timestamp, format_show_time};
use crate::types::artist::{ArtistDetail, ArtistForm, ArtistItem, ArtistShow, ArtistsResponse};
use crate::types::form::{FormData, FormTemplate};
use crate::types::response::{SearchItem, SearchResponse};

use super::{booking_response, split_shows};

pub async fn list(ctx: Data<BookingContext>) -> HttpResponse {
    let result = ctx.db.with_transaction(|tx| tx.list_artists());
    booking_response(result.map_err(ApiError::from).map(|artists| {
        let artists = artists
            .into_iter()
            .map(|artist| ArtistItem {
                id: artist.id,
                name: artist.name,
            })
            .collect();
        Response::json(ArtistsResponse {
            success: true,
            artists,
        })
    }))
}

pub async fn search(body: Bytes, ctx: Data<BookingContext>) -> HttpResponse {
    let form = FormData::parse(&body);
    let search_term = form.get("search_term").unwrap_or_default().to_string();

    let now = current_timestamp();
    let result = ctx.db.with_transaction(|tx| {
        let artists = tx.search_artists(&search_term)?;
        let mut data = Vec::with_capacity(artists.len());
        for artist in artists {
            data.push(SearchItem {
                num_upcoming_shows: tx.count_artist_upcoming_shows(artist.id, now)?,
                id: artist.id,
                name: artist.name,
            });
        }
        Ok(data)
    });

    booking_response(result.map_err(ApiError::from).map(|data| {
        Response::json(SearchResponse {
            success: true,
            count: data.len(),
            data,
            search_term,
        })
    }))
}

pub async fn detail(id: Path<u64>, ctx: Data<BookingContext>) -> HttpResponse {
    let id = id.into_inner();
    let now = current_timestamp();
    let result = ctx.db.with_transaction(|tx| {
        let artist = tx.get_artist(id)?;
        let shows = tx.list_artist_shows(id)?;
        Ok((artist, shows))
    });

    booking_response(result.map_err(ApiError::from).map(|(artist, shows)| {
        let (past_shows, upcoming_shows) = split_shows(shows, now, |show| ArtistShow {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            venue_image_link: show.venue_image_link,
            start_time: format_show_time(show.start_time),
        });
        Response::json(ArtistDetail {
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }))
}

pub async fn create_form() -> HttpResponse {
    Response::json(FormTemplate::new(ArtistForm::default())).into()
}

pub async fn create(body: Bytes, ctx: Data<BookingContext>) -> HttpResponse {
    let form = FormData::parse(&body);
    let name = form.get("name").unwrap_or_default().to_string();

    let result = ArtistForm::from_form(&form)
        .map_err(ApiError::from)
        .and_then(|artist| {
            let record = ArtistRecord::from_form(0, artist);
            let id = ctx.db.with_transaction(|tx| tx.create_artist(&record))?;
            Ok(id)
        });

    match result {
        Ok(id) => {
            info!("Artist {id} '{name}' listed");
            Response::message(format!("Artist {name} was successfully listed!")).into()
        }
        Err(err) => {
            let message = format!("An error occurred. Artist {name} could not be listed.");
            Response::api_error_with(&err, Surface::Booking, message).into()
        }
    }
}

pub async fn delete(id: Path<u64>, ctx: Data<BookingContext>) -> HttpResponse {
    let id = id.into_inner();
    let result = ctx.db.with_transaction(|tx| tx.delete_artist(id));
    booking_response(result.map_err(ApiError::from).map(|_| {
        info!("Artist {id} deleted");
        Response::deleted(id)
    }))
}

pub async fn edit_form(id: Path<u64>, ctx: Data<BookingContext>) -> HttpResponse {
    let id = id.into_inner();
    let result = ctx.db.with_transaction(|tx| tx.get_artist(id));
    booking_response(
        result
            .map_err(ApiError::from)
            .map(|artist| Response::json(FormTemplate::edit(id, artist.to_form()))),
    )
}

pub async fn edit(id: Path<u64>, body: Bytes, ctx: Data<BookingContext>) -> HttpResponse {
    let id = id.into_inner();
    let form = FormData::parse(&body);
    let name = form.get("name").unwrap_or_default().to_string();

    let result = ArtistForm::from_form(&form)
        .map_err(ApiError::from)
        .and_then(|artist| {
            let record = ArtistRecord::from_form(id, artist);
            ctx.db.with_transaction(|tx| tx.update_artist(&record))?;
            Ok(())
        });

    match result {
        Ok(()) => Response::message(format!("Artist {name} was successfully updated!")).into(),
        Err(err) => {
            let message = format!("An error occurred. Artist {name} could not be updated.");
            Response::api_error_with(&err, Surface::Booking, message).into()
        }
    }
}
