use actix_web::web::{Bytes, Data, Path};
use actix_web::HttpResponse;
use log::info;

use crate::server::context::BookingContext;
use crate::server::db::VenueRecord;
use crate::server::response::{ApiError, Response, Surface};
use crate::time::{current_timestamp, format_show_time};
use crate::types::form::{FormData, FormTemplate};
use crate::types::response::{SearchItem, SearchResponse};
use crate::types::venue::{Area, AreasResponse, VenueDetail, VenueForm, VenueShow, VenueSummary};

use super::{booking_response, split_shows};

/// Groups venues, already ordered by state then city, into one area per
/// distinct (city, state) pair.
pub fn group_areas(venues: Vec<(VenueRecord, u64)>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    for (venue, num_upcoming_shows) in venues {
        let summary = VenueSummary {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows,
        };
        match areas.last_mut() {
            Some(area) if area.city == venue.city && area.state == venue.state => {
                area.venues.push(summary)
            }
            _ => areas.push(Area {
                city: venue.city,
                state: venue.state,
                venues: vec![summary],
            }),
        }
    }
    areas
}

pub async fn list(ctx: Data<BookingContext>) -> HttpResponse {
    let now = current_timestamp();
    let result = ctx.db.with_transaction(|tx| {
        let venues = tx.list_venues()?;
        let mut counted = Vec::with_capacity(venues.len());
        for venue in venues {
            let count = tx.count_venue_upcoming_shows(venue.id, now)?;
            counted.push((venue, count));
        }
        Ok(counted)
    });

    booking_response(result.map_err(ApiError::from).map(|venues| {
        Response::json(AreasResponse {
            success: true,
            areas: group_areas(venues),
        })
    }))
}

pub async fn search(body: Bytes, ctx: Data<BookingContext>) -> HttpResponse {
    let form = FormData::parse(&body);
    let search_term = form.get("search_term").unwrap_or_default().to_string();

    let now = current_timestamp();
    let result = ctx.db.with_transaction(|tx| {
        let venues = tx.search_venues(&search_term)?;
        let mut data = Vec::with_capacity(venues.len());
        for venue in venues {
            data.push(SearchItem {
                num_upcoming_shows: tx.count_venue_upcoming_shows(venue.id, now)?,
                id: venue.id,
                name: venue.name,
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
        let venue = tx.get_venue(id)?;
        let shows = tx.list_venue_shows(id)?;
        Ok((venue, shows))
    });

    booking_response(result.map_err(ApiError::from).map(|(venue, shows)| {
        let (past_shows, upcoming_shows) = split_shows(shows, now, |show| VenueShow {
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: format_show_time(show.start_time),
        });
        Response::json(VenueDetail {
            id: venue.id,
            name: venue.name,
            genres: venue.genres,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }))
}

pub async fn create_form() -> HttpResponse {
    Response::json(FormTemplate::new(VenueForm::default())).into()
}

pub async fn create(body: Bytes, ctx: Data<BookingContext>) -> HttpResponse {
    let form = FormData::parse(&body);
    let name = form.get("name").unwrap_or_default().to_string();

    let result = VenueForm::from_form(&form)
        .map_err(ApiError::from)
        .and_then(|venue| {
            let record = VenueRecord::from_form(0, venue);
            let id = ctx.db.with_transaction(|tx| tx.create_venue(&record))?;
            Ok(id)
        });

    match result {
        Ok(id) => {
            info!("Venue {id} '{name}' listed");
            Response::message(format!("Venue {name} was successfully listed!")).into()
        }
        Err(err) => {
            let message = format!("An error occurred. Venue {name} could not be listed.");
            Response::api_error_with(&err, Surface::Booking, message).into()
        }
    }
}

pub async fn delete(id: Path<u64>, ctx: Data<BookingContext>) -> HttpResponse {
    let id = id.into_inner();
    let result = ctx.db.with_transaction(|tx| tx.delete_venue(id));
    booking_response(result.map_err(ApiError::from).map(|_| {
        info!("Venue {id} deleted");
        Response::deleted(id)
    }))
}

pub async fn edit_form(id: Path<u64>, ctx: Data<BookingContext>) -> HttpResponse {
    let id = id.into_inner();
    let result = ctx.db.with_transaction(|tx| tx.get_venue(id));
    booking_response(
        result
            .map_err(ApiError::from)
            .map(|venue| Response::json(FormTemplate::edit(id, venue.to_form()))),
    )
}

pub async fn edit(id: Path<u64>, body: Bytes, ctx: Data<BookingContext>) -> HttpResponse {
    let id = id.into_inner();
    let form = FormData::parse(&body);
    let name = form.get("name").unwrap_or_default().to_string();

    let result = VenueForm::from_form(&form)
        .map_err(ApiError::from)
        .and_then(|venue| {
            let record = VenueRecord::from_form(id, venue);
            ctx.db.with_transaction(|tx| tx.update_venue(&record))?;
            Ok(())
        });

    match result {
        Ok(()) => Response::message(format!("Venue {name} was successfully updated!")).into(),
        Err(err) => {
            let message = format!("An error occurred. Venue {name} could not be updated.");
            Response::api_error_with(&err, Surface::Booking, message).into()
        }
    }
}
