use actix_web::web::{Bytes, Data, Path};
use actix_web::{HttpRequest, HttpResponse};
use log::info;
use serde::de::DeserializeOwned;

use crate::server::auth::Permission;
use crate::server::context::DrinksContext;
use crate::server::db::{DbError, DrinkRecord};
use crate::server::response::{ApiError, Response};
use crate::types::drink::{CreateDrinkRequest, Drink, DrinksResponse, PatchDrinkRequest};

use super::drinks_response;

fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Body(e.to_string()))
}

fn check_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::Body(String::from("title cannot be empty")));
    }
    Ok(())
}

fn to_drink(record: DrinkRecord) -> Result<Drink, ApiError> {
    let recipe = Drink::decode_recipe(&record.recipe).map_err(|e| {
        DbError::Other(format!("decode recipe of drink {}: {e}", record.id))
    })?;
    Ok(Drink {
        id: record.id,
        title: record.title,
        recipe,
    })
}

fn load_drinks(ctx: &DrinksContext) -> Result<Vec<Drink>, ApiError> {
    let records = ctx.db.with_transaction(|tx| tx.list_drinks())?;
    records.into_iter().map(to_drink).collect()
}

pub async fn list(ctx: Data<DrinksContext>) -> HttpResponse {
    drinks_response(load_drinks(&ctx).map(|drinks| {
        Response::json(DrinksResponse {
            success: true,
            drinks: drinks.iter().map(Drink::short).collect(),
        })
    }))
}

pub async fn detail(req: HttpRequest, ctx: Data<DrinksContext>) -> HttpResponse {
    drinks_response(detail_inner(&req, &ctx).await)
}

async fn detail_inner(req: &HttpRequest, ctx: &DrinksContext) -> Result<Response, ApiError> {
    ctx.authz.require(req, Permission::GetDrinksDetail).await?;

    let drinks = load_drinks(ctx)?;
    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Response::json(DrinksResponse {
        success: true,
        drinks: drinks.iter().map(Drink::long).collect(),
    }))
}

pub async fn create(req: HttpRequest, body: Bytes, ctx: Data<DrinksContext>) -> HttpResponse {
    drinks_response(create_inner(&req, &body, &ctx).await)
}

async fn create_inner(
    req: &HttpRequest,
    body: &[u8],
    ctx: &DrinksContext,
) -> Result<Response, ApiError> {
    ctx.authz.require(req, Permission::PostDrinks).await?;

    let create: CreateDrinkRequest = parse_json(body)?;
    check_title(&create.title)?;

    let recipe = Drink::encode_recipe(&create.recipe);
    let record = ctx
        .db
        .with_transaction(|tx| tx.create_drink(create.title.trim(), &recipe))?;
    info!("Drink {} '{}' created", record.id, record.title);

    let drink = to_drink(record)?;
    Ok(Response::json(DrinksResponse {
        success: true,
        drinks: vec![drink.long()],
    }))
}

pub async fn patch(
    req: HttpRequest,
    id: Path<u64>,
    body: Bytes,
    ctx: Data<DrinksContext>,
) -> HttpResponse {
    drinks_response(patch_inner(&req, id.into_inner(), &body, &ctx).await)
}

async fn patch_inner(
    req: &HttpRequest,
    id: u64,
    body: &[u8],
    ctx: &DrinksContext,
) -> Result<Response, ApiError> {
    ctx.authz.require(req, Permission::PatchDrinks).await?;

    // A missing drink answers 404 even when the body is invalid.
    let patch = parse_json::<PatchDrinkRequest>(body).and_then(|patch| {
        if let Some(title) = patch.title.as_deref() {
            check_title(title)?;
        }
        Ok(patch)
    });

    let result = ctx.db.with_transaction(move |tx| {
        let mut record = tx.get_drink(id)?;
        let patch = match patch {
            Ok(patch) => patch,
            Err(e) => return Ok(Err(e)),
        };

        if let Some(title) = patch.title {
            record.title = title.trim().to_string();
        }
        if let Some(recipe) = patch.recipe {
            record.recipe = Drink::encode_recipe(&recipe);
        }
        tx.update_drink(&record)?;
        Ok(Ok(record))
    });
    let record = result??;
    info!("Drink {id} updated");

    let drink = to_drink(record)?;
    Ok(Response::json(DrinksResponse {
        success: true,
        drinks: vec![drink.long()],
    }))
}

pub async fn delete(req: HttpRequest, id: Path<u64>, ctx: Data<DrinksContext>) -> HttpResponse {
    drinks_response(delete_inner(&req, id.into_inner(), &ctx).await)
}

async fn delete_inner(
    req: &HttpRequest,
    id: u64,
    ctx: &DrinksContext,
) -> Result<Response, ApiError> {
    ctx.authz.require(req, Permission::DeleteDrinks).await?;

    ctx.db.with_transaction(|tx| tx.delete_drink(id))?;
    info!("Drink {id} deleted");

    Ok(Response::deleted(id))
}
