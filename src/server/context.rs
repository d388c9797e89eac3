use std::sync::Arc;

use super::auth::Authorizer;
use super::db::Database;

/// Shared state of the booking site.
pub struct BookingContext {
    pub db: Arc<Database>,
}

/// Shared state of the drink API.
pub struct DrinksContext {
    pub db: Arc<Database>,
    pub authz: Authorizer,
}

