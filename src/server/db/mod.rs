#[cfg(test)]
mod tests;

pub mod config;
pub mod factory;
pub mod sqlite;

use std::cell::RefCell;
use std::sync::Mutex;

use rusqlite::ErrorCode;
use thiserror::Error;

use crate::types::artist::ArtistForm;
use crate::types::venue::VenueForm;

pub use sqlite::Sqlite;
use sqlite::SqliteTransaction;

/// Storage failures, split by how a handler should react to them.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("record not found")]
    NotFound,

    /// Uniqueness, NOT NULL or foreign key violation.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The database could not be opened, or is busy or locked.
    #[error("database unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Other(String),
}

pub type DbResult<T> = Result<T, DbError>;

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound,
            // Ids are bound as u64, one beyond the i64 range cannot name a row.
            rusqlite::Error::ToSqlConversionFailure(_) => DbError::NotFound,
            rusqlite::Error::SqliteFailure(ref e, _) => match e.code {
                ErrorCode::ConstraintViolation => DbError::Constraint(err.to_string()),
                ErrorCode::CannotOpen
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::NotADatabase
                | ErrorCode::ReadOnly
                | ErrorCode::DiskFull
                | ErrorCode::SystemIoFailure => DbError::Unavailable(err.to_string()),
                _ => DbError::Other(err.to_string()),
            },
            _ => DbError::Other(err.to_string()),
        }
    }
}

/// Database connection trait that can create transactions
pub trait Connection<'a, T>
where
    T: Transaction + 'a,
{
    /// Creates a new transaction from the connection
    fn transaction(&'a mut self) -> DbResult<T>;
}

/// Every storage operation either deployment needs. Each call runs inside
/// the transaction handed out by [`Database::with_transaction`].
pub trait Transaction {
    // Drink operations
    fn create_drink(&self, title: &str, recipe: &str) -> DbResult<DrinkRecord>;
    fn get_drink(&self, id: u64) -> DbResult<DrinkRecord>;
    fn list_drinks(&self) -> DbResult<Vec<DrinkRecord>>;
    fn update_drink(&self, drink: &DrinkRecord) -> DbResult<()>;
    fn delete_drink(&self, id: u64) -> DbResult<()>;
    /// Drops every drink, then inserts the given ones.
    fn reset_drinks(&self, drinks: &[(&str, &str)]) -> DbResult<()>;

    // Venue operations
    fn create_venue(&self, venue: &VenueRecord) -> DbResult<u64>;
    fn get_venue(&self, id: u64) -> DbResult<VenueRecord>;
    /// All venues ordered by state, city, then name.
    fn list_venues(&self) -> DbResult<Vec<VenueRecord>>;
    /// Case-insensitive substring match on the venue name.
    fn search_venues(&self, term: &str) -> DbResult<Vec<VenueRecord>>;
    fn update_venue(&self, venue: &VenueRecord) -> DbResult<()>;
    /// Deletes the venue and, through the foreign key, its shows.
    fn delete_venue(&self, id: u64) -> DbResult<()>;

    // Artist operations
    fn create_artist(&self, artist: &ArtistRecord) -> DbResult<u64>;
    fn get_artist(&self, id: u64) -> DbResult<ArtistRecord>;
    /// All artists ordered by name.
    fn list_artists(&self) -> DbResult<Vec<ArtistRecord>>;
    fn search_artists(&self, term: &str) -> DbResult<Vec<ArtistRecord>>;
    fn update_artist(&self, artist: &ArtistRecord) -> DbResult<()>;
    fn delete_artist(&self, id: u64) -> DbResult<()>;

    // Show operations
    fn create_show(&self, show: &ShowRecord) -> DbResult<u64>;
    /// All shows, newest first.
    fn list_shows(&self) -> DbResult<Vec<ShowDetailRecord>>;
    fn list_venue_shows(&self, venue_id: u64) -> DbResult<Vec<ShowDetailRecord>>;
    fn list_artist_shows(&self, artist_id: u64) -> DbResult<Vec<ShowDetailRecord>>;
    /// Shows of the venue starting strictly after `now`.
    fn count_venue_upcoming_shows(&self, venue_id: u64, now: i64) -> DbResult<u64>;
    /// Shows of the artist starting strictly after `now`.
    fn count_artist_upcoming_shows(&self, artist_id: u64, now: i64) -> DbResult<u64>;

    /// Commits the transaction
    fn commit(self) -> DbResult<()>;
    /// Rolls back the transaction
    fn rollback(self) -> DbResult<()>;
}

/// A drink row. The recipe is kept as its serialized JSON text.
#[derive(Debug, Clone, PartialEq)]
pub struct DrinkRecord {
    pub id: u64,
    pub title: String,
    pub recipe: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VenueRecord {
    pub id: u64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistRecord {
    pub id: u64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowRecord {
    pub id: u64,
    pub artist_id: u64,
    pub venue_id: u64,
    /// Unix seconds
    pub start_time: i64,
}

/// A show joined with the names and images of its venue and artist.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowDetailRecord {
    pub id: u64,
    pub start_time: i64,
    pub venue_id: u64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: u64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

impl VenueRecord {
    pub fn from_form(id: u64, form: VenueForm) -> Self {
        Self {
            id,
            name: form.name,
            city: form.city,
            state: form.state,
            address: form.address,
            phone: form.phone,
            genres: form.genres,
            image_link: form.image_link,
            facebook_link: form.facebook_link,
            website: form.website,
            seeking_talent: form.seeking_talent,
            seeking_description: form.seeking_description,
        }
    }

    pub fn to_form(&self) -> VenueForm {
        VenueForm {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            genres: self.genres.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            website: self.website.clone(),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.clone(),
        }
    }
}

impl ArtistRecord {
    pub fn from_form(id: u64, form: ArtistForm) -> Self {
        Self {
            id,
            name: form.name,
            city: form.city,
            state: form.state,
            phone: form.phone,
            genres: form.genres,
            image_link: form.image_link,
            facebook_link: form.facebook_link,
            website: form.website,
            seeking_venue: form.seeking_venue,
            seeking_description: form.seeking_description,
        }
    }

    pub fn to_form(&self) -> ArtistForm {
        ArtistForm {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            genres: self.genres.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            website: self.website.clone(),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.clone(),
        }
    }
}

/// The storage handle shared by every request of a deployment.
pub struct Database {
    conn: Mutex<RefCell<Sqlite>>,
}

impl Database {
    pub fn new(conn: Sqlite) -> Self {
        Self {
            conn: Mutex::new(RefCell::new(conn)),
        }
    }

    #[cfg(test)]
    pub fn new_test() -> Self {
        let conn = Sqlite::memory().unwrap();
        Self::new(conn)
    }

    /// Runs `f` inside one transaction.
    ///
    /// - If `f` succeeds, the transaction is committed.
    /// - If `f` fails, the transaction is rolled back and the error of `f`
    ///   is returned.
    ///
    /// The connection is released on every path, including commit or
    /// rollback failures.
    pub fn with_transaction<T, F>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&dyn Transaction) -> DbResult<T>,
    {
        let conn = match self.conn.lock() {
            Ok(conn) => conn,
            Err(e) => return Err(DbError::Unavailable(format!("lock connection: {e}"))),
        };
        let mut conn = conn.borrow_mut();
        let tx: SqliteTransaction = conn.transaction()?;

        let result = f(&tx);

        if result.is_ok() {
            tx.commit()?;
        } else {
            tx.rollback()?;
        }

        result
    }
}
