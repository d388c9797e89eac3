mod artist;
mod drink;
mod show;
mod venue;

pub mod config;
pub mod factory;

use std::path::Path;

use rusqlite::Connection as RawConnection;
use rusqlite::Transaction as RawTransaction;

use super::{
    ArtistRecord, Connection, DbResult, DrinkRecord, ShowDetailRecord, ShowRecord, Transaction,
    VenueRecord,
};

/// SQLite-based database implementation. Supports both file-based and
/// in-memory databases.
pub struct Sqlite {
    conn: RawConnection,
}

/// SQLite transaction for executing database operations
pub struct SqliteTransaction<'a> {
    tx: RawTransaction<'a>,
}

impl Sqlite {
    /// Opens a SQLite database file. Creates one if it doesn't exist.
    /// Also initializes all required database tables.
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = RawConnection::open(path)?;
        Self::init(&conn)?;
        Ok(Self { conn })
    }

    /// Creates a new in-memory database. Database content will be lost when the program exits.
    pub fn memory() -> DbResult<Self> {
        let conn = RawConnection::open_in_memory()?;
        Self::init(&conn)?;
        Ok(Self { conn })
    }

    fn init(conn: &RawConnection) -> DbResult<()> {
        // Show rows cascade with their venue and artist only when foreign
        // keys are enforced, which sqlite does per connection.
        conn.pragma_update(None, "foreign_keys", "ON")?;

        drink::create_drink_tables(conn)?;
        venue::create_venue_tables(conn)?;
        artist::create_artist_tables(conn)?;
        show::create_show_tables(conn)?;
        Ok(())
    }
}

impl<'a> Connection<'a, SqliteTransaction<'a>> for Sqlite {
    fn transaction(&'a mut self) -> DbResult<SqliteTransaction<'a>> {
        let tx = self.conn.transaction()?;
        Ok(SqliteTransaction { tx })
    }
}

impl Transaction for SqliteTransaction<'_> {
    fn create_drink(&self, title: &str, recipe: &str) -> DbResult<DrinkRecord> {
        drink::create_drink(&self.tx, title, recipe)
    }

    fn get_drink(&self, id: u64) -> DbResult<DrinkRecord> {
        drink::get_drink(&self.tx, id)
    }

    fn list_drinks(&self) -> DbResult<Vec<DrinkRecord>> {
        drink::list_drinks(&self.tx)
    }

    fn update_drink(&self, record: &DrinkRecord) -> DbResult<()> {
        drink::update_drink(&self.tx, record)
    }

    fn delete_drink(&self, id: u64) -> DbResult<()> {
        drink::delete_drink(&self.tx, id)
    }

    fn reset_drinks(&self, drinks: &[(&str, &str)]) -> DbResult<()> {
        drink::reset_drinks(&self.tx, drinks)
    }

    fn create_venue(&self, record: &VenueRecord) -> DbResult<u64> {
        venue::create_venue(&self.tx, record)
    }

    fn get_venue(&self, id: u64) -> DbResult<VenueRecord> {
        venue::get_venue(&self.tx, id)
    }

    fn list_venues(&self) -> DbResult<Vec<VenueRecord>> {
        venue::list_venues(&self.tx)
    }

    fn search_venues(&self, term: &str) -> DbResult<Vec<VenueRecord>> {
        venue::search_venues(&self.tx, term)
    }

    fn update_venue(&self, record: &VenueRecord) -> DbResult<()> {
        venue::update_venue(&self.tx, record)
    }

    fn delete_venue(&self, id: u64) -> DbResult<()> {
        venue::delete_venue(&self.tx, id)
    }

    fn create_artist(&self, record: &ArtistRecord) -> DbResult<u64> {
        artist::create_artist(&self.tx, record)
    }

    fn get_artist(&self, id: u64) -> DbResult<ArtistRecord> {
        artist::get_artist(&self.tx, id)
    }

    fn list_artists(&self) -> DbResult<Vec<ArtistRecord>> {
        artist::list_artists(&self.tx)
    }

    fn search_artists(&self, term: &str) -> DbResult<Vec<ArtistRecord>> {
        artist::search_artists(&self.tx, term)
    }

    fn update_artist(&self, record: &ArtistRecord) -> DbResult<()> {
        artist::update_artist(&self.tx, record)
    }

    fn delete_artist(&self, id: u64) -> DbResult<()> {
        artist::delete_artist(&self.tx, id)
    }

    fn create_show(&self, record: &ShowRecord) -> DbResult<u64> {
        show::create_show(&self.tx, record)
    }

    fn list_shows(&self) -> DbResult<Vec<ShowDetailRecord>> {
        show::list_shows(&self.tx)
    }

    fn list_venue_shows(&self, venue_id: u64) -> DbResult<Vec<ShowDetailRecord>> {
        show::list_venue_shows(&self.tx, venue_id)
    }

    fn list_artist_shows(&self, artist_id: u64) -> DbResult<Vec<ShowDetailRecord>> {
        show::list_artist_shows(&self.tx, artist_id)
    }

    fn count_venue_upcoming_shows(&self, venue_id: u64, now: i64) -> DbResult<u64> {
        show::count_venue_upcoming_shows(&self.tx, venue_id, now)
    }

    fn count_artist_upcoming_shows(&self, artist_id: u64, now: i64) -> DbResult<u64> {
        show::count_artist_upcoming_shows(&self.tx, artist_id, now)
    }

    fn commit(self) -> DbResult<()> {
        self.tx.commit()?;
        Ok(())
    }

    fn rollback(self) -> DbResult<()> {
        self.tx.rollback()?;
        Ok(())
    }
}

/// Whether `name` contains `term`, ignoring case in every script. SQLite
/// only folds ASCII, so searches filter in Rust.
fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

fn encode_genres(genres: &[String]) -> String {
    serde_json::to_string(genres).unwrap_or_else(|_| String::from("[]"))
}

fn decode_genres(idx: usize, genres: String) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(&genres).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
