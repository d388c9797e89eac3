use rusqlite::{params, Connection, Row, Transaction};

use crate::server::db::{DbError, DbResult, VenueRecord};

use super::{decode_genres, encode_genres, name_matches};

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS venue (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    city TEXT NOT NULL,
    state TEXT NOT NULL,
    address TEXT NOT NULL,
    phone TEXT,
    genres TEXT NOT NULL,
    image_link TEXT,
    facebook_link TEXT,
    website TEXT,
    seeking_talent INTEGER NOT NULL DEFAULT 0,
    seeking_description TEXT,
    UNIQUE (name, city, state)
);

CREATE INDEX IF NOT EXISTS idx_venue_area ON venue(state, city);
"#;

const SELECT_FIELDS: &str = "SELECT id, name, city, state, address, phone, genres, image_link, \
    facebook_link, website, seeking_talent, seeking_description FROM venue";

pub fn create_venue_tables(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_TABLES)?;
    Ok(())
}

fn venue_from_row(row: &Row) -> rusqlite::Result<VenueRecord> {
    Ok(VenueRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        address: row.get(4)?,
        phone: row.get(5)?,
        genres: decode_genres(6, row.get(6)?)?,
        image_link: row.get(7)?,
        facebook_link: row.get(8)?,
        website: row.get(9)?,
        seeking_talent: row.get(10)?,
        seeking_description: row.get(11)?,
    })
}

pub fn create_venue(tx: &Transaction, venue: &VenueRecord) -> DbResult<u64> {
    tx.execute(
        "INSERT INTO venue (name, city, state, address, phone, genres, image_link, \
         facebook_link, website, seeking_talent, seeking_description) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            venue.name,
            venue.city,
            venue.state,
            venue.address,
            venue.phone,
            encode_genres(&venue.genres),
            venue.image_link,
            venue.facebook_link,
            venue.website,
            venue.seeking_talent,
            venue.seeking_description,
        ],
    )?;
    Ok(tx.last_insert_rowid() as u64)
}

pub fn get_venue(tx: &Transaction, id: u64) -> DbResult<VenueRecord> {
    let sql = format!("{SELECT_FIELDS} WHERE id = ?");
    let mut stmt = tx.prepare(&sql)?;
    let venue = stmt.query_row(params![id], venue_from_row)?;
    Ok(venue)
}

pub fn list_venues(tx: &Transaction) -> DbResult<Vec<VenueRecord>> {
    let sql = format!("{SELECT_FIELDS} ORDER BY state ASC, city ASC, name ASC, id ASC");
    let mut stmt = tx.prepare(&sql)?;
    let venues = stmt
        .query_map([], venue_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(venues)
}

pub fn search_venues(tx: &Transaction, term: &str) -> DbResult<Vec<VenueRecord>> {
    let sql = format!("{SELECT_FIELDS} ORDER BY name ASC, id ASC");
    let mut stmt = tx.prepare(&sql)?;
    let venues = stmt
        .query_map([], venue_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(venues
        .into_iter()
        .filter(|venue| name_matches(&venue.name, term))
        .collect())
}

pub fn update_venue(tx: &Transaction, venue: &VenueRecord) -> DbResult<()> {
    let count = tx.execute(
        "UPDATE venue SET name = ?, city = ?, state = ?, address = ?, phone = ?, genres = ?, \
         image_link = ?, facebook_link = ?, website = ?, seeking_talent = ?, \
         seeking_description = ? WHERE id = ?",
        params![
            venue.name,
            venue.city,
            venue.state,
            venue.address,
            venue.phone,
            encode_genres(&venue.genres),
            venue.image_link,
            venue.facebook_link,
            venue.website,
            venue.seeking_talent,
            venue.seeking_description,
            venue.id,
        ],
    )?;
    if count == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

pub fn delete_venue(tx: &Transaction, id: u64) -> DbResult<()> {
    let count = tx.execute("DELETE FROM venue WHERE id = ?", params![id])?;
    if count == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
