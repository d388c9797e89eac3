use rusqlite::{params, Connection, Row, Transaction};

use crate::server::db::{ArtistRecord, DbError, DbResult};

use super::{decode_genres, encode_genres, name_matches};

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS artist (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    city TEXT NOT NULL,
    state TEXT NOT NULL,
    phone TEXT,
    genres TEXT NOT NULL,
    image_link TEXT,
    facebook_link TEXT,
    website TEXT,
    seeking_venue INTEGER NOT NULL DEFAULT 0,
    seeking_description TEXT,
    UNIQUE (name, city, state)
);

CREATE INDEX IF NOT EXISTS idx_artist_name ON artist(name);
"#;

const SELECT_FIELDS: &str = "SELECT id, name, city, state, phone, genres, image_link, \
    facebook_link, website, seeking_venue, seeking_description FROM artist";

pub fn create_artist_tables(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_TABLES)?;
    Ok(())
}

fn artist_from_row(row: &Row) -> rusqlite::Result<ArtistRecord> {
    Ok(ArtistRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        phone: row.get(4)?,
        genres: decode_genres(5, row.get(5)?)?,
        image_link: row.get(6)?,
        facebook_link: row.get(7)?,
        website: row.get(8)?,
        seeking_venue: row.get(9)?,
        seeking_description: row.get(10)?,
    })
}

pub fn create_artist(tx: &Transaction, artist: &ArtistRecord) -> DbResult<u64> {
    tx.execute(
        "INSERT INTO artist (name, city, state, phone, genres, image_link, facebook_link, \
         website, seeking_venue, seeking_description) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            artist.name,
            artist.city,
            artist.state,
            artist.phone,
            encode_genres(&artist.genres),
            artist.image_link,
            artist.facebook_link,
            artist.website,
            artist.seeking_venue,
            artist.seeking_description,
        ],
    )?;
    Ok(tx.last_insert_rowid() as u64)
}

pub fn get_artist(tx: &Transaction, id: u64) -> DbResult<ArtistRecord> {
    let sql = format!("{SELECT_FIELDS} WHERE id = ?");
    let mut stmt = tx.prepare(&sql)?;
    let artist = stmt.query_row(params![id], artist_from_row)?;
    Ok(artist)
}

pub fn list_artists(tx: &Transaction) -> DbResult<Vec<ArtistRecord>> {
    let sql = format!("{SELECT_FIELDS} ORDER BY name ASC, id ASC");
    let mut stmt = tx.prepare(&sql)?;
    let artists = stmt
        .query_map([], artist_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(artists)
}

pub fn search_artists(tx: &Transaction, term: &str) -> DbResult<Vec<ArtistRecord>> {
    let sql = format!("{SELECT_FIELDS} ORDER BY name ASC, id ASC");
    let mut stmt = tx.prepare(&sql)?;
    let artists = stmt
        .query_map([], artist_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(artists
        .into_iter()
        .filter(|artist| name_matches(&artist.name, term))
        .collect())
}

pub fn update_artist(tx: &Transaction, artist: &ArtistRecord) -> DbResult<()> {
    let count = tx.execute(
        "UPDATE artist SET name = ?, city = ?, state = ?, phone = ?, genres = ?, \
         image_link = ?, facebook_link = ?, website = ?, seeking_venue = ?, \
         seeking_description = ? WHERE id = ?",
        params![
            artist.name,
            artist.city,
            artist.state,
            artist.phone,
            encode_genres(&artist.genres),
            artist.image_link,
            artist.facebook_link,
            artist.website,
            artist.seeking_venue,
            artist.seeking_description,
            artist.id,
        ],
    )?;
    if count == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

pub fn delete_artist(tx: &Transaction, id: u64) -> DbResult<()> {
    let count = tx.execute("DELETE FROM artist WHERE id = ?", params![id])?;
    if count == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
