use rusqlite::{params, Connection, Row, Transaction};

use crate::server::db::{DbResult, ShowDetailRecord, ShowRecord};

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS show (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    artist_id INTEGER NOT NULL REFERENCES artist(id) ON DELETE CASCADE,
    venue_id INTEGER NOT NULL REFERENCES venue(id) ON DELETE CASCADE,
    start_time INTEGER NOT NULL,
    UNIQUE (artist_id, venue_id, start_time)
);

CREATE INDEX IF NOT EXISTS idx_show_venue ON show(venue_id, start_time);
CREATE INDEX IF NOT EXISTS idx_show_artist ON show(artist_id, start_time);
"#;

const SELECT_DETAIL: &str = "SELECT show.id, show.start_time, \
    venue.id, venue.name, venue.image_link, \
    artist.id, artist.name, artist.image_link \
    FROM show \
    JOIN venue ON venue.id = show.venue_id \
    JOIN artist ON artist.id = show.artist_id";

pub fn create_show_tables(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_TABLES)?;
    Ok(())
}

fn detail_from_row(row: &Row) -> rusqlite::Result<ShowDetailRecord> {
    Ok(ShowDetailRecord {
        id: row.get(0)?,
        start_time: row.get(1)?,
        venue_id: row.get(2)?,
        venue_name: row.get(3)?,
        venue_image_link: row.get(4)?,
        artist_id: row.get(5)?,
        artist_name: row.get(6)?,
        artist_image_link: row.get(7)?,
    })
}

pub fn create_show(tx: &Transaction, show: &ShowRecord) -> DbResult<u64> {
    tx.execute(
        "INSERT INTO show (artist_id, venue_id, start_time) VALUES (?, ?, ?)",
        params![show.artist_id, show.venue_id, show.start_time],
    )?;
    Ok(tx.last_insert_rowid() as u64)
}

pub fn list_shows(tx: &Transaction) -> DbResult<Vec<ShowDetailRecord>> {
    let sql = format!("{SELECT_DETAIL} ORDER BY show.start_time DESC, show.id DESC");
    let mut stmt = tx.prepare(&sql)?;
    let shows = stmt
        .query_map([], detail_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(shows)
}

pub fn list_venue_shows(tx: &Transaction, venue_id: u64) -> DbResult<Vec<ShowDetailRecord>> {
    let sql = format!("{SELECT_DETAIL} WHERE show.venue_id = ? ORDER BY show.start_time ASC");
    let mut stmt = tx.prepare(&sql)?;
    let shows = stmt
        .query_map(params![venue_id], detail_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(shows)
}

pub fn list_artist_shows(tx: &Transaction, artist_id: u64) -> DbResult<Vec<ShowDetailRecord>> {
    let sql = format!("{SELECT_DETAIL} WHERE show.artist_id = ? ORDER BY show.start_time ASC");
    let mut stmt = tx.prepare(&sql)?;
    let shows = stmt
        .query_map(params![artist_id], detail_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(shows)
}

pub fn count_venue_upcoming_shows(tx: &Transaction, venue_id: u64, now: i64) -> DbResult<u64> {
    let mut stmt = tx.prepare("SELECT COUNT(*) FROM show WHERE venue_id = ? AND start_time > ?")?;
    let count: i64 = stmt.query_row(params![venue_id, now], |row| row.get(0))?;
    Ok(count as u64)
}

pub fn count_artist_upcoming_shows(tx: &Transaction, artist_id: u64, now: i64) -> DbResult<u64> {
    let mut stmt =
        tx.prepare("SELECT COUNT(*) FROM show WHERE artist_id = ? AND start_time > ?")?;
    let count: i64 = stmt.query_row(params![artist_id, now], |row| row.get(0))?;
    Ok(count as u64)
}
