use rusqlite::{params, Connection, Row, Transaction};

use crate::server::db::{DbError, DbResult, DrinkRecord};

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS drink (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL UNIQUE,
    recipe TEXT NOT NULL
);
"#;

const DROP_TABLES: &str = "DROP TABLE IF EXISTS drink;";

pub fn create_drink_tables(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_TABLES)?;
    Ok(())
}

fn drink_from_row(row: &Row) -> rusqlite::Result<DrinkRecord> {
    Ok(DrinkRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        recipe: row.get(2)?,
    })
}

pub fn create_drink(tx: &Transaction, title: &str, recipe: &str) -> DbResult<DrinkRecord> {
    tx.execute(
        "INSERT INTO drink (title, recipe) VALUES (?, ?)",
        params![title, recipe],
    )?;
    let id = tx.last_insert_rowid() as u64;
    Ok(DrinkRecord {
        id,
        title: title.to_string(),
        recipe: recipe.to_string(),
    })
}

pub fn get_drink(tx: &Transaction, id: u64) -> DbResult<DrinkRecord> {
    let mut stmt = tx.prepare("SELECT id, title, recipe FROM drink WHERE id = ?")?;
    let record = stmt.query_row(params![id], drink_from_row)?;
    Ok(record)
}

pub fn list_drinks(tx: &Transaction) -> DbResult<Vec<DrinkRecord>> {
    let mut stmt = tx.prepare("SELECT id, title, recipe FROM drink ORDER BY id ASC")?;
    let drinks = stmt
        .query_map([], drink_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(drinks)
}

pub fn update_drink(tx: &Transaction, drink: &DrinkRecord) -> DbResult<()> {
    let count = tx.execute(
        "UPDATE drink SET title = ?, recipe = ? WHERE id = ?",
        params![drink.title, drink.recipe, drink.id],
    )?;
    if count == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

pub fn delete_drink(tx: &Transaction, id: u64) -> DbResult<()> {
    let count = tx.execute("DELETE FROM drink WHERE id = ?", params![id])?;
    if count == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

pub fn reset_drinks(tx: &Transaction, drinks: &[(&str, &str)]) -> DbResult<()> {
    tx.execute_batch(DROP_TABLES)?;
    tx.execute_batch(CREATE_TABLES)?;
    for (title, recipe) in drinks {
        create_drink(tx, title, recipe)?;
    }
    Ok(())
}
