mod booking;

use super::{Database, DbError};

pub fn run_all_tests(db: &Database) {
    drink::run_drink_tests(db);
    booking::run_booking_tests(db);

    test_rollback(db);
}

fn test_rollback(db: &Database) {
    let result: Result<(), DbError> = db.with_transaction(|tx| {
        tx.create_drink("rollback", "[]").unwrap();
        Err(DbError::Other(String::from("rollback")))
    });
    assert!(result.is_err());

    db.with_transaction(|tx| {
        let drinks = tx.list_drinks()?;
        assert!(drinks.iter().all(|d| d.title != "rollback"));
        Ok(())
    })
    .unwrap();
}
