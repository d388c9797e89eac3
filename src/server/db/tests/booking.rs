use crate::server::db::{ArtistRecord, Database, DbError, ShowRecord, VenueRecord};
use crate::time::current_timestamp;

pub fn run_booking_tests(db: &Database) {
    test_venues(db);
    test_artists(db);
    test_shows(db);
    test_cascade(db);
}

fn mock_venue(name: &str, city: &str, state: &str) -> VenueRecord {
    VenueRecord {
        id: 0,
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: String::from("1015 Folsom Street"),
        phone: Some(String::from("123-123-1234")),
        genres: vec![String::from("Jazz"), String::from("Folk")],
        image_link: None,
        facebook_link: None,
        website: None,
        seeking_talent: true,
        seeking_description: Some(String::from("Looking for local acts")),
    }
}

fn mock_artist(name: &str) -> ArtistRecord {
    ArtistRecord {
        id: 0,
        name: name.to_string(),
        city: String::from("San Francisco"),
        state: String::from("CA"),
        phone: None,
        genres: vec![String::from("Rock n Roll")],
        image_link: Some(format!("https://images.example.com/{name}.png")),
        facebook_link: None,
        website: None,
        seeking_venue: false,
        seeking_description: None,
    }
}

fn test_venues(db: &Database) {
    let ids = db
        .with_transaction(|tx| {
            let mut ids = vec![];
            ids.push(tx.create_venue(&mock_venue("The Musical Hop", "San Francisco", "CA"))?);
            ids.push(tx.create_venue(&mock_venue("Park Square 50%", "San Francisco", "CA"))?);
            ids.push(tx.create_venue(&mock_venue("The Dueling Pianos", "New York", "NY"))?);
            Ok(ids)
        })
        .unwrap();
    assert_eq!(ids.len(), 3);

    db.with_transaction(|tx| {
        let venue = tx.get_venue(ids[0])?;
        let mut expect = mock_venue("The Musical Hop", "San Francisco", "CA");
        expect.id = ids[0];
        assert_eq!(venue, expect);

        // Ordered by state, city, then name
        let names: Vec<String> = tx.list_venues()?.into_iter().map(|v| v.name).collect();
        assert_eq!(
            names,
            vec!["Park Square 50%", "The Musical Hop", "The Dueling Pianos"]
        );

        let found = tx.search_venues("hop")?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ids[0]);

        let found = tx.search_venues("Music")?;
        assert_eq!(found.len(), 1);

        let found = tx.search_venues("50%")?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ids[1]);

        // Wildcards in the term match literally
        assert!(tx.search_venues("%")?.len() == 1);
        assert!(tx.search_venues("_")?.is_empty());
        assert_eq!(tx.search_venues("")?.len(), 3);

        Ok(())
    })
    .unwrap();

    let result = db.with_transaction(|tx| {
        tx.create_venue(&mock_venue("The Musical Hop", "San Francisco", "CA"))
    });
    assert!(matches!(result, Err(DbError::Constraint(_))));

    let mut venue = mock_venue("The Musical Hop", "Oakland", "CA");
    venue.id = ids[0];
    venue.seeking_talent = false;
    venue.genres = vec![String::from("Blues")];
    db.with_transaction(|tx| tx.update_venue(&venue)).unwrap();
    let got = db.with_transaction(|tx| tx.get_venue(ids[0])).unwrap();
    assert_eq!(got, venue);

    venue.id = 9999;
    let result = db.with_transaction(|tx| tx.update_venue(&venue));
    assert!(matches!(result, Err(DbError::NotFound)));

    let result = db.with_transaction(|tx| tx.get_venue(9999));
    assert!(matches!(result, Err(DbError::NotFound)));

    // Case folding is not limited to ASCII
    db.with_transaction(|tx| {
        let id = tx.create_venue(&mock_venue("Élysée Montmartre", "Paris", "FR"))?;
        for term in ["élysée", "ÉLYSÉE", "MONTMARTRE"] {
            let found = tx.search_venues(term)?;
            assert_eq!(found.len(), 1, "{term}");
            assert_eq!(found[0].id, id);
        }
        tx.delete_venue(id)
    })
    .unwrap();
}

fn test_artists(db: &Database) {
    let ids = db
        .with_transaction(|tx| {
            let mut ids = vec![];
            ids.push(tx.create_artist(&mock_artist("The Wild Sax Band"))?);
            ids.push(tx.create_artist(&mock_artist("Guns N Petals"))?);
            ids.push(tx.create_artist(&mock_artist("Matt Quevedo"))?);
            Ok(ids)
        })
        .unwrap();

    db.with_transaction(|tx| {
        let names: Vec<String> = tx.list_artists()?.into_iter().map(|a| a.name).collect();
        assert_eq!(
            names,
            vec!["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]
        );

        let found = tx.search_artists("A")?;
        assert_eq!(found.len(), 3);

        let found = tx.search_artists("band")?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ids[0]);

        Ok(())
    })
    .unwrap();

    let mut artist = mock_artist("Guns N Petals");
    artist.id = ids[1];
    artist.seeking_venue = true;
    artist.seeking_description = Some(String::from("Looking for shows in SF"));
    db.with_transaction(|tx| tx.update_artist(&artist)).unwrap();
    let got = db.with_transaction(|tx| tx.get_artist(ids[1])).unwrap();
    assert_eq!(got, artist);

    let result = db.with_transaction(|tx| tx.create_artist(&mock_artist("Matt Quevedo")));
    assert!(matches!(result, Err(DbError::Constraint(_))));
    db.with_transaction(|tx| {
        let id = tx.create_artist(&mock_artist("Ólafur Arnalds"))?;
        let found = tx.search_artists("óLAFUR")?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
        tx.delete_artist(id)
    })
    .unwrap();
}

fn test_shows(db: &Database) {
    let now = current_timestamp();

    let (venue_id, artist_id) = db
        .with_transaction(|tx| {
            let venue_id = tx.create_venue(&mock_venue("Show Hall", "Austin", "TX"))?;
            let artist_id = tx.create_artist(&mock_artist("The Show Band"))?;
            Ok((venue_id, artist_id))
        })
        .unwrap();

    let times = [now - 3600, now + 3600, now + 7200];
    db.with_transaction(|tx| {
        for start_time in times {
            tx.create_show(&ShowRecord {
                id: 0,
                artist_id,
                venue_id,
                start_time,
            })?;
        }
        Ok(())
    })
    .unwrap();

    db.with_transaction(|tx| {
        assert_eq!(tx.count_venue_upcoming_shows(venue_id, now)?, 2);
        assert_eq!(tx.count_artist_upcoming_shows(artist_id, now)?, 2);
        // Strictly after now
        assert_eq!(tx.count_venue_upcoming_shows(venue_id, now + 3600)?, 1);

        let shows = tx.list_venue_shows(venue_id)?;
        assert_eq!(shows.len(), 3);
        assert_eq!(shows[0].start_time, now - 3600);
        assert_eq!(shows[0].artist_name, "The Show Band");
        assert_eq!(shows[0].venue_name, "Show Hall");

        let shows = tx.list_artist_shows(artist_id)?;
        assert_eq!(shows.len(), 3);

        // Newest first
        let shows = tx.list_shows()?;
        assert_eq!(shows[0].start_time, now + 7200);
        Ok(())
    })
    .unwrap();

    // Duplicate booking
    let result = db.with_transaction(|tx| {
        tx.create_show(&ShowRecord {
            id: 0,
            artist_id,
            venue_id,
            start_time: now + 3600,
        })
    });
    assert!(matches!(result, Err(DbError::Constraint(_))));

    // Both ends must exist
    let result = db.with_transaction(|tx| {
        tx.create_show(&ShowRecord {
            id: 0,
            artist_id: 9999,
            venue_id,
            start_time: now,
        })
    });
    assert!(matches!(result, Err(DbError::Constraint(_))));
}

fn test_cascade(db: &Database) {
    let now = current_timestamp();

    let (venue_id, artist_id) = db
        .with_transaction(|tx| {
            let venue_id = tx.create_venue(&mock_venue("Cascade Club", "Denver", "CO"))?;
            let artist_id = tx.create_artist(&mock_artist("Cascade Trio"))?;
            tx.create_show(&ShowRecord {
                id: 0,
                artist_id,
                venue_id,
                start_time: now + 60,
            })?;
            Ok((venue_id, artist_id))
        })
        .unwrap();

    let before = db.with_transaction(|tx| tx.list_shows()).unwrap().len();

    db.with_transaction(|tx| tx.delete_venue(venue_id)).unwrap();

    db.with_transaction(|tx| {
        assert_eq!(tx.list_shows()?.len(), before - 1);
        assert!(tx.list_artist_shows(artist_id)?.is_empty());
        assert!(matches!(tx.get_venue(venue_id), Err(DbError::NotFound)));
        Ok(())
    })
    .unwrap();

    let result = db.with_transaction(|tx| tx.delete_venue(venue_id));
    assert!(matches!(result, Err(DbError::NotFound)));

    // Deleting an artist drops its shows as well
    let venue_id = db
        .with_transaction(|tx| {
            let venue_id = tx.create_venue(&mock_venue("Cascade Club", "Denver", "CO"))?;
            tx.create_show(&ShowRecord {
                id: 0,
                artist_id,
                venue_id,
                start_time: now + 60,
            })?;
            Ok(venue_id)
        })
        .unwrap();

    db.with_transaction(|tx| tx.delete_artist(artist_id)).unwrap();
    db.with_transaction(|tx| {
        assert!(tx.list_venue_shows(venue_id)?.is_empty());
        assert_eq!(tx.list_shows()?.len(), before - 1);
        Ok(())
    })
    .unwrap();
}
