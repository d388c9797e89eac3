use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::{Method, StatusCode};
use actix_web::{test, App};
use encore::config::CommonConfig;
use encore::server::config::ServerConfig;
use encore::server::factory::ServerFactory;
use encore::server::restful::RestfulApp;
use encore::time::current_timestamp;
use serde_json::{json, Value};

const FORM: &str = "application/x-www-form-urlencoded";

const DAY: i64 = 24 * 3600;

macro_rules! init_service {
    () => {{
        let mut cfg = <ServerConfig as CommonConfig>::default();
        cfg.db.sqlite.memory = true;
        let factory = ServerFactory::new(cfg).unwrap();
        let app: RestfulApp = factory.build_booking_app();
        test::init_service(App::new().configure(move |cfg| app.configure(cfg))).await
    }};
}

macro_rules! post_form {
    ($app:expr, $uri:expr, $form:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .insert_header((CONTENT_TYPE, FORM))
            .set_payload($form)
            .to_request();
        let resp = test::call_service($app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

macro_rules! get_json {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri($uri).to_request();
        let resp = test::call_service($app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn venue_form(name: &str, city: &str, state: &str) -> String {
    format!(
        "name={}&city={}&state={state}&address=1015+Folsom+Street&phone=123-123-1234\
         &genres=Jazz&genres=Reggae&image_link=&facebook_link=&website=\
         &seeking_talent=y&seeking_description=Looking+for+local+artists",
        name.replace(' ', "+"),
        city.replace(' ', "+"),
    )
}

fn artist_form(name: &str) -> String {
    format!(
        "name={}&city=San+Francisco&state=CA&phone=326-123-5000&genres=Rock+n+Roll\
         &image_link=https%3A%2F%2Fimages.example.com%2Fpetals.jpg",
        name.replace(' ', "+"),
    )
}

fn show_form(artist_id: u64, venue_id: u64, start_time: i64) -> String {
    format!("artist_id={artist_id}&venue_id={venue_id}&start_time={start_time}")
}

#[actix_web::test]
async fn test_home() {
    let app = init_service!();
    let (status, body) = get_json!(&app, "/");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["name"], "encore booking");
}

#[actix_web::test]
async fn test_venue_flow() {
    let app = init_service!();

    let (status, body) = post_form!(
        &app,
        "/venues/create",
        venue_form("The Musical Hop", "San Francisco", "CA")
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Venue The Musical Hop was successfully listed!"})
    );
    post_form!(
        &app,
        "/venues/create",
        venue_form("The Dueling Pianos Bar", "New York", "NY")
    );
    post_form!(
        &app,
        "/venues/create",
        venue_form("Park Square Live Music", "San Francisco", "CA")
    );

    let (status, body) = post_form!(
        &app,
        "/venues/create",
        venue_form("The Musical Hop", "San Francisco", "CA")
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 409);
    assert_eq!(
        body["message"],
        "An error occurred. Venue The Musical Hop could not be listed."
    );

    let (status, body) = post_form!(&app, "/venues/create", "name=Nowhere&city=Nowhere");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "An error occurred. Venue Nowhere could not be listed."
    );

    let (status, body) = get_json!(&app, "/venues/1");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "The Musical Hop");
    assert_eq!(body["genres"], json!(["Jazz", "Reggae"]));
    assert_eq!(body["seeking_talent"], true);
    assert_eq!(body["website"], Value::Null);
    assert_eq!(body["past_shows_count"], 0);

    let (status, body) = get_json!(&app, "/venues/1/edit");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["form"]["city"], "San Francisco");
    assert!(body["states"].as_array().unwrap().contains(&json!("CA")));

    let (status, body) = post_form!(
        &app,
        "/venues/1/edit",
        venue_form("The Musical Hop", "Oakland", "CA")
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Venue The Musical Hop was successfully updated!"
    );
    let (_, body) = get_json!(&app, "/venues/1");
    assert_eq!(body["city"], "Oakland");

    let (status, body) = post_form!(
        &app,
        "/venues/99/edit",
        venue_form("Ghost", "Oakland", "CA")
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "An error occurred. Venue Ghost could not be updated."
    );

    let (status, body) = get_json!(&app, "/venues/99");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);
}

#[actix_web::test]
async fn test_venue_areas() {
    let app = init_service!();
    post_form!(
        &app,
        "/venues/create",
        venue_form("The Musical Hop", "San Francisco", "CA")
    );
    post_form!(
        &app,
        "/venues/create",
        venue_form("The Dueling Pianos Bar", "New York", "NY")
    );
    post_form!(
        &app,
        "/venues/create",
        venue_form("Park Square Live Music", "San Francisco", "CA")
    );
    post_form!(&app, "/artists/create", artist_form("Guns N Petals"));

    let now = current_timestamp();
    let shows = [
        show_form(1, 1, now + DAY),
        show_form(1, 1, now + 2 * DAY),
        show_form(1, 1, now - DAY),
        show_form(1, 2, now + DAY),
    ];
    for show in shows {
        let (status, body) = post_form!(&app, "/shows/create", show);
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["message"], "Show was successfully listed!");
    }

    let (status, body) = get_json!(&app, "/venues");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["areas"],
        json!([
            {
                "city": "San Francisco",
                "state": "CA",
                "venues": [
                    {"id": 3, "name": "Park Square Live Music", "num_upcoming_shows": 0},
                    {"id": 1, "name": "The Musical Hop", "num_upcoming_shows": 2},
                ],
            },
            {
                "city": "New York",
                "state": "NY",
                "venues": [
                    {"id": 2, "name": "The Dueling Pianos Bar", "num_upcoming_shows": 1},
                ],
            },
        ])
    );

    let (_, body) = get_json!(&app, "/venues/1");
    assert_eq!(body["past_shows_count"], 1);
    assert_eq!(body["upcoming_shows_count"], 2);
    assert_eq!(body["upcoming_shows"][0]["artist_name"], "Guns N Petals");
    assert_eq!(
        body["upcoming_shows"][0]["artist_image_link"],
        "https://images.example.com/petals.jpg"
    );

    let (_, body) = post_form!(&app, "/venues/search", "search_term=hop");
    assert_eq!(
        body,
        json!({
            "success": true,
            "count": 1,
            "data": [{"id": 1, "name": "The Musical Hop", "num_upcoming_shows": 2}],
            "search_term": "hop",
        })
    );

    let (_, body) = post_form!(&app, "/venues/search", "search_term=Music");
    assert_eq!(body["count"], 2);
}

#[actix_web::test]
async fn test_delete_cascades() {
    let app = init_service!();
    post_form!(
        &app,
        "/venues/create",
        venue_form("The Musical Hop", "San Francisco", "CA")
    );
    post_form!(&app, "/artists/create", artist_form("Guns N Petals"));
    post_form!(&app, "/artists/create", artist_form("Matt Quevedo"));

    let now = current_timestamp();
    post_form!(&app, "/shows/create", show_form(1, 1, now + DAY));
    post_form!(&app, "/shows/create", show_form(2, 1, now - DAY));

    let (_, body) = get_json!(&app, "/shows");
    assert_eq!(body["shows"].as_array().unwrap().len(), 2);
    assert_eq!(body["shows"][0]["artist_name"], "Guns N Petals");
    assert_eq!(body["shows"][0]["venue_name"], "The Musical Hop");

    let req = test::TestRequest::delete().uri("/venues/1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"success": true, "delete": 1}));

    let (_, body) = get_json!(&app, "/shows");
    assert_eq!(body["shows"], json!([]));
    let (_, body) = get_json!(&app, "/artists/1");
    assert_eq!(body["upcoming_shows_count"], 0);

    let req = test::TestRequest::delete().uri("/venues/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_artists() {
    let app = init_service!();
    post_form!(&app, "/artists/create", artist_form("The Wild Sax Band"));
    let (status, body) = post_form!(&app, "/artists/create", artist_form("Guns N Petals"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Artist Guns N Petals was successfully listed!"
    );

    let (_, body) = get_json!(&app, "/artists");
    assert_eq!(
        body["artists"],
        json!([
            {"id": 2, "name": "Guns N Petals"},
            {"id": 1, "name": "The Wild Sax Band"},
        ])
    );

    let (status, body) = post_form!(&app, "/artists/create", "name=Nobody&city=Nowhere&state=CA");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "An error occurred. Artist Nobody could not be listed."
    );

    let (_, body) = post_form!(&app, "/artists/search", "search_term=A");
    assert_eq!(body["count"], 2);
    let (_, body) = post_form!(&app, "/artists/search", "search_term=band");
    assert_eq!(body["data"][0]["name"], "The Wild Sax Band");

    let (status, body) = get_json!(&app, "/artists/create");
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("id").is_none());
    assert!(body["genres"].as_array().unwrap().contains(&json!("Jazz")));

    let req = test::TestRequest::delete().uri("/artists/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let (status, _) = get_json!(&app, "/artists/1");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_show_errors() {
    let app = init_service!();
    post_form!(
        &app,
        "/venues/create",
        venue_form("The Musical Hop", "San Francisco", "CA")
    );
    post_form!(&app, "/artists/create", artist_form("Guns N Petals"));

    let start_time = current_timestamp() + DAY;
    let (status, _) = post_form!(&app, "/shows/create", show_form(1, 1, start_time));
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_form!(&app, "/shows/create", show_form(1, 1, start_time));
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "An error occurred. Show could not be listed.");

    let (status, _) = post_form!(&app, "/shows/create", show_form(1, 42, start_time));
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = post_form!(
        &app,
        "/shows/create",
        "artist_id=1&venue_id=1&start_time=tomorrow"
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_form!(
        &app,
        "/shows/create",
        "artist_id=1&venue_id=1&start_time=2035-05-21+21%3A30%3A00"
    );
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_unknown_routes() {
    let app = init_service!();

    let (status, body) = get_json!(&app, "/drinks");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"success": false, "error": 404, "message": "resource not found"})
    );

    for uri in ["/venues/9223372036854775808", "/artists/9223372036854775808/edit"] {
        let (status, body) = get_json!(&app, uri);
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], 404);
    }

    // Preflight is only answered by the drink API.
    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/venues")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let req = test::TestRequest::put().uri("/venues").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(resp.headers().get("Access-Control-Allow-Origin").is_none());
}
