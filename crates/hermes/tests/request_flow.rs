//! End-to-end request flows: bind or validate, then write the envelope.

use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use hermes::extract::bind::{bind, QueryMultimap};
use hermes::prelude::*;
use http::{HeaderMap, Method, Response, StatusCode, Uri};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, QueryParams)]
#[query(crate = "::hermes::extract")]
struct Person {
    #[query("name")]
    name: String,
    #[query("age")]
    age: i64,
}

#[derive(Debug, Default, QueryParams)]
#[query(crate = "::hermes::extract")]
struct Window {
    #[query("from")]
    from: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
struct CreateAccount {
    #[validate(required)]
    username: Option<String>,
    #[validate(email)]
    email: String,
    #[validate(length(min = 8, max = 32))]
    password: String,
}

fn context(method: Method, uri: &'static str, body: &'static [u8]) -> ExtractionContext {
    hermes::telemetry::init_test_logging();
    ExtractionContext::new(
        method,
        Uri::from_static(uri),
        HeaderMap::new(),
        Bytes::from_static(body),
    )
}

fn body_json(response: &Response<Bytes>) -> Value {
    serde_json::from_slice(response.body()).unwrap()
}

/// The query handler every scenario below runs through.
fn get_person(ctx: &ExtractionContext) -> Response<Bytes> {
    match validate_query::<Person>(ctx) {
        Ok(person) => Responder::new(ctx).ok(person),
        Err(rejection) => rejection.into_response(),
    }
}

#[test]
fn test_get_binds_and_wraps_in_success_envelope() {
    let ctx = context(Method::GET, "/people?name=Alice&age=30", b"");
    let response = get_person(&ctx);

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(&response);
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "Resource fetched successfully");
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["age"], 30);
}

#[test]
fn test_unknown_key_yields_400_envelope() {
    let ctx = context(Method::GET, "/people?name=Alice&unknown=1", b"");
    let response = get_person(&ctx);

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(&response);
    assert_eq!(body["status"], 400);
    assert_eq!(body["method"], "GET");
    assert_eq!(
        body["message"],
        "Invalid request parameters or malformed request"
    );
    assert_eq!(body["error"], "query parameter 'unknown' not allowed");
    assert!(body.get("data").is_none());
}

#[test]
fn test_server_error_never_renders_detail() {
    let secret = std::io::Error::other("db password is hunter2");
    let response = error_response(
        &Method::GET,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(&secret),
    );

    let body = body_json(&response);
    assert_eq!(body["status"], 500);
    assert_eq!(body["message"], "Internal server error");
    assert!(body.get("error").is_none());
}

#[test]
fn test_success_data_round_trips() {
    let person = Person {
        name: "Zoë".to_string(),
        age: 41,
    };
    let response = success_response(&Method::GET, person.clone());

    let envelope: SuccessEnvelope<Person> = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(envelope.data, person);
}

#[test]
fn test_integer_parsing() {
    let ok: Person = bind(&QueryMultimap::parse("age=12")).unwrap();
    assert_eq!(ok.age, 12);

    let err = bind::<Person>(&QueryMultimap::parse("age=12x")).unwrap_err();
    assert!(matches!(err, BindError::InvalidInteger { .. }));
}

#[test]
fn test_timestamp_formats() {
    let window: Window = bind(&QueryMultimap::parse("from=2025-08-17")).unwrap();
    assert_eq!(window.from, Utc.with_ymd_and_hms(2025, 8, 17, 0, 0, 0).unwrap());

    let window: Window = bind(&QueryMultimap::parse("from=2025-08-17%2018:30:00")).unwrap();
    assert_eq!(window.from, Utc.with_ymd_and_hms(2025, 8, 17, 18, 30, 0).unwrap());

    let err = bind::<Window>(&QueryMultimap::parse("from=17/08/2025")).unwrap_err();
    assert!(matches!(err, BindError::InvalidTimestamp { .. }));
}

#[test]
fn test_timestamp_layouts_are_fixed_width() {
    let window: Window = bind(&QueryMultimap::parse("from=2025-08-17%2018:30:00.5")).unwrap();
    assert_eq!(window.from.timestamp_subsec_millis(), 500);

    for raw in ["2025-8-7", "%2B2025-08-17", "2025-08-17%2018:30:00Z", "2025-08-17t18:30:00z"] {
        let err = bind::<Window>(&QueryMultimap::parse(&format!("from={raw}"))).unwrap_err();
        assert!(matches!(err, BindError::InvalidTimestamp { .. }), "{raw}");
    }
}

#[test]
fn test_post_body_validated_and_created() {
    let ctx = context(
        Method::POST,
        "/accounts",
        br#"{"username": "alice", "email": "alice@example.com", "password": "s3cretpass"}"#,
    );

    let response = match validate_body::<CreateAccount>(&ctx) {
        Ok(account) => Responder::new(&ctx).ok(account.username),
        Err(error) => Responder::new(&ctx).reject(error),
    };

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(&response);
    assert_eq!(body["message"], "Resource created successfully");
    assert_eq!(body["data"], "alice");
}

#[test]
fn test_post_body_violations_aggregated() {
    let ctx = context(
        Method::POST,
        "/accounts",
        br#"{"email": "alice", "password": "short"}"#,
    );

    let error = validate_body::<CreateAccount>(&ctx).unwrap_err();
    let response = Responder::new(&ctx).reject(error);

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(&response);
    assert_eq!(body["method"], "POST");
    assert_eq!(
        body["error"],
        "validation error: email must be a valid email address; \
         password must be at least 8 characters; \
         username is required"
    );
}

#[test]
fn test_malformed_body_hides_decoder_detail() {
    let ctx = context(Method::PUT, "/accounts/1", b"{\"email\": ");

    let error = validate_body::<CreateAccount>(&ctx).unwrap_err();
    let body = body_json(&Responder::new(&ctx).reject(error));

    assert_eq!(
        body["error"],
        "invalid request format: please check your JSON data"
    );
}

#[test]
fn test_config_drives_extraction() {
    let config = ConfigLoader::new()
        .with_string(
            r#"
            [extract]
            report_process_time = true

            [extract.messages]
            email = "{field} is not an email"
            "#,
            "toml",
        )
        .unwrap()
        .load()
        .unwrap();

    let ctx = context(
        Method::POST,
        "/accounts",
        br#"{"username": "a", "email": "nope", "password": "longenough"}"#,
    )
    .with_options(config.extract_options());

    let error = validate_body::<CreateAccount>(&ctx).unwrap_err();
    assert_eq!(error.to_string(), "validation error: email is not an email");

    let ok = Responder::new(&ctx).ok(());
    assert!(body_json(&ok).get("processTime").is_some());
}
