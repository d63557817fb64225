//! An in-memory stand-in for the REST API, served on an ephemeral local port.
//!
//! It implements just enough of a JSON REST server for the client: list a
//! collection filtered by query parameters, create a record with a generated
//! ID, replace a record and delete a record.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::{ApiClient, RecordId};

const RESOURCES: [&str; 3] = ["users", "categories", "transactions"];

#[derive(Debug, Default)]
struct MockDb {
    collections: HashMap<String, Vec<Value>>,
    next_ids: HashMap<String, i64>,
    failing: bool,
    failing_lists: bool,
}

impl MockDb {
    fn insert(&mut self, resource: &str, mut record: Value) -> Value {
        let next_id = self.next_ids.entry(resource.to_owned()).or_insert(1);

        if record.get("id").is_none() {
            record["id"] = json!(*next_id);
            *next_id += 1;
        }

        self.collections
            .entry(resource.to_owned())
            .or_default()
            .push(record.clone());

        record
    }
}

type SharedDb = Arc<Mutex<MockDb>>;

/// A running mock API.
#[derive(Debug, Clone)]
pub(crate) struct MockApi {
    base_url: String,
    db: SharedDb,
}

impl MockApi {
    /// A client pointed at the mock API.
    pub(crate) fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url)
    }

    /// Insert `record` into `resource`, assigning the next numeric ID if it has none.
    pub(crate) fn seed(&self, resource: &str, record: Value) -> RecordId {
        let record = self.db.lock().unwrap().insert(resource, record);

        serde_json::from_value(record["id"].clone()).expect("seeded record has an invalid ID")
    }

    /// A snapshot of the records stored for `resource`.
    pub(crate) fn records(&self, resource: &str) -> Vec<Value> {
        self.db
            .lock()
            .unwrap()
            .collections
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    /// Make every request fail with 500 Internal Server Error.
    pub(crate) fn set_failing(&self, failing: bool) {
        self.db.lock().unwrap().failing = failing;
    }

    /// Make only requests that list a collection fail with 500 Internal
    /// Server Error.
    pub(crate) fn set_failing_lists(&self, failing: bool) {
        self.db.lock().unwrap().failing_lists = failing;
    }
}

/// Start a mock API on a random local port.
pub(crate) async fn spawn_mock_api() -> MockApi {
    let db = SharedDb::default();
    let router = Router::new()
        .route("/{resource}", get(list_records).post(create_record))
        .route("/{resource}/{id}", put(replace_record).delete(delete_record))
        .with_state(db.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind mock API listener");
    let address = listener
        .local_addr()
        .expect("Could not get mock API address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Mock API stopped unexpectedly");
    });

    MockApi {
        base_url: format!("http://{address}"),
        db,
    }
}

fn field_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(boolean) => Some(boolean.to_string()),
        _ => None,
    }
}

fn has_id(record: &Value, id: &str) -> bool {
    field_as_string(&record["id"]).as_deref() == Some(id)
}

fn check_request(db: &MockDb, resource: &str) -> Option<Response> {
    if db.failing {
        return Some(StatusCode::INTERNAL_SERVER_ERROR.into_response());
    }

    if !RESOURCES.contains(&resource) {
        return Some(StatusCode::NOT_FOUND.into_response());
    }

    None
}

async fn list_records(
    State(db): State<SharedDb>,
    Path(resource): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> Response {
    let db = db.lock().unwrap();

    if let Some(response) = check_request(&db, &resource) {
        return response;
    }

    if db.failing_lists {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let records: Vec<Value> = db
        .collections
        .get(&resource)
        .map(|records| {
            records
                .iter()
                .filter(|record| {
                    filters.iter().all(|(field, want)| {
                        field_as_string(&record[field.as_str()]).as_deref() == Some(want.as_str())
                    })
                })
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    Json(records).into_response()
}

async fn create_record(
    State(db): State<SharedDb>,
    Path(resource): Path<String>,
    Json(record): Json<Value>,
) -> Response {
    let mut db = db.lock().unwrap();

    if let Some(response) = check_request(&db, &resource) {
        return response;
    }

    let record = db.insert(&resource, record);

    (StatusCode::CREATED, Json(record)).into_response()
}

async fn replace_record(
    State(db): State<SharedDb>,
    Path((resource, id)): Path<(String, String)>,
    Json(mut record): Json<Value>,
) -> Response {
    let mut db = db.lock().unwrap();

    if let Some(response) = check_request(&db, &resource) {
        return response;
    }

    let Some(existing) = db
        .collections
        .get_mut(&resource)
        .and_then(|records| records.iter_mut().find(|record| has_id(record, &id)))
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    record["id"] = existing["id"].clone();
    *existing = record.clone();

    Json(record).into_response()
}

async fn delete_record(
    State(db): State<SharedDb>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    let mut db = db.lock().unwrap();

    if let Some(response) = check_request(&db, &resource) {
        return response;
    }

    let Some(records) = db.collections.get_mut(&resource) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match records.iter().position(|record| has_id(record, &id)) {
        Some(index) => {
            records.remove(index);
            Json(json!({})).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
