//! # REST API HTTP Server
//!
//! Axum surface for the three operations, plus the conditional-request
//! decisions the store deliberately leaves to this layer. The `If-Match`
//! check compares against a tag read in a separate round trip from the
//! update itself, so a concurrent writer can commit in between; the write
//! statement does not re-validate the tag.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::conditional::{ETag, EtagError, MatchError, MatchList};
use crate::engine::{ReadOutcome, ResourceStore};
use crate::payload;

use super::errors::{RestError, RestResult};

/// REST API server state
pub struct RestServer<S: ResourceStore> {
    store: Arc<S>,
}

impl<S: ResourceStore + 'static> RestServer<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        let state = Arc::new(self);

        Router::new()
            .route("/resource", post(create_handler::<S>))
            .route(
                "/resource/:id",
                get(read_handler::<S>).patch(update_handler::<S>),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

/// Shared state type
type ServerState<S> = Arc<RestServer<S>>;

/// The boundary hands the core a validated positive integer key.
fn validate_key(id: i64) -> RestResult<i64> {
    if id <= 0 {
        return Err(RestError::InvalidKey);
    }

    Ok(id)
}

/// Parse an optional conditional header. Absence is fine; a present but
/// malformed value is a client error and must never reach storage.
fn conditional_header(headers: &HeaderMap, name: HeaderName) -> RestResult<Option<MatchList>> {
    let Some(value) = headers.get(&name) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| MatchError::Etag(EtagError::BadCharacters))?;

    Ok(Some(value.parse::<MatchList>()?))
}

/// A JSON response, optionally stamped with the row's entity tag.
fn json_response(status: StatusCode, etag: Option<&ETag>, body: String) -> Response {
    let mut response =
        (status, [(header::CONTENT_TYPE, "application/json")], body).into_response();

    if let Some(etag) = etag {
        if let Ok(value) = etag.to_string().parse() {
            response.headers_mut().insert(header::ETAG, value);
        }
    }

    response
}

fn not_modified(etag: &ETag) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();

    if let Ok(value) = etag.to_string().parse() {
        response.headers_mut().insert(header::ETAG, value);
    }

    response
}

/// Fetch one row by key
async fn read_handler<S: ResourceStore + 'static>(
    State(server): State<ServerState<S>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> RestResult<Response> {
    let key = validate_key(id)?;
    let if_none_match = conditional_header(&headers, header::IF_NONE_MATCH)?;

    let outcome = server.store.read(key).await?;

    if let Some(list) = if_none_match {
        if list.matches_weak(&outcome.etag) {
            return Ok(not_modified(&outcome.etag));
        }
    }

    let ReadOutcome { body, etag } = outcome;
    Ok(json_response(StatusCode::OK, Some(&etag), body))
}

/// Create one row from the request body
async fn create_handler<S: ResourceStore + 'static>(
    State(server): State<ServerState<S>>,
    body: Bytes,
) -> RestResult<Response> {
    let fields = payload::extract(&body)?;
    let stored = server.store.create(fields).await?;

    info!("created resource");

    Ok(json_response(StatusCode::CREATED, None, stored))
}

/// Partially update one row by key
async fn update_handler<S: ResourceStore + 'static>(
    State(server): State<ServerState<S>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> RestResult<Response> {
    let key = validate_key(id)?;
    let if_match = conditional_header(&headers, header::IF_MATCH)?;
    let fields = payload::extract(&body)?;

    // Advisory optimistic concurrency: the supplied If-Match is compared
    // against the tag from a fresh read, then the write runs as a separate
    // statement.
    if let Some(list) = if_match {
        let current = server.store.read(key).await?;
        if !list.matches_strong(&current.etag) {
            return Err(RestError::PreconditionFailed);
        }
    }

    let stored = server.store.update(key, fields).await?;

    info!(key, "updated resource");

    Ok(json_response(StatusCode::OK, None, stored))
}
