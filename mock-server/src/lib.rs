use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const SUCCESS: u32 = 1;
pub const ERROR: u32 = 2;
pub const HANDLE_NOT_FOUND: u32 = 100;
pub const AUTHENTICATION_NEEDED: u32 = 402;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandleValue {
    pub index: u32,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub data: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandleRecord {
    pub handle: String,
    #[serde(default)]
    pub values: Vec<HandleValue>,
}

/// Envelope returned by every endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandleReply {
    #[serde(rename = "responseCode")]
    pub response_code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<HandleValue>>,
}

impl HandleReply {
    fn code(response_code: u32, handle: Option<String>) -> Json<Self> {
        Json(Self {
            response_code,
            handle,
            values: None,
        })
    }
}

#[derive(Deserialize)]
pub struct TypeFilter {
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
}

pub type Db = Arc<RwLock<HashMap<String, HandleRecord>>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    /// Expected `Authorization` value for writes; `None` leaves writes open.
    authorization: Option<Arc<str>>,
}

pub fn app() -> Router {
    router(None)
}

/// Like `app`, but `PUT` and `DELETE` require Basic auth with these
/// credentials.
pub fn app_with_credentials(username: &str, password: &str) -> Router {
    let token = general_purpose::STANDARD.encode(format!("{username}:{password}"));
    router(Some(format!("Basic {token}").into()))
}

fn router(authorization: Option<Arc<str>>) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(HashMap::new())),
        authorization,
    };
    Router::new()
        .route(
            "/api/handles/{prefix}/{suffix}",
            get(get_handle).put(put_handle).delete(delete_handle),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

fn authorized(state: &AppState, headers: &HeaderMap) -> bool {
    match &state.authorization {
        None => true,
        Some(expected) => {
            headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) == Some(expected.as_ref())
        }
    }
}

async fn get_handle(
    State(state): State<AppState>,
    Path((prefix, suffix)): Path<(String, String)>,
    Query(filter): Query<TypeFilter>,
) -> (StatusCode, Json<HandleReply>) {
    let handle = format!("{prefix}/{suffix}");
    let db = state.db.read().await;
    let Some(record) = db.get(&handle) else {
        return (
            StatusCode::NOT_FOUND,
            HandleReply::code(HANDLE_NOT_FOUND, Some(handle)),
        );
    };

    let values = record
        .values
        .iter()
        .filter(|v| filter.entry_type.as_deref().map_or(true, |t| v.entry_type == t))
        .cloned()
        .collect();
    (
        StatusCode::OK,
        Json(HandleReply {
            response_code: SUCCESS,
            handle: Some(handle),
            values: Some(values),
        }),
    )
}

async fn put_handle(
    State(state): State<AppState>,
    Path((prefix, suffix)): Path<(String, String)>,
    headers: HeaderMap,
    Json(record): Json<HandleRecord>,
) -> (StatusCode, Json<HandleReply>) {
    let handle = format!("{prefix}/{suffix}");
    if !authorized(&state, &headers) {
        tracing::warn!(%handle, "rejected unauthenticated write");
        return (
            StatusCode::UNAUTHORIZED,
            HandleReply::code(AUTHENTICATION_NEEDED, None),
        );
    }
    if record.handle != handle {
        return (StatusCode::BAD_REQUEST, HandleReply::code(ERROR, Some(handle)));
    }

    let replaced = state.db.write().await.insert(handle.clone(), record).is_some();
    tracing::info!(%handle, replaced, "stored handle");
    let status = if replaced {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    (status, HandleReply::code(SUCCESS, Some(handle)))
}

async fn delete_handle(
    State(state): State<AppState>,
    Path((prefix, suffix)): Path<(String, String)>,
    headers: HeaderMap,
) -> (StatusCode, Json<HandleReply>) {
    let handle = format!("{prefix}/{suffix}");
    if !authorized(&state, &headers) {
        tracing::warn!(%handle, "rejected unauthenticated delete");
        return (
            StatusCode::UNAUTHORIZED,
            HandleReply::code(AUTHENTICATION_NEEDED, None),
        );
    }

    match state.db.write().await.remove(&handle) {
        Some(_) => {
            tracing::info!(%handle, "deleted handle");
            (StatusCode::OK, HandleReply::code(SUCCESS, Some(handle)))
        }
        None => (
            StatusCode::NOT_FOUND,
            HandleReply::code(HANDLE_NOT_FOUND, Some(handle)),
        ),
    }
}
