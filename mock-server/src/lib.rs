use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub const CLIENT_ID: &str = "1337";
pub const CLIENT_SECRET: &str = "1337";
pub const AUTHORIZATION_CODE: &str = "c0d3";
pub const USERNAME: &str = "jwagener";
pub const PASSWORD: &str = "s3cr3t";
pub const TOKEN_LIFETIME_SECS: u64 = 21599;

/// Multipart field carrying the audio file of an uploaded track.
pub const ASSET_FIELD: &str = "track[asset_data]";

/// Body returned for requests without a valid access token.
pub const UNAUTHORIZED_BODY: &str = r#"{"error":"401 - Unauthorized"}"#;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub permalink: String,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    pub id: u64,
    pub title: String,
    pub sharing: String,
    pub user_id: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub scope: String,
}

#[derive(Deserialize)]
pub struct TokenRequest {
    pub grant_type: String,
    pub client_id: String,
    pub client_secret: String,
    pub code: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub refresh_token: Option<String>,
}

#[derive(Deserialize)]
pub struct TrackQuery {
    pub q: Option<String>,
    pub filter: Option<String>,
}

pub struct MockState {
    me: User,
    tracks: BTreeMap<u64, Track>,
    access_tokens: HashSet<String>,
    refresh_tokens: HashSet<String>,
}

impl Default for MockState {
    fn default() -> Self {
        let me = User {
            id: 3207,
            username: USERNAME.to_string(),
            permalink: USERNAME.to_string(),
            city: None,
        };
        let tracks = [
            (1, "rofl dubstep", "public"),
            (2, "rofl dubstep (private edit)", "private"),
            (3, "ambient sketches", "public"),
        ]
        .into_iter()
        .map(|(id, title, sharing)| {
            let track = Track {
                id,
                title: title.to_string(),
                sharing: sharing.to_string(),
                user_id: me.id,
            };
            (id, track)
        })
        .collect();
        Self {
            me,
            tracks,
            access_tokens: HashSet::new(),
            refresh_tokens: HashSet::new(),
        }
    }
}

pub type Db = Arc<RwLock<MockState>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(MockState::default()));
    Router::new()
        .route("/oauth2/token", post(issue_token))
        .route("/v1/me", get(get_me).put(update_me))
        .route("/v1/tracks", get(list_tracks).post(upload_track))
        .route("/v1/tracks/{id}", get(get_track).delete(delete_track))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock api listening");
    }
    axum::serve(listener, app()).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [
            (header::SERVER, "nginx"),
            (header::CONTENT_TYPE, "application/json; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        UNAUTHORIZED_BODY,
    )
        .into_response()
}

fn oauth_error(status: StatusCode, error: &str) -> Response {
    (status, Json(json!({ "error": error }))).into_response()
}

/// Token from an `Authorization: OAuth <token>` header.
fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("OAuth ")
}

async fn authorized(db: &Db, headers: &HeaderMap) -> bool {
    match bearer(headers) {
        Some(token) => db.read().await.access_tokens.contains(token),
        None => false,
    }
}

async fn issue_token(State(db): State<Db>, Form(input): Form<TokenRequest>) -> Response {
    if input.client_id != CLIENT_ID || input.client_secret != CLIENT_SECRET {
        return oauth_error(StatusCode::UNAUTHORIZED, "invalid_client");
    }
    let mut state = db.write().await;
    let granted = match input.grant_type.as_str() {
        "authorization_code" => input.code.as_deref() == Some(AUTHORIZATION_CODE),
        "password" => {
            input.username.as_deref() == Some(USERNAME) && input.password.as_deref() == Some(PASSWORD)
        }
        "refresh_token" => match input.refresh_token.as_deref() {
            Some(token) => state.refresh_tokens.remove(token),
            None => false,
        },
        "client_credentials" => true,
        _ => return oauth_error(StatusCode::BAD_REQUEST, "unsupported_grant_type"),
    };
    if !granted {
        return oauth_error(StatusCode::BAD_REQUEST, "invalid_grant");
    }
    let token = TokenResponse {
        access_token: Uuid::new_v4().simple().to_string(),
        refresh_token: Uuid::new_v4().simple().to_string(),
        expires_in: TOKEN_LIFETIME_SECS,
        scope: "*".to_string(),
    };
    state.access_tokens.insert(token.access_token.clone());
    state.refresh_tokens.insert(token.refresh_token.clone());
    debug!(grant_type = %input.grant_type, "issued token");
    Json(token).into_response()
}

async fn get_me(State(db): State<Db>, headers: HeaderMap) -> Response {
    if !authorized(&db, &headers).await {
        return unauthorized();
    }
    Json(db.read().await.me.clone()).into_response()
}

async fn update_me(
    State(db): State<Db>,
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    if !authorized(&db, &headers).await {
        return unauthorized();
    }
    let mut state = db.write().await;
    if let Some(username) = fields.get("user[username]") {
        state.me.username = username.clone();
    }
    if let Some(city) = fields.get("user[city]") {
        state.me.city = Some(city.clone());
    }
    Json(state.me.clone()).into_response()
}

async fn list_tracks(State(db): State<Db>, Query(query): Query<TrackQuery>) -> Json<Vec<Track>> {
    let state = db.read().await;
    let tracks = state
        .tracks
        .values()
        .filter(|t| query.q.as_deref().map_or(true, |q| t.title.contains(q)))
        .filter(|t| query.filter.as_deref().map_or(true, |f| f == "all" || t.sharing == f))
        .cloned()
        .collect();
    Json(tracks)
}

/// Accepts `track[...]` text fields plus one audio file in `track[asset_data]`.
async fn upload_track(State(db): State<Db>, headers: HeaderMap, mut multipart: Multipart) -> Response {
    if !authorized(&db, &headers).await {
        return unauthorized();
    }
    let mut fields = HashMap::new();
    let mut asset = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return err.into_response(),
        };
        let name = field.name().unwrap_or_default().to_string();
        if name == ASSET_FIELD {
            let content_type = field.content_type().unwrap_or_default().to_string();
            match field.bytes().await {
                Ok(bytes) => asset = Some((content_type, bytes.len())),
                Err(err) => return err.into_response(),
            }
        } else {
            match field.text().await {
                Ok(value) => {
                    fields.insert(name, value);
                }
                Err(err) => return err.into_response(),
            }
        }
    }

    let Some((content_type, size)) = asset else {
        return oauth_error(StatusCode::UNPROCESSABLE_ENTITY, "missing_asset_data");
    };
    if !content_type.starts_with("audio/") {
        return oauth_error(StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_asset_type");
    }

    let mut state = db.write().await;
    let id = state.tracks.keys().next_back().map_or(1, |last| last + 1);
    let track = Track {
        id,
        title: fields.remove("track[title]").unwrap_or_else(|| "untitled".to_string()),
        sharing: fields.remove("track[sharing]").unwrap_or_else(|| "public".to_string()),
        user_id: state.me.id,
    };
    state.tracks.insert(id, track.clone());
    debug!(id, %content_type, size, "track uploaded");
    (StatusCode::CREATED, Json(track)).into_response()
}

async fn get_track(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Track>, StatusCode> {
    let state = db.read().await;
    state.tracks.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_track(State(db): State<Db>, headers: HeaderMap, Path(id): Path<u64>) -> Response {
    if !authorized(&db, &headers).await {
        return unauthorized();
    }
    match db.write().await.tracks.remove(&id) {
        Some(_) => Json(json!({ "status": "200 - OK" })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
