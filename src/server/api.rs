use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{ Html, IntoResponse },
    routing::{ get, post },
    Json,
    Router,
};
use serde::{ Deserialize, Serialize };
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, warn };

use crate::error::RelayError;
use crate::models::chat::ChatReply;
use crate::relay::ChatRelay;
use crate::theme::{ ChatPage, Theme, ThemeShell };

#[derive(Clone)]
pub struct AppState {
    pub relay: ChatRelay,
    pub shell: ThemeShell,
}

#[derive(Deserialize)]
pub struct ThemeUpdate {
    pub theme: String,
}

#[derive(Serialize)]
struct ThemeResponse {
    theme: Theme,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/theme", get(get_theme_handler).put(set_theme_handler))
        .route("/api/theme/toggle", post(toggle_theme_handler))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state)
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let page = ChatPage { heading: state.shell.metadata().title.clone() };
    Html(state.shell.wrap(&page))
}

async fn chat_handler(
    State(state): State<AppState>,
    body: Bytes
) -> Result<Json<ChatReply>, RelayError> {
    state.relay.handle(&body).await.map(Json)
}

async fn get_theme_handler(State(state): State<AppState>) -> Json<ThemeResponse> {
    Json(ThemeResponse { theme: state.shell.context().get() })
}

async fn set_theme_handler(
    State(state): State<AppState>,
    Json(req): Json<ThemeUpdate>
) -> impl IntoResponse {
    match req.theme.parse::<Theme>() {
        Ok(theme) => {
            state.shell.context().set(theme);
            info!("Theme set to {}", theme);
            (StatusCode::OK, Json(json!({ "theme": theme }))).into_response()
        }
        Err(e) => {
            warn!("{}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid theme", "details": e.to_string() })),
            ).into_response()
        }
    }
}

async fn toggle_theme_handler(State(state): State<AppState>) -> Json<ThemeResponse> {
    let theme = state.shell.context().toggle();
    info!("Theme toggled to {}", theme);
    Json(ThemeResponse { theme })
}
