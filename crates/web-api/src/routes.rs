use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::services::ServeDir;
use uuid::Uuid;

use application::{
    AccountDto, AuthenticateRequest, ChirpDto, CreateAccountRequest, CreateChirpRequest,
};

use crate::{
    error::ApiError,
    metrics::{admin_metrics, count_hits},
    state::AppState,
};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Debug, Deserialize)]
struct CredentialsPayload {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct CreateChirpPayload {
    body: String,
    user_id: Uuid,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .nest("/admin", admin_routes())
        .merge(static_routes(&state))
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/users", post(create_account))
        .route("/login", post(login))
        .route("/chirps", post(create_chirp).get(list_chirps))
        .route("/chirps/{chirp_id}", get(get_chirp))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(admin_metrics))
        .route("/reset", post(reset))
}

fn static_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest_service("/app", ServeDir::new(&state.static_dir))
        .layer(middleware::from_fn_with_state(state.clone(), count_hits))
}

async fn healthz() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, TEXT_PLAIN)], "OK")
}

async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountDto>), ApiError> {
    let Json(payload) = payload?;
    let dto = state
        .service
        .create_account(CreateAccountRequest {
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(dto)))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsPayload>, JsonRejection>,
) -> Result<Json<AccountDto>, ApiError> {
    let Json(payload) = payload?;
    let dto = state
        .service
        .authenticate(AuthenticateRequest {
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok(Json(dto))
}

async fn create_chirp(
    State(state): State<AppState>,
    payload: Result<Json<CreateChirpPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ChirpDto>), ApiError> {
    let Json(payload) = payload?;
    let dto = state
        .service
        .create_chirp(CreateChirpRequest {
            body: payload.body,
            user_id: payload.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(dto)))
}

async fn list_chirps(State(state): State<AppState>) -> Result<Json<Vec<ChirpDto>>, ApiError> {
    let items = state.service.list_chirps().await?;
    Ok(Json(items))
}

async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
) -> Result<Json<ChirpDto>, ApiError> {
    let dto = state.service.get_chirp(&chirp_id).await?;
    Ok(Json(dto))
}

async fn reset(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    state.service.reset_all().await?;
    Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], "OK"))
}
