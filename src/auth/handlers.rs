use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{AuthenticatedUser, CreateUserRequest, LoginRequest, UpdateUserRequest};
use super::error::UserError;
use super::extractors::AuthUser;
use super::jwt::JwtKeys;
use super::service;
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/login", post(login))
}

pub fn current_user_routes() -> Router<AppState> {
    Router::new().route("/user", get(current_user).put(update_user))
}

#[instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<AuthenticatedUser>, UserError> {
    let keys = JwtKeys::from_ref(&state);
    let authed = service::create_user(state.store.as_ref(), &keys, payload).await?;
    info!(user_id = authed.user.id, email = %authed.user.email, "user registered");
    Ok(Json(authed))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthenticatedUser>, UserError> {
    let keys = JwtKeys::from_ref(&state);
    let authed = service::login(state.store.as_ref(), &keys, payload).await?;
    info!(user_id = authed.user.id, "user logged in");
    Ok(Json(authed))
}

#[instrument(skip(state))]
async fn current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<AuthenticatedUser>, UserError> {
    let keys = JwtKeys::from_ref(&state);
    let authed = service::current_user(state.store.as_ref(), &keys, user_id).await?;
    Ok(Json(authed))
}

#[instrument(skip(state, payload))]
async fn update_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<AuthenticatedUser>, UserError> {
    let keys = JwtKeys::from_ref(&state);
    let authed = service::update_user(state.store.as_ref(), &keys, user_id, payload).await?;
    info!(user_id = authed.user.id, "user updated");
    Ok(Json(authed))
}
