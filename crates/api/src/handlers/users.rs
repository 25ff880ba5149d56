//! Handlers for the `users` collection: first-user registration, login and
//! the current-user lookup.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use lughat_core::error::CoreError;
use lughat_core::users::{normalize_email, MIN_PASSWORD_LENGTH};
use lughat_db::models::user::{CreateUser, User, UserResponse};
use lughat_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /api/users/first-register` and `POST /api/users/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub password: String,
}

/// Successful authentication payload.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token expiry (UTC Unix timestamp).
    pub exp: i64,
    pub user: UserResponse,
}

fn issue_token(state: &AppState, user: User) -> AppResult<LoginResponse> {
    let issued = generate_access_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    Ok(LoginResponse {
        token: issued.token,
        exp: issued.exp,
        user: user.into(),
    })
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid email or password".to_string(),
    ))
}

/// POST /api/users/first-register
///
/// Creates the initial account and logs it in. Only allowed while the
/// users table is empty.
pub async fn first_register(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(format!("password: {msg}"))))?;

    if UserRepo::count(&state.pool).await? > 0 {
        return Err(AppError::Core(CoreError::Forbidden(
            "A user already exists; first registration is closed".to_string(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: normalize_email(&input.email),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "First user registered");

    Ok((StatusCode::CREATED, Json(issue_token(&state, user)?)))
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = normalize_email(&input.email);

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid_credentials());
    }

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(issue_token(&state, user)?))
}

/// GET /api/users/me
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Token refers to a user that no longer exists".to_string(),
            ))
        })?;

    Ok(Json(DataResponse { data: user.into() }))
}
