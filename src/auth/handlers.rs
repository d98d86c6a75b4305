use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AuthResponse, LoginRequest, MeResponse, OnboardingRequest, RefreshRequest,
            SignupRequest, UpdateProfileRequest,
        },
        onboarding,
        repo_types::{AccountRecord, UserProfile},
        services::{
            hash_password, is_valid_email, normalize_email, verify_password, AuthUser, JwtKeys,
            MIN_PASSWORD_LEN,
        },
    },
    badges::{self, catalogue::MINDFUL_STARTER},
    error::{AppError, AppResult},
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password. Try signing up!";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me).patch(update_me))
        .route("/me/onboarding", post(complete_onboarding))
}

fn issue_tokens(state: &AppState, user: UserProfile) -> AppResult<AuthResponse> {
    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign_access(&user)?;
    let refresh_token = keys.sign_refresh(&user)?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        user,
    })
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.email = normalize_email(&payload.email);
    let name = payload.name.trim().to_string();

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("Please fill in all fields"));
    }
    if name.is_empty() {
        return Err(AppError::validation("Please enter your name"));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::validation(
            "Password must be at least 6 characters",
        ));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::validation("Invalid email"));
    }

    state.simulate_latency().await;

    let hash = hash_password(&payload.password)?;
    let user = UserProfile::new(name, payload.email.clone(), state.now());
    let Some(account) = AccountRecord::create(state.store.as_ref(), hash, user).await? else {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    };

    info!(user_id = %account.user.id, email = %account.user.email, "user signed up");
    Ok(Json(issue_tokens(&state, account.user)?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.email = normalize_email(&payload.email);
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("Please fill in all fields"));
    }

    state.simulate_latency().await;

    let Some(account) = AccountRecord::find_by_email(state.store.as_ref(), &payload.email).await?
    else {
        warn!(email = %payload.email, "login unknown email");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    };

    if !verify_password(&payload.password, &account.password_hash)? {
        warn!(email = %payload.email, user_id = %account.user.id, "login invalid password");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    info!(user_id = %account.user.id, email = %account.user.email, "user logged in");
    Ok(Json(issue_tokens(&state, account.user)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;

    let user = AuthUser {
        id: claims.sub,
        email: claims.email,
    }
    .profile(&state)
    .await?;
    Ok(Json(issue_tokens(&state, user)?))
}

#[instrument(skip(state))]
pub async fn get_me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<MeResponse>> {
    let user = auth.profile(&state).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<MeResponse>> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation("Name cannot be empty"));
    }
    let user = AccountRecord::update_profile(state.store.as_ref(), &auth.email, |u| u.name = name)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;
    info!(user_id = %user.id, "profile name updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn complete_onboarding(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<OnboardingRequest>,
) -> AppResult<Json<MeResponse>> {
    let archetype = onboarding::validate(&payload)?;
    let user = AccountRecord::update_profile(state.store.as_ref(), &auth.email, move |u| {
        onboarding::apply(u, payload, archetype)
    })
    .await?
    .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;

    badges::repo::award(&state, user.id, &MINDFUL_STARTER).await?;
    info!(
        user_id = %user.id,
        archetype = ?archetype,
        score = user.discipline_score,
        "onboarding complete"
    );
    Ok(Json(user.into()))
}
