use crate::{
    auth::{auth::AuthUser, jwt::generate_access_token, password::verify_password},
    config::Config,
    error::AppError,
    models::{LoginReqDto, LoginResponse},
    store::LeaveStore,
};
use crate::config::ViewSettings;
use actix_web::{HttpResponse, web};
use tracing::{debug, error, info, instrument};

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Username or password missing"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(store, config, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    store: web::Data<dyn LeaveStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    if user.username.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty username or password");
        return Err(AppError::Validation("Username or password required".into()));
    }

    let record = store
        .credentials(user.username.trim())
        .await
        .map_err(AppError::load("user"))?;

    let record = match record {
        Some(record) if record.is_active => {
            debug!(user_id = record.id, "User found");
            record
        }
        _ => {
            info!("Invalid credentials: unknown or inactive user");
            return Err(AppError::Unauthorized("Invalid credentials"));
        }
    };

    if let Err(e) = verify_password(&user.password, &record.password) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return Err(AppError::Unauthorized("Invalid credentials"));
    }

    let access_token = generate_access_token(
        record.id,
        record.username.clone(),
        record.role_id,
        &config.jwt_secret,
        config.access_token_ttl,
    )
    .map_err(|e| {
        error!(error = %e, "Failed to sign access token");
        AppError::LoadFailed("access token")
    })?;

    info!("Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token,
        expires_in: config.access_token_ttl,
    }))
}

/// Current user identity
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Caller identity", body = AuthUser),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn me(auth: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(auth)
}

/// Static view parameters
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "View settings", body = ViewSettings),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn settings(config: web::Data<Config>) -> HttpResponse {
    HttpResponse::Ok().json(&config.views)
}
