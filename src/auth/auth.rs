use crate::config::Config;
use crate::error::AppError;
use crate::model::role::Role;
use crate::models::Claims;
use crate::auth::jwt::verify_token;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};
use serde::Serialize;
use utoipa::ToSchema;

/// Caller identity taken from the bearer token.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthUser {
    pub user_id: u64,
    pub username: String,
    pub role: Role,
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role = Role::from_id(claims.role).ok_or(AppError::Unauthorized("Invalid role"))?;
        Ok(AuthUser {
            user_id: claims.user_id,
            username: claims.sub,
            role,
        })
    }
}

fn from_headers(req: &HttpRequest) -> Result<AuthUser, AppError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized("Missing token"))?;

    let config = req
        .app_data::<Data<Config>>()
        .ok_or(AppError::Unauthorized("Config missing"))?;

    let claims = verify_token(token, &config.jwt_secret)
        .map_err(|_| AppError::Unauthorized("Invalid token"))?;
    AuthUser::try_from(claims)
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // the auth middleware has usually decoded it already
        if let Some(user) = req.extensions().get::<AuthUser>() {
            return ready(Ok(user.clone()));
        }
        ready(from_headers(req))
    }
}

impl AuthUser {
    pub fn require_approver(&self) -> Result<(), AppError> {
        if self.role.can_approve() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Manager/Admin only"))
        }
    }

    /// Owners see their own requests; approvers see all.
    pub fn can_view(&self, requester_id: u64) -> bool {
        self.user_id == requester_id || self.role.can_approve()
    }
}
