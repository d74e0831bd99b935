use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::model::leave_request::ApprovalStatus;

/// Dashboard tab shown first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DefaultView {
    Pending,
    Approved,
    Rejected,
    All,
}

impl DefaultView {
    /// Status shown by this tab; `All` shows every status.
    pub fn status(self) -> Option<ApprovalStatus> {
        match self {
            DefaultView::Pending => Some(ApprovalStatus::Pending),
            DefaultView::Approved => Some(ApprovalStatus::Approved),
            DefaultView::Rejected => Some(ApprovalStatus::Rejected),
            DefaultView::All => None,
        }
    }
}

/// Static parameters handed to the front end; nothing here is computed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ViewSettings {
    #[schema(example = "Leave Management")]
    pub title: String,
    pub default_view: DefaultView,
    #[schema(example = 10)]
    pub items_per_page: usize,
    pub allow_bulk_actions: bool,
    pub show_analytics: bool,
    /// how long user-facing messages stay visible
    #[schema(example = 5)]
    pub message_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub access_token_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    pub log_dir: String,
    pub log_level: tracing::Level,

    pub views: ViewSettings,
}

pub const MAX_PAGE_SIZE: usize = 100;

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{} must be set", key))
}

fn or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_or(key, env::var(key).ok(), default)
}

/// Parses `raw` when present, naming `key` in the error.
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} has invalid value {:?}: {}", key, raw, e)),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let views = ViewSettings {
            title: or_default("VIEW_TITLE", "Leave Management".to_string())?,
            default_view: or_default("VIEW_DEFAULT", DefaultView::Pending)?,
            items_per_page: or_default("VIEW_PAGE_SIZE", 10usize)?.clamp(1, MAX_PAGE_SIZE),
            allow_bulk_actions: or_default("VIEW_ALLOW_BULK_ACTIONS", true)?,
            show_analytics: or_default("VIEW_SHOW_ANALYTICS", true)?,
            message_timeout_secs: or_default("VIEW_MESSAGE_TIMEOUT_SECS", 5u64)?,
        };

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            access_token_ttl: or_default("ACCESS_TOKEN_TTL", 900)?, // default 15 min
            rate_login_per_min: or_default("RATE_LOGIN_PER_MIN", 60)?,
            rate_protected_per_min: or_default("RATE_PROTECTED_PER_MIN", 1000)?,
            api_prefix: or_default("API_PREFIX", "/api".to_string())?,
            log_dir: or_default("LOG_DIR", "logs".to_string())?,
            log_level: or_default("LOG_LEVEL", tracing::Level::DEBUG)?,
            views,
        })
    }
}
