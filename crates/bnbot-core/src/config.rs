use std::{env, path::PathBuf, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_TARGET_LANG: &str = "bn";
pub const DEFAULT_TRANSLATE_API_URL: &str = "https://translate.googleapis.com";
pub const DEFAULT_GRAPH_API_URL: &str = "https://graph.facebook.com";

/// Typed configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    // Core
    pub telegram_bot_token: String,
    pub owner_id: Option<i64>,

    // Translation
    pub translate_target_lang: String,
    pub translate_api_url: String,
    pub translate_timeout: Duration,

    // Profile lookup
    pub graph_access_token: Option<String>,
    pub graph_api_url: String,
    pub profile_lookup_timeout: Duration,

    // Telegram limits
    pub telegram_message_limit: usize,
    pub telegram_caption_limit: usize,
}

impl Config {
    /// Load from the process environment, after merging `.env` if present.
    pub fn load() -> Result<Self> {
        // dotenvy never overrides variables that are already set.
        check_dotenv(dotenvy::dotenv())?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (env, map, ...).
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telegram_bot_token = get("TG_BOT_TOKEN").and_then(non_empty).ok_or_else(|| {
            Error::Config("TG_BOT_TOKEN environment variable not set".to_string())
        })?;

        let owner_id = match get("OWNER_ID").and_then(non_empty) {
            None => None,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    tracing::warn!(value = %raw, "OWNER_ID is not a numeric user id; /restart is unrestricted");
                    None
                }
            },
        };

        let translate_target_lang = get("TRANSLATE_TARGET_LANG")
            .and_then(non_empty)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_TARGET_LANG.to_string());
        let translate_api_url = get("TRANSLATE_API_URL")
            .and_then(non_empty)
            .map(trim_base_url)
            .unwrap_or_else(|| DEFAULT_TRANSLATE_API_URL.to_string());
        let translate_timeout =
            Duration::from_secs(parse_u64(get("TRANSLATE_TIMEOUT_SECS")).unwrap_or(10));

        let graph_access_token = get("FB_ACCESS_TOKEN").and_then(non_empty);
        let graph_api_url = get("GRAPH_API_URL")
            .and_then(non_empty)
            .map(trim_base_url)
            .unwrap_or_else(|| DEFAULT_GRAPH_API_URL.to_string());
        let profile_lookup_timeout =
            Duration::from_secs(parse_u64(get("PROFILE_LOOKUP_TIMEOUT_SECS")).unwrap_or(10));

        let telegram_message_limit = parse_usize(get("TELEGRAM_MESSAGE_LIMIT")).unwrap_or(4096);
        let telegram_caption_limit = parse_usize(get("TELEGRAM_CAPTION_LIMIT")).unwrap_or(1024);

        Ok(Self {
            telegram_bot_token,
            owner_id,
            translate_target_lang,
            translate_api_url,
            translate_timeout,
            graph_access_token,
            graph_api_url,
            profile_lookup_timeout,
            telegram_message_limit,
            telegram_caption_limit,
        })
    }
}

/// A missing `.env` is fine; an unreadable or malformed one is a config error.
fn check_dotenv(res: std::result::Result<PathBuf, dotenvy::Error>) -> Result<()> {
    match res {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env");
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::Config(format!("failed to load .env: {e}"))),
    }
}

fn parse_u64(v: Option<String>) -> Option<u64> {
    v.and_then(|s| s.trim().parse::<u64>().ok())
}

fn parse_usize(v: Option<String>) -> Option<usize> {
    v.and_then(|s| s.trim().parse::<usize>().ok())
}

fn trim_base_url(s: String) -> String {
    s.trim().trim_end_matches('/').to_string()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
