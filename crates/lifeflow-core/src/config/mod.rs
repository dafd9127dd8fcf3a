//! Startup configuration for the hosted data service.
//!
//! Two values are required: the Supabase project URL and its public (anon)
//! key. Front ends resolve them once at startup; a missing value is fatal.

use thiserror::Error;

use crate::util::{is_http_url, normalize_text_option};

pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Names the original web build used; accepted as fallbacks.
const SUPABASE_URL_FALLBACK_ENVS: &[&str] = &["VITE_SUPABASE_URL"];
const SUPABASE_ANON_KEY_FALLBACK_ENVS: &[&str] =
    &["VITE_SUPABASE_ANON_KEY", "VITE_SUPABASE_PUBLISHABLE_KEY"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration value {0}")]
    Missing(&'static str),
    #[error("{0} must include http:// or https://")]
    InvalidUrl(&'static str),
}

/// Resolved, validated service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    supabase_url: String,
    supabase_anon_key: String,
}

impl ClientConfig {
    pub fn new(
        supabase_url: impl Into<String>,
        supabase_anon_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let supabase_url = normalize_text_option(Some(supabase_url.into()))
            .ok_or(ConfigError::Missing(SUPABASE_URL_ENV))?;
        let supabase_anon_key = normalize_text_option(Some(supabase_anon_key.into()))
            .ok_or(ConfigError::Missing(SUPABASE_ANON_KEY_ENV))?;
        if !is_http_url(&supabase_url) {
            return Err(ConfigError::InvalidUrl(SUPABASE_URL_ENV));
        }

        Ok(Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key,
        })
    }

    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary lookup, explicit values first.
    pub fn resolve(
        explicit_url: Option<String>,
        explicit_anon_key: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let url = normalize_text_option(explicit_url)
            .or_else(|| lookup_first(&lookup, SUPABASE_URL_ENV, SUPABASE_URL_FALLBACK_ENVS))
            .ok_or(ConfigError::Missing(SUPABASE_URL_ENV))?;
        let anon_key = normalize_text_option(explicit_anon_key)
            .or_else(|| {
                lookup_first(
                    &lookup,
                    SUPABASE_ANON_KEY_ENV,
                    SUPABASE_ANON_KEY_FALLBACK_ENVS,
                )
            })
            .ok_or(ConfigError::Missing(SUPABASE_ANON_KEY_ENV))?;
        Self::new(url, anon_key)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self::resolve(None, None, lookup)
    }

    pub fn supabase_url(&self) -> &str {
        &self.supabase_url
    }

    pub fn supabase_anon_key(&self) -> &str {
        &self.supabase_anon_key
    }

    /// Base URL of the PostgREST row API.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url)
    }
}

fn lookup_first(
    lookup: &impl Fn(&str) -> Option<String>,
    primary: &str,
    fallbacks: &[&str],
) -> Option<String> {
    std::iter::once(primary)
        .chain(fallbacks.iter().copied())
        .find_map(|key| normalize_text_option(lookup(key)))
}
