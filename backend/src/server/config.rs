//! Application settings loaded via OrthoConfig, and the server configuration
//! derived from them.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

use powerhub::inbound::http::session_config::{SessionSettings, SessionToggles};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind_addr '{value}': {source}")]
    BindAddr {
        /// Configured value.
        value: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// A URL setting does not parse.
    #[error("invalid {name} '{value}': {source}")]
    Url {
        /// Setting name.
        name: &'static str,
        /// Configured value.
        value: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
    /// A boolean setting is not one of the accepted spellings.
    #[error("invalid {name} '{value}': expected true/false, yes/no or 1/0")]
    Flag {
        /// Setting name.
        name: &'static str,
        /// Configured value.
        value: String,
    },
}

/// Settings for the Power Hub server.
///
/// Values come from CLI flags, `POWERHUB_*` environment variables and
/// configuration files, in OrthoConfig's usual precedence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "POWERHUB")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// GraphQL endpoint of the hosted listing store. Unset selects the
    /// in-memory store.
    pub store_endpoint: Option<String>,
    /// Key sent for API-key authorised store calls.
    pub store_api_key: Option<String>,
    /// Timeout applied to store and identity requests.
    pub store_timeout_secs: Option<u64>,
    /// OIDC userinfo endpoint. Unset selects the fixture identity provider
    /// in debug builds.
    pub identity_userinfo_url: Option<String>,
    /// Path to the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Whether session cookies carry the `Secure` attribute. Kept as text so
    /// that an unset value stays distinguishable from `false`.
    pub session_cookie_secure: Option<String>,
    /// Whether a temporary session key may be generated when the key file
    /// is missing.
    pub session_allow_ephemeral: Option<String>,
}

impl AppSettings {
    /// Listening address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Outbound request timeout, defaulting to ten seconds.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Parsed store endpoint, if configured.
    pub fn store_endpoint(&self) -> Result<Option<Url>, SettingsError> {
        parse_url("store_endpoint", self.store_endpoint.as_deref())
    }

    /// Parsed userinfo endpoint, if configured.
    pub fn identity_userinfo_url(&self) -> Result<Option<Url>, SettingsError> {
        parse_url("identity_userinfo_url", self.identity_userinfo_url.as_deref())
    }

    /// Session toggles for validation. Unset flags stay `None`.
    pub fn session_toggles(&self) -> Result<SessionToggles, SettingsError> {
        Ok(SessionToggles {
            key_file: self.session_key_file.clone(),
            cookie_secure: parse_flag(
                "session_cookie_secure",
                self.session_cookie_secure.as_deref(),
            )?,
            allow_ephemeral: parse_flag(
                "session_allow_ephemeral",
                self.session_allow_ephemeral.as_deref(),
            )?,
        })
    }
}

fn parse_flag(name: &'static str, raw: Option<&str>) -> Result<Option<bool>, SettingsError> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            parse_bool(value).ok_or_else(|| SettingsError::Flag {
                name,
                value: value.to_owned(),
            })
        })
        .transpose()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_url(name: &'static str, raw: Option<&str>) -> Result<Option<Url>, SettingsError> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            Url::parse(value).map_err(|source| SettingsError::Url {
                name,
                value: value.to_owned(),
                source,
            })
        })
        .transpose()
}

/// Validated inputs for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Combine validated session settings with the listening address.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
