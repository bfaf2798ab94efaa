//! Session cookie configuration and validation.
//!
//! Debug builds tolerate missing toggles and fall back to an ephemeral key
//! with a warning. Release builds require every toggle and a key file of at
//! least [`SESSION_KEY_MIN_LEN`] bytes.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Minimum key file length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use powerhub::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw session toggles as loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionToggles {
    /// Path to the cookie signing key.
    pub key_file: Option<PathBuf>,
    /// Whether cookies carry the `Secure` attribute.
    pub cookie_secure: Option<bool>,
    /// Whether a generated key may stand in for a missing key file.
    pub allow_ephemeral: Option<bool>,
}

/// Validated session settings.
pub struct SessionSettings {
    /// Signing key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy. Lax so the marketplace form's redirect keeps the
    /// session.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A toggle required in release builds is missing.
    #[error("missing required session setting: {name}")]
    MissingSetting {
        /// Setting name.
        name: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        /// Key file path.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The key file is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Key file path.
        path: PathBuf,
        /// Bytes read.
        length: usize,
        /// Required minimum.
        min_len: usize,
    },
    /// Release builds must not allow ephemeral session keys.
    #[error("session_allow_ephemeral must be false in release builds")]
    EphemeralNotAllowed,
}

/// Validate `toggles` for `mode`.
///
/// # Examples
///
/// ```rust
/// use powerhub::inbound::http::session_config::{
///     BuildMode, SessionToggles, session_settings,
/// };
///
/// let toggles = SessionToggles {
///     key_file: Some("/nonexistent/powerhub-key".into()),
///     cookie_secure: Some(false),
///     allow_ephemeral: Some(true),
/// };
/// let settings = session_settings(&toggles, BuildMode::Debug).expect("debug fallback");
/// assert!(!settings.cookie_secure);
/// ```
pub fn session_settings(
    toggles: &SessionToggles,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = cookie_secure(toggles, mode)?;
    let allow_ephemeral = allow_ephemeral(toggles, mode)?;
    let key = session_key(toggles, mode, allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site: SameSite::Lax,
    })
}

fn cookie_secure(toggles: &SessionToggles, mode: BuildMode) -> Result<bool, SessionConfigError> {
    match toggles.cookie_secure {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!("session_cookie_secure not set; defaulting to secure");
            Ok(true)
        }
        None => Err(SessionConfigError::MissingSetting {
            name: "session_cookie_secure",
        }),
    }
}

fn allow_ephemeral(toggles: &SessionToggles, mode: BuildMode) -> Result<bool, SessionConfigError> {
    match (toggles.allow_ephemeral, mode) {
        (Some(true), BuildMode::Release) => Err(SessionConfigError::EphemeralNotAllowed),
        (Some(flag), _) => Ok(flag),
        (None, BuildMode::Debug) => Ok(false),
        (None, BuildMode::Release) => Err(SessionConfigError::MissingSetting {
            name: "session_allow_ephemeral",
        }),
    }
}

fn session_key(
    toggles: &SessionToggles,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = toggles
        .key_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH));

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(SessionConfigError::KeyRead {
            path,
            source: error,
        }),
    }
}
