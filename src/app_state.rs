//! Implements a struct that holds the state of the web server.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{Error, api::ApiClient, auth::DEFAULT_COOKIE_DURATION, timezone::get_local_offset};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Seoul".
    pub local_timezone: String,

    /// The client for the REST API that stores the user's data.
    pub api: ApiClient,
}

impl AppState {
    /// Create a new [AppState] that stores data with `api`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Seoul".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(api: ApiClient, cookie_secret: &str, local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            local_timezone: local_timezone.to_owned(),
            api,
        })
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

#[cfg(test)]
mod tests {
    use crate::{AppState, Error, api::ApiClient};

    #[test]
    fn rejects_unknown_timezone() {
        let result = AppState::new(ApiClient::new("http://localhost"), "foobar", "Mars/Olympus");

        assert_eq!(
            result.map(|state| state.local_timezone),
            Err(Error::InvalidTimezoneError("Mars/Olympus".to_owned()))
        );
    }

    #[test]
    fn accepts_canonical_timezone() {
        let state = AppState::new(ApiClient::new("http://localhost"), "foobar", "Asia/Seoul")
            .expect("Could not create app state");

        assert_eq!(state.local_timezone, "Asia/Seoul");
    }
}
