//! The user model shared by the API client and the auth cookies.

use serde::{Deserialize, Serialize};

use crate::{Error, RecordId};

/// A user registered with the REST API.
///
/// Any other fields the API stores for a user, such as the password, are
/// ignored when a user record is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The ID the API assigned to the user.
    pub id: RecordId,
    /// The name the user logs in with.
    pub username: String,
}

/// The data needed to register a new user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    username: String,
    password: String,
}

impl NewUser {
    /// Create the sign-up data for a user.
    ///
    /// Leading and trailing whitespace is removed from `username`, the
    /// password is kept as entered.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyUsername] or [Error::EmptyPassword] if either is empty.
    pub fn new(username: &str, password: &str) -> Result<Self, Error> {
        let username = username.trim();

        if username.is_empty() {
            return Err(Error::EmptyUsername);
        }

        if password.is_empty() {
            return Err(Error::EmptyPassword);
        }

        Ok(Self {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    /// The trimmed username.
    pub fn username(&self) -> &str {
        &self.username
    }
}
