//! Signing up and logging in users.

use crate::{
    Error, NewUser, User,
    api::{ApiClient, USERS, check_status},
};

impl ApiClient {
    /// Register a new user and return the record the API created.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateUsername] if a user with the same username
    /// already exists, or an API error if either request fails.
    pub async fn signup(&self, new_user: &NewUser) -> Result<User, Error> {
        if self.find_user_by_username(new_user.username()).await?.is_some() {
            return Err(Error::DuplicateUsername(new_user.username().to_owned()));
        }

        let response = self
            .http
            .post(self.collection_url(USERS))
            .json(new_user)
            .send()
            .await
            .inspect_err(|error| tracing::error!("Could not send sign up request: {error}"))?;

        let user = check_status(response)?
            .json::<User>()
            .await
            .inspect_err(|error| tracing::error!("Could not decode new user: {error}"))?;

        tracing::info!("Registered user {} with ID {}", user.username, user.id);

        Ok(user)
    }

    /// Find the user with a matching username and password.
    ///
    /// Returns `None` if no user matches, which callers should treat as
    /// invalid credentials.
    ///
    /// # Errors
    ///
    /// Returns an API error if the request fails.
    pub async fn log_in(&self, username: &str, password: &str) -> Result<Option<User>, Error> {
        let response = self
            .http
            .get(self.collection_url(USERS))
            .query(&[("username", username), ("password", password)])
            .send()
            .await
            .inspect_err(|error| tracing::error!("Could not send log in request: {error}"))?;

        let users = check_status(response)?
            .json::<Vec<User>>()
            .await
            .inspect_err(|error| tracing::error!("Could not decode users: {error}"))?;

        Ok(users.into_iter().next())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        let response = self
            .http
            .get(self.collection_url(USERS))
            .query(&[("username", username)])
            .send()
            .await
            .inspect_err(|error| tracing::error!("Could not send user lookup request: {error}"))?;

        let users = check_status(response)?.json::<Vec<User>>().await?;

        Ok(users.into_iter().next())
    }
}
