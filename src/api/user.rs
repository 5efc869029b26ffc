//! User session endpoint.

use crate::api::types::{LoginRequest, LoginResponse};
use crate::client::Client;
use crate::error::KbError;

#[derive(Clone)]
pub struct UserApi {
    client: Client,
}

impl UserApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Log in and obtain a bearer token. Storing the token in the session
    /// is the caller's business; the client never mutates session state on
    /// the success path.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, KbError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.client.post_json("/user/session", &body).await?.data()
    }
}
