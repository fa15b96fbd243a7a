//! Account/session service.

use eyre::Result;
use serde::{Deserialize, Serialize};

use crate::connection::ConnectionInfo;

const LOGIN_PATH: &str = "api/accounts/login/";
const REGISTER_PATH: &str = "api/accounts/register/";
const ME_PATH: &str = "api/accounts/me/";
const LOGOUT_PATH: &str = "api/accounts/logout/";

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// The signed-in user, as reported by the accounts resource.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<u64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
}

/// Login, registration and profile calls. The returned token is handed to
/// whatever [`crate::session::SessionTokens`] implementation the caller
/// persists it in; this service does not store it.
#[derive(Clone, Debug)]
pub struct AuthService {
    connection: ConnectionInfo,
}

impl AuthService {
    #[must_use]
    pub fn new(connection: ConnectionInfo) -> Self {
        Self { connection }
    }

    /// Exchange credentials for a session token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let response: TokenResponse = self
            .connection
            .post(LOGIN_PATH, LoginBody { username, password })
            .await?;
        Ok(response.token)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<UserProfile> {
        self.connection
            .post(
                REGISTER_PATH,
                RegisterBody {
                    username,
                    email,
                    password,
                },
            )
            .await
    }

    pub async fn me(&self) -> Result<UserProfile> {
        self.connection.get(ME_PATH).await
    }

    /// Invalidate the token server-side. The local session is the caller's
    /// to clear.
    pub async fn logout(&self) -> Result<()> {
        let _: serde_json::Value = self.connection.post(LOGOUT_PATH, ()).await?;
        Ok(())
    }
}
