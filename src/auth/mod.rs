//! Stand-in authentication. There is no server side verification: a "session" is the logged in
//! user serialized into a file inside the application directory.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::{
    error::WorklogError,
    store::entities::{Role, User},
};

pub const SESSION_FILE: &str = "session.json";

/// Imitates the latency of a real authentication request.
const LOGIN_DELAY: Duration = Duration::from_millis(200);

/// Source of the current user. The query layer never talks to it, callers resolve the user
/// first and pass ids down.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn current_user(&self) -> Result<Option<User>>;

    async fn login(&self, email: &str, password: &str) -> Result<User>;

    async fn signup(&self, name: &str, email: &str, password: &str, role: Role) -> Result<User>;

    async fn logout(&self) -> Result<()>;
}

/// Accounts accepted by [SessionAuthenticator::login].
pub fn mock_account(email: &str) -> Option<User> {
    match email.trim() {
        "developer@example.com" => Some(User {
            id: "dev-123".into(),
            name: "John Developer".into(),
            email: "developer@example.com".into(),
            role: Role::Developer,
            team: Some("frontend".into()),
        }),
        "manager@example.com" => Some(User {
            id: "mgr-456".into(),
            name: "Jane Manager".into(),
            email: "manager@example.com".into(),
            role: Role::Manager,
            team: None,
        }),
        _ => None,
    }
}

pub struct SessionAuthenticator {
    session_path: PathBuf,
    delay: Duration,
}

impl SessionAuthenticator {
    pub fn new(app_dir: &Path) -> Self {
        Self {
            session_path: app_dir.join(SESSION_FILE),
            delay: LOGIN_DELAY,
        }
    }

    pub fn without_delay(self) -> Self {
        Self {
            delay: Duration::ZERO,
            ..self
        }
    }

    async fn store_session(&self, user: &User) -> Result<()> {
        let buffer = serde_json::to_vec(user)?;
        tokio::fs::write(&self.session_path, buffer).await?;
        debug!("Stored session in {:?}", self.session_path);
        Ok(())
    }
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
    async fn current_user(&self) -> Result<Option<User>> {
        let content = match tokio::fs::read_to_string(&self.session_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<User>(&content) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                // A broken session counts as being logged out
                warn!("Ignoring corrupted session {:?}: {e}", self.session_path);
                Ok(None)
            }
        }
    }

    async fn login(&self, email: &str, _password: &str) -> Result<User> {
        tokio::time::sleep(self.delay).await;
        let user = mock_account(email).ok_or(WorklogError::InvalidCredentials)?;
        self.store_session(&user).await?;
        info!("Logged in as {}", user.id);
        Ok(user)
    }

    async fn signup(&self, name: &str, email: &str, _password: &str, role: Role) -> Result<User> {
        tokio::time::sleep(self.delay).await;
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(WorklogError::validation("Name and email are required").into());
        }
        let user = User {
            id: format!("user-{}", Utc::now().timestamp_millis()),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            role,
            team: (role == Role::Developer).then(|| "frontend".to_string()),
        };
        self.store_session(&user).await?;
        info!("Signed up {}", user.id);
        Ok(user)
    }

    async fn logout(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.session_path).await {
            Ok(()) => {
                info!("Logged out");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Returns the logged in user or fails with [WorklogError::NotLoggedIn].
pub async fn require_user(auth: &dyn Authenticator, action: &str) -> Result<User> {
    auth.current_user()
        .await?
        .ok_or_else(|| WorklogError::not_logged_in(action).into())
}

/// Like [require_user] but also demands the manager role.
pub async fn require_manager(auth: &dyn Authenticator, action: &str) -> Result<User> {
    let user = require_user(auth, action).await?;
    if !user.is_manager() {
        return Err(WorklogError::unauthorized(action).into());
    }
    Ok(user)
}
