//! Authentication session
//!
//! Identity lives with an external provider reached through
//! [`AuthGateway`]. The rest of the application only asks the session
//! whether someone is signed in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::LoadStatus;
use crate::error::{Result, ServiceError};

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
}

/// Successful login response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

/// Partial profile update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser>;

    async fn logout(&self) -> Result<()>;
}

/// Client-side authentication state
#[derive(Debug, Default)]
pub struct Session {
    current_user: Option<User>,
    token: Option<String>,
    status: LoadStatus,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn is_email_verified(&self) -> bool {
        self.current_user
            .as_ref()
            .map(|u| u.email_verified)
            .unwrap_or(false)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Sign in through `gateway`
    ///
    /// On failure the previous user (if any) is kept and a user-facing
    /// message is recorded.
    pub async fn login<G>(&mut self, gateway: &G, email: &str, password: &str) -> Result<()>
    where
        G: AuthGateway + ?Sized,
    {
        self.status = LoadStatus::Loading;
        self.error = None;

        match gateway.login(email, password).await {
            Ok(authenticated) => {
                log::info!("Signed in as {}", authenticated.user.uid);
                self.current_user = Some(authenticated.user);
                self.token = Some(authenticated.token);
                self.status = LoadStatus::Succeeded;
                Ok(())
            }
            Err(e) => {
                log::warn!("Login failed: {}", e);
                self.status = LoadStatus::Failed;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Sign out through `gateway`
    ///
    /// A failed logout keeps the user signed in and records the error.
    pub async fn logout<G>(&mut self, gateway: &G) -> Result<()>
    where
        G: AuthGateway + ?Sized,
    {
        match gateway.logout().await {
            Ok(()) => {
                self.current_user = None;
                self.token = None;
                self.status = LoadStatus::Idle;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Adopt a user reported by the identity provider, or clear it
    pub fn set_current_user(&mut self, user: Option<User>) {
        if user.is_none() {
            self.token = None;
        }
        self.current_user = user;
    }

    /// Merge a profile update into the signed-in user
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        let Some(user) = self.current_user.as_mut() else {
            return;
        };
        if let Some(display_name) = update.display_name {
            user.display_name = Some(display_name);
        }
        if let Some(photo_url) = update.photo_url {
            user.photo_url = Some(photo_url);
        }
    }
}

/// Map a provider error code to the message shown on the login screen
pub fn login_error(code: &str, message: Option<&str>) -> ServiceError {
    match (code, message) {
        ("auth/invalid-credential", _) => ServiceError::InvalidCredentials,
        (_, Some(message)) if !message.is_empty() => ServiceError::Auth(message.to_string()),
        _ => ServiceError::Auth("Login failed".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedGateway {
        password: &'static str,
    }

    #[async_trait]
    impl AuthGateway for FixedGateway {
        async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
            if password != self.password {
                return Err(login_error("auth/invalid-credential", None));
            }
            Ok(AuthenticatedUser {
                user: User {
                    uid: "u-1".to_string(),
                    email: Some(email.to_string()),
                    display_name: None,
                    photo_url: None,
                    email_verified: true,
                },
                token: "token-1".to_string(),
            })
        }

        async fn logout(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let gateway = FixedGateway { password: "secret" };
        let mut session = Session::new();
        assert!(!session.is_authenticated());

        session.login(&gateway, "ada@example.com", "secret").await.unwrap();

        assert!(session.is_authenticated());
        assert!(session.is_email_verified());
        assert_eq!(session.token(), Some("token-1"));
        assert_eq!(session.status(), LoadStatus::Succeeded);

        session.logout(&gateway).await.unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(session.status(), LoadStatus::Idle);
    }

    #[tokio::test]
    async fn test_invalid_credentials_message() {
        let gateway = FixedGateway { password: "secret" };
        let mut session = Session::new();

        let err = session
            .login(&gateway, "ada@example.com", "wrong")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidCredentials));
        assert_eq!(session.error(), Some("Invalid email or password"));
        assert_eq!(session.status(), LoadStatus::Failed);
        assert!(!session.is_authenticated());

        session.clear_error();
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_login_error_mapping() {
        assert_eq!(
            login_error("auth/too-many-requests", Some("Slow down")).to_string(),
            "Slow down"
        );
        assert_eq!(login_error("other", None).to_string(), "Login failed");
    }

    #[test]
    fn test_set_current_user_none_drops_token() {
        let mut session = Session::new();
        session.set_current_user(Some(User {
            uid: "u-2".to_string(),
            email: None,
            display_name: None,
            photo_url: None,
            email_verified: false,
        }));
        session.update_profile(ProfileUpdate {
            display_name: Some("Grace".to_string()),
            photo_url: None,
        });
        assert_eq!(
            session.current_user().unwrap().display_name.as_deref(),
            Some("Grace")
        );

        session.set_current_user(None);
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }
}
