//! Session Management
//!
//! Login, registration and logout on top of a [`ChecklistApi`] and a
//! [`TokenStore`]. "Authenticated" means a token is present; stale tokens are
//! left for the backend to reject.

use std::sync::Arc;
use thiserror::Error;

use crate::client::{ChecklistApi, ClientError};
use crate::models::{LoginRequest, RegisterRequest};
use crate::notice::Notice;
use crate::storage::{StorageError, TokenStore};
use crate::validation::{LoginErrors, LoginForm, RegisterErrors, RegisterForm};

pub const LOGIN_FAILED: &str = "There was an error logging in!";
pub const REGISTERED: &str = "Registered successfully!";
pub const REGISTER_FAILED: &str = "There was an error registering!";

/// Where the user should land after an auth action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/",
        }
    }
}

/// Authentication state shared by every command
#[derive(Clone)]
pub struct Session {
    api: Arc<dyn ChecklistApi>,
    tokens: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(api: Arc<dyn ChecklistApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }

    pub fn api(&self) -> &Arc<dyn ChecklistApi> {
        &self.api
    }

    /// Whether a token is stored; says nothing about its validity
    pub fn is_authenticated(&self) -> bool {
        match self.tokens.read() {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::warn!("Could not read stored token: {}", e);
                false
            }
        }
    }

    /// The stored token, or [`SessionError::NotAuthenticated`]
    pub fn token(&self) -> Result<String, SessionError> {
        self.tokens.read()?.ok_or(SessionError::NotAuthenticated)
    }

    /// Route an auth page should redirect to, if any
    ///
    /// The login and registration pages send already-authenticated users to
    /// the dashboard.
    pub fn auth_page_redirect(&self) -> Option<Route> {
        self.is_authenticated().then_some(Route::Dashboard)
    }

    /// Validate the form, log in and store the issued token
    pub async fn login(&self, form: &LoginForm) -> Result<Route, SessionError> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(SessionError::InvalidLogin(errors));
        }

        let request = LoginRequest {
            username: form.username.clone(),
            password: form.password.clone(),
        };

        let token = self.api.login(&request).await.map_err(|e| {
            tracing::error!("There was an error logging in: {}", e);
            e
        })?;
        self.tokens.write(&token)?;

        tracing::info!("Logged in as {}", form.username);
        Ok(Route::Dashboard)
    }

    /// Validate the form and create an account
    ///
    /// The re-entered password is only checked locally, never sent.
    pub async fn register(&self, form: &RegisterForm) -> Result<Route, SessionError> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(SessionError::InvalidRegistration(errors));
        }

        let request = RegisterRequest {
            username: form.username.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
        };

        self.api.register(&request).await.map_err(|e| {
            tracing::error!("There was an error registering: {}", e);
            e
        })?;

        tracing::info!("Registered {}", form.username);
        Ok(Route::Login)
    }

    /// Forget the stored token
    pub fn logout(&self) -> Result<Route, SessionError> {
        self.tokens.delete()?;
        tracing::info!("Logged out");
        Ok(Route::Login)
    }
}

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid login form:\n{0}")]
    InvalidLogin(LoginErrors),

    #[error("Invalid registration form:\n{0}")]
    InvalidRegistration(RegisterErrors),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// Toast for a failed login attempt
    pub fn login_notice(&self) -> Notice {
        match self {
            SessionError::InvalidLogin(errors) => Notice::error(errors.to_string()),
            _ => Notice::error(LOGIN_FAILED),
        }
    }

    /// Toast for a failed registration attempt
    pub fn register_notice(&self) -> Notice {
        match self {
            SessionError::InvalidRegistration(errors) => Notice::error(errors.to_string()),
            _ => Notice::error(REGISTER_FAILED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeApi;
    use crate::storage::MemoryTokenStore;

    fn session(api: &Arc<FakeApi>, tokens: &Arc<MemoryTokenStore>) -> Session {
        Session::new(api.clone(), tokens.clone())
    }

    fn strong_registration() -> RegisterForm {
        RegisterForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "Secret12!".to_string(),
            re_enter_password: "Secret12!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_stores_token_and_goes_home() {
        let api = Arc::new(FakeApi::new());
        let tokens = Arc::new(MemoryTokenStore::new());
        let session = session(&api, &tokens);

        assert!(!session.is_authenticated());

        let route = session
            .login(&LoginForm::new("alice", "Secret12!"))
            .await
            .unwrap();

        assert_eq!(route, Route::Dashboard);
        assert_eq!(tokens.read().unwrap().as_deref(), Some(FakeApi::TOKEN));
        assert!(session.is_authenticated());
        assert_eq!(session.auth_page_redirect(), Some(Route::Dashboard));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_no_token() {
        let api = Arc::new(FakeApi::new());
        api.fail_login();
        let tokens = Arc::new(MemoryTokenStore::new());
        let session = session(&api, &tokens);

        let err = session
            .login(&LoginForm::new("alice", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Client(_)));
        assert_eq!(err.login_notice(), Notice::error(LOGIN_FAILED));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_invalid_login_form_skips_request() {
        let api = Arc::new(FakeApi::new());
        let tokens = Arc::new(MemoryTokenStore::new());
        let session = session(&api, &tokens);

        let err = session.login(&LoginForm::new("", "")).await.unwrap_err();

        assert!(matches!(err, SessionError::InvalidLogin(_)));
        assert_eq!(api.calls().login, 0);
    }

    #[tokio::test]
    async fn test_register_navigates_to_login() {
        let api = Arc::new(FakeApi::new());
        let tokens = Arc::new(MemoryTokenStore::new());
        let session = session(&api, &tokens);

        let route = session.register(&strong_registration()).await.unwrap();

        assert_eq!(route, Route::Login);
        assert_eq!(api.calls().register, 1);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password() {
        let api = Arc::new(FakeApi::new());
        let tokens = Arc::new(MemoryTokenStore::new());
        let session = session(&api, &tokens);

        let mut form = strong_registration();
        form.password = "secret12!".to_string();
        form.re_enter_password = "secret12!".to_string();

        let err = session.register(&form).await.unwrap_err();
        match err {
            SessionError::InvalidRegistration(errors) => {
                assert_eq!(
                    errors.password.as_deref(),
                    Some(crate::validation::PASSWORD_NO_UPPERCASE)
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(api.calls().register, 0);
    }

    #[tokio::test]
    async fn test_register_failure_notice() {
        let api = Arc::new(FakeApi::new());
        api.fail_mutations();
        let tokens = Arc::new(MemoryTokenStore::new());
        let session = session(&api, &tokens);

        let err = session.register(&strong_registration()).await.unwrap_err();
        assert_eq!(err.register_notice(), Notice::error(REGISTER_FAILED));
    }

    #[test]
    fn test_logout_removes_token() {
        let api = Arc::new(FakeApi::new());
        let tokens = Arc::new(MemoryTokenStore::with_token("abc"));
        let session = session(&api, &tokens);

        assert!(session.is_authenticated());
        assert_eq!(session.logout().unwrap(), Route::Login);
        assert!(!session.is_authenticated());
        assert!(matches!(session.token(), Err(SessionError::NotAuthenticated)));
        assert_eq!(session.auth_page_redirect(), None);
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Dashboard.path(), "/");
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Route::Register.path(), "/register");
    }
}
