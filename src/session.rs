//! Authentication session lifecycle
//!
//! A session is `Unknown` until [`Session::bootstrap`] has looked at the stored
//! credentials, then either `Anonymous` or `Authenticated`. Operations return
//! a [`Transition`] describing the new state plus the side effects the UI
//! must perform (notice, redirect); the UI layer applies them.

use crate::error::ApiError;
use crate::forms::{FormError, RegisterForm};
use crate::models::{LoginCredentials, RegisterData, User};
use crate::notice::Notice;
use crate::services::AuthService;
use log::{error, info, warn};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Stored credentials not checked yet.
    #[default]
    Unknown,
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Unknown)
    }

    /// Only an authenticated session may issue data requests.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Where the UI should navigate after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Dashboard,
    Login,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub notice: Option<Notice>,
    pub redirect: Option<Destination>,
}

/// A surfaced failure: the notice to show and the underlying error, handed
/// back so the calling form can leave its busy state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionError {
    pub notice: Notice,
    pub source: ApiError,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notice.message)
    }
}

impl std::error::Error for SessionError {}

/// Why a registration form did not produce a session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistrationError {
    /// Rejected locally; nothing was sent.
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Clone)]
pub struct Session {
    auth: AuthService,
}

impl Session {
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }

    /// Resolves the initial state. Never fails: a rejected token degrades to
    /// anonymous with the credentials wiped.
    pub async fn bootstrap(&self) -> SessionState {
        if !self.auth.is_authenticated() {
            return SessionState::Anonymous;
        }
        match self.auth.get_profile().await {
            Ok(user) => {
                info!("Session restored for {}", user.username);
                SessionState::Authenticated(user)
            }
            Err(e) if e.is_unauthorized() => {
                info!("Stored token rejected, clearing credentials");
                self.auth.forget_credentials();
                SessionState::Anonymous
            }
            Err(e) => {
                warn!("Auth check failed, clearing stored credentials: {}", e);
                self.auth.forget_credentials();
                SessionState::Anonymous
            }
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Transition, SessionError> {
        let credentials = LoginCredentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        match self.auth.login(&credentials).await {
            Ok(response) => Ok(Transition {
                state: SessionState::Authenticated(response.user),
                notice: Some(Notice::success("Login successful!")),
                redirect: Some(Destination::Dashboard),
            }),
            Err(e) => {
                error!("Login failed: {}", e);
                let message = e.detail().unwrap_or("Login failed").to_string();
                Err(SessionError {
                    notice: Notice::error(message),
                    source: e,
                })
            }
        }
    }

    pub async fn register(&self, data: &RegisterData) -> Result<Transition, SessionError> {
        match self.auth.register(data).await {
            Ok(response) => Ok(Transition {
                state: SessionState::Authenticated(response.user),
                notice: Some(Notice::success("Registration successful!")),
                redirect: Some(Destination::Dashboard),
            }),
            Err(e) => {
                error!("Registration failed: {}", e);
                let message = e
                    .first_field_message(&["username", "email"])
                    .unwrap_or("Registration failed")
                    .to_string();
                Err(SessionError {
                    notice: Notice::error(message),
                    source: e,
                })
            }
        }
    }

    /// Checks the form locally before any request is built.
    pub async fn register_form(&self, form: &RegisterForm) -> Result<Transition, RegistrationError> {
        let data = form.validate()?;
        Ok(self.register(&data).await?)
    }

    /// Always ends anonymous. Server-side invalidation failures are logged only.
    pub async fn logout(&self) -> Transition {
        if let Err(e) = self.auth.logout().await {
            warn!("Logout error: {}", e);
        }
        Transition {
            state: SessionState::Anonymous,
            notice: Some(Notice::success("Logged out successfully")),
            redirect: Some(Destination::Login),
        }
    }

    /// Re-fetches the identity. On failure the current state is kept as is.
    pub async fn refresh_user(&self, current: &SessionState) -> SessionState {
        match self.auth.get_profile().await {
            Ok(user) => SessionState::Authenticated(user),
            Err(e) => {
                warn!("Failed to refresh user: {}", e);
                current.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::api::testing::{MockTransport, client};
    use crate::models::fixtures::user_json;
    use crate::notice::NoticeLevel;
    use crate::storage::{Credentials, TokenStore};
    use std::rc::Rc;

    const LOGIN: &str = "/api/auth/login/";
    const REGISTER: &str = "/api/auth/register/";
    const LOGOUT: &str = "/api/auth/logout/";
    const PROFILE: &str = "/api/auth/profile/";

    fn setup() -> (Session, Rc<MockTransport>, TokenStore) {
        let transport = MockTransport::new();
        let tokens = TokenStore::in_memory();
        let session = Session::new(AuthService::new(client(&transport, &tokens)));
        (session, transport, tokens)
    }

    fn stored(tokens: &TokenStore) {
        tokens
            .save(&Credentials {
                access: "stale".into(),
                refresh: "stale-refresh".into(),
            })
            .unwrap();
    }

    #[test]
    fn test_only_authenticated_state_allows_requests() {
        let user: User = serde_json::from_value(user_json()).unwrap();
        assert!(!SessionState::Unknown.is_authenticated());
        assert!(!SessionState::Anonymous.is_authenticated());
        assert!(SessionState::Authenticated(user).is_authenticated());
    }

    #[tokio::test]
    async fn test_bootstrap_without_token_is_anonymous_and_offline() {
        let (session, transport, _tokens) = setup();
        assert_eq!(session.bootstrap().await, SessionState::Anonymous);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_bootstrap_with_valid_token() {
        let (session, transport, tokens) = setup();
        stored(&tokens);
        transport.reply(Method::Get, PROFILE, 200, user_json());

        let state = session.bootstrap().await;
        assert_eq!(state.user().map(|u| u.username.as_str()), Some("asha"));
        assert!(tokens.has_access());
    }

    #[tokio::test]
    async fn test_bootstrap_with_rejected_token_clears_credentials() {
        let (session, transport, tokens) = setup();
        stored(&tokens);
        transport.reply(
            Method::Get,
            PROFILE,
            401,
            serde_json::json!({"detail": "Given token not valid for any token type"}),
        );

        assert_eq!(session.bootstrap().await, SessionState::Anonymous);
        assert_eq!(tokens.access(), None);
        assert_eq!(tokens.refresh(), None);
    }

    #[tokio::test]
    async fn test_bootstrap_network_failure_clears_credentials() {
        let (session, transport, tokens) = setup();
        stored(&tokens);
        transport.fail(Method::Get, PROFILE, ApiError::Network("offline".into()));

        assert_eq!(session.bootstrap().await, SessionState::Anonymous);
        assert!(!tokens.has_access());
    }

    #[tokio::test]
    async fn test_login_then_logout_cycle() {
        let (session, transport, tokens) = setup();
        for _ in 0..2 {
            transport.reply(
                Method::Post,
                LOGIN,
                200,
                serde_json::json!({"access": "a", "refresh": "r", "user": user_json()}),
            );
            transport.reply(Method::Post, LOGOUT, 205, serde_json::json!({}));
        }

        for _ in 0..2 {
            let transition = session.login("asha", "secret").await.unwrap();
            assert!(matches!(transition.state, SessionState::Authenticated(_)));
            assert_eq!(transition.redirect, Some(Destination::Dashboard));
            assert_eq!(
                transition.notice,
                Some(Notice::success("Login successful!"))
            );
            assert!(tokens.has_access());

            let transition = session.logout().await;
            assert_eq!(transition.state, SessionState::Anonymous);
            assert_eq!(transition.redirect, Some(Destination::Login));
            assert!(tokens.access().is_none());
            assert!(tokens.refresh().is_none());
        }
    }

    #[tokio::test]
    async fn test_logout_server_failure_is_silent() {
        let (session, transport, tokens) = setup();
        stored(&tokens);
        transport.reply(
            Method::Post,
            LOGOUT,
            500,
            serde_json::json!({"detail": "boom"}),
        );

        let transition = session.logout().await;
        assert_eq!(transition.state, SessionState::Anonymous);
        assert_eq!(
            transition.notice.map(|n| n.level),
            Some(NoticeLevel::Success)
        );
        assert!(!tokens.has_access());
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_detail() {
        let (session, transport, _tokens) = setup();
        transport.reply(
            Method::Post,
            LOGIN,
            401,
            serde_json::json!({"detail": "No active account found with the given credentials"}),
        );

        let err = session.login("asha", "nope").await.unwrap_err();
        assert_eq!(
            err.notice,
            Notice::error("No active account found with the given credentials")
        );
        assert!(err.source.is_unauthorized());
    }

    #[tokio::test]
    async fn test_login_failure_falls_back_to_generic_message() {
        let (session, transport, _tokens) = setup();
        transport.fail(Method::Post, LOGIN, ApiError::Network("offline".into()));

        let err = session.login("asha", "nope").await.unwrap_err();
        assert_eq!(err.notice.message, "Login failed");
    }

    #[tokio::test]
    async fn test_register_form_mismatch_sends_nothing() {
        let (session, transport, tokens) = setup();
        transport.reply(Method::Post, REGISTER, 201, serde_json::json!({}));
        let form = RegisterForm {
            username: "asha".into(),
            email: "asha@example.com".into(),
            password: "secret-one".into(),
            password2: "secret-two".into(),
            ..Default::default()
        };

        let err = session.register_form(&form).await.unwrap_err();

        assert_eq!(err, RegistrationError::Form(FormError::PasswordMismatch));
        assert_eq!(transport.request_count(), 0);
        assert!(!tokens.has_access());
    }

    #[tokio::test]
    async fn test_register_form_matching_passwords_submits() {
        let (session, transport, tokens) = setup();
        transport.reply(
            Method::Post,
            REGISTER,
            201,
            serde_json::json!({"access": "acc", "refresh": "ref", "user": user_json()}),
        );
        let form = RegisterForm {
            username: "asha".into(),
            password: "pw".into(),
            password2: "pw".into(),
            ..Default::default()
        };

        let transition = session.register_form(&form).await.unwrap();

        assert_eq!(transition.redirect, Some(Destination::Dashboard));
        assert_eq!(transport.request_count(), 1);
        assert!(tokens.has_access());
    }

    #[tokio::test]
    async fn test_register_error_prefers_username_then_email() {
        let (session, transport, _tokens) = setup();
        transport.reply(
            Method::Post,
            REGISTER,
            400,
            serde_json::json!({
                "email": ["Enter a valid email address."],
                "username": ["A user with that username already exists."]
            }),
        );
        transport.reply(
            Method::Post,
            REGISTER,
            400,
            serde_json::json!({"email": ["Enter a valid email address."]}),
        );
        transport.reply(
            Method::Post,
            REGISTER,
            400,
            serde_json::json!({"password": ["This password is too common."]}),
        );

        let data = RegisterData::default();
        let first = session.register(&data).await.unwrap_err();
        let second = session.register(&data).await.unwrap_err();
        let third = session.register(&data).await.unwrap_err();

        assert_eq!(
            first.notice.message,
            "A user with that username already exists."
        );
        assert_eq!(second.notice.message, "Enter a valid email address.");
        assert_eq!(third.notice.message, "Registration failed");
    }

    #[tokio::test]
    async fn test_register_success() {
        let (session, transport, tokens) = setup();
        transport.reply(
            Method::Post,
            REGISTER,
            201,
            serde_json::json!({"access": "a", "refresh": "r", "user": user_json()}),
        );

        let transition = session.register(&RegisterData::default()).await.unwrap();
        assert_eq!(
            transition.notice,
            Some(Notice::success("Registration successful!"))
        );
        assert_eq!(transition.redirect, Some(Destination::Dashboard));
        assert!(tokens.has_access());
    }

    #[tokio::test]
    async fn test_refresh_user_keeps_stale_identity_on_failure() {
        let (session, transport, _tokens) = setup();
        let user: User = serde_json::from_value(user_json()).unwrap();
        let current = SessionState::Authenticated(user);
        transport.fail(Method::Get, PROFILE, ApiError::Network("offline".into()));

        assert_eq!(session.refresh_user(&current).await, current);
    }

    #[tokio::test]
    async fn test_refresh_user_replaces_identity() {
        let (session, transport, _tokens) = setup();
        let mut renamed = user_json();
        renamed["first_name"] = serde_json::json!("Ashwini");
        transport.reply(Method::Get, PROFILE, 200, renamed);

        let user: User = serde_json::from_value(user_json()).unwrap();
        let state = session
            .refresh_user(&SessionState::Authenticated(user))
            .await;
        assert_eq!(state.user().unwrap().first_name, "Ashwini");
    }
}
