use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{AuthResponse, LoginCredentials, ProfileUpdate, RegisterData, User};
use crate::storage::{Credentials, TokenStore};
use log::{debug, info};

const LOGIN_PATH: &str = "/api/auth/login/";
const REGISTER_PATH: &str = "/api/auth/register/";
const LOGOUT_PATH: &str = "/api/auth/logout/";
const PROFILE_PATH: &str = "/api/auth/profile/";

#[derive(serde::Serialize)]
struct LogoutBody<'a> {
    refresh_token: &'a str,
}

/// Login, registration and profile endpoints. Sole writer of the credential
/// pair.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn tokens(&self) -> &TokenStore {
        self.api.tokens()
    }

    /// Returns only after the issued tokens are persisted.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        let response: AuthResponse = self.api.post(LOGIN_PATH, credentials).await?;
        self.store(&response)?;
        info!("Logged in as {}", response.user.username);
        Ok(response)
    }

    /// Same persistence contract as [`AuthService::login`].
    pub async fn register(&self, data: &RegisterData) -> Result<AuthResponse> {
        let response: AuthResponse = self.api.post(REGISTER_PATH, data).await?;
        self.store(&response)?;
        info!("Registered {}", response.user.username);
        Ok(response)
    }

    fn store(&self, response: &AuthResponse) -> Result<()> {
        self.tokens().save(&Credentials {
            access: response.access.clone(),
            refresh: response.refresh.clone(),
        })?;
        Ok(())
    }

    /// Clears the local credentials no matter what. The returned error only
    /// reports the server-side invalidation, which is best effort.
    pub async fn logout(&self) -> Result<()> {
        let outcome = match self.tokens().refresh() {
            Some(refresh_token) => {
                self.api
                    .post_discard(
                        LOGOUT_PATH,
                        &LogoutBody {
                            refresh_token: &refresh_token,
                        },
                    )
                    .await
            }
            None => {
                debug!("No refresh token stored, skipping server logout");
                Ok(())
            }
        };
        self.tokens().clear();
        outcome
    }

    pub async fn get_profile(&self) -> Result<User> {
        self.api.get(PROFILE_PATH, Vec::new()).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        self.api.patch(PROFILE_PATH, update).await
    }

    /// Presence of a non-empty access token. Expiry is not checked, the next
    /// authenticated request decides.
    pub fn is_authenticated(&self) -> bool {
        self.tokens().has_access()
    }

    /// Drops the credential pair without contacting the server.
    pub fn forget_credentials(&self) {
        self.tokens().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::api::testing::{MockTransport, client};
    use crate::error::ApiError;
    use crate::models::fixtures::user_json;

    fn auth_reply() -> serde_json::Value {
        serde_json::json!({"access": "acc-1", "refresh": "ref-1", "user": user_json()})
    }

    fn service(transport: &std::rc::Rc<MockTransport>) -> (AuthService, TokenStore) {
        let tokens = TokenStore::in_memory();
        (AuthService::new(client(transport, &tokens)), tokens)
    }

    #[tokio::test]
    async fn test_login_persists_tokens() {
        let transport = MockTransport::new();
        let (auth, tokens) = service(&transport);
        transport.reply(Method::Post, LOGIN_PATH, 200, auth_reply());

        let response = auth
            .login(&LoginCredentials {
                username: "asha".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        assert_eq!(response.user.username, "asha");
        assert_eq!(tokens.access().as_deref(), Some("acc-1"));
        assert_eq!(tokens.refresh().as_deref(), Some("ref-1"));
        assert!(auth.is_authenticated());

        let sent = &transport.requests()[0];
        assert_eq!(sent.body.as_ref().unwrap()["username"], "asha");
        assert_eq!(sent.bearer, None);
    }

    #[tokio::test]
    async fn test_failed_login_stores_nothing() {
        let transport = MockTransport::new();
        let (auth, tokens) = service(&transport);
        transport.reply(
            Method::Post,
            LOGIN_PATH,
            401,
            serde_json::json!({"detail": "Invalid credentials"}),
        );

        let err = auth
            .login(&LoginCredentials {
                username: "asha".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(!tokens.has_access());
    }

    #[tokio::test]
    async fn test_register_persists_tokens() {
        let transport = MockTransport::new();
        let (auth, tokens) = service(&transport);
        transport.reply(Method::Post, REGISTER_PATH, 201, auth_reply());

        auth.register(&RegisterData {
            username: "asha".into(),
            password: "pw".into(),
            password2: "pw".into(),
            ..Default::default()
        })
        .await
        .unwrap();

        assert!(tokens.has_access());
        let body = transport.requests()[0].body.clone().unwrap();
        assert!(body.get("phone_number").is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_fails() {
        let transport = MockTransport::new();
        let (auth, tokens) = service(&transport);
        transport.reply(Method::Post, LOGIN_PATH, 200, auth_reply());
        transport.fail(
            Method::Post,
            LOGOUT_PATH,
            ApiError::Network("offline".into()),
        );

        auth.login(&LoginCredentials {
            username: "asha".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
        let outcome = auth.logout().await;

        assert!(outcome.is_err());
        assert_eq!(tokens.access(), None);
        assert_eq!(tokens.refresh(), None);

        let logout = &transport.requests()[1];
        assert_eq!(logout.body.as_ref().unwrap()["refresh_token"], "ref-1");
        assert_eq!(logout.bearer.as_deref(), Some("acc-1"));
    }

    #[tokio::test]
    async fn test_logout_without_refresh_token_skips_request() {
        let transport = MockTransport::new();
        let (auth, _tokens) = service(&transport);

        assert!(auth.logout().await.is_ok());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_profile_patches() {
        let transport = MockTransport::new();
        let (auth, _tokens) = service(&transport);
        transport.reply(Method::Patch, PROFILE_PATH, 200, user_json());

        let user = auth
            .update_profile(&ProfileUpdate {
                first_name: Some("Asha".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(user.first_name, "Asha");
        let body = transport.requests()[0].body.clone().unwrap();
        assert_eq!(body, serde_json::json!({"first_name": "Asha"}));
    }
}
