//! Request/response wrappers over the backend endpoints

mod auth;
pub use auth::AuthService;

mod transactions;
pub use transactions::TransactionService;

use crate::api::{ApiClient, HttpTransport};
use crate::config::AppConfig;
use crate::storage::TokenStore;
use std::rc::Rc;

/// Everything the views need to reach the backend, built once at startup.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub transactions: TransactionService,
}

impl Services {
    pub fn new(api: ApiClient) -> Self {
        Self {
            auth: AuthService::new(api.clone()),
            transactions: TransactionService::new(api),
        }
    }

    pub fn connect(config: &AppConfig, tokens: TokenStore) -> Self {
        let transport = Rc::new(HttpTransport::new(&config.api_base_url));
        Self::new(ApiClient::new(transport, tokens))
    }
}
