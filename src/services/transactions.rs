use crate::api::ApiClient;
use crate::error::Result;
use log::info;
use crate::models::{
    CreatedTransaction, DashboardStats, FraudAlert, Listing, NewTransaction, Transaction,
    TransactionFilter,
};

const TRANSACTIONS_PATH: &str = "/api/transactions/";
const ALERTS_PATH: &str = "/api/transactions/alerts/";
const STATS_PATH: &str = "/api/transactions/stats/";

/// Transaction endpoints. Every call is a fresh round trip.
#[derive(Clone)]
pub struct TransactionService {
    api: ApiClient,
}

impl TransactionService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let listing: Listing<Transaction> = self.api.get(TRANSACTIONS_PATH, filter.query()).await?;
        Ok(listing.into_items())
    }

    /// Carries the server's fraud verdict when the backend includes one.
    pub async fn create(&self, transaction: &NewTransaction) -> Result<CreatedTransaction> {
        let created: CreatedTransaction = self.api.post(TRANSACTIONS_PATH, transaction).await?;
        info!(
            "Created {} of {} from {} to {} (id {:?}, fraud: {})",
            created.transaction_type,
            created.amount,
            created.sender_upi,
            created.receiver_upi,
            created.id,
            created.is_fraud
        );
        Ok(created)
    }

    pub async fn get(&self, id: u64) -> Result<Transaction> {
        self.api
            .get(&format!("{}{}/", TRANSACTIONS_PATH, id), Vec::new())
            .await
    }

    pub async fn alerts(&self) -> Result<Vec<FraudAlert>> {
        let listing: Listing<FraudAlert> = self.api.get(ALERTS_PATH, Vec::new()).await?;
        Ok(listing.into_items())
    }

    pub async fn dashboard_stats(&self, days: u32) -> Result<DashboardStats> {
        self.api
            .get(STATS_PATH, vec![("days", days.to_string())])
            .await
    }
}
