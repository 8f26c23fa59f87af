//! Wire types exchanged with the fraud-detection backend.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub upi_id: Option<String>,
}

/// Authenticated identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub profile: Option<Profile>,
}

impl User {
    /// First name when set, username otherwise.
    pub fn display_name(&self) -> &str {
        if self.first_name.is_empty() {
            &self.username
        } else {
            &self.first_name
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct RegisterData {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
}

/// Body of a successful login or registration.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

/// Partial identity sent with `PATCH /api/auth/profile/`.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    #[default]
    Send,
    Receive,
    Request,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Send,
        TransactionType::Receive,
        TransactionType::Request,
    ];

    pub fn code(self) -> &'static str {
        match self {
            TransactionType::Send => "SEND",
            TransactionType::Receive => "RECEIVE",
            TransactionType::Request => "REQUEST",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Send => "Send Money",
            TransactionType::Receive => "Receive Money",
            TransactionType::Request => "Request Money",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub transaction_id: String,
    pub user: u64,
    #[serde(default)]
    pub user_username: String,
    pub sender_upi: String,
    pub receiver_upi: String,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub is_fraud: bool,
    pub fraud_probability: f64,
    #[serde(default)]
    pub fraud_details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation request. The server assigns id, owner and the fraud verdict.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub sender_upi: String,
    pub receiver_upi: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Body answered to a creation request. The backend may echo only the
/// submitted fields, so the verdict defaults to "not fraud" when absent.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CreatedTransaction {
    #[serde(default)]
    pub id: Option<u64>,
    pub sender_upi: String,
    pub receiver_upi: String,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub is_fraud: bool,
    #[serde(default)]
    pub fraud_probability: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FraudAlert {
    pub id: u64,
    pub transaction: u64,
    pub transaction_details: Transaction,
    pub alert_type: String,
    pub severity: Severity,
    pub message: String,
    pub is_resolved: bool,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// One day of the fraud trend.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total: u64,
    pub fraud: u64,
}

/// Aggregates over the requested day window, computed server-side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct DashboardStats {
    pub total_transactions: u64,
    pub total_amount: f64,
    pub fraud_transactions: u64,
    pub fraud_amount: f64,
    pub fraud_rate: f64,
    pub unresolved_alerts: u64,
    #[serde(default)]
    pub fraud_trend: Vec<TrendPoint>,
    #[serde(default)]
    pub recent_transactions: Vec<Transaction>,
}

/// List endpoints answer either a bare array or a paginated envelope.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Listing<T> {
    Page { results: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Page { results } => results,
            Listing::Bare(items) => items,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Amount,
    FraudProbability,
}

impl SortField {
    pub fn field(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Amount => "amount",
            SortField::FraudProbability => "fraud_probability",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub field: SortField,
    pub descending: bool,
}

impl Ordering {
    /// Value of the `ordering` query parameter, `-` prefixed when descending.
    pub fn param(self) -> String {
        if self.descending {
            format!("-{}", self.field.field())
        } else {
            self.field.field().to_string()
        }
    }

    pub fn from_param(param: &str) -> Option<Self> {
        let (descending, name) = match param.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, param),
        };
        let field = [
            SortField::CreatedAt,
            SortField::Amount,
            SortField::FraudProbability,
        ]
        .into_iter()
        .find(|f| f.field() == name)?;
        Some(Self { field, descending })
    }
}

/// Query parameters for `GET /api/transactions/`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Matched server-side against transaction id, sender and receiver.
    pub search: Option<String>,
    pub ordering: Option<Ordering>,
    pub page: Option<u32>,
}

impl TransactionFilter {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                params.push(("search", search.to_string()));
            }
        }
        if let Some(ordering) = self.ordering {
            params.push(("ordering", ordering.param()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub fn transaction_json(id: u64, is_fraud: bool, probability: f64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "transaction_id": "3f1c2a9e-8b7d-4c55-9e1a-2b6f0d4c7e11",
            "user": 1,
            "user_username": "asha",
            "sender_upi": "asha@upi",
            "receiver_upi": "shop@upi",
            "amount": "1250.50",
            "transaction_type": "SEND",
            "description": null,
            "device_id": null,
            "ip_address": null,
            "location": "Pune",
            "is_fraud": is_fraud,
            "fraud_probability": probability,
            "fraud_details": {"is_fraud": is_fraud, "fraud_probability": probability},
            "created_at": "2025-03-14T09:26:53.589793Z",
            "updated_at": "2025-03-14T09:26:53.612000Z"
        })
    }

    pub fn user_json() -> serde_json::Value {
        serde_json::json!({
            "id": 1,
            "username": "asha",
            "email": "asha@example.com",
            "first_name": "Asha",
            "last_name": "Rao",
            "profile": {"phone_number": "+91 9876543210", "upi_id": "asha@upi"}
        })
    }

    pub fn stats_json(unresolved: u64) -> serde_json::Value {
        serde_json::json!({
            "total_transactions": 3,
            "total_amount": 4200.75,
            "fraud_transactions": 1,
            "fraud_amount": 1250.5,
            "fraud_rate": 33.333333,
            "unresolved_alerts": unresolved,
            "fraud_trend": [
                {"date": "2025-03-12", "total": 0, "fraud": 0},
                {"date": "2025-03-13", "total": 2, "fraud": 0},
                {"date": "2025-03-14", "total": 1, "fraud": 1}
            ],
            "recent_transactions": [transaction_json(7, true, 0.934)]
        })
    }
}
