//! Text shown by the dashboard, derived from server data only.

use crate::models::{CreatedTransaction, DashboardStats, Transaction};
use crate::notice::Notice;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Fraud probability as a whole percentage, `0.875` → `88`.
pub fn fraud_percent(probability: f64) -> i64 {
    (probability * 100.0).round() as i64
}

/// Banner text for unresolved alerts, `None` when there is nothing to flag.
pub fn alert_banner(unresolved: u64) -> Option<String> {
    match unresolved {
        0 => None,
        1 => Some("1 unresolved fraud alert".to_string()),
        n => Some(format!("{} unresolved fraud alerts", n)),
    }
}

/// Notification for a freshly created transaction: a fraud verdict warns
/// instead of confirming.
pub fn creation_notice(transaction: &CreatedTransaction) -> Notice {
    if transaction.is_fraud {
        Notice::warning(format!(
            "⚠️ Fraud Detected! Risk: {}%",
            fraud_percent(transaction.fraud_probability)
        ))
    } else {
        Notice::success("Transaction created successfully!")
    }
}

pub fn rupees(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

pub fn rupees_decimal(amount: Decimal) -> String {
    format!("₹{:.2}", amount)
}

/// First eight characters of the transaction uuid.
pub fn short_id(transaction_id: &str) -> String {
    let prefix: String = transaction_id.chars().take(8).collect();
    format!("{}...", prefix)
}

pub fn status_label(transaction: &Transaction) -> String {
    if transaction.is_fraud {
        format!("Fraud ({}%)", fraud_percent(transaction.fraud_probability))
    } else {
        "Safe".to_string()
    }
}

/// `Mar 14`
pub fn day_label(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// `Mar 14, 09:26`
pub fn timestamp_label(at: DateTime<Utc>) -> String {
    at.format("%b %d, %H:%M").to_string()
}

/// Display strings for one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    pub id: u64,
    pub short_id: String,
    pub amount: String,
    pub kind: &'static str,
    pub counterparty: String,
    pub status: String,
    pub is_fraud: bool,
    pub when: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id,
            short_id: short_id(&transaction.transaction_id),
            amount: rupees_decimal(transaction.amount),
            kind: transaction.transaction_type.code(),
            counterparty: format!("{} → {}", transaction.sender_upi, transaction.receiver_upi),
            status: status_label(transaction),
            is_fraud: transaction.is_fraud,
            when: timestamp_label(transaction.created_at),
        }
    }
}

/// One of the four headline metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub title: &'static str,
    pub value: String,
    pub accent: &'static str,
}

/// Headline metrics in display order.
pub fn summary_metrics(stats: &DashboardStats) -> [Metric; 4] {
    [
        Metric {
            title: "Total Transactions",
            value: stats.total_transactions.to_string(),
            accent: "accent-blue",
        },
        Metric {
            title: "Total Amount",
            value: rupees(stats.total_amount),
            accent: "accent-green",
        },
        Metric {
            title: "Fraud Detected",
            value: stats.fraud_transactions.to_string(),
            accent: "accent-red",
        },
        Metric {
            title: "Fraud Rate",
            value: format!("{:.2}%", stats.fraud_rate),
            accent: "accent-purple",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{stats_json, transaction_json};
    use crate::notice::NoticeLevel;

    fn tx(is_fraud: bool, probability: f64) -> Transaction {
        serde_json::from_value(transaction_json(1, is_fraud, probability)).unwrap()
    }

    fn created(is_fraud: bool, probability: f64) -> CreatedTransaction {
        serde_json::from_value(transaction_json(1, is_fraud, probability)).unwrap()
    }

    #[test]
    fn test_alert_banner_pluralization() {
        assert_eq!(alert_banner(0), None);
        assert_eq!(alert_banner(1).as_deref(), Some("1 unresolved fraud alert"));
        assert_eq!(alert_banner(2).as_deref(), Some("2 unresolved fraud alerts"));
        assert_eq!(
            alert_banner(17).as_deref(),
            Some("17 unresolved fraud alerts")
        );
    }

    #[test]
    fn test_fraud_creation_warns_with_rounded_percent() {
        let notice = creation_notice(&created(true, 0.876));
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "⚠️ Fraud Detected! Risk: 88%");

        assert_eq!(
            creation_notice(&created(true, 0.5)).message,
            "⚠️ Fraud Detected! Risk: 50%"
        );
    }

    #[test]
    fn test_creation_without_verdict_succeeds() {
        let echoed: CreatedTransaction = serde_json::from_value(serde_json::json!({
            "sender_upi": "asha@upi",
            "receiver_upi": "shop@upi",
            "amount": "10.00",
            "transaction_type": "SEND"
        }))
        .unwrap();
        assert_eq!(
            creation_notice(&echoed),
            Notice::success("Transaction created successfully!")
        );
    }

    #[test]
    fn test_clean_creation_succeeds() {
        let notice = creation_notice(&created(false, 0.876));
        assert_eq!(notice, Notice::success("Transaction created successfully!"));
    }

    #[test]
    fn test_table_labels() {
        let fraud = tx(true, 0.934);
        assert_eq!(short_id(&fraud.transaction_id), "3f1c2a9e...");
        assert_eq!(rupees_decimal(fraud.amount), "₹1250.50");
        assert_eq!(status_label(&fraud), "Fraud (93%)");
        assert_eq!(status_label(&tx(false, 0.01)), "Safe");
        assert_eq!(timestamp_label(fraud.created_at), "Mar 14, 09:26");
        assert_eq!(short_id("abc"), "abc...");
    }

    #[test]
    fn test_transaction_row() {
        let row = TransactionRow::from(&tx(false, 0.02));
        assert_eq!(row.short_id, "3f1c2a9e...");
        assert_eq!(row.kind, "SEND");
        assert_eq!(row.counterparty, "asha@upi → shop@upi");
        assert_eq!(row.status, "Safe");
        assert!(!row.is_fraud);
    }

    #[test]
    fn test_summary_metrics() {
        let stats: DashboardStats = serde_json::from_value(stats_json(0)).unwrap();
        let metrics = summary_metrics(&stats);
        let values: Vec<&str> = metrics.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["3", "₹4200.75", "1", "33.33%"]);
    }

    #[test]
    fn test_reloading_same_snapshot_renders_same_metrics() {
        let first: DashboardStats = serde_json::from_value(stats_json(4)).unwrap();
        let second: DashboardStats = serde_json::from_value(stats_json(4)).unwrap();
        assert_eq!(summary_metrics(&first), summary_metrics(&second));
        assert_eq!(
            alert_banner(first.unresolved_alerts),
            alert_banner(second.unresolved_alerts)
        );
    }
}
