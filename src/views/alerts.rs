use crate::Route;
use crate::format::{rupees_decimal, timestamp_label};
use crate::models::FraudAlert;
use crate::services::Services;
use crate::views::{Spinner, use_require_auth, use_signed_in};
use dioxus::prelude::*;

#[component]
fn AlertCard(alert: FraudAlert) -> Element {
    let tx = &alert.transaction_details;
    let severity_class = format!("badge severity-{}", alert.severity.label().to_lowercase());
    let amount = rupees_decimal(tx.amount);
    let raised = timestamp_label(alert.created_at);

    rsx! {
        li { class: "alert-card",
            div { class: "alert-head",
                span { class: "{severity_class}", {alert.severity.label()} }
                strong { "{alert.alert_type}" }
                span { class: "alert-time", "{raised}" }
            }
            p { "{alert.message}" }
            p { class: "alert-tx",
                Link { to: Route::TransactionDetail { id: alert.transaction }, "{tx.transaction_id}" }
                " · {amount} · {tx.sender_upi} → {tx.receiver_upi}"
            }
        }
    }
}

/// Unresolved fraud alerts raised against the user's transactions.
#[component]
pub fn Alerts() -> Element {
    let auth = use_require_auth();
    let services = use_context::<Services>();

    let signed_in = use_signed_in(&auth);

    let alerts = use_resource(move || {
        let services = services.clone();
        let ready = signed_in();
        async move {
            if !ready {
                return None;
            }
            Some(services.transactions.alerts().await)
        }
    });

    if auth.loading() {
        return rsx! {
            Spinner {}
        };
    }

    rsx! {
        div { id: "alerts-page", class: "page",
            header { class: "page-header",
                Link { to: Route::Dashboard {}, "← Dashboard" }
                h1 { "Fraud Alerts" }
            }
            match &*alerts.read() {
                None | Some(None) => rsx! {
                    p { "Loading alerts..." }
                },
                Some(Some(Ok(alerts))) => {
                    let open: Vec<FraudAlert> = alerts
                        .iter()
                        .filter(|alert| !alert.is_resolved)
                        .cloned()
                        .collect();
                    if open.is_empty() {
                        rsx! {
                            p { class: "empty", "No unresolved alerts. 🎉" }
                        }
                    } else {
                        rsx! {
                            ul { class: "alert-list",
                                for alert in open {
                                    AlertCard { key: "{alert.id}", alert: alert.clone() }
                                }
                            }
                        }
                    }
                }
                Some(Some(Err(e))) => rsx! {
                    p { class: "error-message", "Error loading alerts: {e}" }
                },
            }
        }
    }
}
