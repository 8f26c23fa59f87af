use crate::Route;
use crate::format::{TransactionRow, fraud_percent, rupees_decimal, timestamp_label};
use crate::models::{Ordering, SortField, TransactionFilter};
use crate::services::Services;
use crate::views::{Spinner, use_require_auth, use_signed_in};
use dioxus::prelude::*;

const ORDERINGS: &[(&str, &str)] = &[
    ("-created_at", "Newest first"),
    ("created_at", "Oldest first"),
    ("-amount", "Largest amount"),
    ("amount", "Smallest amount"),
    ("-fraud_probability", "Highest risk"),
];

/// Rows of transactions, each linking to its detail page.
#[component]
pub fn TransactionTable(rows: Vec<TransactionRow>) -> Element {
    if rows.is_empty() {
        return rsx! {
            p { class: "empty", "No transactions yet." }
        };
    }

    rsx! {
        table { class: "transactions-table",
            thead {
                tr {
                    th { "ID" }
                    th { "Amount" }
                    th { "Type" }
                    th { "From → To" }
                    th { "Status" }
                    th { "Date" }
                }
            }
            tbody {
                for row in rows {
                    tr { key: "{row.id}", class: if row.is_fraud { "row-fraud" },
                        td {
                            Link { to: Route::TransactionDetail { id: row.id }, "{row.short_id}" }
                        }
                        td { "{row.amount}" }
                        td { "{row.kind}" }
                        td { "{row.counterparty}" }
                        td {
                            span { class: if row.is_fraud { "badge badge-fraud" } else { "badge badge-safe" },
                                "{row.status}"
                            }
                        }
                        td { "{row.when}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Transactions() -> Element {
    let auth = use_require_auth();
    let services = use_context::<Services>();
    let signed_in = use_signed_in(&auth);
    let mut draft = use_signal(String::new);
    let mut search = use_signal(String::new);
    let mut ordering = use_signal(|| Ordering {
        field: SortField::CreatedAt,
        descending: true,
    });

    let listing = use_resource(move || {
        let services = services.clone();
        let ready = signed_in();
        let filter = TransactionFilter {
            search: Some(search()),
            ordering: Some(ordering()),
            page: None,
        };
        async move {
            if !ready {
                return None;
            }
            Some(services.transactions.list(&filter).await)
        }
    });

    if auth.loading() {
        return rsx! {
            Spinner {}
        };
    }

    rsx! {
        div { id: "transactions-page", class: "page",
            header { class: "page-header",
                Link { to: Route::Dashboard {}, "← Dashboard" }
                h1 { "Transactions" }
            }
            form {
                class: "toolbar",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    search.set(draft());
                },
                input {
                    r#type: "search",
                    placeholder: "Search by id or UPI handle",
                    value: "{draft}",
                    oninput: move |event| draft.set(event.value()),
                }
                button { r#type: "submit", class: "button", "Search" }
                select {
                    value: ordering().param(),
                    onchange: move |event| {
                        if let Some(parsed) = Ordering::from_param(&event.value()) {
                            ordering.set(parsed);
                        }
                    },
                    for (param , label) in ORDERINGS {
                        option { value: *param, "{label}" }
                    }
                }
            }
            match &*listing.read() {
                None | Some(None) => rsx! {
                    p { "Loading transactions..." }
                },
                Some(Some(Ok(transactions))) => rsx! {
                    TransactionTable { rows: transactions.iter().map(TransactionRow::from).collect::<Vec<_>>() }
                },
                Some(Some(Err(e))) => rsx! {
                    p { class: "error-message", "Error loading transactions: {e}" }
                },
            }
        }
    }
}

#[component]
pub fn TransactionDetail(id: u64) -> Element {
    let auth = use_require_auth();
    let services = use_context::<Services>();
    let signed_in = use_signed_in(&auth);

    let transaction = use_resource(move || {
        let services = services.clone();
        let ready = signed_in();
        async move {
            if !ready {
                return None;
            }
            Some(services.transactions.get(id).await)
        }
    });

    if auth.loading() {
        return rsx! {
            Spinner {}
        };
    }

    rsx! {
        div { id: "transaction-detail-page", class: "page",
            header { class: "page-header",
                Link { to: Route::Transactions {}, "← Transactions" }
                h1 { "Transaction #{id}" }
            }
            match &*transaction.read() {
                None | Some(None) => rsx! {
                    p { "Loading transaction..." }
                },
                Some(Some(Err(e))) => rsx! {
                    p { class: "error-message", "Error loading transaction: {e}" }
                },
                Some(Some(Ok(tx))) => {
                    let risk = format!("{}%", fraud_percent(tx.fraud_probability));
                    let details = tx
                        .fraud_details
                        .as_ref()
                        .and_then(|value| serde_json::to_string_pretty(value).ok());
                    rsx! {
                        dl { class: "detail-grid",
                            dt { "Reference" }
                            dd { "{tx.transaction_id}" }
                            dt { "Amount" }
                            dd { {rupees_decimal(tx.amount)} }
                            dt { "Type" }
                            dd { {tx.transaction_type.label()} }
                            dt { "From" }
                            dd { "{tx.sender_upi}" }
                            dt { "To" }
                            dd { "{tx.receiver_upi}" }
                            if let Some(description) = &tx.description {
                                dt { "Description" }
                                dd { "{description}" }
                            }
                            if let Some(location) = &tx.location {
                                dt { "Location" }
                                dd { "{location}" }
                            }
                            dt { "Created" }
                            dd { {timestamp_label(tx.created_at)} }
                            dt { "Fraud risk" }
                            dd { class: if tx.is_fraud { "risk-high" } else { "risk-low" },
                                "{risk}"
                            }
                        }
                        if let Some(details) = details {
                            h2 { "Fraud analysis" }
                            pre { class: "fraud-details", "{details}" }
                        }
                    }
                }
            }
        }
    }
}
