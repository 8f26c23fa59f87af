use crate::Route;
use crate::chart::{self, TrendChart};
use crate::config::AppConfig;
use crate::format::{Metric, TransactionRow, alert_banner, creation_notice, summary_metrics};
use crate::forms::TransactionForm;
use crate::models::{CreatedTransaction, TransactionType, TrendPoint};
use crate::notice::Notice;
use crate::services::Services;
use crate::stats::StatsView;
use crate::views::{
    AuthContext, Field, Spinner, Toaster, TransactionTable, use_require_auth,
    use_signed_in,
};
use dioxus::prelude::*;

#[component]
fn StatsCard(metric: Metric) -> Element {
    rsx! {
        div { class: "stats-card {metric.accent}",
            p { class: "stats-title", "{metric.title}" }
            p { class: "stats-value", "{metric.value}" }
        }
    }
}

#[component]
fn AlertBanner(unresolved: u64) -> Element {
    let Some(text) = alert_banner(unresolved) else {
        return rsx! {};
    };
    rsx! {
        Link { class: "alert-banner", to: Route::Alerts {}, "🚨 {text}" }
    }
}

#[component]
fn TrendChartView(points: Vec<TrendPoint>, days: u32) -> Element {
    let chart = TrendChart::new(&points);

    rsx! {
        section { class: "chart-card",
            h2 { "Fraud Detection Trend ({days} Days)" }
            if points.is_empty() {
                p { class: "empty", "No activity in this period." }
            } else {
                svg {
                    view_box: TrendChart::view_box(),
                    width: chart::WIDTH,
                    height: chart::HEIGHT,
                    path { class: "series-total", d: "{chart.total_path}", fill: "none" }
                    path { class: "series-fraud", d: "{chart.fraud_path}", fill: "none" }
                    for label in chart.x_labels.iter() {
                        text {
                            key: "x-{label.text}",
                            x: label.x,
                            y: label.y,
                            text_anchor: "middle",
                            "{label.text}"
                        }
                    }
                    for label in chart.y_labels.iter() {
                        text {
                            key: "y-{label.text}",
                            x: label.x,
                            y: label.y,
                            text_anchor: "end",
                            "{label.text}"
                        }
                    }
                }
                div { class: "chart-legend",
                    span { class: "legend-total", "Total Transactions" }
                    span { class: "legend-fraud", "Fraudulent" }
                }
            }
        }
    }
}

/// Creation form shown over the dashboard.
#[component]
fn TransactionFormModal(on_close: EventHandler<()>, on_created: EventHandler<CreatedTransaction>) -> Element {
    let auth = use_context::<AuthContext>();
    let services = use_context::<Services>();
    let toaster = use_context::<Toaster>();
    let mut form = use_signal(|| TransactionForm::for_user(auth.user().as_ref()));
    let mut busy = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if *busy.read() {
            return;
        }
        let request = match form.read().to_request() {
            Ok(request) => request,
            Err(e) => {
                toaster.push(Notice::error(e.to_string()));
                return;
            }
        };
        let services = services.clone();
        busy.set(true);
        spawn(async move {
            match services.transactions.create(&request).await {
                Ok(created) => {
                    busy.set(false);
                    on_created.call(created);
                }
                Err(e) => {
                    log::error!("Failed to create transaction: {}", e);
                    let message = e
                        .field_message("amount")
                        .unwrap_or("Failed to create transaction");
                    toaster.push(Notice::error(message));
                    busy.set(false);
                }
            }
        });
    };

    let current = form.read().clone();

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal", role: "dialog",
                header { class: "modal-header",
                    h2 { "New Transaction" }
                    button {
                        class: "close-button",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }
                form { onsubmit: handle_submit,
                    Field {
                        id: "tx-sender",
                        label: "Sender UPI",
                        required: true,
                        value: current.sender_upi,
                        oninput: move |v| form.write().sender_upi = v,
                    }
                    Field {
                        id: "tx-receiver",
                        label: "Receiver UPI",
                        required: true,
                        value: current.receiver_upi,
                        oninput: move |v| form.write().receiver_upi = v,
                    }
                    Field {
                        id: "tx-amount",
                        label: "Amount (₹)",
                        kind: "number",
                        required: true,
                        value: current.amount,
                        oninput: move |v| form.write().amount = v,
                    }
                    label { r#for: "tx-type", "Type" }
                    select {
                        id: "tx-type",
                        value: current.transaction_type.code(),
                        onchange: move |event| {
                            if let Some(kind) = TransactionType::from_code(&event.value()) {
                                form.write().transaction_type = kind;
                            }
                        },
                        for kind in TransactionType::ALL {
                            option { value: kind.code(), {kind.label()} }
                        }
                    }
                    Field {
                        id: "tx-description",
                        label: "Description",
                        value: current.description,
                        oninput: move |v| form.write().description = v,
                    }
                    Field {
                        id: "tx-location",
                        label: "Location",
                        value: current.location,
                        oninput: move |v| form.write().location = v,
                    }
                    div { class: "modal-actions",
                        button {
                            r#type: "button",
                            class: "button",
                            onclick: move |_| on_close.call(()),
                            "Cancel"
                        }
                        button {
                            r#type: "submit",
                            class: "button primary",
                            disabled: busy(),
                            if busy() {
                                "Analyzing..."
                            } else {
                                "Create Transaction"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    let auth = use_require_auth();
    let services = use_context::<Services>();
    let toaster = use_context::<Toaster>();
    let days = use_context::<AppConfig>().stats_window_days;
    let mut show_form = use_signal(|| false);

    let signed_in = use_signed_in(&auth);

    let mut view = use_signal(StatsView::default);
    let mut stats = use_resource(move || {
        let services = services.clone();
        let ready = signed_in();
        async move {
            if !ready {
                return;
            }
            let loaded = services.transactions.dashboard_stats(days).await;
            let (next, notice) = view.peek().clone().apply(loaded);
            view.set(next);
            if let Some(notice) = notice {
                toaster.push(notice);
            }
        }
    });

    let Some(user) = auth.user() else {
        return rsx! {
            Spinner {}
        };
    };
    let snapshot = match view() {
        StatsView::Ready(snapshot) => snapshot,
        StatsView::Loading => {
            return rsx! {
                Spinner {}
            };
        }
        StatsView::Unavailable => {
            return rsx! {
                div { id: "dashboard-page", class: "page",
                    h1 { "Dashboard" }
                    p { class: "error-message", "Dashboard data is unavailable right now." }
                    button { class: "button", onclick: move |_| stats.restart(), "Retry" }
                }
            };
        }
    };

    let greeting = format!("Welcome back, {}", user.display_name());
    let metrics = summary_metrics(&snapshot);
    let recent: Vec<TransactionRow> = snapshot
        .recent_transactions
        .iter()
        .map(TransactionRow::from)
        .collect();

    let logout = move |_: MouseEvent| {
        let auth = auth.clone();
        spawn(async move { auth.logout().await });
    };

    rsx! {
        div { id: "dashboard-page", class: "page",
            header { class: "page-header",
                div {
                    h1 { "Dashboard" }
                    p { class: "greeting", "{greeting}" }
                }
                div { class: "header-actions",
                    button {
                        class: "button primary",
                        onclick: move |_| show_form.set(true),
                        "+ New Transaction"
                    }
                    button { class: "button", onclick: logout, "Logout" }
                }
            }
            AlertBanner { unresolved: snapshot.unresolved_alerts }
            div { class: "stats-grid",
                for metric in metrics.iter() {
                    StatsCard { key: "{metric.title}", metric: metric.clone() }
                }
            }
            TrendChartView { points: snapshot.fraud_trend.clone(), days: days }
            nav { class: "quick-actions",
                Link { class: "quick-action", to: Route::Transactions {}, "📋 All Transactions" }
                Link { class: "quick-action", to: Route::Alerts {}, "🚨 Fraud Alerts" }
                Link { class: "quick-action", to: Route::Profile {}, "👤 Profile" }
            }
            section { class: "recent",
                h2 { "Recent Transactions" }
                TransactionTable { rows: recent }
            }
            if show_form() {
                TransactionFormModal {
                    on_close: move |_| show_form.set(false),
                    on_created: move |created: CreatedTransaction| {
                        toaster.push(creation_notice(&created));
                        show_form.set(false);
                        stats.restart();
                    },
                }
            }
        }
    }
}
