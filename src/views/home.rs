use crate::Route;
use crate::views::AuthContext;
use dioxus::prelude::*;

#[component]
pub fn Spinner() -> Element {
    rsx! {
        div { class: "spinner-page",
            div { class: "spinner" }
        }
    }
}

/// Landing page. Signed-in visitors are forwarded to the dashboard.
#[component]
pub fn Home() -> Element {
    let auth = use_context::<AuthContext>();
    let state = auth.state;

    use_effect(move || {
        if state.read().user().is_some() {
            navigator().push(Route::Dashboard {});
        }
    });

    if auth.loading() {
        return rsx! {
            Spinner {}
        };
    }

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        div { id: "home-page", class: "page",
            header { class: "app-header",
                h1 { "FraudWatch" }
            }
            main { class: "hero",
                h2 { "UPI Fraud Detection" }
                p {
                    "Every payment you record is scored by our fraud model the moment it is created."
                }
                div { class: "hero-actions",
                    Link { class: "button primary", to: Route::Login {}, "Get Started" }
                    Link { class: "button", to: Route::Register {}, "Create Account" }
                }
            }
        }
    }
}
