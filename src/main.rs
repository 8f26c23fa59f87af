mod api;
mod chart;
mod config;
mod error;
mod format;
mod forms;
mod logging;
mod models;
mod notice;
mod services;
mod session;
mod stats;
mod storage;
mod views;

use config::AppConfig;
use dioxus::prelude::*;
use services::Services;
use session::Session;
use views::{
    Alerts, AuthContext, Dashboard, Home, Login, Profile, Register, Shell, Toaster,
    TransactionDetail, Transactions,
};

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/dashboard")]
        Dashboard {},
        #[route("/transactions")]
        Transactions {},
        #[route("/transactions/:id")]
        TransactionDetail { id: u64 },
        #[route("/alerts")]
        Alerts {},
        #[route("/profile")]
        Profile {},
}

fn main() {
    let config = AppConfig::load();
    logging::init(config.log_level);
    log::info!(
        "Starting FraudWatch against {} ({} day stats window)",
        config.api_base_url,
        config.stats_window_days
    );

    dioxus::LaunchBuilder::new().with_context(config).launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context::<AppConfig>();
    let services = use_context_provider(|| {
        Services::connect(&config, storage::platform_store(&config))
    });
    let toaster = use_context_provider(Toaster::new);
    let auth = use_context_provider(|| AuthContext::new(Session::new(services.auth.clone()), toaster));

    use_future(move || {
        let auth = auth.clone();
        async move { auth.bootstrap().await }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}

#[cfg(test)]
mod tests {
    use super::Route;

    #[test]
    fn test_routes_round_trip_through_paths() {
        assert_eq!(Route::TransactionDetail { id: 42 }.to_string(), "/transactions/42");
        assert_eq!(
            "/transactions/7".parse::<Route>().ok(),
            Some(Route::TransactionDetail { id: 7 })
        );
        assert_eq!(Route::Dashboard {}.to_string(), "/dashboard");
        assert_eq!("/".parse::<Route>().ok(), Some(Route::Home {}));
    }
}
