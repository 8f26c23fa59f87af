//! Web interface components for FraudWatch
//!
//! This module contains the Dioxus components that make up the client:
//! the shared layout, the auth pages, the dashboard and the pages reached
//! from its quick actions.

/// Auth session and toast contexts
mod context;
pub use context::{AuthContext, Toaster, use_require_auth, use_signed_in};

/// Layout wrapping every route
mod shell;
pub use shell::Shell;

/// Reusable labelled input
mod field;
pub use field::Field;

/// Landing page and loading spinner
mod home;
pub use home::{Home, Spinner};

mod login;
pub use login::Login;

mod register;
pub use register::Register;

/// Statistics, trend chart and transaction creation
mod dashboard;
pub use dashboard::Dashboard;

/// Transaction list and detail
mod transactions;
pub use transactions::{TransactionDetail, TransactionTable, Transactions};

mod alerts;
pub use alerts::Alerts;

mod profile;
pub use profile::Profile;
