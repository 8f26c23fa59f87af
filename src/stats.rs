//! What the dashboard shows for its statistics between loads.

use crate::error::ApiError;
use crate::models::DashboardStats;
use crate::notice::Notice;
use log::warn;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum StatsView {
    /// No load has finished yet.
    #[default]
    Loading,
    Ready(DashboardStats),
    /// The first load failed, there is nothing to show.
    Unavailable,
}

impl StatsView {
    /// Folds a finished load into the view. A failed reload keeps the last
    /// snapshot on screen; only the notice reports the failure.
    pub fn apply(self, loaded: Result<DashboardStats, ApiError>) -> (Self, Option<Notice>) {
        match loaded {
            Ok(stats) => (StatsView::Ready(stats), None),
            Err(e) => {
                warn!("Dashboard stats unavailable: {}", e);
                let notice = Some(Notice::error("Failed to load dashboard data"));
                match self {
                    StatsView::Ready(previous) => (StatsView::Ready(previous), notice),
                    StatsView::Loading | StatsView::Unavailable => (StatsView::Unavailable, notice),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::stats_json;

    fn stats(unresolved: u64) -> DashboardStats {
        serde_json::from_value(stats_json(unresolved)).unwrap()
    }

    #[test]
    fn test_first_load_success() {
        let (view, notice) = StatsView::Loading.apply(Ok(stats(2)));
        assert_eq!(view, StatsView::Ready(stats(2)));
        assert_eq!(notice, None);
    }

    #[test]
    fn test_first_load_failure_shows_nothing_invented() {
        let (view, notice) =
            StatsView::Loading.apply(Err(ApiError::Network("offline".into())));
        assert_eq!(view, StatsView::Unavailable);
        assert_eq!(notice, Some(Notice::error("Failed to load dashboard data")));
    }

    #[test]
    fn test_failed_reload_keeps_last_snapshot() {
        let (view, _) = StatsView::Loading.apply(Ok(stats(4)));
        let (view, notice) = view.apply(Err(ApiError::Status {
            status: 500,
            body: Default::default(),
        }));
        assert_eq!(view, StatsView::Ready(stats(4)));
        assert!(notice.is_some());
        assert_ne!(view, StatsView::Ready(DashboardStats::default()));
    }

    #[test]
    fn test_retry_after_failure_recovers() {
        let (view, _) = StatsView::Unavailable.apply(Ok(stats(0)));
        assert_eq!(view, StatsView::Ready(stats(0)));
    }
}
