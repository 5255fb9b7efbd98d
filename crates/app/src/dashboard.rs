//! Dashboard screen loader.
//!
//! The dashboard issues three reads concurrently and reflects whichever
//! resolve; each is wrapped independently so one failure never cancels or
//! hides the others.

use kerala_client::{ApiError, DashboardSummary, StoreProfile, SubscriptionStatus};
use kerala_shell::Resource;

use crate::api::DashboardApi;

/// The three independent slots the dashboard renders.
#[derive(Debug, Default)]
pub struct DashboardView {
    pub summary: Resource<DashboardSummary>,
    pub profile: Resource<StoreProfile>,
    pub subscription: Resource<SubscriptionStatus>,
}

pub struct DashboardLoader<A: DashboardApi> {
    api: A,
}

impl<A: DashboardApi> DashboardLoader<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Load (or pull-to-refresh) all three slots concurrently.
    pub async fn load(&self, view: &mut DashboardView) {
        let (summary, profile, subscription) = tokio::join!(
            self.api.dashboard(),
            self.api.store_profile(),
            self.api.subscription(),
        );
        view.summary.apply(to_resource_result(summary));
        view.profile.apply(to_resource_result(profile));
        view.subscription.apply(to_resource_result(subscription));
    }
}

fn to_resource_result<T>(result: Result<T, ApiError>) -> Result<T, (String, bool)> {
    result.map_err(|e| (e.to_string(), e.is_retryable()))
}
