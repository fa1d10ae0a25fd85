//! Periodic refresh of the zone configuration section.
//!
//! The refresher keeps the latest rendered zone section. A timer re-fetches
//! it on a fixed period. A tick that fires while a refresh is still in
//! flight is dropped, never queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error_panel::ErrorPanel;
use crate::ports::ControllerApi;
use crate::views::zone_configuration::{ZoneConfigurationController, ZoneConfigurationView};

/// Period used when none is configured.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(5);

/// Resets the in-progress flag when a refresh ends, whatever the outcome.
struct InProgress<'a>(&'a AtomicBool);

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ZoneRefresher<A> {
    controller: ZoneConfigurationController<A>,
    panel: Arc<ErrorPanel>,
    in_progress: AtomicBool,
    latest: RwLock<Option<ZoneConfigurationView>>,
}

impl<A: ControllerApi> ZoneRefresher<A> {
    pub fn new(controller: ZoneConfigurationController<A>, panel: Arc<ErrorPanel>) -> Self {
        Self {
            controller,
            panel,
            in_progress: AtomicBool::new(false),
            latest: RwLock::new(None),
        }
    }

    /// Latest successfully rendered zone section.
    pub fn latest(&self) -> Option<ZoneConfigurationView> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the snapshot with a freshly rendered section.
    pub fn publish(&self, view: ZoneConfigurationView) {
        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = Some(view);
    }

    /// Whether a timer-driven refresh is currently in flight.
    pub fn is_refreshing(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Timer entry point. Returns `false` when the tick was dropped because
    /// a previous refresh has not finished yet.
    pub async fn tick(&self) -> bool {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("zone refresh still in flight, tick dropped");
            return false;
        }
        let _guard = InProgress(&self.in_progress);
        self.refresh_now().await;
        true
    }

    /// Re-fetch the zone section right away, ignoring the tick guard.
    ///
    /// Used after mutations. Failures go to the error panel and leave the
    /// previous snapshot in place.
    pub async fn refresh_now(&self) {
        match self.controller.load().await {
            Ok(view) => self.publish(view),
            Err(err) => self.panel.log(&err),
        }
    }
}

impl<A: ControllerApi + 'static> ZoneRefresher<A> {
    /// Arm the periodic refresh. Each tick runs in its own task so that a
    /// slow controller never delays the timer.
    pub fn spawn(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the first tick completes immediately and the page was just bootstrapped
            interval.tick().await;
            loop {
                interval.tick().await;
                let this = Arc::clone(&self);
                tokio::spawn(async move {
                    this.tick().await;
                });
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::Notify;

    use super::*;
    use crate::testing::StubController;

    fn refresher(
        stub: &Arc<StubController>,
    ) -> (Arc<ZoneRefresher<Arc<StubController>>>, Arc<ErrorPanel>) {
        let panel = Arc::new(ErrorPanel::default());
        let refresher = Arc::new(ZoneRefresher::new(
            ZoneConfigurationController::new(Arc::clone(stub)),
            Arc::clone(&panel),
        ));
        (refresher, panel)
    }

    #[tokio::test]
    async fn should_publish_refreshed_view() {
        let stub = Arc::new(StubController::default());
        let (refresher, panel) = refresher(&stub);
        assert!(refresher.latest().is_none());
        assert!(refresher.tick().await);
        assert_eq!(refresher.latest().unwrap().zones.len(), 2);
        assert!(!refresher.is_refreshing());
        assert!(panel.is_empty());
    }

    #[tokio::test]
    async fn should_drop_tick_while_refresh_in_flight() {
        let stub = Arc::new(StubController::default());
        let gate = Arc::new(Notify::new());
        stub.state().zones_gate = Some(Arc::clone(&gate));
        let (refresher, _panel) = refresher(&stub);

        let first = tokio::spawn({
            let refresher = Arc::clone(&refresher);
            async move { refresher.tick().await }
        });
        while !refresher.is_refreshing() {
            tokio::task::yield_now().await;
        }

        assert!(!refresher.tick().await);

        gate.notify_one();
        assert!(first.await.unwrap());
        assert!(!refresher.is_refreshing());
        let zone_fetches = stub
            .calls()
            .into_iter()
            .filter(|call| *call == "get_zones")
            .count();
        assert_eq!(zone_fetches, 1);
    }

    #[tokio::test]
    async fn should_keep_snapshot_and_log_when_refresh_fails() {
        let stub = Arc::new(StubController::default());
        let (refresher, panel) = refresher(&stub);
        refresher.refresh_now().await;
        stub.fail("get_zones");

        assert!(refresher.tick().await);
        assert!(refresher.latest().is_some());
        assert_eq!(
            panel.drain(),
            vec!["Erreur lors de la récupération /ofp-api/v1/get_zones : 500".to_string()]
        );
        assert!(!refresher.is_refreshing());
    }
}
