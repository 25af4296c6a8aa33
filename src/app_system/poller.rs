use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::SyncError;
use crate::clients::RentalClient;

/// Autonomous refresh loop. The first tick fires one `period` after start.
/// Ends when the store goes away.
pub async fn poll_loop(client: RentalClient, period: Duration) {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(period_secs = period.as_secs(), "Poller started");

    loop {
        timer.tick().await;
        match client.refresh().await {
            Ok(summary) => debug!(text = %summary.available_cars_text, "Poll tick complete"),
            Err(SyncError::Store(e)) => {
                info!(error = %e, "Store closed, poller stopping");
                break;
            }
            Err(SyncError::Api(e)) if e.is_transport() => warn!(error = %e, "Backend unreachable, will retry next tick"),
            Err(e) => warn!(error = %e, "Poll tick failed"),
        }
    }
}
