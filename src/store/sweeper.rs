use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::model::service;

/// Runs the expired session sweep every `every` until `token` is cancelled.
pub fn spawn(
    data: Arc<service::Data>,
    every: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(every = %humantime::format_duration(every), "session sweeper started");
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {
                    let now = data.clock.now();
                    match data.store.sweep(now).await {
                        Ok(0) => tracing::trace!("no expired sessions"),
                        Ok(removed) => tracing::info!(removed, "expired sessions removed"),
                        Err(e) => tracing::error!("sweep failed: {}", e),
                    }
                }
            }
        }
        tracing::info!("session sweeper stopped");
    })
}
