use std::time::Duration;

use crate::domain::repository::ListenRepository;
use crate::domain::types::ListenReportRow;
use crate::error::PlatformError;

/// Read-only dump of every listen counter.
pub struct ListenReportUseCase<L: ListenRepository> {
    pub listens: L,
}

impl<L: ListenRepository> ListenReportUseCase<L> {
    pub async fn execute(&self) -> Result<Vec<ListenReportRow>, PlatformError> {
        self.listens.report().await
    }
}

/// Log the listen report every `period`. The first tick fires one full period
/// after startup. Failures are logged and the loop keeps going.
pub async fn run_listen_report<L: ListenRepository>(listens: L, period: Duration) {
    let usecase = ListenReportUseCase { listens };
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match usecase.execute().await {
            Ok(rows) => {
                tracing::info!(rows = rows.len(), "listen report");
                for row in rows {
                    tracing::info!(
                        listener = %row.listener_username,
                        track = %row.track_title,
                        count = row.count,
                        "listen counter"
                    );
                }
            }
            Err(e) => tracing::error!(error = %e, "listen report failed"),
        }
    }
}
