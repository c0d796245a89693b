//! Background task that flags overdue reservations as no-shows.
//!
//! Runs in a tokio::spawn loop, periodically looking for `Confirmed`
//! reservations whose check-in date has passed without a check-in and
//! routing each through the booking service's `mark_no_show` operation,
//! so the room release and event publishing happen like any other
//! orchestrated transition.

use std::sync::Arc;

use tokio::time::Duration;
use tracing::{info, warn};

use crate::domain::RepositoryProvider;
use crate::shared::shutdown::ShutdownSignal;

use super::service::BookingService;

/// Start the no-show sweeper background task.
///
/// The task checks every `check_interval_secs` for reservations with
/// status `Confirmed` and `check_in_date < today`, then marks them
/// `NoShow` one by one. A failure on one reservation is logged and does
/// not stop the sweep.
pub fn start_no_show_sweeper(
    service: Arc<BookingService>,
    repos: Arc<dyn RepositoryProvider>,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
) {
    tokio::spawn(async move {
        info!(
            check_interval = check_interval_secs,
            "No-show sweeper started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = sweep(&service, &repos).await {
                        warn!(error = %e, "No-show sweep error");
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("No-show sweeper shutting down");
                    break;
                }
            }
        }

        info!("No-show sweeper stopped");
    });
}

async fn sweep(
    service: &Arc<BookingService>,
    repos: &Arc<dyn RepositoryProvider>,
) -> Result<(), Box<dyn std::error::Error>> {
    let today = chrono::Utc::now().date_naive();
    let overdue = repos.reservations().find_overdue(today).await?;

    if overdue.is_empty() {
        return Ok(());
    }

    info!(count = overdue.len(), "Marking overdue reservations as no-show");

    for reservation in overdue {
        if let Err(e) = service.mark_no_show(&reservation.id).await {
            warn!(
                reservation_id = %reservation.id,
                error = %e,
                "Failed to mark reservation as no-show"
            );
        }
    }

    Ok(())
}
