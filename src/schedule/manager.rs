use chrono::Utc;
use std::future::Future;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, warn};

use super::Schedule;
use super::types::wait_until;
use crate::utils::timezone::ReferenceZone;

/// Start a task that runs `job` at every fire time of `schedule`
///
/// The job is awaited before the next fire time is computed, so runs of the
/// same job never overlap. A run that overshoots a fire time skips it.
pub fn start_schedule_manager<F, Fut>(
    schedule: Schedule,
    zone: ReferenceZone,
    job: F,
) -> JoinHandle<()>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        info!(
            "Schedule manager started for '{}' (cron: '{}', clock: {})",
            schedule.name,
            schedule.cron_expression,
            zone.label()
        );

        let mut last_fire = None;
        loop {
            let now = Utc::now();
            let Some(next) = schedule.following(&zone, last_fire, now) else {
                warn!(
                    "No upcoming time found for '{}' with cron '{}'",
                    schedule.name, schedule.cron_expression
                );
                break;
            };

            let wait_duration = wait_until(next, now);
            info!(
                "Next '{}' run in {} minutes",
                schedule.name,
                wait_duration.as_secs() / 60
            );

            sleep(wait_duration).await;

            info!("Running scheduled job '{}'", schedule.name);
            job().await;
            last_fire = Some(next);
        }

        info!("Schedule manager for '{}' stopped", schedule.name);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_runs_job_without_overlap() {
        let schedule = Schedule::parse("every second", "* * * * * *").unwrap();
        let runs = Arc::new(AtomicUsize::new(0));
        let in_flight = Arc::new(AtomicBool::new(false));
        let overlapped = Arc::new(AtomicBool::new(false));

        let handle = {
            let runs = Arc::clone(&runs);
            let in_flight = Arc::clone(&in_flight);
            let overlapped = Arc::clone(&overlapped);
            start_schedule_manager(schedule, ReferenceZone::Local, move || {
                let runs = Arc::clone(&runs);
                let in_flight = Arc::clone(&in_flight);
                let overlapped = Arc::clone(&overlapped);
                async move {
                    if in_flight.swap(true, Ordering::SeqCst) {
                        overlapped.store(true, Ordering::SeqCst);
                    }
                    // Longer than the one-second period
                    sleep(Duration::from_millis(1200)).await;
                    runs.fetch_add(1, Ordering::SeqCst);
                    in_flight.store(false, Ordering::SeqCst);
                }
            })
        };

        sleep(Duration::from_millis(3500)).await;
        handle.abort();

        assert!(runs.load(Ordering::SeqCst) >= 1);
        assert!(!overlapped.load(Ordering::SeqCst));
    }
}
