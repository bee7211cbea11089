use crate::config::JobConfig;
use crate::greeting::Greeting;
use crate::service::GreetingService;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Periodically logs the last issued greeting.
///
/// Runs once right away, then again `fixed_delay` after each run finishes.
#[derive(Debug)]
pub struct GreetingJob {
    service: Arc<GreetingService>,
    fixed_delay: Duration,
    runs: Arc<AtomicU64>,
}

/// A spawned [`GreetingJob`]. Dropping the handle does not stop the task.
#[derive(Debug)]
pub struct GreetingJobHandle {
    task: JoinHandle<()>,
    runs: Arc<AtomicU64>,
}

impl GreetingJob {
    pub fn new(service: Arc<GreetingService>, fixed_delay: Duration) -> Self {
        Self { service, fixed_delay, runs: Arc::new(AtomicU64::new(0)) }
    }

    /// Spawns the job when `config.enabled`, otherwise returns `None`.
    pub fn schedule(config: &JobConfig, service: Arc<GreetingService>) -> Option<GreetingJobHandle> {
        if !config.enabled {
            info!("greeting job disabled");
            return None;
        }
        Some(Self::new(service, config.fixed_delay()).spawn())
    }

    pub fn run_once(&self) -> Option<Arc<Greeting>> {
        self.runs.fetch_add(1, Ordering::Relaxed);
        let last_greeting = self.service.last_greeting();
        match &last_greeting {
            Some(greeting) => info!(id = greeting.id, "Last Greeting was = {}", greeting.content),
            None => debug!("no greeting issued yet"),
        }
        last_greeting
    }

    pub fn runs(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }

    pub async fn run(self) {
        loop {
            self.run_once();
            tokio::time::sleep(self.fixed_delay).await;
        }
    }

    /// The task runs until aborted.
    pub fn spawn(self) -> GreetingJobHandle {
        info!(fixed_delay = ?self.fixed_delay, "greeting job scheduled");
        let runs = Arc::clone(&self.runs);
        GreetingJobHandle { task: tokio::spawn(self.run()), runs }
    }
}

impl GreetingJobHandle {
    /// Number of completed runs so far.
    pub fn runs(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn abort(&self) {
        self.task.abort();
    }

    /// Aborts the task and waits for it to stop.
    pub async fn stop(self) -> u64 {
        self.task.abort();
        if let Err(e) = self.task.await
            && !e.is_cancelled()
        {
            error!(cause = %e, "greeting job failed");
        }
        self.runs.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greeting::Name;

    #[test]
    fn reports_last_greeting() {
        let service = Arc::new(GreetingService::default());
        let job = GreetingJob::new(Arc::clone(&service), Duration::from_secs(30));

        assert!(job.run_once().is_none());

        let greeting = service.greeting(&Name::default());
        assert_eq!(*job.run_once().unwrap(), greeting);
        assert_eq!(job.runs(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn runs_again_after_each_fixed_delay() {
        let service = Arc::new(GreetingService::default());
        let handle = GreetingJob::new(service, Duration::from_secs(30)).spawn();

        // paused clock: each sleep auto-advances and lets the job task run
        tokio::time::sleep(Duration::from_secs(15)).await;
        assert_eq!(handle.runs(), 1);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(handle.runs(), 2);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(handle.runs(), 4);
        assert!(!handle.is_finished());

        assert_eq!(handle.stop().await, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_running_when_stopped() {
        let service = Arc::new(GreetingService::default());
        let handle = GreetingJob::new(service, Duration::from_secs(1)).spawn();

        tokio::time::sleep(Duration::from_millis(2500)).await;
        let runs = handle.runs();
        assert_eq!(runs, 3);

        handle.abort();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(handle.runs(), runs);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn schedule_respects_enabled_flag() {
        let service = Arc::new(GreetingService::default());

        let disabled = JobConfig { enabled: false, fixed_delay_secs: 1 };
        assert!(GreetingJob::schedule(&disabled, Arc::clone(&service)).is_none());

        let enabled = JobConfig { enabled: true, fixed_delay_secs: 1 };
        let handle = GreetingJob::schedule(&enabled, service).unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(handle.runs(), 2);
        handle.stop().await;
    }
}
