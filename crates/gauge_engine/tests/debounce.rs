use std::sync::{Arc, Mutex};
use std::time::Duration;

use gauge_engine::{DebounceScheduler, EngineEvent, EventSink};
use tokio::runtime::Handle;

const QUIET: Duration = Duration::from_millis(500);

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl TestSink {
    fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn scheduler() -> (DebounceScheduler, Arc<TestSink>) {
    let sink = Arc::new(TestSink::default());
    let scheduler = DebounceScheduler::new(Handle::current(), QUIET, sink.clone());
    (scheduler, sink)
}

#[tokio::test(start_paused = true)]
async fn rapid_restarts_collapse_into_one_commit() {
    let (mut scheduler, sink) = scheduler();

    for ticket in 1..=5 {
        scheduler.restart(ticket);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(sink.take().is_empty());
    assert!(scheduler.is_pending());

    tokio::time::sleep(QUIET).await;
    assert_eq!(sink.take(), vec![EngineEvent::DebounceElapsed { ticket: 5 }]);
    assert!(!scheduler.is_pending());

    tokio::time::sleep(QUIET * 4).await;
    assert!(sink.take().is_empty());
}

#[tokio::test(start_paused = true)]
async fn separate_bursts_commit_separately() {
    let (mut scheduler, sink) = scheduler();

    scheduler.restart(1);
    tokio::time::sleep(QUIET + Duration::from_millis(10)).await;
    scheduler.restart(2);
    tokio::time::sleep(QUIET + Duration::from_millis(10)).await;

    assert_eq!(
        sink.take(),
        vec![
            EngineEvent::DebounceElapsed { ticket: 1 },
            EngineEvent::DebounceElapsed { ticket: 2 },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn nothing_fires_before_the_quiet_interval() {
    let (mut scheduler, sink) = scheduler();

    scheduler.restart(1);
    tokio::time::sleep(QUIET - Duration::from_millis(1)).await;
    assert!(sink.take().is_empty());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(sink.take().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_and_ignores_restarts() {
    let (mut scheduler, sink) = scheduler();

    scheduler.restart(1);
    tokio::time::sleep(Duration::from_millis(100)).await;
    scheduler.shutdown();
    scheduler.restart(2);
    tokio::time::sleep(QUIET * 2).await;

    assert!(sink.take().is_empty());
    assert!(!scheduler.is_pending());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_scheduler_cancels_its_timer() {
    let (mut scheduler, sink) = scheduler();

    scheduler.restart(1);
    drop(scheduler);
    tokio::time::sleep(QUIET * 2).await;

    assert!(sink.take().is_empty());
}
