// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Replays a script of outcomes; `None` is a failure.
struct Scripted(Mutex<VecDeque<Option<bool>>>);

impl Scripted {
    fn new(script: &[Option<bool>]) -> Self {
        Self(Mutex::new(script.iter().copied().collect()))
    }
}

#[async_trait]
impl StatusSource for Scripted {
    async fn fetch_status(&self) -> Result<StateRecord, ClientError> {
        match self.0.lock().pop_front().flatten() {
            Some(running) => Ok(StateRecord { running, ..StateRecord::default() }),
            None => Err(ClientError::Decode { status: 502, detail: "bad gateway".to_string() }),
        }
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[yare::parameterized(
    running = { true, 2000 },
    idle    = { false, 5000 },
)]
fn success_interval_follows_running(running: bool, expected: u64) {
    let state = StateRecord { running, ..StateRecord::default() };
    assert_eq!(PollSchedule::default().after_success(&state), ms(expected));
}

#[yare::parameterized(
    was_running = { true, 2500 },
    was_idle    = { false, 5000 },
)]
fn failure_interval_follows_last_status(was_running: bool, expected: u64) {
    assert_eq!(PollSchedule::default().after_failure(was_running), ms(expected));
}

#[test]
fn rearm_is_short() {
    let schedule = PollSchedule::default();
    assert_eq!(schedule.rearm, ms(900));
    assert!(schedule.rearm < schedule.running);
}

#[tokio::test]
async fn failures_are_reported_once_per_streak() {
    let mut poller =
        Poller::new(Scripted::new(&[Some(true), None, None, Some(false), None]), PollSchedule::default());

    let (event, next) = poller.tick().await;
    assert!(matches!(event, Some(PollEvent::Status(ref s)) if s.running));
    assert_eq!(next, ms(2000));

    let (event, next) = poller.tick().await;
    assert!(matches!(event, Some(PollEvent::Failed(_))));
    assert_eq!(next, ms(2500), "last seen running");

    let (event, next) = poller.tick().await;
    assert!(event.is_none(), "repeat failure suppressed");
    assert_eq!(next, ms(2500));

    let (event, next) = poller.tick().await;
    assert!(matches!(event, Some(PollEvent::Status(ref s)) if !s.running));
    assert_eq!(next, ms(5000));

    let (event, next) = poller.tick().await;
    assert!(matches!(event, Some(PollEvent::Failed(_))), "success re-enables reporting");
    assert_eq!(next, ms(5000), "last seen idle");
}

#[tokio::test]
async fn first_failure_before_any_success_uses_idle_backoff() {
    let mut poller = Poller::new(Scripted::new(&[None]), PollSchedule::default());
    let (event, next) = poller.tick().await;
    assert!(matches!(event, Some(PollEvent::Failed(_))));
    assert_eq!(next, ms(5000));
}
