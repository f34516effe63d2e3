//! Quiescence-window debouncing.
//!
//! [`Debounced`] is the pure state machine: callers feed it inputs with a
//! timestamp and ask it to settle. [`spawn_debouncer`] drives the same
//! machine from a tokio task for callers that want a channel instead.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::trace;

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct Debounced<T> {
    window: Duration,
    effective: T,
    pending: Option<(T, Instant)>,
}

impl<T: Clone + PartialEq> Debounced<T> {
    pub fn new(initial: T, window: Duration) -> Self {
        Self {
            window,
            effective: initial,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record an input. Each push restarts the window.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// Promote the pending input if its window has elapsed by `now`.
    /// Returns `true` only when the effective value actually changed.
    pub fn settle(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some((value, deadline)) if deadline <= now => self.replace(value),
            still_waiting => {
                self.pending = still_waiting;
                false
            }
        }
    }

    /// Skip the window and apply the pending input, if any.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some((value, _)) => self.replace(value),
            None => false,
        }
    }

    /// Set the effective value immediately, dropping any pending input.
    pub fn set_now(&mut self, value: T) -> bool {
        self.pending = None;
        self.replace(value)
    }

    fn replace(&mut self, value: T) -> bool {
        if self.effective == value {
            return false;
        }
        self.effective = value;
        true
    }

    pub fn value(&self) -> &T {
        &self.effective
    }

    /// The latest input, settled or not.
    pub fn latest(&self) -> &T {
        self.pending
            .as_ref()
            .map(|(value, _)| value)
            .unwrap_or(&self.effective)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Handle to a background debouncer. The task stops when the handle drops.
pub struct DebouncerHandle<T> {
    input: watch::Sender<T>,
    output: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T> DebouncerHandle<T> {
    pub fn push(&self, value: T) {
        // The task only goes away together with this handle.
        let _ = self.input.send(value);
    }

    /// Receiver that observes every settled value.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }
}

impl<T> Drop for DebouncerHandle<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Run a [`Debounced`] machine on a tokio task.
pub fn spawn_debouncer<T>(initial: T, window: Duration) -> DebouncerHandle<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let (input, mut input_rx) = watch::channel(initial.clone());
    let (output_tx, output) = watch::channel(initial.clone());

    let task = tokio::spawn(async move {
        let mut state = Debounced::new(initial, window);
        loop {
            let deadline = state.deadline();
            tokio::select! {
                changed = input_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let value = input_rx.borrow_and_update().clone();
                    state.push(value, Instant::now());
                }
                _ = async {
                    match deadline {
                        Some(deadline) => sleep_until(deadline).await,
                        None => std::future::pending::<()>().await,
                    }
                } => {
                    if state.settle(Instant::now()) {
                        trace!("debounced value settled");
                        if output_tx.send(state.value().clone()).is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });

    DebouncerHandle {
        input,
        output,
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    #[test]
    fn value_changes_only_after_quiet_window() {
        let start = Instant::now();
        let mut search = Debounced::new(String::new(), WINDOW);

        search.push("r".into(), start);
        search.push("ru".into(), start + Duration::from_millis(100));
        search.push("rust".into(), start + Duration::from_millis(300));

        assert!(!search.settle(start + Duration::from_millis(700)));
        assert_eq!(search.value(), "");
        assert_eq!(search.latest(), "rust");

        assert!(search.settle(start + Duration::from_millis(800)));
        assert_eq!(search.value(), "rust");
        assert!(!search.is_pending());
    }

    #[test]
    fn settling_to_same_value_reports_no_change() {
        let start = Instant::now();
        let mut search = Debounced::new("rust".to_string(), WINDOW);
        search.push("rust".into(), start);
        assert!(!search.settle(start + WINDOW));
        assert!(!search.is_pending());
    }

    #[test]
    fn flush_skips_window() {
        let mut search = Debounced::new(String::new(), WINDOW);
        search.push("tokio".into(), Instant::now());
        assert!(search.flush());
        assert_eq!(search.value(), "tokio");
    }

    #[tokio::test(start_paused = true)]
    async fn background_debouncer_emits_final_value_once() {
        let handle = spawn_debouncer(String::new(), WINDOW);
        let mut settled = handle.subscribe();

        for text in ["r", "ru", "rus", "rust"] {
            handle.push(text.to_string());
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(!settled.has_changed().expect("debouncer alive"));

        tokio::time::sleep(WINDOW).await;
        assert!(settled.has_changed().expect("debouncer alive"));
        assert_eq!(*settled.borrow_and_update(), "rust");

        tokio::time::sleep(WINDOW * 2).await;
        assert!(!settled.has_changed().expect("debouncer alive"));
    }
}
