use std::sync::Arc;

use tokio::sync::watch;

/// Whether a backend request is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StreamPhase {
    #[default]
    Idle,
    Responding,
}

/// Holds the current [`StreamPhase`] and broadcasts changes.
///
/// Transitions come from whoever issues the request; nothing here resets the
/// phase on its own, so a request that never reports back leaves the state at
/// `Responding`.
#[derive(Debug, Clone)]
pub struct StreamingState {
    tx: Arc<watch::Sender<StreamPhase>>,
}

impl Default for StreamingState {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(StreamPhase::Idle);
        Self { tx: Arc::new(tx) }
    }

    pub fn phase(&self) -> StreamPhase {
        *self.tx.borrow()
    }

    pub fn is_responding(&self) -> bool {
        self.phase() == StreamPhase::Responding
    }

    /// A request was dispatched.
    pub fn begin(&self) {
        self.set(StreamPhase::Responding);
    }

    /// The outstanding request completed or failed.
    pub fn finish(&self) {
        self.set(StreamPhase::Idle);
    }

    pub fn set(&self, phase: StreamPhase) {
        self.tx.send_if_modified(|current| {
            let changed = *current != phase;
            *current = phase;
            changed
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<StreamPhase> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let state = StreamingState::new();
        assert_eq!(state.phase(), StreamPhase::Idle);
        assert!(!state.is_responding());
    }

    #[test]
    fn begin_and_finish_toggle_phase() {
        let state = StreamingState::new();
        state.begin();
        assert!(state.is_responding());
        state.finish();
        assert_eq!(state.phase(), StreamPhase::Idle);
    }

    #[test]
    fn stays_responding_until_told_otherwise() {
        let state = StreamingState::new();
        state.begin();
        state.begin();
        assert!(state.is_responding());
    }

    #[test]
    fn clones_share_state() {
        let state = StreamingState::new();
        let observer = state.clone();
        state.begin();
        assert!(observer.is_responding());
    }

    #[tokio::test]
    async fn subscribers_see_transitions() {
        let state = StreamingState::new();
        let mut rx = state.subscribe();
        assert_eq!(*rx.borrow(), StreamPhase::Idle);

        state.begin();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), StreamPhase::Responding);

        state.finish();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), StreamPhase::Idle);
    }

    #[test]
    fn setting_same_phase_does_not_wake_subscribers() {
        let state = StreamingState::new();
        let rx = state.subscribe();
        state.finish();
        assert!(!rx.has_changed().unwrap());
    }
}
