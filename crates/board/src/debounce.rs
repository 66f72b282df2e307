use tokio::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceState<T> {
    Idle,
    Pending { value: T, deadline: Instant },
}

/// Holds back a value until it has been stable for `window`.
/// Every `input` re-arms the deadline; `poll` releases the value once the
/// deadline has passed.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    state: DebounceState<T>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: DebounceState::Idle,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn state(&self) -> &DebounceState<T> {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            DebounceState::Pending { deadline, .. } => Some(deadline),
            DebounceState::Idle => None,
        }
    }

    pub fn input(&mut self, value: T, now: Instant) {
        self.state = DebounceState::Pending {
            value,
            deadline: now + self.window,
        };
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.flush(),
            _ => None,
        }
    }

    /// Releases the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.state, DebounceState::Idle) {
            DebounceState::Pending { value, .. } => Some(value),
            DebounceState::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = DebounceState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    #[test]
    fn test_idle_until_input() {
        let mut debouncer: Debouncer<String> = Debouncer::new(WINDOW);
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(Instant::now() + WINDOW * 10), None);
    }

    #[test]
    fn test_releases_after_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.input("rust", start);
        assert_eq!(debouncer.deadline(), Some(start + WINDOW));
        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(debouncer.poll(start + WINDOW), Some("rust"));
        assert_eq!(debouncer.state(), &DebounceState::Idle);
        assert_eq!(debouncer.poll(start + WINDOW * 2), None);
    }

    #[test]
    fn test_rapid_input_yields_only_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        let mut released = vec![];
        for (i, text) in ["r", "ru", "rus", "rust"].iter().enumerate() {
            let now = start + Duration::from_millis(100 * i as u64);
            debouncer.input(*text, now);
            released.extend(debouncer.poll(now));
        }
        // Last keystroke at 300ms, so nothing until 600ms.
        released.extend(debouncer.poll(start + Duration::from_millis(599)));
        assert!(released.is_empty());
        released.extend(debouncer.poll(start + Duration::from_millis(600)));
        assert_eq!(released, vec!["rust"]);
    }

    #[test]
    fn test_flush_and_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.input(1, start);
        assert_eq!(debouncer.flush(), Some(1));
        debouncer.input(2, start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + WINDOW), None);
    }
}
