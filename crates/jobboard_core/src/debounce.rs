use std::time::{Duration, Instant};

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Holds the search box text until the user stops typing for a quiet period.
///
/// The buffer never reads a clock itself; callers pass the time of each edit
/// and each poll, which keeps it deterministic under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebouncedInputBuffer {
    quiet_period: Duration,
    text: String,
    deadline: Option<Instant>,
}

impl Default for DebouncedInputBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl DebouncedInputBuffer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            text: String::new(),
            deadline: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Latest input, committed or not. This is what the search box displays.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Records new input and (re)starts the quiet period.
    pub fn set(&mut self, text: impl Into<String>, at: Instant) {
        self.text = text.into();
        self.deadline = Some(at + self.quiet_period);
    }

    /// Emits the buffered text once the quiet period has elapsed.
    ///
    /// Returns `Some` at most once per quiet period; later polls return `None`
    /// until the next `set`.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(self.text.clone())
            }
            _ => None,
        }
    }

    /// Replaces the displayed text without scheduling a commit.
    pub fn reset_to(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.deadline = None;
    }
}
