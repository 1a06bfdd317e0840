/// Seconds left before a rate-limited client may retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u64,
}

impl Countdown {
    pub fn new(seconds: u64) -> Self {
        Self { remaining: seconds }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn can_retry(&self) -> bool {
        self.remaining == 0
    }

    /// Decrement by one second. No-op at zero.
    ///
    /// Returns true on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}
