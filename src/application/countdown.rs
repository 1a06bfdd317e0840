//! Repeating countdown timer for the rate-limited page
//!
//! The timer runs on its own thread and is owned through a handle.
//! Dropping the handle cancels it and joins the thread, so no callback can
//! fire into a view that is already gone.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, instrument, trace, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Countdown;

/// Handle to a running countdown.
#[derive(Debug)]
pub struct CountdownTimer {
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<Countdown>>,
}

impl CountdownTimer {
    /// Start counting down `seconds`, one tick per `interval`.
    ///
    /// `on_tick` receives the state after every decrement; the last call is
    /// the one where `can_retry()` turns true.
    #[instrument(level = "debug", skip(on_tick))]
    pub fn start<F>(seconds: u64, interval: Duration, mut on_tick: F) -> ApplicationResult<Self>
    where
        F: FnMut(Countdown) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("countdown".into())
            .spawn(move || {
                let mut countdown = Countdown::new(seconds);
                while !countdown.can_retry() {
                    match rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            countdown.tick();
                            trace!("countdown tick: {} left", countdown.remaining());
                            on_tick(countdown);
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                            debug!("countdown cancelled with {} left", countdown.remaining());
                            break;
                        }
                    }
                }
                countdown
            })
            .map_err(|e| ApplicationError::OperationFailed {
                context: "spawn countdown timer".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            cancel: Some(tx),
            handle: Some(handle),
        })
    }

    /// Stop the timer. No callback runs after this returns.
    ///
    /// Returns the state at the moment of cancellation.
    pub fn cancel(mut self) -> Option<Countdown> {
        self.shutdown(true)
    }

    /// Block until the countdown reaches zero.
    pub fn wait(mut self) -> Option<Countdown> {
        self.shutdown(false)
    }

    fn shutdown(&mut self, signal: bool) -> Option<Countdown> {
        if signal {
            // Dropping the sender disconnects the channel and wakes the thread
            self.cancel.take();
        }
        let handle = self.handle.take()?;
        let result = handle.join();
        self.cancel.take();
        match result {
            Ok(countdown) => Some(countdown),
            Err(_) => {
                warn!("countdown callback panicked");
                None
            }
        }
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.shutdown(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn given_short_interval_when_waiting_then_ticks_down_to_zero() {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&ticks);

        let timer = CountdownTimer::start(3, Duration::from_millis(5), move |c| {
            sink.lock().unwrap().push(c.remaining());
        })
        .unwrap();
        let last = timer.wait().unwrap();

        assert!(last.can_retry());
        assert_eq!(*ticks.lock().unwrap(), vec![2, 1, 0]);
    }

    #[test]
    fn given_zero_seconds_when_started_then_finishes_without_callbacks() {
        let timer = CountdownTimer::start(0, Duration::from_millis(5), |_| {
            panic!("no tick expected");
        })
        .unwrap();
        assert!(timer.wait().unwrap().can_retry());
    }
}
