/// Fixed-cadence frame scheduler used as the render loop
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Cancels the ticker it was taken from; clones share the same flag
#[derive(Debug, Clone, Default)]
pub struct TickHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TickHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Information handed to each frame callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub index: u64,
    /// Time since the previous frame started
    pub delta: Duration,
}

/// Calls a frame callback at a fixed cadence until cancelled
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    handle: TickHandle,
}

impl Ticker {
    pub fn new(fps: u32) -> Self {
        Self::with_interval(Duration::from_secs(1) / fps.max(1))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            handle: TickHandle::default(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn handle(&self) -> TickHandle {
        self.handle.clone()
    }

    /// Run frames until the handle is cancelled or the callback fails.
    ///
    /// Returns the number of frames run. A frame that overruns the interval is
    /// followed immediately by the next one.
    pub fn run<E, F>(&mut self, mut on_frame: F) -> Result<u64, E>
    where
        F: FnMut(Frame) -> Result<(), E>,
    {
        let mut index = 0;
        let mut last = Instant::now();

        while !self.handle.is_cancelled() {
            let start = Instant::now();
            on_frame(Frame {
                index,
                delta: start - last,
            })?;
            last = start;
            index += 1;

            let elapsed = start.elapsed();
            if elapsed < self.interval && !self.handle.is_cancelled() {
                std::thread::sleep(self.interval - elapsed);
            }
        }

        Ok(index)
    }
}
