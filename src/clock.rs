use std::thread;
use std::time::{Duration, Instant};

/// Time source for the frame loop.
pub trait Clock {
    /// Time since the clock was created.
    fn elapsed(&self) -> Duration;
    /// Stop everything for `duration`.
    fn pause(&mut self, duration: Duration);
    /// Wait until the next frame boundary at `fps` frames per second.
    fn tick(&mut self, fps: u32);
}

fn frame_length(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}

/// Wall-clock time.  `pause` and `tick` block the calling thread.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
    last_tick: Option<Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            start: Instant::now(),
            last_tick: None,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }

    fn tick(&mut self, fps: u32) {
        if let Some(last) = self.last_tick {
            let next = last + frame_length(fps);
            let now = Instant::now();
            if next > now {
                thread::sleep(next - now);
            }
        }
        self.last_tick = Some(Instant::now());
    }
}

/// A clock that only moves when told to.  Never sleeps.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Duration,
    paused: Duration,
    ticks: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Total time spent in `pause`.
    pub fn paused(&self) -> Duration {
        self.paused
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now
    }

    fn pause(&mut self, duration: Duration) {
        self.now += duration;
        self.paused += duration;
    }

    fn tick(&mut self, fps: u32) {
        self.now += frame_length(fps);
        self.ticks += 1;
    }
}
