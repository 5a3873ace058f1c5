use std::time::{Duration, Instant};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// Auto-advancing index over the testimonials.
///
/// Time is passed in rather than read, so the event loop decides when
/// "now" is and tests can step it. A deadline exists only while there is
/// something to rotate (two or more items), the page is visible and the
/// owning view is on screen.
#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    index: usize,
    interval: Duration,
    visible: bool,
    active: bool,
    deadline: Option<Instant>,
}

impl Carousel {
    pub fn new(interval: Duration) -> Self {
        Self {
            len: 0,
            index: 0,
            interval,
            visible: true,
            active: true,
            deadline: None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    fn schedule(&mut self, now: Instant) {
        self.deadline = (self.len > 1 && self.visible && self.active).then(|| now + self.interval);
    }

    /// New sequence loaded.
    pub fn reset(&mut self, len: usize, now: Instant) {
        self.len = len;
        if self.index >= len {
            self.index = 0;
        }
        self.schedule(now);
    }

    /// Advance once if the deadline has passed. A late wake-up still
    /// advances a single step and restarts the countdown from `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.index = (self.index + 1) % self.len;
                self.schedule(now);
                true
            }
            _ => false,
        }
    }

    /// Manual jump; restarts the countdown. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, now: Instant) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = index;
        self.schedule(now);
        true
    }

    pub fn step(&mut self, forward: bool, now: Instant) -> bool {
        if self.len == 0 {
            return false;
        }
        let target = if forward {
            (self.index + 1) % self.len
        } else {
            (self.index + self.len - 1) % self.len
        };
        self.set(target, now)
    }

    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        self.schedule(now);
    }

    pub fn set_active(&mut self, active: bool, now: Instant) {
        if self.active == active {
            return;
        }
        self.active = active;
        self.schedule(now);
    }

    pub fn indicators(&self) -> Vec<bool> {
        (0..self.len).map(|i| i == self.index).collect()
    }
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
