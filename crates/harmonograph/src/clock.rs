//! Simulation clock - explicit time, speed, and pause state.
//!
//! One tick per rendered frame advances simulation time by `speed/fps`.
//! The clock is a plain value passed into the frame pipeline and mutated
//! only during event processing; nothing else writes to it.

/// Frame-rate target the time step is derived from. This is the
/// simulation's own notion of a frame; a slower host loop just advances
/// less simulated time per wall-clock second.
pub const DEFAULT_FPS: f64 = 1200.0;

/// Speed multiplier ceiling. Doubling past this wraps back to 1.
pub const SPEED_CEILING: u32 = 128;

#[derive(Debug, Clone)]
pub struct SimClock {
    time: f64,
    speed: u32,
    paused: bool,
    fps: f64,
    ceiling: u32,
}

impl SimClock {
    pub fn new() -> Self {
        Self::with_ceiling(SPEED_CEILING)
    }

    /// Clock with a custom speed ceiling (must be a power of two so the
    /// doubling sequence lands on it exactly).
    pub fn with_ceiling(ceiling: u32) -> Self {
        debug_assert!(ceiling.is_power_of_two());
        Self { time: 0.0, speed: 1, paused: false, fps: DEFAULT_FPS, ceiling }
    }

    /// Elapsed simulation time in seconds.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    #[inline]
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// The time step the next tick will advance; zero while paused.
    #[inline]
    pub fn step(&self) -> f64 {
        if self.paused { 0.0 } else { self.speed as f64 / self.fps }
    }

    /// Advance one frame of simulation time.
    pub fn tick(&mut self) {
        self.time += self.step();
    }

    /// Double the speed multiplier, wrapping to 1 past the ceiling.
    pub fn cycle_speed(&mut self) {
        self.speed = if self.speed >= self.ceiling { 1 } else { self.speed * 2 };
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Rewind to t = 0. The signal owner should rebuild afterwards so
    /// damped terms restart their decay envelope from the same phase
    /// reference.
    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}
