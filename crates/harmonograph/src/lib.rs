//! # harmonograph
//!
//! Curve evaluation and adaptive sampling core for an interactive
//! harmonograph simulator.
//!
//! A harmonograph superimposes damped pendulum motions:
//!
//!   x(t) = Σ Ai*sin(fi*t + pi)*exp(-di*t)
//!   y(t) = Σ Aj*sin(fj*t + pj)*exp(-dj*t)
//!
//! This crate evaluates that signal frame by frame and produces a
//! dense-enough point sequence to draw a visually continuous curve,
//! without evaluating more points than the chord-length subdivision
//! scheme needs. Everything here is synchronous pure computation over
//! floats; the host owns the render loop, widgets, and colors.

pub mod clock;
pub mod geometry;
pub mod pendulum;
pub mod presets;
pub mod sampler;
pub mod signal;
pub mod simulator;
pub mod tabs;

// Re-export common types at crate root for convenience.
pub use clock::{SimClock, DEFAULT_FPS, SPEED_CEILING};
pub use geometry::{to_raster, Point};
pub use pendulum::{Axis, Param, ParamRange, Pendulum, SIGNAL_SCALE};
pub use presets::{PresetBook, TabPreset};
pub use sampler::{sample_segment, SampledSegment, DEFAULT_MAX_DEPTH};
pub use signal::CompositeSignal;
pub use simulator::{Frame, Simulator};
pub use tabs::{Tab, TabArena, TabId};
