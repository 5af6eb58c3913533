//! Frame-by-frame orchestration of tabs, signal, clock, and sampler.
//!
//! The simulator enforces the per-frame ordering contract: every
//! parameter change accepted during event processing is folded into the
//! composite signal *before* sampling runs, and the clock only advances
//! after the frame's span has been sampled. Across frames, the sampled
//! curve stitches seamlessly because frame N+1 re-evaluates the same
//! pure signal at exactly the time frame N ended on - except across a
//! rebuild, which the [`Frame::rebuilt`] flag surfaces so the host's
//! auto-clear policy can wipe the canvas.

use crate::clock::SimClock;
use crate::geometry::Point;
use crate::pendulum::{Axis, Param};
use crate::presets::TabPreset;
use crate::sampler::{sample_segment, DEFAULT_MAX_DEPTH};
use crate::signal::CompositeSignal;
use crate::tabs::{TabArena, TabId};

/// One frame's sampling output, in signal space.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Time-ordered points covering the frame's span. Empty while paused.
    pub points: Vec<Point>,
    /// The sampler hit its depth cap this frame (degraded density).
    pub capped: bool,
    /// The signal was rebuilt since the previous frame; previously drawn
    /// curve segments no longer reflect the current parameters.
    pub rebuilt: bool,
}

pub struct Simulator {
    tabs: TabArena,
    signal: CompositeSignal,
    clock: SimClock,
    last_point: Option<Point>,
    dirty: bool,
    max_depth: u32,
}

impl Simulator {
    pub fn new() -> Self {
        let tabs = TabArena::new();
        let (x_terms, y_terms) = tabs.active_terms();
        Self {
            tabs,
            signal: CompositeSignal::new(x_terms, y_terms),
            clock: SimClock::new(),
            last_point: None,
            dirty: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the sampler's subdivision depth cap.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn tabs(&self) -> &TabArena {
        &self.tabs
    }

    pub fn signal(&self) -> &CompositeSignal {
        &self.signal
    }

    /// The stitch point carried from the previous frame's sampling.
    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }

    // --- event-processing phase -------------------------------------

    pub fn add_tab(&mut self) -> TabId {
        let id = self.tabs.add();
        self.dirty = true;
        id
    }

    pub fn remove_tab(&mut self, id: TabId) -> bool {
        let ok = self.tabs.remove(id);
        self.dirty |= ok;
        ok
    }

    pub fn toggle_tab(&mut self, id: TabId) -> bool {
        let ok = self.tabs.toggle(id);
        self.dirty |= ok;
        ok
    }

    pub fn set_param(&mut self, id: TabId, axis: Axis, param: Param, value: f64) -> bool {
        let ok = self.tabs.set_param(id, axis, param, value);
        self.dirty |= ok;
        ok
    }

    /// Bulk-set a tab's terms from a saved preset.
    pub fn apply_preset(&mut self, id: TabId, preset: &TabPreset) -> bool {
        let ok = self.tabs.set_terms(id, preset.x, preset.y);
        self.dirty |= ok;
        ok
    }

    pub fn toggle_pause(&mut self) {
        self.clock.toggle_pause();
    }

    pub fn cycle_speed(&mut self) {
        self.clock.cycle_speed();
    }

    /// Rewind to t = 0 and force a rebuild so damped envelopes restart
    /// from the same phase reference. Idempotent.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.last_point = None;
        self.dirty = true;
    }

    // --- simulation phase -------------------------------------------

    /// Run one frame: fold pending parameter changes into the signal,
    /// sample `[time, time + step]`, then advance the clock.
    pub fn advance_frame(&mut self, max_dist: f64) -> Frame {
        let rebuilt = self.dirty;
        if self.dirty {
            self.tabs.compact();
            let (x_terms, y_terms) = self.tabs.active_terms();
            self.signal = CompositeSignal::new(x_terms, y_terms);
            self.dirty = false;
        }

        if self.clock.paused() {
            return Frame { points: Vec::new(), capped: false, rebuilt };
        }

        let segment = sample_segment(
            &self.signal,
            self.clock.time(),
            self.clock.step(),
            max_dist,
            self.max_depth,
        );
        self.clock.tick();
        self.last_point = segment.points.last().copied();

        Frame { points: segment.points, capped: segment.capped, rebuilt }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_stitch_exactly() {
        let mut sim = Simulator::new();
        let first = sim.advance_frame(1.0);
        let second = sim.advance_frame(1.0);
        let end = *first.points.last().unwrap();
        let start = second.points[0];
        assert_eq!(end.x.to_bits(), start.x.to_bits());
        assert_eq!(end.y.to_bits(), start.y.to_bits());
    }

    #[test]
    fn paused_frame_draws_nothing() {
        let mut sim = Simulator::new();
        sim.toggle_pause();
        let t = sim.clock().time();
        let frame = sim.advance_frame(1.0);
        assert!(frame.points.is_empty());
        assert_eq!(sim.clock().time(), t);
    }

    #[test]
    fn param_change_rebuilds_before_sampling() {
        let mut sim = Simulator::new();
        sim.advance_frame(1.0);
        let id = sim.tabs().iter().next().unwrap().id;
        assert!(sim.set_param(id, Axis::X, Param::Frequency, 7.0));
        let frame = sim.advance_frame(1.0);
        assert!(frame.rebuilt);
        // The frame after a quiet one is not flagged.
        let next = sim.advance_frame(1.0);
        assert!(!next.rebuilt);
    }

    #[test]
    fn adding_a_tab_stacks_terms() {
        let mut sim = Simulator::new();
        sim.add_tab();
        sim.advance_frame(1.0);
        assert_eq!(sim.signal().term_count(), 2);
        // Two identical default tabs double the signal.
        let p = sim.signal().evaluate_at(0.0);
        assert!((p.x - 200.0).abs() < 1e-9);
    }

    #[test]
    fn removed_tab_compacts_on_next_frame() {
        let mut sim = Simulator::new();
        let b = sim.add_tab();
        sim.advance_frame(1.0);
        assert!(sim.remove_tab(b));
        sim.advance_frame(1.0);
        assert_eq!(sim.signal().term_count(), 1);
        assert_eq!(sim.tabs().len(), 1);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut sim = Simulator::new();
        for _ in 0..5 {
            sim.advance_frame(1.0);
        }
        sim.reset();
        assert_eq!(sim.clock().time(), 0.0);
        let a = sim.advance_frame(1.0);
        assert!(a.rebuilt);

        sim.reset();
        sim.reset();
        assert_eq!(sim.clock().time(), 0.0);
        let b = sim.advance_frame(1.0);
        assert!(b.rebuilt);
        // Same trajectory from t=0 both times.
        assert_eq!(a.points[0].x.to_bits(), b.points[0].x.to_bits());
    }
}
