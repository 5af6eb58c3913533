//! Composite signal - the per-axis sum of active pendulum terms.
//!
//! One term per active tab, x and y independent:
//!
//!   x(t) = Σ xi(t)    y(t) = Σ yi(t)
//!
//! The signal is rebuilt (not patched) whenever a slider moves or a tab
//! is added, removed, or toggled. The stored term vectors are the cached
//! evaluators: rebuilding re-derives them from the tab arena once, and
//! per-frame evaluation just walks the plain numeric list. No evaluation
//! results are cached across rebuilds.

use crate::geometry::Point;
use crate::pendulum::Pendulum;

#[derive(Debug, Clone)]
pub struct CompositeSignal {
    x_terms: Vec<Pendulum>,
    y_terms: Vec<Pendulum>,
}

impl CompositeSignal {
    /// Rebuild the signal from the active term lists.
    ///
    /// # Panics
    ///
    /// Panics if either axis has no terms. At least one tab is always
    /// active, so an empty axis is a caller bug, not a runtime condition.
    pub fn new(x_terms: Vec<Pendulum>, y_terms: Vec<Pendulum>) -> Self {
        assert!(
            !x_terms.is_empty() && !y_terms.is_empty(),
            "composite signal rebuilt with an empty term set"
        );
        Self { x_terms, y_terms }
    }

    #[inline]
    pub fn eval_x(&self, t: f64) -> f64 {
        self.x_terms.iter().map(|p| p.evaluate(t)).sum()
    }

    #[inline]
    pub fn eval_y(&self, t: f64) -> f64 {
        self.y_terms.iter().map(|p| p.evaluate(t)).sum()
    }

    /// Signal value at time `t` as a signal-space point.
    #[inline]
    pub fn evaluate_at(&self, t: f64) -> Point {
        Point::new(self.eval_x(t), self.eval_y(t))
    }

    /// Number of contributing tabs (terms per axis).
    pub fn term_count(&self) -> usize {
        self.x_terms.len()
    }
}
