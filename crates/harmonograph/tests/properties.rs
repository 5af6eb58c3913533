//! End-to-end properties of the simulation pipeline.
//!
//! These exercise the library the way a host render loop does: mutate
//! during event processing, advance frames, draw the returned points.

use std::f64::consts::FRAC_PI_2;

use harmonograph::{
    sample_segment, to_raster, Axis, CompositeSignal, Param, Pendulum, PresetBook, Simulator,
    TabPreset, DEFAULT_MAX_DEPTH,
};

const MAX_DIST: f64 = 1.0;

#[test]
fn curve_is_continuous_across_many_frames() {
    let mut sim = Simulator::new();
    // Crank the speed so each frame covers a visible stretch of curve.
    for _ in 0..5 {
        sim.cycle_speed();
    }

    let mut prev_end = None;
    for _ in 0..200 {
        let frame = sim.advance_frame(MAX_DIST);
        let first = frame.points[0];
        if let Some(end) = prev_end {
            let d = first.distance(end);
            assert!(d < 1e-9, "gap of {} between frames", d);
        }
        prev_end = frame.points.last().copied();
        assert_eq!(prev_end, sim.last_point());
    }
}

#[test]
fn chord_bound_holds_frame_by_frame() {
    let mut sim = Simulator::new();
    let id = sim.tabs().iter().next().unwrap().id;
    sim.set_param(id, Axis::X, Param::Frequency, 8.0);
    sim.set_param(id, Axis::X, Param::Amplitude, 4.0);
    for _ in 0..3 {
        sim.cycle_speed();
    }

    for _ in 0..100 {
        let frame = sim.advance_frame(MAX_DIST);
        if frame.capped {
            continue; // degraded-quality fallback is flagged, not bounded
        }
        for pair in frame.points.windows(2) {
            let d = pair[0].distance(pair[1]);
            assert!(d <= MAX_DIST + 1e-6, "chord {} exceeds bound", d);
        }
    }
}

#[test]
fn identical_simulations_are_bit_identical() {
    let run = || {
        let mut sim = Simulator::new();
        sim.cycle_speed();
        let mut bits = Vec::new();
        for _ in 0..50 {
            for p in sim.advance_frame(MAX_DIST).points {
                bits.push((p.x.to_bits(), p.y.to_bits()));
            }
        }
        bits
    };
    assert_eq!(run(), run());
}

#[test]
fn scenario_single_tab_at_t_zero() {
    let signal = CompositeSignal::new(
        vec![Pendulum::new(1.0, 3.0, FRAC_PI_2, 0.0)],
        vec![Pendulum::new(1.0, 2.0, 0.0, 0.0)],
    );
    let p = signal.evaluate_at(0.0);
    assert!((p.x - 100.0).abs() < 1e-12);
    assert_eq!(p.y, 0.0);
    assert_eq!(to_raster(p, 1440, 900), (820, 450));
}

#[test]
fn scenario_damped_signal_decays_toward_origin() {
    let signal = CompositeSignal::new(
        vec![Pendulum::new(1.0, 3.0, FRAC_PI_2, 1.0)],
        vec![Pendulum::new(1.0, 2.0, 0.0, 1.0)],
    );
    let p5 = signal.evaluate_at(5.0);
    let envelope = 100.0 * (-5.0f64).exp();
    assert!(p5.x.abs() <= envelope + 1e-9);
    assert!(p5.y.abs() <= envelope + 1e-9);

    // Shrinking chords mean less subdivision work late in the run.
    let early = sample_segment(&signal, 0.0, 0.05, MAX_DIST, DEFAULT_MAX_DEPTH);
    let late = sample_segment(&signal, 5.0, 0.05, MAX_DIST, DEFAULT_MAX_DEPTH);
    assert!(late.points.len() < early.points.len());
}

#[test]
fn preset_recall_drives_the_signal() {
    let mut book = PresetBook::new();
    let id = book.save(TabPreset::new(
        "wide circle",
        Pendulum::new(2.0, 4.0, FRAC_PI_2, 0.0),
        Pendulum::new(2.0, 4.0, 0.0, 0.0),
    ));

    let mut sim = Simulator::new();
    let tab = sim.tabs().iter().next().unwrap().id;
    assert!(sim.apply_preset(tab, book.get(id).unwrap()));

    let frame = sim.advance_frame(MAX_DIST);
    assert!(frame.rebuilt);
    // A=2 at t=0 with phase pi/2: x = 2*100*sin(pi/2) = 200.
    assert!((frame.points[0].x - 200.0).abs() < 1e-9);
}

#[test]
fn speed_changes_stretch_the_frame_span() {
    let mut slow = Simulator::new();
    let mut fast = Simulator::new();
    for _ in 0..4 {
        fast.cycle_speed();
    }
    slow.advance_frame(MAX_DIST);
    fast.advance_frame(MAX_DIST);
    let ratio = fast.clock().time() / slow.clock().time();
    assert!((ratio - 16.0).abs() < 1e-9);
}
