//! Trace command implementation - run the simulator headless and export
//! the sampled curve as SVG, JSON, or PNG.

use std::fs;

use chrono::Local;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use harmonograph::{Param, Pendulum, Point, Simulator, TabPreset, DEFAULT_FPS, SPEED_CEILING};

use super::common::{parse_pendulum, svg_to_image, trace_to_svg, VIEW_HEIGHT, VIEW_WIDTH};

/// Output format for the trace command.
#[derive(Clone, Copy, PartialEq)]
enum OutputFormat {
    Svg,
    Json,
    Png,
}

/// A sampled point in JSON output.
#[derive(Serialize)]
struct JsonPoint {
    x: f64,
    y: f64,
}

/// JSON output for a full trace run.
#[derive(Serialize)]
struct JsonTrace {
    seconds: f64,
    speed: u32,
    max_dist: f64,
    capped_frames: u64,
    points: Vec<JsonPoint>,
}

/// Execute the trace command.
pub fn cmd_trace(args: &[String]) {
    let mut seconds = 30.0;
    let mut speed: u32 = 8;
    let mut max_dist = 1.0;
    let mut output_path: Option<String> = None;
    let mut format = OutputFormat::Svg;
    let mut x_specs: Vec<String> = Vec::new();
    let mut y_specs: Vec<String> = Vec::new();
    let mut random_seed: Option<u64> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-t" | "--seconds" => {
                i += 1;
                if i < args.len() {
                    seconds = parse_or_die(&args[i], "seconds");
                }
            }
            "-x" => {
                i += 1;
                if i < args.len() {
                    x_specs.push(args[i].clone());
                }
            }
            "-y" => {
                i += 1;
                if i < args.len() {
                    y_specs.push(args[i].clone());
                }
            }
            "--speed" => {
                i += 1;
                if i < args.len() {
                    speed = parse_or_die(&args[i], "speed");
                }
            }
            "--max-dist" => {
                i += 1;
                if i < args.len() {
                    max_dist = parse_or_die(&args[i], "max-dist");
                }
            }
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            "-f" | "--format" => {
                i += 1;
                if i < args.len() {
                    format = match args[i].as_str() {
                        "svg" => OutputFormat::Svg,
                        "json" => OutputFormat::Json,
                        "png" => OutputFormat::Png,
                        other => {
                            eprintln!("Unknown format: {}", other);
                            std::process::exit(1);
                        }
                    };
                }
            }
            "--random" => {
                i += 1;
                random_seed = Some(if i < args.len() && !args[i].starts_with('-') {
                    parse_or_die(&args[i], "seed")
                } else {
                    i -= 1;
                    rand::rng().random()
                });
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if x_specs.len() != y_specs.len() {
        eprintln!(
            "Mismatched term counts: {} x specs vs {} y specs",
            x_specs.len(),
            y_specs.len()
        );
        std::process::exit(1);
    }

    let mut sim = Simulator::new();

    if let Some(seed) = random_seed {
        let preset = random_preset(seed);
        let tab = sim.tabs().iter().next().unwrap().id;
        sim.apply_preset(tab, &preset);
        eprintln!("Random parameters (seed {})", seed);
    } else {
        for (idx, (xs, ys)) in x_specs.iter().zip(&y_specs).enumerate() {
            let x = parse_pendulum(xs).unwrap_or_else(|e| die(&e));
            let y = parse_pendulum(ys).unwrap_or_else(|e| die(&e));
            let tab = if idx == 0 {
                sim.tabs().iter().next().unwrap().id
            } else {
                sim.add_tab()
            };
            sim.apply_preset(tab, &TabPreset::new(format!("term {}", idx + 1), x, y));
        }
    }

    if !speed.is_power_of_two() || speed > SPEED_CEILING {
        eprintln!(
            "Speed must be a power of two up to {}, got {}",
            SPEED_CEILING, speed
        );
        std::process::exit(1);
    }
    while sim.clock().speed() < speed {
        sim.cycle_speed();
    }

    // One frame advances speed/fps seconds of simulation time.
    let frames = (seconds * DEFAULT_FPS / speed as f64).ceil() as u64;
    let mut strokes: Vec<Vec<Point>> = vec![Vec::new()];
    let mut capped_frames = 0u64;

    for _ in 0..frames {
        let frame = sim.advance_frame(max_dist);
        if frame.capped {
            capped_frames += 1;
        }
        let stroke = strokes.last_mut().unwrap();
        // Skip the stitch point already present from the previous frame.
        let skip = if stroke.is_empty() { 0 } else { 1 };
        stroke.extend(frame.points.into_iter().skip(skip));
    }

    match format {
        OutputFormat::Svg => {
            let svg = trace_to_svg(&strokes, VIEW_WIDTH, VIEW_HEIGHT);
            write_output(output_path.as_deref(), svg.as_bytes(), "svg");
        }
        OutputFormat::Json => {
            let points = strokes
                .iter()
                .flatten()
                .map(|p| JsonPoint { x: p.x, y: p.y })
                .collect();
            let json = serde_json::to_string(&JsonTrace {
                seconds,
                speed,
                max_dist,
                capped_frames,
                points,
            })
            .expect("Failed to serialize JSON");
            write_output(output_path.as_deref(), json.as_bytes(), "json");
        }
        OutputFormat::Png => {
            let svg = trace_to_svg(&strokes, VIEW_WIDTH * 2, VIEW_HEIGHT * 2);
            let img = svg_to_image(&svg, VIEW_WIDTH * 2, VIEW_HEIGHT * 2);
            let path = output_path.unwrap_or_else(|| {
                format!("harmonograph-{}.png", Local::now().format("%Y%m%d-%H%M%S"))
            });
            img.save(&path).unwrap_or_else(|e| die(&format!("Failed to write {}: {}", path, e)));
            eprintln!("Wrote {}", path);
        }
    }

    if capped_frames > 0 {
        eprintln!(
            "Note: {} of {} frames hit the subdivision depth cap",
            capped_frames, frames
        );
    }
}

/// Random pendulum pair drawn uniformly from the slider ranges, with
/// damping biased low so the trace survives long enough to be pretty.
fn random_preset(seed: u64) -> TabPreset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut random_pendulum = |rng: &mut StdRng| {
        let amp = Param::Amplitude.range();
        let freq = Param::Frequency.range();
        let phase = Param::Phase.range();
        Pendulum::new(
            rng.random_range(amp.min..=amp.max),
            rng.random_range(freq.min..=freq.max).round(),
            rng.random_range(phase.min..=phase.max),
            rng.random_range(0.0..=0.2),
        )
    };
    let x = random_pendulum(&mut rng);
    let y = random_pendulum(&mut rng);
    TabPreset::new(format!("random-{}", seed), x, y)
}

fn write_output(path: Option<&str>, bytes: &[u8], what: &str) {
    match path {
        None | Some("-") => {
            use std::io::Write;
            std::io::stdout()
                .write_all(bytes)
                .expect("Failed to write to stdout");
        }
        Some(path) => {
            fs::write(path, bytes)
                .unwrap_or_else(|e| die(&format!("Failed to write {}: {}", path, e)));
            eprintln!("Wrote {} ({})", path, what);
        }
    }
}

fn parse_or_die<T: std::str::FromStr>(s: &str, what: &str) -> T {
    s.parse().unwrap_or_else(|_| die(&format!("Invalid {}: '{}'", what, s)))
}

fn die(msg: &str) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}

fn print_usage() {
    eprintln!("Usage: harmonograph trace [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -t, --seconds <n>     Simulated seconds to trace (default: 30)");
    eprintln!("  -x <A,f,p,d>          X-axis pendulum term (repeatable, adds tabs)");
    eprintln!("  -y <A,f,p,d>          Y-axis pendulum term (pairs with -x in order)");
    eprintln!("  --speed <n>           Speed multiplier, power of two (default: 8)");
    eprintln!("  --max-dist <px>       Max chord length in pixels (default: 1.0)");
    eprintln!("  -o, --output <file>   Output file (- for stdout, default: stdout)");
    eprintln!("  -f, --format <fmt>    Output format: svg, json, png (default: svg)");
    eprintln!("  --random [seed]       Randomize parameters (optionally seeded)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  harmonograph trace -x 1,3,1.5708,0 -y 1,2,0,0 -t 20");
    eprintln!("  harmonograph trace --random 42 -f png -o figure.png");
}
