//! Benchmark command implementation.

use std::time::Instant;

use harmonograph::{Axis, Param, Simulator, SPEED_CEILING};

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &[String]) {
    let mut frames: u64 = 100_000;
    let mut max_dist = 1.0;
    let mut speed: u32 = 32;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--frames" => {
                i += 1;
                if i < args.len() {
                    frames = args[i].parse().unwrap_or(frames);
                }
            }
            "--max-dist" => {
                i += 1;
                if i < args.len() {
                    max_dist = args[i].parse().unwrap_or(max_dist);
                }
            }
            "--speed" => {
                i += 1;
                if i < args.len() {
                    speed = args[i].parse().unwrap_or(speed);
                }
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            _ => {}
        }
        i += 1;
    }

    // A deliberately busy configuration: two stacked tabs, one of them
    // fast, so the sampler actually has to subdivide.
    let mut sim = Simulator::new();
    let first = sim.tabs().iter().next().unwrap().id;
    sim.set_param(first, Axis::X, Param::Frequency, 7.0);
    sim.set_param(first, Axis::X, Param::Amplitude, 3.0);
    let second = sim.add_tab();
    sim.set_param(second, Axis::Y, Param::Frequency, 5.0);
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

    println!("Running {} frames at speed {}...", frames, speed);
    let start = Instant::now();

    let mut total_points: u64 = 0;
    let mut capped_frames: u64 = 0;
    for _ in 0..frames {
        let frame = sim.advance_frame(max_dist);
        total_points += frame.points.len() as u64;
        if frame.capped {
            capped_frames += 1;
        }
    }

    let elapsed = start.elapsed();
    let ms = elapsed.as_secs_f64() * 1000.0;

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  SAMPLER BENCHMARK");
    println!("═══════════════════════════════════════════════");
    println!("  Frames: {}", frames);
    println!("  Simulated time: {:.1}s", sim.clock().time());
    println!("  Points emitted: {}", total_points);
    println!("  Capped frames: {}", capped_frames);
    println!("  Time: {:?}", elapsed);
    println!("  Time (ms): {:.2}", ms);
    println!("  Avg per frame: {:.4}ms", ms / frames as f64);
    println!("  Points/sec: {:.0}", total_points as f64 / elapsed.as_secs_f64());
    println!("═══════════════════════════════════════════════");
}

fn print_usage() {
    eprintln!("Usage: harmonograph benchmark [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -n, --frames <n>    Frames to simulate (default: 100000)");
    eprintln!("  --max-dist <px>     Max chord length in pixels (default: 1.0)");
    eprintln!("  --speed <n>         Speed multiplier (default: 32)");
    eprintln!();
    eprintln!("Benchmarks adaptive sampling throughput.");
}
