//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `trace` - Run the simulator headless and export the curve
//! - `benchmark` - Benchmark adaptive sampling throughput
//! - `presets` - Manage the preset book (save/list/show/delete)

pub mod benchmark;
pub mod common;
pub mod preset;
pub mod trace;

pub use benchmark::cmd_benchmark;
pub use common::{parse_pendulum, svg_to_image, trace_to_svg, VIEW_HEIGHT, VIEW_WIDTH};
pub use preset::cmd_presets;
pub use trace::cmd_trace;
