//! Common utilities shared across CLI commands and the TUI.

use harmonograph::{Pendulum, Point};
use image::{DynamicImage, RgbaImage};
use tiny_skia::Pixmap;

/// Virtual screen the trace is composed against. Signal space maps onto
/// it origin-centered, y-up.
pub const VIEW_WIDTH: u32 = 1440;
pub const VIEW_HEIGHT: u32 = 900;

/// Parse an `A,f,p,d` pendulum spec (e.g. `1,3,1.5708,0`).
pub fn parse_pendulum(spec: &str) -> Result<Pendulum, String> {
    let parts: Vec<&str> = spec.split(',').collect();
    if parts.len() != 4 {
        return Err(format!(
            "expected amplitude,frequency,phase,damping but got '{}'",
            spec
        ));
    }
    let mut values = [0.0f64; 4];
    for (i, part) in parts.iter().enumerate() {
        values[i] = part
            .trim()
            .parse()
            .map_err(|_| format!("bad number '{}' in '{}'", part.trim(), spec))?;
    }
    Ok(Pendulum::new(values[0], values[1], values[2], values[3]))
}

/// Convert accumulated trace strokes to an SVG document.
///
/// Each stroke becomes one `<polyline>`; strokes are split wherever the
/// signal was rebuilt, so no line is drawn across a parameter jump.
pub fn trace_to_svg(strokes: &[Vec<Point>], render_w: u32, render_h: u32) -> String {
    let cx = VIEW_WIDTH as f64 / 2.0;
    let cy = VIEW_HEIGHT as f64 / 2.0;

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
<rect width="100%" height="100%" fill="black"/>
<g stroke="#00ff00" stroke-width="1.5" stroke-linecap="round" stroke-linejoin="round" fill="none">
"##,
        render_w, render_h, VIEW_WIDTH, VIEW_HEIGHT
    ));

    for stroke in strokes {
        if stroke.len() < 2 {
            continue;
        }
        let points: String = stroke
            .iter()
            .map(|p| format!("{:.2},{:.2}", cx + p.x, cy - p.y))
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!("  <polyline points=\"{}\"/>\n", points));
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Rasterize an SVG document with resvg.
pub fn svg_to_image(svg: &str, width: u32, height: u32) -> DynamicImage {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options).expect("Failed to parse generated SVG");

    let mut pixmap = Pixmap::new(width, height).expect("Failed to create pixmap");

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let rgba = RgbaImage::from_raw(width, height, pixmap.take()).expect("Failed to create image");

    DynamicImage::ImageRgba8(rgba)
}
