//! SVG visualization of composer placement plans.
//!
//! Draws the canvas, each placement's fill rectangle, and each mask outline,
//! scaled into a fixed-size panel. Useful for eyeballing a layout without
//! decoding any images.
//!
//! # Example
//!
//! ```
//! use zenmosaic::Composer;
//! use zenmosaic::svg::render_composer_svg;
//!
//! let svg = render_composer_svg(Composer::TilesDiamond, 500, 500, 13).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

use core::fmt::Write as _;

use crate::composer::{ComposeError, Composer};
use crate::composers::Placement;

/// Maximum pixel width of the canvas panel.
const MAX_PANEL_W: f64 = 400.0;
/// Maximum pixel height of the canvas panel.
const MAX_PANEL_H: f64 = 400.0;
/// Horizontal margin.
const MARGIN_X: f64 = 30.0;
/// Top and bottom margin.
const MARGIN_TOP: f64 = 30.0;
/// Height of the label text area above the panel.
const LABEL_H: f64 = 22.0;

/// Plan a composer and render the result.
pub fn render_composer_svg(
    composer: Composer,
    width: u32,
    height: u32,
    count: usize,
) -> Result<String, ComposeError> {
    let plan = composer.plan(width, height, count)?;
    let label = format!("{}  {}×{}, {} images", composer.id(), width, height, count);
    Ok(render_plan_svg(&label, width, height, &plan))
}

/// Render a placement plan for a `width × height` canvas as a complete SVG
/// document.
pub fn render_plan_svg(label: &str, width: u32, height: u32, plan: &[Placement]) -> String {
    let (sw, sh, scale) = scale_to_fit(width, height);
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;
    let total_h = MARGIN_TOP + LABEL_H + MAX_PANEL_H + MARGIN_TOP;
    let panel_x = (total_w - sw) / 2.0;
    let panel_y = MARGIN_TOP + LABEL_H;

    let mut svg = String::with_capacity(4096);

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    );

    // Light/dark mode via prefers-color-scheme
    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .index { font-size: 11px; fill: #333; }
  .outer { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .cell { fill: #6ba3d6; fill-opacity: 0.25; stroke: #2c6faa; stroke-width: 1; stroke-dasharray: 4,2; }
  .mask { fill: #6ba3d6; fill-opacity: 0.6; stroke: #2c6faa; stroke-width: 1.5; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .index { fill: #e0e0e0; }
    .outer { fill: #2d2d2d; stroke: #555; }
    .cell { fill: #3a72a4; stroke: #5a9fd4; }
    .mask { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##,
    );

    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
        total_w / 2.0,
        MARGIN_TOP + 14.0,
        escape_xml(label)
    );

    let _ = writeln!(
        svg,
        r#"<rect x="{panel_x:.1}" y="{panel_y:.1}" width="{sw:.1}" height="{sh:.1}" class="outer" rx="2"/>"#
    );

    // Clip everything to the canvas, like the raster does.
    let _ = writeln!(
        svg,
        r#"<clipPath id="canvas"><rect x="{panel_x:.1}" y="{panel_y:.1}" width="{sw:.1}" height="{sh:.1}"/></clipPath>"#
    );
    svg.push_str(r#"<g clip-path="url(#canvas)">"#);
    svg.push('\n');

    let to_panel = |x: f64, y: f64| (panel_x + x * scale, panel_y + y * scale);

    for placement in plan.iter().filter(|p| !p.is_empty()) {
        let rect = placement.rect();
        let (x, y) = to_panel(rect.min.x, rect.min.y);
        let _ = writeln!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="cell"/>"#,
            x,
            y,
            rect.width() * scale,
            rect.height() * scale
        );

        if let Some(mask) = &placement.mask {
            let mut d = String::new();
            for subpath in mask.subpaths().iter().filter(|s| !s.is_empty()) {
                for (i, p) in subpath.iter().enumerate() {
                    let (px, py) = to_panel(p.x, p.y);
                    let cmd = if i == 0 { 'M' } else { 'L' };
                    let _ = write!(d, "{cmd}{px:.1},{py:.1} ");
                }
                d.push('Z');
            }
            let _ = writeln!(svg, r#"<path d="{d}" class="mask" fill-rule="nonzero"/>"#);
        }

        let (cx, cy) = to_panel(rect.center().x, rect.center().y);
        let _ = writeln!(
            svg,
            r#"<text x="{cx:.1}" y="{:.1}" class="index" text-anchor="middle">{}</text>"#,
            cy + 4.0,
            placement.image
        );
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Scale a canvas size to fit within MAX_PANEL_W × MAX_PANEL_H, preserving
/// aspect ratio.
fn scale_to_fit(width: u32, height: u32) -> (f64, f64, f64) {
    let w = f64::from(width);
    let h = f64::from(height);
    if w == 0.0 || h == 0.0 {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
