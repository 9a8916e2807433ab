//! # Graph Rendering
//!
//! File: cli/src/delegation/graph/render.rs
//! Author: Christi Mahu
//!
//! Lays a `GraphSpec` out on a fixed 640x400 canvas and renders it to SVG
//! through the Tera template below. All geometry is computed here; the
//! template only places the precomputed shapes.
//!
use crate::core::error::Result;
use crate::core::templating;
use crate::delegation::graph::parse::{DataPoint, GraphKind, GraphSpec};
use serde::Serialize;
use std::f64::consts::PI;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 400.0;
const LEFT: f64 = 70.0;
const RIGHT: f64 = 610.0;
const TOP: f64 = 60.0;
const BOTTOM: f64 = 340.0;
const PIE_CENTER: (f64, f64) = (250.0, 210.0);
const PIE_RADIUS: f64 = 130.0;
/// Above this many points the x-axis tick labels are dropped.
const MAX_X_TICKS: usize = 16;

const PALETTE: [&str; 8] = [
    "#FF5733", "#3498DB", "#2ECC71", "#F1C40F", "#9B59B6", "#E67E22", "#1ABC9C", "#34495E",
];

const SVG_TEMPLATE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{{ width }}" height="{{ height }}" viewBox="0 0 {{ width }} {{ height }}" font-family="Arial, sans-serif">
  <rect width="{{ width }}" height="{{ height }}" fill="#ffffff"/>
{%- if title %}
  <text x="{{ center_x }}" y="32" font-size="20" text-anchor="middle" fill="#2C3E50">{{ title }}</text>
{%- endif %}
{%- if axes %}
  <line x1="{{ left }}" y1="{{ top }}" x2="{{ left }}" y2="{{ bottom }}" stroke="#333333"/>
  <line x1="{{ left }}" y1="{{ bottom }}" x2="{{ right }}" y2="{{ bottom }}" stroke="#333333"/>
{%- endif %}
{%- for tick in ticks %}
  <text x="{{ tick.x }}" y="{{ tick.y }}" font-size="11" text-anchor="{{ tick.anchor }}" fill="#555555">{{ tick.text }}</text>
{%- endfor %}
{%- if polyline %}
  <polyline points="{{ polyline }}" fill="none" stroke="#FF5733" stroke-width="2"/>
{%- endif %}
{%- for marker in markers %}
  <circle cx="{{ marker.x }}" cy="{{ marker.y }}" r="4" fill="#FF5733"/>
{%- endfor %}
{%- for bar in bars %}
  <rect x="{{ bar.x }}" y="{{ bar.y }}" width="{{ bar.width }}" height="{{ bar.height }}" fill="{{ bar.color }}" fill-opacity="0.8"/>
{%- endfor %}
{%- for slice in slices %}
  <path d="{{ slice.path }}" fill="{{ slice.color }}" stroke="#ffffff" stroke-width="1"/>
{%- endfor %}
{%- for entry in legend %}
  <rect x="{{ entry.x }}" y="{{ entry.y }}" width="12" height="12" fill="{{ entry.color }}"/>
  <text x="{{ entry.x + 18 }}" y="{{ entry.y + 11 }}" font-size="12" fill="#333333">{{ entry.text }}</text>
{%- endfor %}
{%- if x_label %}
  <text x="{{ center_x }}" y="{{ height - 12 }}" font-size="13" text-anchor="middle" fill="#333333">{{ x_label }}</text>
{%- endif %}
{%- if y_label %}
  <text x="20" y="{{ middle_y }}" font-size="13" text-anchor="middle" fill="#333333" transform="rotate(-90 20 {{ middle_y }})">{{ y_label }}</text>
{%- endif %}
</svg>
"##;

#[derive(Debug, Default, Serialize)]
struct Canvas {
    width: f64,
    height: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    center_x: f64,
    middle_y: f64,
    title: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    axes: bool,
    ticks: Vec<Tick>,
    polyline: Option<String>,
    markers: Vec<Point>,
    bars: Vec<Bar>,
    slices: Vec<Slice>,
    legend: Vec<LegendEntry>,
}

#[derive(Debug, Serialize)]
struct Tick {
    x: f64,
    y: f64,
    text: String,
    anchor: &'static str,
}

#[derive(Debug, Serialize)]
struct Point {
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize)]
struct Bar {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: &'static str,
}

#[derive(Debug, Serialize)]
struct Slice {
    path: String,
    color: &'static str,
}

#[derive(Debug, Serialize)]
struct LegendEntry {
    x: f64,
    y: f64,
    color: &'static str,
    text: String,
}

/// Renders `spec` as a complete SVG document.
pub fn render_svg(spec: &GraphSpec) -> Result<String> {
    let mut canvas = Canvas {
        width: WIDTH,
        height: HEIGHT,
        left: LEFT,
        right: RIGHT,
        top: TOP,
        bottom: BOTTOM,
        center_x: WIDTH / 2.0,
        middle_y: (TOP + BOTTOM) / 2.0,
        title: spec.title.clone(),
        x_label: spec.x_label.clone(),
        y_label: spec.y_label.clone(),
        ..Default::default()
    };
    match spec.kind {
        GraphKind::Line => layout_line(&spec.points, &mut canvas),
        GraphKind::Bar => layout_bars(&spec.points, &mut canvas),
        GraphKind::Pie => layout_pie(&spec.points, &mut canvas),
    }
    templating::render_template("graph.svg", SVG_TEMPLATE, &canvas)
}

fn layout_line(points: &[DataPoint], canvas: &mut Canvas) {
    canvas.axes = true;
    let (x_min, x_max) = span(points.iter().map(|p| p.x));
    let (y_min, y_max) = span(points.iter().map(|p| p.y));

    let coords: Vec<Point> = points
        .iter()
        .map(|p| Point {
            x: round(scale(p.x, x_min, x_max, LEFT, RIGHT)),
            y: round(scale(p.y, y_min, y_max, BOTTOM, TOP)),
        })
        .collect();
    canvas.polyline = Some(
        coords
            .iter()
            .map(|c| format!("{},{}", c.x, c.y))
            .collect::<Vec<_>>()
            .join(" "),
    );

    push_y_ticks(canvas, y_min, y_max);
    if points.len() <= MAX_X_TICKS {
        for (point, coord) in points.iter().zip(&coords) {
            canvas.ticks.push(Tick {
                x: coord.x,
                y: BOTTOM + 18.0,
                text: point_name(point),
                anchor: "middle",
            });
        }
    }
    canvas.markers = coords;
}

fn layout_bars(points: &[DataPoint], canvas: &mut Canvas) {
    canvas.axes = true;
    let (y_min, y_max) = span(
        points
            .iter()
            .map(|p| p.y)
            .chain(std::iter::once(0.0)),
    );
    let slot = (RIGHT - LEFT) / points.len() as f64;
    let baseline = scale(0.0, y_min, y_max, BOTTOM, TOP);

    for (i, point) in points.iter().enumerate() {
        let top = scale(point.y, y_min, y_max, BOTTOM, TOP);
        let x = LEFT + slot * i as f64 + slot * 0.15;
        canvas.bars.push(Bar {
            x: round(x),
            y: round(top.min(baseline)),
            width: round(slot * 0.7),
            height: round((top - baseline).abs()),
            color: PALETTE[i % PALETTE.len()],
        });
        if points.len() <= MAX_X_TICKS {
            canvas.ticks.push(Tick {
                x: round(x + slot * 0.35),
                y: BOTTOM + 18.0,
                text: point_name(point),
                anchor: "middle",
            });
        }
    }
    push_y_ticks(canvas, y_min, y_max);
}

fn layout_pie(points: &[DataPoint], canvas: &mut Canvas) {
    let total: f64 = points.iter().map(|p| p.y).sum();
    let (cx, cy) = PIE_CENTER;
    let mut angle = -PI / 2.0;

    for (i, point) in points.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let fraction = point.y / total;
        canvas.legend.push(LegendEntry {
            x: 430.0,
            y: 80.0 + 22.0 * i as f64,
            color,
            text: format!("{} ({:.1}%)", point_name(point), fraction * 100.0),
        });
        if fraction <= 0.0 {
            continue;
        }
        let path = if fraction >= 0.9999 {
            // A single arc cannot close on its own start point; draw two halves.
            format!(
                "M {} {} A {r} {r} 0 1 1 {} {} A {r} {r} 0 1 1 {} {} Z",
                round(cx),
                round(cy - PIE_RADIUS),
                round(cx),
                round(cy + PIE_RADIUS),
                round(cx),
                round(cy - PIE_RADIUS),
                r = PIE_RADIUS
            )
        } else {
            let end = angle + fraction * 2.0 * PI;
            let large_arc = if fraction > 0.5 { 1 } else { 0 };
            format!(
                "M {} {} L {} {} A {r} {r} 0 {} 1 {} {} Z",
                round(cx),
                round(cy),
                round(cx + PIE_RADIUS * angle.cos()),
                round(cy + PIE_RADIUS * angle.sin()),
                large_arc,
                round(cx + PIE_RADIUS * end.cos()),
                round(cy + PIE_RADIUS * end.sin()),
                r = PIE_RADIUS
            )
        };
        canvas.slices.push(Slice { path, color });
        angle += fraction * 2.0 * PI;
    }
}

fn push_y_ticks(canvas: &mut Canvas, y_min: f64, y_max: f64) {
    for (value, y) in [(y_min, BOTTOM), (y_max, TOP)] {
        canvas.ticks.push(Tick {
            x: LEFT - 8.0,
            y: y + 4.0,
            text: format_number(value),
            anchor: "end",
        });
    }
}

/// Min and max of `values`, widened when they coincide so scaling never divides by zero.
fn span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

fn scale(value: f64, min: f64, max: f64, from: f64, to: f64) -> f64 {
    from + (value - min) / (max - min) * (to - from)
}

fn round(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn point_name(point: &DataPoint) -> String {
    point
        .label
        .clone()
        .unwrap_or_else(|| format_number(point.x))
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}
