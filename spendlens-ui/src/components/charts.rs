//! Chart Components
//!
//! Pie, bar and line charts drawn on HTML5 Canvas. Each chart shows a
//! placeholder instead of a canvas when it has no records.

use leptos::*;
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use spendlens::analysis::{slice_label, slice_shares, BarRecord, DailyPoint, PieSlice};
use spendlens::dashboard::EMPTY_CHART;

/// Slice and bar colors, cycled
const PALETTE: [&str; 8] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82CA9D", "#FFC658", "#FF6B6B",
];

const LINE_COLOR: &str = "#8884D8";
const BACKGROUND: &str = "#1f2937"; // gray-800
const GRID: &str = "#374151"; // gray-700
const AXIS_TEXT: &str = "#9ca3af"; // gray-400

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 50.0;

/// Pie chart of category shares
#[component]
pub fn PieChart(title: String, slices: Vec<PieSlice>) -> impl IntoView {
    let empty = slices.is_empty();
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_pie(&canvas, &slices);
        }
    });

    view! { <ChartCard title=title empty=empty canvas_ref=canvas_ref /> }
}

/// Bar chart of category amounts
#[component]
pub fn BarChart(title: String, records: Vec<BarRecord>) -> impl IntoView {
    let empty = records.is_empty();
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_bars(&canvas, &records);
        }
    });

    view! { <ChartCard title=title empty=empty canvas_ref=canvas_ref /> }
}

/// Line chart of daily spending
#[component]
pub fn LineChart(title: String, points: Vec<DailyPoint>) -> impl IntoView {
    let empty = points.is_empty();
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_line(&canvas, &points);
        }
    });

    view! { <ChartCard title=title empty=empty canvas_ref=canvas_ref /> }
}

/// Titled panel holding either the canvas or the empty placeholder
#[component]
fn ChartCard(title: String, empty: bool, canvas_ref: NodeRef<html::Canvas>) -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">{title}</h2>
            {if empty {
                view! {
                    <div class="h-64 flex items-center justify-center text-gray-500">
                        {EMPTY_CHART}
                    </div>
                }
                .into_view()
            } else {
                view! {
                    <canvas
                        node_ref=canvas_ref
                        width="800"
                        height="400"
                        class="w-full h-64 md:h-96 rounded-lg"
                    />
                }
                .into_view()
            }}
        </section>
    }
}

fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Start and end angle of each slice, clockwise from twelve o'clock
fn pie_angles(shares: &[f64]) -> Vec<(f64, f64)> {
    let mut start = -PI / 2.0;
    shares
        .iter()
        .map(|share| {
            let end = start + share * 2.0 * PI;
            let span = (start, end);
            start = end;
            span
        })
        .collect()
}

/// Y-axis bounds; always includes zero and never collapses to a point
fn value_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min == max {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}

/// Indices of at most `max_labels` evenly spread x-axis labels
fn label_indices(count: usize, max_labels: usize) -> Vec<usize> {
    if count == 0 || max_labels == 0 {
        return Vec::new();
    }
    let step = count.div_ceil(max_labels).max(1);
    (0..count).step_by(step).collect()
}

fn context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

fn clear(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, width, height);
}

/// Horizontal grid lines with value labels; returns the value-to-y mapping
fn draw_grid(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    (min, max): (f64, f64),
) -> impl Fn(f64) -> f64 {
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;

    ctx.set_stroke_style_str(GRID);
    ctx.set_line_width(1.0);
    ctx.set_fill_style_str(AXIS_TEXT);
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("left");

    for i in 0..=5 {
        let y = MARGIN_TOP + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(width - MARGIN_RIGHT, y);
        ctx.stroke();

        let value = max - (i as f64 / 5.0) * (max - min);
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    move |value: f64| MARGIN_TOP + ((max - value) / (max - min)) * chart_height
}

fn draw_pie(canvas: &HtmlCanvasElement, slices: &[PieSlice]) {
    let Some(ctx) = context(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    clear(&ctx, width, height);

    let shares = slice_shares(slices);
    let cx = width / 2.0;
    let cy = height / 2.0;
    let radius = (width.min(height) / 2.0 - 50.0).max(10.0);

    ctx.set_font("13px sans-serif");
    for (i, ((start, end), (slice, share))) in pie_angles(&shares)
        .into_iter()
        .zip(slices.iter().zip(&shares))
        .enumerate()
    {
        ctx.set_fill_style_str(color(i));
        ctx.begin_path();
        ctx.move_to(cx, cy);
        let _ = ctx.arc(cx, cy, radius, start, end);
        ctx.close_path();
        ctx.fill();

        // Label just outside the rim at the middle of the wedge
        let mid = (start + end) / 2.0;
        let lx = cx + (radius + 12.0) * mid.cos();
        let ly = cy + (radius + 12.0) * mid.sin();
        ctx.set_text_align(if mid.cos() >= 0.0 { "left" } else { "right" });
        let _ = ctx.fill_text(&slice_label(slice, *share), lx, ly + 4.0);
    }
}

fn draw_bars(canvas: &HtmlCanvasElement, records: &[BarRecord]) {
    let Some(ctx) = context(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    clear(&ctx, width, height);

    let to_y = draw_grid(&ctx, width, height, value_bounds(records.iter().map(|r| r.amount)));
    let baseline = to_y(0.0);

    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let slot = chart_width / records.len() as f64;
    let bar_width = slot * 0.7;

    ctx.set_text_align("center");
    for (i, record) in records.iter().enumerate() {
        let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_width) / 2.0;
        let top = to_y(record.amount);

        ctx.set_fill_style_str(color(i));
        ctx.fill_rect(x, top.min(baseline), bar_width, (baseline - top).abs());

        ctx.set_fill_style_str(AXIS_TEXT);
        let _ = ctx.fill_text(&record.name, x + bar_width / 2.0, height - MARGIN_BOTTOM + 18.0);
    }
}

fn draw_line(canvas: &HtmlCanvasElement, points: &[DailyPoint]) {
    let Some(ctx) = context(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    clear(&ctx, width, height);

    let to_y = draw_grid(&ctx, width, height, value_bounds(points.iter().map(|p| p.amount)));

    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let to_x = |i: usize| {
        if points.len() > 1 {
            MARGIN_LEFT + (i as f64 / (points.len() - 1) as f64) * chart_width
        } else {
            MARGIN_LEFT + chart_width / 2.0
        }
    };

    ctx.set_stroke_style_str(LINE_COLOR);
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, point) in points.iter().enumerate() {
        let (x, y) = (to_x(i), to_y(point.amount));
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();

    ctx.set_fill_style_str(LINE_COLOR);
    for (i, point) in points.iter().enumerate() {
        ctx.begin_path();
        let _ = ctx.arc(to_x(i), to_y(point.amount), 3.0, 0.0, PI * 2.0);
        ctx.fill();
    }

    ctx.set_fill_style_str(AXIS_TEXT);
    ctx.set_text_align("center");
    for i in label_indices(points.len(), 8) {
        let _ = ctx.fill_text(&points[i].axis_label(), to_x(i), height - MARGIN_BOTTOM + 18.0);
    }
}
