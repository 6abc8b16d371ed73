//! Bar chart of daily totals with a reference line at the ideal intake.
//!
//! Layout is computed separately from drawing so the geometry can be checked
//! without parsing SVG.

use crate::models::CalorieDataPoint;

pub const CHART_HEIGHT: f64 = 240.0;
pub const DEFAULT_WIDTH: f64 = 600.0;
pub const MIN_WIDTH: f64 = 160.0;
pub const MAX_WIDTH: f64 = 4096.0;
pub const PADDING: f64 = 32.0;
pub const BAR_GUTTER: f64 = 8.0;
const MIN_BAR_WIDTH: f64 = 1.0;
const VALUE_LABEL_OFFSET: f64 = 6.0;
const DAY_LABEL_OFFSET: f64 = 18.0;

/// Drawing surface: fixed height, width follows the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSurface {
    width: f64,
}

impl Default for ChartSurface {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
        }
    }
}

impl ChartSurface {
    pub fn new(width: f64) -> Self {
        let mut surface = Self::default();
        surface.resize(width);
        surface
    }

    pub fn resize(&mut self, container_width: f64) {
        if container_width.is_finite() {
            self.width = container_width.clamp(MIN_WIDTH, MAX_WIDTH);
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        CHART_HEIGHT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value_label: String,
    pub day_label: String,
    pub label_x: f64,
    pub value_label_y: f64,
    pub day_label_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub baseline_y: f64,
    pub ideal_y: f64,
    pub ideal_label: String,
    pub scale_max: f64,
    pub bars: Vec<Bar>,
}

impl ChartLayout {
    pub fn compute(surface: ChartSurface, points: &[CalorieDataPoint], ideal: f64) -> Self {
        let width = surface.width();
        let height = surface.height();
        let drawable_width = width - PADDING * 2.0;
        let drawable_height = height - PADDING * 2.0;
        let baseline_y = PADDING + drawable_height;

        let ideal = if ideal.is_finite() { ideal.max(0.0) } else { 0.0 };
        let computed_max = points
            .iter()
            .map(|point| point.calories)
            .filter(|value| value.is_finite())
            .fold(ideal, f64::max);
        let scale_max = if computed_max > 0.0 { computed_max } else { 1.0 };
        let scale = |value: f64| (value.max(0.0) / scale_max) * drawable_height;

        let bars = if points.is_empty() {
            Vec::new()
        } else {
            let slot = drawable_width / points.len() as f64;
            let bar_width = (slot - BAR_GUTTER).max(MIN_BAR_WIDTH);
            points
                .iter()
                .enumerate()
                .map(|(index, point)| {
                    let value = if point.calories.is_finite() { point.calories } else { 0.0 };
                    let bar_height = scale(value);
                    let x = PADDING + index as f64 * slot + (slot - bar_width) / 2.0;
                    let y = baseline_y - bar_height;
                    Bar {
                        x,
                        y,
                        width: bar_width,
                        height: bar_height,
                        value_label: format_calories(value),
                        day_label: point.label.clone(),
                        label_x: x + bar_width / 2.0,
                        value_label_y: y - VALUE_LABEL_OFFSET,
                        day_label_y: baseline_y + DAY_LABEL_OFFSET,
                    }
                })
                .collect()
        };

        Self {
            width,
            height,
            baseline_y,
            ideal_y: baseline_y - scale(ideal),
            ideal_label: format_calories(ideal),
            scale_max,
            bars,
        }
    }
}

pub fn render_svg(layout: &ChartLayout) -> String {
    let right = layout.width - PADDING;
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w:.0} {h:.0}" width="{w:.0}" height="{h:.0}" role="img" aria-label="Calories over the last 7 days">"#,
        w = layout.width,
        h = layout.height,
    );
    svg.push_str(&format!(
        r#"<line class="chart-axis" x1="{PADDING}" y1="{y:.2}" x2="{right:.2}" y2="{y:.2}" />"#,
        y = layout.baseline_y,
    ));
    for bar in &layout.bars {
        svg.push_str(&format!(
            r#"<rect class="chart-bar" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" />"#,
            bar.x, bar.y, bar.width, bar.height
        ));
        svg.push_str(&format!(
            r#"<text class="chart-value" x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            bar.label_x,
            bar.value_label_y,
            escape(&bar.value_label)
        ));
        svg.push_str(&format!(
            r#"<text class="chart-label" x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            bar.label_x,
            bar.day_label_y,
            escape(&bar.day_label)
        ));
    }
    svg.push_str(&format!(
        r#"<line class="chart-ideal" x1="{PADDING}" y1="{y:.2}" x2="{right:.2}" y2="{y:.2}" />"#,
        y = layout.ideal_y,
    ));
    svg.push_str(&format!(
        r#"<text class="chart-ideal-label" x="{right:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
        layout.ideal_y - VALUE_LABEL_OFFSET,
        escape(&layout.ideal_label)
    ));
    svg.push_str("</svg>");
    svg
}

/// Whole numbers print without decimals, everything else with at most one.
pub fn format_calories(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    // -0.0 rounds out of tiny negatives and would print as "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
