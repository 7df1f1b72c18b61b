//! Geometry for the forecast area chart, rendered as inline SVG.

use crate::dto::ForecastPoint;
use crate::format::format_thousands;

pub const WIDTH: f64 = 640.0;
pub const HEIGHT: f64 = 300.0;
const PAD_LEFT: f64 = 56.0;
const PAD_RIGHT: f64 = 20.0;
const PAD_TOP: f64 = 10.0;
const PAD_BOTTOM: f64 = 28.0;
const TICKS: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub y: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MonthLabel {
    pub x: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Stroke along the data points.
    pub line: String,
    /// Closed shape down to the baseline, for the gradient fill.
    pub area: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AreaChart {
    pub risk: Series,
    pub collections: Series,
    pub y_ticks: Vec<Tick>,
    pub months: Vec<MonthLabel>,
    pub baseline: f64,
    pub left: f64,
    pub right: f64,
}

impl AreaChart {
    /// `None` for an empty series; the chart is omitted entirely then.
    pub fn layout(points: &[ForecastPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let max = points
            .iter()
            .flat_map(|p| [p.projected_risk, p.projected_collections])
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        let ceiling = nice_ceiling(max);

        let left = PAD_LEFT;
        let right = WIDTH - PAD_RIGHT;
        let baseline = HEIGHT - PAD_BOTTOM;
        let span = baseline - PAD_TOP;

        let x_at = |i: usize| {
            if points.len() == 1 {
                (left + right) / 2.0
            } else {
                left + (right - left) * i as f64 / (points.len() - 1) as f64
            }
        };
        let y_at = |v: f64| {
            let v = if v.is_finite() { v.max(0.0) } else { 0.0 };
            baseline - span * (v / ceiling)
        };

        let series = |value: fn(&ForecastPoint) -> f64| {
            let coords: Vec<(f64, f64)> = points
                .iter()
                .enumerate()
                .map(|(i, p)| (x_at(i), y_at(value(p))))
                .collect();
            build_series(&coords, baseline)
        };

        let y_ticks = (0..=TICKS)
            .map(|step| {
                let value = ceiling * step as f64 / TICKS as f64;
                Tick {
                    y: y_at(value),
                    label: format_thousands(value),
                }
            })
            .collect();
        let months = points
            .iter()
            .enumerate()
            .map(|(i, p)| MonthLabel {
                x: x_at(i),
                label: p.month.clone(),
            })
            .collect();

        Some(Self {
            risk: series(|p| p.projected_risk),
            collections: series(|p| p.projected_collections),
            y_ticks,
            months,
            baseline,
            left,
            right,
        })
    }

    pub fn view_box() -> String {
        format!("0 0 {WIDTH} {HEIGHT}")
    }
}

fn build_series(coords: &[(f64, f64)], baseline: f64) -> Series {
    let line = coords
        .iter()
        .enumerate()
        .map(|(i, (x, y))| format!("{}{x:.1},{y:.1}", if i == 0 { "M" } else { "L" }))
        .collect::<Vec<_>>()
        .join(" ");
    let area = match (coords.first(), coords.last()) {
        (Some((x0, _)), Some((xn, _))) => {
            format!("{line} L{xn:.1},{baseline:.1} L{x0:.1},{baseline:.1} Z")
        }
        _ => String::new(),
    };
    Series { line, area }
}

/// Rounds the axis maximum up to 1, 2, 2.5 or 5 times a power of ten.
fn nice_ceiling(max: f64) -> f64 {
    if max <= 0.0 {
        return 1000.0;
    }
    let magnitude = 10f64.powi(max.log10().floor() as i32);
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|c| *c >= max)
        .unwrap_or(10.0 * magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(month: &str, risk: f64, collections: f64) -> ForecastPoint {
        ForecastPoint {
            month: month.into(),
            projected_risk: risk,
            projected_collections: collections,
            net_risk: risk - collections,
        }
    }

    #[test]
    fn empty_series_has_no_chart() {
        assert_eq!(AreaChart::layout(&[]), None);
    }

    #[test]
    fn ticks_label_in_thousands() {
        let chart = AreaChart::layout(&[
            point("Jan", 42_000.0, 30_000.0),
            point("Feb", 38_000.0, 33_000.0),
        ])
        .unwrap();
        let labels: Vec<&str> = chart.y_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["$0k", "$10k", "$20k", "$30k", "$40k", "$50k"]);
        assert_eq!(chart.y_ticks[0].y, chart.baseline);
    }

    #[test]
    fn paths_span_plot_area() {
        let chart = AreaChart::layout(&[
            point("Jan", 100.0, 50.0),
            point("Feb", 80.0, 60.0),
            point("Mar", 60.0, 70.0),
        ])
        .unwrap();
        assert!(chart.risk.line.starts_with("M56.0,"));
        assert!(chart.risk.area.ends_with(" Z"));
        assert_eq!(chart.months.len(), 3);
        assert_eq!(chart.months[2].x, chart.right);
    }

    #[test]
    fn ceiling_rounds_up() {
        assert_eq!(nice_ceiling(42_000.0), 50_000.0);
        assert_eq!(nice_ceiling(18_000.0), 20_000.0);
        assert_eq!(nice_ceiling(100.0), 100.0);
        assert_eq!(nice_ceiling(0.0), 1000.0);
    }
}
