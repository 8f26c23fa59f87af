//! Geometry for the dual-series fraud trend chart, rendered as SVG paths.

use crate::format::day_label;
use crate::models::TrendPoint;

pub const WIDTH: f64 = 600.0;
pub const HEIGHT: f64 = 300.0;
const PADDING: f64 = 32.0;
/// Roughly how many x-axis labels fit under the chart.
const MAX_X_LABELS: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    /// SVG path data for the total-count series.
    pub total_path: String,
    /// SVG path data for the fraud-count series.
    pub fraud_path: String,
    pub x_labels: Vec<AxisLabel>,
    pub y_labels: Vec<AxisLabel>,
}

impl TrendChart {
    pub fn new(points: &[TrendPoint]) -> Self {
        let peak = points
            .iter()
            .map(|p| p.total.max(p.fraud))
            .max()
            .unwrap_or(0)
            .max(1);

        let step = if points.len() > 1 {
            (WIDTH - 2.0 * PADDING) / (points.len() - 1) as f64
        } else {
            0.0
        };
        let x_at = |i: usize| PADDING + step * i as f64;
        let y_at = |v: u64| HEIGHT - PADDING - (v as f64 / peak as f64) * (HEIGHT - 2.0 * PADDING);

        let path = |value: fn(&TrendPoint) -> u64| -> String {
            points
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let cmd = if i == 0 { 'M' } else { 'L' };
                    format!("{}{:.1},{:.1}", cmd, x_at(i), y_at(value(p)))
                })
                .collect::<Vec<_>>()
                .join(" ")
        };

        let every = points.len().div_ceil(MAX_X_LABELS).max(1);
        let x_labels = points
            .iter()
            .enumerate()
            .filter(|(i, _)| i % every == 0)
            .map(|(i, p)| AxisLabel {
                x: x_at(i),
                y: HEIGHT - PADDING / 4.0,
                text: day_label(p.date),
            })
            .collect();

        let y_labels = [0, peak / 2, peak]
            .into_iter()
            .enumerate()
            .filter(|(i, v)| *i == 0 || *v > 0)
            .map(|(_, v)| AxisLabel {
                x: PADDING / 2.0,
                y: y_at(v),
                text: v.to_string(),
            })
            .collect();

        Self {
            total_path: path(|p| p.total),
            fraud_path: path(|p| p.fraud),
            x_labels,
            y_labels,
        }
    }

    pub fn view_box() -> String {
        format!("0 0 {} {}", WIDTH, HEIGHT)
    }
}
