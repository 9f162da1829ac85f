//! Chart view models
//!
//! Values are normalized here so templates only place shapes: pie slices
//! carry cumulative 0-100 stops, bars a 0-100 height, and line charts
//! coordinates inside a `LINE_WIDTH` x `LINE_HEIGHT` view box.

use rust_decimal::Decimal;
use serde::Serialize;

use super::format::to_f64;

/// Number of distinct series colors the stylesheet defines
pub const SERIES_COLORS: usize = 6;

pub const LINE_WIDTH: f64 = 100.0;
pub const LINE_HEIGHT: f64 = 50.0;
const LINE_PADDING: f64 = 5.0;

/// One input value with its formatted label
#[derive(Debug, Clone, PartialEq)]
pub struct Datum {
    pub label: String,
    pub value: Decimal,
    pub display: String,
}

impl Datum {
    pub fn new(label: impl Into<String>, value: Decimal, display: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            display: display.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub title: String,
    /// Shown instead of the chart when there is nothing to plot
    pub empty_text: Option<String>,
    #[serde(flatten)]
    pub shape: ChartShape,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ChartShape {
    Pie { slices: Vec<PieSlice> },
    Bar { bars: Vec<Bar> },
    Line { points: Vec<LinePoint>, polyline: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub display: String,
    pub start: String,
    pub end: String,
    pub series: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub display: String,
    pub height: String,
    pub series: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    pub label: String,
    pub display: String,
    pub x: String,
    pub y: String,
}

fn coord(value: f64) -> String {
    format!("{:.2}", value)
}

fn empty_text(data: &[Datum], fallback: &str) -> Option<String> {
    let plotted = data.iter().any(|d| !d.value.is_zero());
    (!plotted).then(|| fallback.to_string())
}

impl ChartView {
    /// Shares of a whole; negative values are plotted as zero
    pub fn pie(title: impl Into<String>, data: Vec<Datum>, empty: &str) -> Self {
        let total: f64 = data.iter().map(|d| to_f64(d.value).max(0.0)).sum();
        let empty_text = empty_text(&data, empty);

        let mut start = 0.0;
        let slices = data
            .into_iter()
            .enumerate()
            .map(|(i, datum)| {
                let share = if total > 0.0 {
                    to_f64(datum.value).max(0.0) / total * 100.0
                } else {
                    0.0
                };
                let end = (start + share).min(100.0);
                let slice = PieSlice {
                    label: datum.label,
                    display: datum.display,
                    start: coord(start),
                    end: coord(end),
                    series: i % SERIES_COLORS,
                };
                start = end;
                slice
            })
            .collect();

        Self {
            title: title.into(),
            empty_text,
            shape: ChartShape::Pie { slices },
        }
    }

    /// Bars scaled against the largest value
    pub fn bar(title: impl Into<String>, data: Vec<Datum>, empty: &str) -> Self {
        let max = data.iter().map(|d| to_f64(d.value)).fold(0.0, f64::max);
        let empty_text = empty_text(&data, empty);

        let bars = data
            .into_iter()
            .enumerate()
            .map(|(i, datum)| Bar {
                height: coord(if max > 0.0 {
                    to_f64(datum.value).max(0.0) / max * 100.0
                } else {
                    0.0
                }),
                label: datum.label,
                display: datum.display,
                series: i % SERIES_COLORS,
            })
            .collect();

        Self {
            title: title.into(),
            empty_text,
            shape: ChartShape::Bar { bars },
        }
    }

    /// Points in order, the lowest value on the bottom edge
    pub fn line(title: impl Into<String>, data: Vec<Datum>, empty: &str) -> Self {
        let empty_text = if data.is_empty() { Some(empty.to_string()) } else { None };
        let values: Vec<f64> = data.iter().map(|d| to_f64(d.value)).collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;

        let inner_width = LINE_WIDTH - 2.0 * LINE_PADDING;
        let inner_height = LINE_HEIGHT - 2.0 * LINE_PADDING;
        let step = if values.len() > 1 {
            inner_width / (values.len() - 1) as f64
        } else {
            0.0
        };

        let points: Vec<LinePoint> = data
            .into_iter()
            .zip(values)
            .enumerate()
            .map(|(i, (datum, value))| {
                let x = if step > 0.0 {
                    LINE_PADDING + step * i as f64
                } else {
                    LINE_WIDTH / 2.0
                };
                let level = if span > 0.0 { (value - min) / span } else { 0.5 };
                LinePoint {
                    label: datum.label,
                    display: datum.display,
                    x: coord(x),
                    y: coord(LINE_HEIGHT - LINE_PADDING - level * inner_height),
                }
            })
            .collect();
        let polyline = points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            title: title.into(),
            empty_text,
            shape: ChartShape::Line { points, polyline },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn data(values: &[Decimal]) -> Vec<Datum> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Datum::new(format!("d{}", i), *v, v.to_string()))
            .collect()
    }

    #[test]
    fn test_pie_stops_cover_circle() {
        let chart = ChartView::pie("Share", data(&[dec!(3), dec!(3), dec!(4)]), "empty");
        let ChartShape::Pie { slices } = chart.shape else {
            panic!("expected pie");
        };
        assert_eq!(slices[0].start, "0.00");
        assert_eq!(slices[0].end, "30.00");
        assert_eq!(slices[2].end, "100.00");
        assert!(chart.empty_text.is_none());
    }

    #[test]
    fn test_all_zero_pie_is_empty() {
        let chart = ChartView::pie("Share", data(&[dec!(0), dec!(0)]), "Nothing to plot");
        assert_eq!(chart.empty_text.as_deref(), Some("Nothing to plot"));
    }

    #[test]
    fn test_bars_scaled_to_max() {
        let chart = ChartView::bar("Cost", data(&[dec!(50), dec!(100), dec!(25)]), "empty");
        let ChartShape::Bar { bars } = chart.shape else {
            panic!("expected bar");
        };
        let heights: Vec<&str> = bars.iter().map(|b| b.height.as_str()).collect();
        assert_eq!(heights, vec!["50.00", "100.00", "25.00"]);
    }

    #[test]
    fn test_line_extremes_on_edges() {
        let chart = ChartView::line("Claims", data(&[dec!(4), dec!(3), dec!(3)]), "empty");
        let ChartShape::Line { points, polyline } = chart.shape else {
            panic!("expected line");
        };
        assert_eq!(points[0].x, "5.00");
        assert_eq!(points[0].y, "5.00");
        assert_eq!(points[2].x, "95.00");
        assert_eq!(points[2].y, "45.00");
        assert_eq!(polyline, "5.00,5.00 50.00,45.00 95.00,45.00");
    }

    #[test]
    fn test_single_point_centered() {
        let chart = ChartView::line("Claims", data(&[dec!(7)]), "empty");
        let ChartShape::Line { points, .. } = chart.shape else {
            panic!("expected line");
        };
        assert_eq!(points[0].x, "50.00");
        assert_eq!(points[0].y, "25.00");
    }
}
