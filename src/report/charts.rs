//! Chart model for the attendance report
//!
//! Pure data: which slices and bars each chart holds, their labels and colors.
//! The PDF writer only decides where to draw them.

use std::collections::HashMap;

use crate::pipeline::{AttendanceTable, Classification};

pub const DEFAULTER_LABEL: &str = "Defaulter";
pub const NON_DEFAULTER_LABEL: &str = "Non-Defaulter";

/// Angle (degrees, counter-clockwise from 3 o'clock) where the first pie slice starts.
pub const PIE_START_ANGLE: f64 = 140.0;

/// An sRGB color with 0-255 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ChartColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const RED: ChartColor = ChartColor::new(255, 0, 0);
    pub const GREEN: ChartColor = ChartColor::new(0, 128, 0);
    pub const BLACK: ChartColor = ChartColor::new(0, 0, 0);
    pub const GRAY: ChartColor = ChartColor::new(128, 128, 128);

    /// Cycling categorical palette for pie slices.
    pub fn palette(index: usize) -> ChartColor {
        const PALETTE: [ChartColor; 10] = [
            ChartColor::new(0x1f, 0x77, 0xb4),
            ChartColor::new(0xff, 0x7f, 0x0e),
            ChartColor::new(0x2c, 0xa0, 0x2c),
            ChartColor::new(0xd6, 0x27, 0x28),
            ChartColor::new(0x94, 0x67, 0xbd),
            ChartColor::new(0x8c, 0x56, 0x4b),
            ChartColor::new(0xe3, 0x77, 0xc2),
            ChartColor::new(0x7f, 0x7f, 0x7f),
            ChartColor::new(0xbc, 0xbd, 0x22),
            ChartColor::new(0x17, 0xbe, 0xcf),
        ];
        PALETTE[index % PALETTE.len()]
    }
}

/// One pie slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the whole pie, 0.0-1.0.
    pub fraction: f64,
    pub color: ChartColor,
}

impl PieSlice {
    /// Percentage label with one decimal, e.g. `"33.3%"`.
    pub fn pct_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
    /// Drawn in place of the pie when every count is zero.
    pub empty_text: String,
}

impl PieChart {
    /// Build a pie from `(label, count)` pairs, keeping their order.
    ///
    /// Zero-count entries stay in the legend but get a zero-width slice.
    pub fn from_counts(title: &str, counts: &[(String, usize)]) -> Self {
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        let slices = counts
            .iter()
            .enumerate()
            .map(|(i, (label, count))| PieSlice {
                label: label.clone(),
                count: *count,
                fraction: if total == 0 {
                    0.0
                } else {
                    *count as f64 / total as f64
                },
                color: ChartColor::palette(i),
            })
            .collect();

        Self {
            title: title.to_string(),
            slices,
            empty_text: "No data".to_string(),
        }
    }

    pub fn with_empty_text(mut self, text: &str) -> Self {
        self.empty_text = text.to_string();
        self
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Start and end angles in degrees for each slice.
    pub fn slice_angles(&self) -> Vec<(f64, f64)> {
        let mut start = PIE_START_ANGLE;
        self.slices
            .iter()
            .map(|slice| {
                let end = start + slice.fraction * 360.0;
                let span = (start, end);
                start = end;
                span
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: usize,
    pub color: ChartColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn max_value(&self) -> usize {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }
}

/// The three charts of one report page, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportCharts {
    pub gender: PieChart,
    pub categories: PieChart,
    pub counts: BarChart,
}

/// Build all report charts from a classification.
pub fn build_charts(classification: &Classification) -> ReportCharts {
    let category_counts = vec![
        (DEFAULTER_LABEL.to_string(), classification.defaulter_count()),
        (NON_DEFAULTER_LABEL.to_string(), classification.non_defaulter_count()),
    ];

    ReportCharts {
        gender: PieChart::from_counts("Gender Distribution", &gender_counts(&classification.table))
            .with_empty_text("No gender data"),
        categories: PieChart::from_counts("Attendance Categories", &category_counts),
        counts: BarChart {
            title: "Defaulter vs Non-Defaulter Counts".to_string(),
            bars: vec![
                Bar {
                    label: DEFAULTER_LABEL.to_string(),
                    value: classification.defaulter_count(),
                    color: ChartColor::RED,
                },
                Bar {
                    label: NON_DEFAULTER_LABEL.to_string(),
                    value: classification.non_defaulter_count(),
                    color: ChartColor::GREEN,
                },
            ],
        },
    }
}

/// Count records per gender value, most frequent first.
///
/// Ties are ordered by label. Records without a gender are skipped.
pub fn gender_counts(table: &AttendanceTable) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for gender in table.records().iter().filter_map(|r| r.gender.as_deref()) {
        *counts.entry(gender).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{classify_table, AttendanceRecord};

    fn sample() -> Classification {
        let records = vec![
            AttendanceRecord::new("a@x.com", 80.0).with_gender("F"),
            AttendanceRecord::new("b@x.com", 60.0).with_gender("M"),
            AttendanceRecord::new("c@x.com", 75.0).with_gender("F"),
        ];
        classify_table(AttendanceTable::new(records, true), 75.0)
    }

    #[test]
    fn test_gender_counts_sorted_by_frequency() {
        let counts = gender_counts(&sample().table);
        assert_eq!(counts, vec![("F".to_string(), 2), ("M".to_string(), 1)]);
    }

    #[test]
    fn test_category_pie_fixed_label_order() {
        let charts = build_charts(&sample());
        let labels: Vec<&str> = charts
            .categories
            .slices
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(labels, vec![DEFAULTER_LABEL, NON_DEFAULTER_LABEL]);
        assert_eq!(charts.categories.slices[0].pct_label(), "33.3%");
        assert_eq!(charts.categories.slices[1].pct_label(), "66.7%");
    }

    #[test]
    fn test_bar_colors_are_fixed() {
        let charts = build_charts(&sample());
        assert_eq!(charts.counts.bars[0].color, ChartColor::RED);
        assert_eq!(charts.counts.bars[1].color, ChartColor::GREEN);
        assert_eq!(charts.counts.max_value(), 2);
    }

    #[test]
    fn test_slice_angles_cover_full_circle() {
        let charts = build_charts(&sample());
        let angles = charts.gender.slice_angles();
        assert_eq!(angles[0].0, PIE_START_ANGLE);
        let last = angles.last().unwrap();
        assert!((last.1 - (PIE_START_ANGLE + 360.0)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_pie_has_zero_fractions() {
        let pie = PieChart::from_counts("Empty", &[("A".to_string(), 0)]);
        assert!(pie.is_empty());
        assert_eq!(pie.slices[0].fraction, 0.0);
        assert_eq!(pie.empty_text, "No data");
    }

    #[test]
    fn test_empty_text_belongs_to_each_chart() {
        let records = vec![AttendanceRecord::new("a@x.com", 80.0)];
        let charts = build_charts(&classify_table(AttendanceTable::new(records, false), 75.0));

        assert!(charts.gender.is_empty());
        assert_eq!(charts.gender.empty_text, "No gender data");
        assert_eq!(charts.categories.empty_text, "No data");
    }
}
