//! PDF report writer
//!
//! Lays the three report charts out as a vertical stack on a single A4 page
//! and writes `Attendance_Report_<class>.pdf`.

use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use chrono::Local;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Polygon,
    Rgb,
};

use super::charts::{build_charts, BarChart, ChartColor, PieChart};
use super::error::RenderError;
use crate::pipeline::{classify_with_schema_length, Classification, DEFAULT_INFER_SCHEMA_LENGTH, DEFAULT_THRESHOLD};

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const HEADER_HEIGHT: f64 = 36.0;
const REGION_HEIGHT: f64 = 85.0;
const PIE_RADIUS: f64 = 28.0;
/// Maximum arc step when approximating pie slices with polygons.
const ARC_STEP_DEGREES: f64 = 3.0;

/// Settings for one rendered report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub class_name: String,
    pub class_teacher: String,
    pub threshold: f64,
    /// Directory the PDF is written into. Empty means the working directory.
    pub output_dir: PathBuf,
    pub infer_schema_length: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            class_name: "Class".to_string(),
            class_teacher: "Teacher".to_string(),
            threshold: DEFAULT_THRESHOLD,
            output_dir: PathBuf::new(),
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
        }
    }
}

impl ReportOptions {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(report_file_name(&self.class_name))
    }
}

/// File name of the report for a class, e.g. `Attendance_Report_Class.pdf`.
///
/// Path separators in the class name are replaced so the file always lands
/// in the output directory.
pub fn report_file_name(class_name: &str) -> String {
    let safe: String = class_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("Attendance_Report_{}.pdf", safe)
}

/// Classify `dataset_path` at the default threshold and write the report
/// into the working directory.
pub fn render(
    dataset_path: &Path,
    class_name: &str,
    class_teacher: &str,
) -> Result<PathBuf, RenderError> {
    let options = ReportOptions {
        class_name: class_name.to_string(),
        class_teacher: class_teacher.to_string(),
        ..Default::default()
    };
    render_to(dataset_path, &options)
}

/// Classify `dataset_path` and write the report described by `options`.
///
/// A classification failure aborts before any file is touched.
pub fn render_to(dataset_path: &Path, options: &ReportOptions) -> Result<PathBuf, RenderError> {
    let classification =
        classify_with_schema_length(dataset_path, options.threshold, options.infer_schema_length)?;
    render_classification(&classification, options)
}

/// Write the report for an existing classification.
///
/// The document is built fully in memory first; any existing file with the
/// same name is overwritten only once the bytes are ready.
pub fn render_classification(
    classification: &Classification,
    options: &ReportOptions,
) -> Result<PathBuf, RenderError> {
    let bytes = build_document(classification, options)?;

    let path = options.output_path();
    std::fs::write(&path, bytes).map_err(|source| RenderError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Build the PDF bytes for a classification.
pub fn build_document(
    classification: &Classification,
    options: &ReportOptions,
) -> Result<Vec<u8>, RenderError> {
    let charts = build_charts(classification);
    let title = format!("Attendance Report - {}", options.class_name);

    let (doc, page, layer) = PdfDocument::new(&title, Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Charts");
    let layer = doc.get_page(page).get_layer(layer);
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let canvas = Canvas {
        layer,
        regular,
        bold,
    };

    // Header
    let top = PAGE_HEIGHT - 16.0;
    canvas.text_centered(&title, 18.0, PAGE_WIDTH / 2.0, top, true);
    canvas.text_centered(
        &format!("Class teacher: {}", options.class_teacher),
        11.0,
        PAGE_WIDTH / 2.0,
        top - 8.0,
        false,
    );
    canvas.text_centered(
        &format!(
            "{} students | threshold {}% | generated {}",
            classification.total(),
            options.threshold,
            Local::now().format("%Y-%m-%d %H:%M")
        ),
        9.0,
        PAGE_WIDTH / 2.0,
        top - 15.0,
        false,
    );

    let region_top = |index: usize| PAGE_HEIGHT - HEADER_HEIGHT - index as f64 * REGION_HEIGHT;

    canvas.draw_pie(&charts.gender, region_top(0));
    canvas.draw_pie(&charts.categories, region_top(1));
    canvas.draw_bars(&charts.counts, region_top(2));

    Ok(doc.save_to_bytes()?)
}

/// Drawing helpers over one PDF layer, in millimetres from the bottom-left corner.
struct Canvas {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Canvas {
    fn fill(&self, color: ChartColor) {
        self.layer.set_fill_color(rgb(color));
    }

    fn stroke(&self, color: ChartColor, thickness: f32) {
        self.layer.set_outline_color(rgb(color));
        self.layer.set_outline_thickness(thickness);
    }

    fn text(&self, text: &str, size: f64, x: f64, y: f64, bold: bool) {
        self.fill(ChartColor::BLACK);
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, size as f32, Mm(x as f32), Mm(y as f32), font);
    }

    fn text_centered(&self, text: &str, size: f64, x: f64, y: f64, bold: bool) {
        self.text(text, size, x - text_width(text, size) / 2.0, y, bold);
    }

    fn draw_pie(&self, pie: &PieChart, top: f64) {
        self.text_centered(&pie.title, 13.0, PAGE_WIDTH / 2.0, top - 6.0, true);

        let cx = PAGE_WIDTH / 2.0;
        let cy = top - REGION_HEIGHT / 2.0 - 3.0;

        if pie.is_empty() {
            self.text_centered(&pie.empty_text, 10.0, cx, cy, false);
            return;
        }

        for (slice, (start, end)) in pie.slices.iter().zip(pie.slice_angles()) {
            if slice.fraction <= 0.0 {
                continue;
            }

            let mut ring = vec![(point(cx, cy), false)];
            ring.extend(
                arc_points(cx, cy, PIE_RADIUS, start, end)
                    .into_iter()
                    .map(|(x, y)| (point(x, y), false)),
            );

            self.fill(slice.color);
            self.stroke(ChartColor::new(255, 255, 255), 0.5);
            self.layer.add_polygon(Polygon {
                rings: vec![ring],
                mode: PaintMode::FillStroke,
                winding_order: WindingOrder::NonZero,
            });

            let mid = (start + end) / 2.0;
            let (px, py) = polar(cx, cy, PIE_RADIUS * 0.6, mid);
            self.text_centered(&slice.pct_label(), 9.0, px, py - 1.2, false);

            let (lx, ly) = polar(cx, cy, PIE_RADIUS * 1.15, mid);
            let label_x = if mid.to_radians().cos() >= 0.0 {
                lx
            } else {
                lx - text_width(&slice.label, 10.0)
            };
            self.text(&slice.label, 10.0, label_x, ly - 1.2, false);
        }
    }

    fn draw_bars(&self, chart: &BarChart, top: f64) {
        self.text_centered(&chart.title, 13.0, PAGE_WIDTH / 2.0, top - 6.0, true);

        let axis_left = 40.0;
        let axis_right = PAGE_WIDTH - 30.0;
        let axis_bottom = top - REGION_HEIGHT + 12.0;
        let plot_height = REGION_HEIGHT - 30.0;
        let max_value = chart.max_value().max(1) as f64;

        self.stroke(ChartColor::BLACK, 0.6);
        self.layer.add_line(Line {
            points: vec![
                (point(axis_left, axis_bottom + plot_height), false),
                (point(axis_left, axis_bottom), false),
                (point(axis_right, axis_bottom), false),
            ],
            is_closed: false,
        });

        // Y ticks at 0, half and max
        for fraction in [0.0, 0.5, 1.0] {
            let y = axis_bottom + plot_height * fraction;
            self.layer.add_line(Line {
                points: vec![(point(axis_left - 1.5, y), false), (point(axis_left, y), false)],
                is_closed: false,
            });
            let label = format_tick(max_value * fraction);
            self.text(&label, 8.0, axis_left - 3.0 - text_width(&label, 8.0), y - 1.0, false);
        }

        if chart.bars.is_empty() {
            return;
        }

        let slot = (axis_right - axis_left) / chart.bars.len() as f64;
        let bar_width = slot * 0.6;

        for (i, bar) in chart.bars.iter().enumerate() {
            let center = axis_left + slot * (i as f64 + 0.5);
            let height = plot_height * bar.value as f64 / max_value;
            let left = center - bar_width / 2.0;
            let right = center + bar_width / 2.0;

            if height > 0.0 {
                self.fill(bar.color);
                self.layer.add_polygon(Polygon {
                    rings: vec![vec![
                        (point(left, axis_bottom), false),
                        (point(right, axis_bottom), false),
                        (point(right, axis_bottom + height), false),
                        (point(left, axis_bottom + height), false),
                    ]],
                    mode: PaintMode::Fill,
                    winding_order: WindingOrder::NonZero,
                });
            }

            self.text_centered(&bar.value.to_string(), 9.0, center, axis_bottom + height + 1.5, false);
            self.text_centered(&bar.label, 10.0, center, axis_bottom - 6.0, false);
        }
    }
}

fn rgb(color: ChartColor) -> Color {
    Color::Rgb(Rgb::new(
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        None,
    ))
}

fn point(x: f64, y: f64) -> Point {
    Point::new(Mm(x as f32), Mm(y as f32))
}

fn polar(cx: f64, cy: f64, radius: f64, degrees: f64) -> (f64, f64) {
    let radians = degrees * PI / 180.0;
    (cx + radius * radians.cos(), cy + radius * radians.sin())
}

/// Points along an arc from `start` to `end` degrees, both ends included.
fn arc_points(cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> Vec<(f64, f64)> {
    let steps = ((end - start) / ARC_STEP_DEGREES).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|i| polar(cx, cy, radius, start + (end - start) * i as f64 / steps as f64))
        .collect()
}

/// Rough Helvetica text width in millimetres, good enough for centering.
fn text_width(text: &str, size: f64) -> f64 {
    const PT_TO_MM: f64 = 0.3528;
    text.chars().count() as f64 * size * 0.5 * PT_TO_MM
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as u64)
    } else {
        format!("{:.1}", value)
    }
}
