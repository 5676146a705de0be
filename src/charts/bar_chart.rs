use std::{
    io::{self, ErrorKind},
    path::Path,
};

use plotters::{
    coord::ranged1d::{IntoSegmentedCoord, SegmentValue},
    drawing::DrawingAreaErrorKind,
    prelude::*,
};

use super::fonts::{ensure_label_font, LABEL_FONT_FAMILY};
use crate::{
    error::{Error, Result},
    model::genre_aggregate::GenreAverage,
};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

const BAR_FILL: RGBAColor = RGBAColor(255, 204, 0, 0.8);
const BAR_BORDER: RGBColor = RGBColor(255, 153, 0);
const SERIES_LABEL: &str = "Nota Média por Gênero";
const X_AXIS_TITLE: &str = "Gênero";
const Y_AXIS_TITLE: &str = "Nota Média";

#[derive(Debug, Clone)]
pub struct BarChartRenderer {
    width: u32,
    height: u32,
    labeled: bool,
}

impl BarChartRenderer {
    /// A renderer that draws bars only, no text.
    pub fn unlabeled(width: u32, height: u32) -> Self {
        BarChartRenderer {
            width,
            height,
            labeled: false,
        }
    }

    /// Draws axis titles, genre names and a legend when a TrueType font is
    /// available: `font_path` first, then the usual system locations.
    pub fn with_font(width: u32, height: u32, font_path: Option<&Path>) -> Self {
        let labeled = ensure_label_font(font_path);
        if !labeled {
            log::warn!("No usable TrueType font found, the chart will have no labels");
        }

        BarChartRenderer {
            width,
            height,
            labeled,
        }
    }

    pub fn is_labeled(&self) -> bool {
        self.labeled
    }

    /// Renders one bar per genre, in the given order, and writes the image to
    /// `file_name`. The format follows the file extension.
    pub fn render(&self, averages: &[GenreAverage], file_name: &Path) -> Result<()> {
        if averages.is_empty() {
            log::warn!("No genre averages to plot, writing an empty chart");
        }
        BarChartRenderer::check_output_dir(file_name)?;

        let root = BitMapBackend::new(file_name, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let (y_min, y_max) = BarChartRenderer::value_range(averages);
        let x_range = (0..averages.len().max(1)).into_segmented();

        let mut builder = ChartBuilder::on(&root);
        builder.margin(20);
        if self.labeled {
            builder.x_label_area_size(60).y_label_area_size(60);
        }
        let mut chart = builder
            .build_cartesian_2d(x_range, y_min..y_max)
            .map_err(chart_error)?;

        if self.labeled {
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(averages.len().max(1))
                .x_label_formatter(&|v| match v {
                    SegmentValue::CenterOf(i) => averages
                        .get(*i)
                        .map(|a| a.genre.clone())
                        .unwrap_or_default(),
                    _ => String::new(),
                })
                .y_label_formatter(&|v| format!("{:.1}", v))
                .x_desc(X_AXIS_TITLE)
                .y_desc(Y_AXIS_TITLE)
                .label_style((LABEL_FONT_FAMILY, 12))
                .axis_desc_style((LABEL_FONT_FAMILY, 16))
                .draw()
                .map_err(chart_error)?;
        }

        chart
            .draw_series(averages.iter().enumerate().map(|(i, a)| {
                BarChartRenderer::bar(i, a.average_rating, BAR_FILL.filled())
            }))
            .map_err(chart_error)?
            .label(SERIES_LABEL)
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BAR_FILL.filled()));

        chart
            .draw_series(averages.iter().enumerate().map(|(i, a)| {
                BarChartRenderer::bar(i, a.average_rating, BAR_BORDER.stroke_width(1))
            }))
            .map_err(chart_error)?;

        if self.labeled {
            chart
                .configure_series_labels()
                .label_font((LABEL_FONT_FAMILY, 14))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(chart_error)?;
        } else {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![
                        (SegmentValue::Exact(0), 0.0),
                        (SegmentValue::Exact(averages.len().max(1)), 0.0),
                    ],
                    BLACK,
                )))
                .map_err(chart_error)?;
        }

        root.present().map_err(chart_error)?;
        log::debug!(
            "Rendered {} bars into {}x{} image {}",
            averages.len(),
            self.width,
            self.height,
            file_name.display()
        );
        Ok(())
    }

    /// The bitmap backend only reports a failed write as a drawing error, so a
    /// missing directory is caught here as an I/O error.
    fn check_output_dir(file_name: &Path) -> Result<()> {
        match file_name.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => Err(io::Error::new(
                ErrorKind::NotFound,
                format!("output directory {} does not exist", dir.display()),
            )
            .into()),
            _ => Ok(()),
        }
    }

    fn bar(index: usize, value: f64, style: ShapeStyle) -> Rectangle<(SegmentValue<usize>, f64)> {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(index), 0.0),
                (SegmentValue::Exact(index + 1), value),
            ],
            style,
        );
        bar.set_margin(0, 0, 6, 6);
        bar
    }

    /// The y-axis always includes zero and leaves some headroom above the
    /// tallest bar.
    fn value_range(averages: &[GenreAverage]) -> (f64, f64) {
        let max = averages.iter().map(|a| a.average_rating).fold(0.0, f64::max);
        let min = averages.iter().map(|a| a.average_rating).fold(0.0, f64::min);

        let y_max = if max > 0.0 { (max * 1.1).ceil() } else { 1.0 };
        (min.floor(), y_max)
    }
}

impl Default for BarChartRenderer {
    fn default() -> Self {
        BarChartRenderer::unlabeled(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

fn chart_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> Error {
    Error::Chart(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn average(genre: &str, average_rating: f64) -> GenreAverage {
        GenreAverage {
            genre: genre.to_string(),
            average_rating,
        }
    }

    #[test]
    fn value_range_starts_at_zero_with_headroom() {
        let averages = vec![average("Drama", 7.5), average("Horror", 5.0)];

        assert_eq!(BarChartRenderer::value_range(&averages), (0.0, 9.0));
    }

    #[test]
    fn value_range_of_nothing_is_unit() {
        assert_eq!(BarChartRenderer::value_range(&[]), (0.0, 1.0));
    }

    #[test]
    fn writes_png_of_requested_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genre_ratings.png");
        let averages = vec![average("Action", 7.2), average("Drama", 8.1)];

        BarChartRenderer::default().render(&averages, &path).unwrap();

        assert_eq!(image::image_dimensions(&path).unwrap(), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }

    #[test]
    fn missing_output_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("genre_ratings.png");

        let err = BarChartRenderer::default()
            .render(&[average("Drama", 7.0)], &path)
            .unwrap_err();

        assert!(matches!(err, Error::Io(_)), "unexpected error: {:?}", err);
        assert!(!path.exists());
    }

    #[test]
    fn unlabeled_renderer_draws_no_text() {
        assert!(!BarChartRenderer::unlabeled(800, 600).is_labeled());
        assert!(!BarChartRenderer::default().is_labeled());
    }

    #[test]
    fn empty_input_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");

        BarChartRenderer::unlabeled(320, 240).render(&[], &path).unwrap();

        assert_eq!(image::image_dimensions(&path).unwrap(), (320, 240));
    }
}
