//! Chart descriptions and the `plotters` backend that draws them.
//!
//! A [`Chart`] is plain data: pre-sorted series, axis labels and the axis
//! limits to draw with. The solvers never talk to a drawing backend
//! directly; the driver hands charts to a [`Renderer`].

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::errors::{Result, RlcError};
use crate::math::{finite_bounds, Scalar};

/// Default image size: 10×7 inches at 77 dpi.
pub const DEFAULT_IMAGE_SIZE: (u32, u32) = (770, 539);

/// Line colours cycled by [`Series::color`].
const PALETTE: [RGBColor; 7] = [
    BLUE,
    RGBColor(0, 128, 0),
    RED,
    CYAN,
    MAGENTA,
    RGBColor(191, 191, 0),
    BLACK,
];

/// One polyline of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend entry.
    pub label: String,
    /// Points, ordered along the x axis.
    pub points: Vec<(Scalar, Scalar)>,
    /// Index into the palette (wraps around).
    pub color: usize,
    /// Draw with a heavier stroke.
    pub emphasis: bool,
}

impl Series {
    /// Creates a series with the given palette slot.
    #[must_use]
    pub fn new(label: impl Into<String>, points: Vec<(Scalar, Scalar)>, color: usize) -> Self {
        Self {
            label: label.into(),
            points,
            color,
            emphasis: false,
        }
    }

    /// Marks the series to be drawn thicker.
    #[must_use]
    pub fn emphasized(mut self, emphasis: bool) -> Self {
        self.emphasis = emphasis;
        self
    }

    fn stroke(&self) -> ShapeStyle {
        let width = if self.emphasis { 3 } else { 1 };
        PALETTE[self.color % PALETTE.len()].stroke_width(width)
    }
}

/// Annotated guide from the x axis up to a point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Abscissa of the guide.
    pub x: Scalar,
    /// Height the guide reaches.
    pub y: Scalar,
    /// Text drawn next to the guide.
    pub annotation: String,
}

/// Everything a renderer needs to draw one figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// Figure title.
    pub title: String,
    /// X axis caption.
    pub x_label: String,
    /// Y axis caption.
    pub y_label: String,
    /// Drawn x range.
    pub x_range: (Scalar, Scalar),
    /// Drawn y range.
    pub y_range: (Scalar, Scalar),
    /// Polylines in drawing order.
    pub series: Vec<Series>,
    /// Guides drawn on top of the series.
    pub markers: Vec<Marker>,
}

impl Chart {
    /// Creates an empty chart spanning the unit square.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            x_range: (0.0, 1.0),
            y_range: (0.0, 1.0),
            series: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Appends a series.
    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Appends a marker.
    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Sets the x range verbatim.
    #[must_use]
    pub fn x_limits(mut self, min: Scalar, max: Scalar) -> Self {
        self.x_range = non_degenerate(min, max);
        self
    }

    /// Sets the y range from data limits, padded to `(min(0, 1.1·min), 1.1·max)`
    /// so the x axis stays in view.
    #[must_use]
    pub fn y_limits(mut self, min: Scalar, max: Scalar) -> Self {
        self.y_range = non_degenerate((1.1 * min).min(0.0), 1.1 * max);
        self
    }

    /// Derives padded y limits from the finite values of every series.
    #[must_use]
    pub fn auto_y_limits(self) -> Self {
        let bounds = finite_bounds(
            self.series
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.1)),
        );
        match bounds {
            Some((min, max)) => self.y_limits(min, max),
            None => self,
        }
    }
}

fn non_degenerate(min: Scalar, max: Scalar) -> (Scalar, Scalar) {
    if max > min {
        (min, max)
    } else {
        let pad = min.abs().max(1.0) * 0.5;
        (min - pad, min + pad)
    }
}

/// Turns a [`Chart`] into an image file.
pub trait Renderer {
    /// Draws `chart` to `path`.
    fn render(&self, chart: &Chart, path: &Path) -> Result<()>;
}

/// Renderer backed by `plotters`: SVG for `.svg` paths, PNG otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlottersRenderer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self {
            width: DEFAULT_IMAGE_SIZE.0,
            height: DEFAULT_IMAGE_SIZE.1,
        }
    }
}

impl Renderer for PlottersRenderer {
    fn render(&self, chart: &Chart, path: &Path) -> Result<()> {
        let size = (self.width, self.height);
        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if is_svg {
            draw(SVGBackend::new(path, size).into_drawing_area(), chart)?;
        } else {
            draw(BitMapBackend::new(path, size).into_drawing_area(), chart)?;
        }
        info!(path = %path.display(), series = chart.series.len(), "wrote chart");
        Ok(())
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> RlcError {
    RlcError::Render(err.to_string())
}

fn draw<DB: DrawingBackend>(root: DrawingArea<DB, Shift>, chart: &Chart) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;

    let (x0, x1) = chart.x_range;
    let (y0, y1) = chart.y_range;
    let mut ctx = ChartBuilder::on(&root)
        .caption(chart.title.as_str(), ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(render_err)?;

    ctx.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_labels(11)
        .y_labels(10)
        .draw()
        .map_err(render_err)?;

    for series in &chart.series {
        let style = series.stroke();
        ctx.draw_series(LineSeries::new(series.points.iter().copied(), style))
            .map_err(render_err)?
            .label(series.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    for marker in &chart.markers {
        ctx.draw_series(LineSeries::new(
            vec![(marker.x, 0.0), (marker.x, marker.y)],
            BLUE.mix(0.6).stroke_width(1),
        ))
        .map_err(render_err)?;
        ctx.draw_series(std::iter::once(Circle::new(
            (marker.x, 0.0),
            5,
            BLUE.filled(),
        )))
        .map_err(render_err)?;
        ctx.draw_series(std::iter::once(Text::new(
            marker.annotation.clone(),
            (marker.x, 0.5 * marker.y),
            ("sans-serif", 14).into_font(),
        )))
        .map_err(render_err)?;
    }

    if chart.series.iter().any(|s| !s.label.is_empty()) {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .draw()
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn y_limits_keep_axis_in_view() {
        let chart = Chart::new("t", "x", "y").y_limits(2.0, 10.0);
        assert_eq!(chart.y_range.0, 0.0);
        assert_relative_eq!(chart.y_range.1, 11.0);

        let chart = Chart::new("t", "x", "y").y_limits(-300.0, 600.0);
        assert_relative_eq!(chart.y_range.0, -330.0);
        assert_relative_eq!(chart.y_range.1, 660.0);
    }

    #[test]
    fn auto_limits_ignore_non_finite_points() {
        let chart = Chart::new("t", "x", "y")
            .with_series(Series::new("a", vec![(0.0, -1.0), (1.0, f64::NAN)], 0))
            .with_series(Series::new("b", vec![(0.0, 4.0)], 1))
            .auto_y_limits();
        assert_relative_eq!(chart.y_range.0, -1.1);
        assert_relative_eq!(chart.y_range.1, 4.4);
    }

    #[test]
    fn flat_data_still_gets_a_range() {
        let chart = Chart::new("t", "x", "y").x_limits(3.0, 3.0).y_limits(0.0, 0.0);
        assert!(chart.x_range.1 > chart.x_range.0);
        assert!(chart.y_range.1 > chart.y_range.0);
    }

    #[test]
    fn emphasis_widens_stroke_and_palette_wraps() {
        let thin = Series::new("a", Vec::new(), 7);
        let thick = thin.clone().emphasized(true);
        assert_eq!(thin.stroke().stroke_width, 1);
        assert_eq!(thick.stroke().stroke_width, 3);
        assert_eq!(thin.stroke().color, Series::new("b", Vec::new(), 0).stroke().color);
    }
}
