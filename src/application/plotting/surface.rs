//! 3D surface of `x y z` samples.

use crate::config::PlotStyle;
use crate::domain::errors::PlotError;
use plotters::prelude::*;
use std::collections::HashMap;
use std::error::Error;
use std::io::BufRead;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub x: usize,
    pub y: usize,
    pub z: f64,
}

/// Lines starting with a digit, `.` or a space and holding at least three
/// fields are points; every other line is ignored.
fn is_point_line(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == ' ')
        && line.split_whitespace().count() >= 3
}

pub fn parse_surface_points<R: BufRead>(reader: R) -> Result<Vec<SurfacePoint>, PlotError> {
    let mut points = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if !is_point_line(&line) {
            continue;
        }
        let number = idx + 1;
        let invalid = |field: &str, value: &str| PlotError::InvalidPoint {
            line: number,
            reason: format!("{} is not a valid {}", value, field),
        };

        let mut fields = line.split_whitespace();
        let (Some(x), Some(y), Some(z)) = (fields.next(), fields.next(), fields.next()) else {
            continue;
        };
        points.push(SurfacePoint {
            x: x.parse().map_err(|_| invalid("x index", x))?,
            y: y.parse().map_err(|_| invalid("y index", y))?,
            z: z.parse().map_err(|_| invalid("z value", z))?,
        });
    }

    debug!("Parsed {} surface points", points.len());
    Ok(points)
}

/// Upper bound on dense grid cells, about 128 MiB of `f64`.
pub const MAX_SURFACE_CELLS: usize = 1 << 24;

/// Dense `(max_y + 1) x (max_x + 1)` grid; cells without a point are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
    width: usize,
    depth: usize,
    cells: Vec<f64>,
}

impl SurfaceGrid {
    /// Later points overwrite earlier ones at the same coordinate.
    ///
    /// Returns `Ok(None)` without points and `GridTooLarge` when the indices
    /// span more than [`MAX_SURFACE_CELLS`] cells.
    pub fn from_points(points: &[SurfacePoint]) -> Result<Option<Self>, PlotError> {
        let (Some(max_x), Some(max_y)) = (
            points.iter().map(|p| p.x).max(),
            points.iter().map(|p| p.y).max(),
        ) else {
            return Ok(None);
        };

        let too_large = || PlotError::GridTooLarge {
            max_x,
            max_y,
            limit: MAX_SURFACE_CELLS,
        };
        let width = max_x.checked_add(1).ok_or_else(too_large)?;
        let depth = max_y.checked_add(1).ok_or_else(too_large)?;
        match width.checked_mul(depth) {
            Some(cells) if cells <= MAX_SURFACE_CELLS => {}
            _ => return Err(too_large()),
        }

        let by_coord: HashMap<(usize, usize), f64> =
            points.iter().map(|p| ((p.x, p.y), p.z)).collect();

        let cells = (0..depth)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|coord| by_coord.get(&coord).copied().unwrap_or(0.0))
            .collect();

        Ok(Some(Self {
            width,
            depth,
            cells,
        }))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        if x >= self.width || y >= self.depth {
            return 0.0;
        }
        self.cells[y * self.width + x]
    }

    pub fn z_range(&self) -> (f64, f64) {
        self.cells
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &z| {
                (lo.min(z), hi.max(z))
            })
    }
}

/// Blue to red diverging ramp over `t` in `[0, 1]`.
fn coolwarm(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    let lerp = |a: f64, b: f64, t: f64| (a + (b - a) * t).round() as u8;
    let (from, mid, to) = ((59.0, 76.0, 192.0), (221.0, 221.0, 221.0), (180.0, 4.0, 38.0));
    let (a, b, t) = if t < 0.5 {
        (from, mid, t * 2.0)
    } else {
        (mid, to, (t - 0.5) * 2.0)
    };
    RGBColor(lerp(a.0, b.0, t), lerp(a.1, b.1, t), lerp(a.2, b.2, t))
}

pub fn render_surface(path: &Path, grid: &SurfaceGrid, style: &PlotStyle) -> Result<(), PlotError> {
    draw_surface(path, grid, style).map_err(|e| PlotError::Render {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn draw_surface(path: &Path, grid: &SurfaceGrid, style: &PlotStyle) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (z_lo, z_hi) = grid.z_range();
    let z_lo = z_lo.min(0.0);
    let z_hi = if z_hi > z_lo { z_hi } else { z_lo + 1.0 };
    let x_hi = (grid.width() - 1).max(1) as f64;
    let y_hi = (grid.depth() - 1).max(1) as f64;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_3d(0f64..x_hi, z_lo..z_hi, 0f64..y_hi)?;

    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.35;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .label_style(("sans-serif", style.font_size))
        .draw()?;

    let shade = |z: &f64| coolwarm((z - z_lo) / (z_hi - z_lo)).filled();
    chart.draw_series(
        SurfaceSeries::xoz(
            (0..grid.width()).map(|x| x as f64),
            (0..grid.depth()).map(|y| y as f64),
            |x: f64, y: f64| grid.get(x as usize, y as usize),
        )
        .style_func(&shade),
    )?;

    root.present()?;
    Ok(())
}
