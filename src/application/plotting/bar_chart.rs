use crate::config::PlotStyle;
use crate::domain::errors::PlotError;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::Display;
use std::path::Path;

/// Diverging PuOr palette, nine classes.
const PALETTE: [RGBColor; 9] = [
    RGBColor(179, 88, 6),
    RGBColor(224, 130, 20),
    RGBColor(253, 184, 99),
    RGBColor(254, 224, 182),
    RGBColor(247, 247, 247),
    RGBColor(216, 218, 235),
    RGBColor(178, 171, 210),
    RGBColor(128, 115, 172),
    RGBColor(84, 39, 136),
];

const ERROR_BAR_COLOR: RGBColor = RGBColor(128, 128, 128);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPoint {
    /// Index into [`BarChart::groups`].
    pub group: usize,
    pub value: f64,
    pub error: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub label: String,
    pub points: Vec<BarPoint>,
}

/// Grouped bar chart: one group per x key, one bar per series inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub groups: Vec<String>,
    pub series: Vec<BarSeries>,
    pub x_desc: String,
    pub y_desc: String,
    pub y_max: Option<f64>,
}

impl BarChart {
    /// Builds a chart from `(label, [(key, value, error)])` series.
    ///
    /// Series without points are dropped. Groups are the sorted union of all
    /// keys. When a series holds a key twice the first point is kept.
    pub fn from_series<K>(
        series: Vec<(String, Vec<(K, f64, f64)>)>,
        x_desc: &str,
        y_desc: &str,
        y_max: Option<f64>,
    ) -> Self
    where
        K: Ord + Copy + Display,
    {
        let series: Vec<_> = series
            .into_iter()
            .filter(|(_, points)| !points.is_empty())
            .collect();

        let keys: Vec<K> = series
            .iter()
            .flat_map(|(_, points)| points.iter().map(|(k, _, _)| *k))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let series = series
            .into_iter()
            .map(|(label, points)| {
                let mut seen = BTreeSet::new();
                let mut bars: Vec<BarPoint> = points
                    .into_iter()
                    .filter(|(k, _, _)| seen.insert(*k))
                    .filter_map(|(k, value, error)| {
                        keys.binary_search(&k).ok().map(|group| BarPoint {
                            group,
                            value,
                            error,
                        })
                    })
                    .collect();
                bars.sort_by_key(|p| p.group);
                BarSeries {
                    label,
                    points: bars,
                }
            })
            .collect();

        Self {
            groups: keys.iter().map(|k| k.to_string()).collect(),
            series,
            x_desc: x_desc.to_string(),
            y_desc: y_desc.to_string(),
            y_max,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    pub fn bar_width(&self) -> f64 {
        1.0 / (self.series.len() as f64 + 1.0)
    }

    /// Left edge of bar `n` in `group`.
    pub fn bar_x(&self, group: usize, n: usize) -> f64 {
        group as f64 + n as f64 * self.bar_width()
    }

    /// Offset of the tick label from the group origin.
    pub fn label_offset(&self) -> f64 {
        self.series.len() as f64 / 2.0 * self.bar_width()
    }

    pub fn y_upper(&self) -> f64 {
        self.y_max.unwrap_or_else(|| {
            let top = self
                .series
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.value + p.error))
                .fold(0.0f64, f64::max);
            (top * 1.1).max(1.0)
        })
    }
}

/// Renders `chart` as an SVG file at `path`.
pub fn render_bar_chart(path: &Path, chart: &BarChart, style: &PlotStyle) -> Result<(), PlotError> {
    draw_bars(path, chart, style).map_err(|e| PlotError::Render {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn draw_bars(path: &Path, chart: &BarChart, style: &PlotStyle) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font = ("sans-serif", style.font_size);
    let y_upper = chart.y_upper();
    let width = chart.bar_width();

    let mut ctx = ChartBuilder::on(&root)
        .margin(10)
        .margin_top(40)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..chart.groups.len().max(1) as f64, 0f64..y_upper)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .x_desc(chart.x_desc.as_str())
        .y_desc(chart.y_desc.as_str())
        .label_style(font)
        .draw()?;

    for (n, series) in chart.series.iter().enumerate() {
        let color = PALETTE[n % PALETTE.len()];

        ctx.draw_series(series.points.iter().map(|p| {
            let x0 = chart.bar_x(p.group, n);
            Rectangle::new([(x0, 0.0), (x0 + width, p.value.min(y_upper))], color.filled())
        }))?
        .label(series.label.as_str())
        .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));

        ctx.draw_series(series.points.iter().map(|p| {
            let x0 = chart.bar_x(p.group, n);
            let top = p.value.min(y_upper);
            PathElement::new(
                vec![(x0, 0.0), (x0, top), (x0 + width, top), (x0 + width, 0.0)],
                BLACK,
            )
        }))?;

        ctx.draw_series(series.points.iter().map(|p| {
            let center = chart.bar_x(p.group, n) + width / 2.0;
            ErrorBar::new_vertical(
                center,
                (p.value - p.error).max(0.0),
                p.value,
                (p.value + p.error).min(y_upper),
                ERROR_BAR_COLOR.stroke_width(1),
                6,
            )
        }))?;
    }

    // Tick labels sit under the middle of each group
    let tick_style = TextStyle::from(font).pos(Pos::new(HPos::Center, VPos::Top));
    for (group, label) in chart.groups.iter().enumerate() {
        let (px, py) = ctx
            .plotting_area()
            .map_coordinate(&(group as f64 + chart.label_offset(), 0.0));
        root.draw(&Text::new(label.clone(), (px, py + 6), tick_style.clone()))?;
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(font)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_are_sorted_union() {
        let chart = BarChart::from_series(
            vec![
                ("a".to_string(), vec![(8u32, 1.0, 0.1), (4, 2.0, 0.2)]),
                ("b".to_string(), vec![(12u32, 3.0, 0.3)]),
                ("empty".to_string(), vec![]),
            ],
            "x",
            "y",
            None,
        );

        assert_eq!(chart.groups, vec!["4", "8", "12"]);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(
            chart.series[0].points,
            vec![
                BarPoint {
                    group: 0,
                    value: 2.0,
                    error: 0.2
                },
                BarPoint {
                    group: 1,
                    value: 1.0,
                    error: 0.1
                },
            ]
        );
        assert_eq!(chart.series[1].points[0].group, 2);
    }

    #[test]
    fn test_duplicate_key_keeps_first() {
        let chart = BarChart::from_series(
            vec![("a".to_string(), vec![(1u32, 5.0, 0.0), (1, 9.0, 0.0)])],
            "x",
            "y",
            None,
        );
        assert_eq!(chart.series[0].points.len(), 1);
        assert_eq!(chart.series[0].points[0].value, 5.0);
    }

    #[test]
    fn test_bar_layout() {
        let chart = BarChart::from_series(
            vec![
                ("a".to_string(), vec![(0u32, 1.0, 0.0)]),
                ("b".to_string(), vec![(0u32, 1.0, 0.0)]),
                ("c".to_string(), vec![(1u32, 1.0, 0.0)]),
            ],
            "x",
            "y",
            Some(250.0),
        );
        assert!((chart.bar_width() - 0.25).abs() < 1e-12);
        assert!((chart.bar_x(1, 2) - 1.5).abs() < 1e-12);
        assert!((chart.label_offset() - 0.375).abs() < 1e-12);
        assert_eq!(chart.y_upper(), 250.0);
    }

    #[test]
    fn test_y_upper_scales_to_data() {
        let chart = BarChart::from_series(
            vec![("a".to_string(), vec![(0u32, 90.0, 10.0)])],
            "x",
            "y",
            None,
        );
        assert!((chart.y_upper() - 110.0).abs() < 1e-9);
        assert!(!chart.is_empty());
    }
}
