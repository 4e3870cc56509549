//! Statistical charts over a ranked token/count list.
//!
//! Every style is a pure visualization choice over the same ranked data; no
//! style recomputes counts. Geometry (slice angles, value mapping, box-plot
//! statistics) is separated from painting so it can be tested headless.

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Vec2};

use crate::render::{PALETTE_BRIGHT, PALETTE_DARK};
use crate::text::frequency::TokenCount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    Pie,
    Bar,
    Line,
    Scatter,
    Area,
    Radar,
    Box,
}

impl ChartStyle {
    pub const ALL: [ChartStyle; 7] = [
        ChartStyle::Pie,
        ChartStyle::Bar,
        ChartStyle::Line,
        ChartStyle::Scatter,
        ChartStyle::Area,
        ChartStyle::Radar,
        ChartStyle::Box,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartStyle::Pie => "Pie",
            ChartStyle::Bar => "Bar",
            ChartStyle::Line => "Line",
            ChartStyle::Scatter => "Scatter",
            ChartStyle::Area => "Area",
            ChartStyle::Radar => "Radar",
            ChartStyle::Box => "Box",
        }
    }
}

/// A chart ready to paint: the ranked data plus the selected style.
#[derive(Debug, Clone)]
pub struct Chart {
    pub style: ChartStyle,
    pub entries: Vec<TokenCount>,
}

impl Chart {
    /// Build a chart over ranked data, or `None` when there is nothing to
    /// show. Holds for every style.
    pub fn build(style: ChartStyle, ranked: &[TokenCount]) -> Option<Chart> {
        if ranked.is_empty() {
            return None;
        }
        Some(Chart {
            style,
            entries: ranked.to_vec(),
        })
    }
}

// ── Geometry ──

/// (start, end) angle in radians per slice; the slices tile a full turn.
pub fn pie_angles(entries: &[TokenCount]) -> Vec<(f32, f32)> {
    let total: usize = entries.iter().map(|e| e.count).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut angles = Vec::with_capacity(entries.len());
    let mut start = 0.0_f32;
    for e in entries {
        let sweep = e.count as f32 / total as f32 * std::f32::consts::TAU;
        angles.push((start, start + sweep));
        start += sweep;
    }
    angles
}

/// Five-number summary of the counts (ignores token identity).
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub min: f32,
    pub q1: f32,
    pub median: f32,
    pub q3: f32,
    pub max: f32,
}

/// Linear-interpolated quartiles over the counts, `None` on empty input.
pub fn box_stats(entries: &[TokenCount]) -> Option<BoxStats> {
    if entries.is_empty() {
        return None;
    }
    let mut counts: Vec<f32> = entries.iter().map(|e| e.count as f32).collect();
    counts.sort_by(|a, b| a.total_cmp(b));
    Some(BoxStats {
        min: counts[0],
        q1: quantile(&counts, 0.25),
        median: quantile(&counts, 0.5),
        q3: quantile(&counts, 0.75),
        max: counts[counts.len() - 1],
    })
}

fn quantile(sorted: &[f32], q: f32) -> f32 {
    let pos = q * (sorted.len() - 1) as f32;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (pos - lo as f32) * (sorted[hi] - sorted[lo])
}

// ── Painting ──

const CHART_HEIGHT: f32 = 320.0;
const MARGIN: f32 = 36.0;
const LABEL_FONT: f32 = 11.0;

/// Paint the chart into the current panel.
pub fn draw(ui: &mut egui::Ui, chart: &Chart) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, CHART_HEIGHT), Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();
    let grid_color = ui.visuals().weak_text_color();

    let style = ChartPaint {
        text_color,
        grid_color,
        palette: if ui.visuals().dark_mode {
            PALETTE_BRIGHT
        } else {
            PALETTE_DARK
        },
    };

    match chart.style {
        ChartStyle::Pie => draw_pie(&painter, rect, &chart.entries, &style),
        ChartStyle::Bar => draw_bar(&painter, rect, &chart.entries, &style),
        ChartStyle::Line => draw_points(&painter, rect, &chart.entries, &style, true, false),
        ChartStyle::Scatter => draw_points(&painter, rect, &chart.entries, &style, false, false),
        ChartStyle::Area => draw_points(&painter, rect, &chart.entries, &style, true, true),
        ChartStyle::Radar => draw_radar(&painter, rect, &chart.entries, &style),
        ChartStyle::Box => draw_box(&painter, rect, &chart.entries, &style),
    }
}

struct ChartPaint {
    text_color: Color32,
    grid_color: Color32,
    palette: &'static [Color32],
}

impl ChartPaint {
    fn series(&self, i: usize) -> Color32 {
        self.palette[i % self.palette.len()]
    }
}

fn draw_pie(painter: &egui::Painter, rect: Rect, entries: &[TokenCount], style: &ChartPaint) {
    let radius = (rect.height() * 0.5 - 16.0).min(rect.width() * 0.25);
    let center = Pos2::new(rect.left() + rect.width() * 0.32, rect.center().y);

    for (i, (start, end)) in pie_angles(entries).into_iter().enumerate() {
        let mut points = vec![center];
        let steps = (((end - start) / 0.05).ceil() as usize).max(2);
        for s in 0..=steps {
            let a = start + (end - start) * s as f32 / steps as f32;
            points.push(Pos2::new(
                center.x + radius * a.cos(),
                center.y + radius * a.sin(),
            ));
        }
        painter.add(Shape::convex_polygon(points, style.series(i), Stroke::NONE));
    }

    // Legend
    let mut y = rect.top() + 12.0;
    let x = rect.left() + rect.width() * 0.62;
    for (i, entry) in entries.iter().enumerate() {
        if y + 16.0 > rect.bottom() {
            painter.text(
                Pos2::new(x, y),
                Align2::LEFT_TOP,
                format!("… {} more", entries.len() - i),
                FontId::proportional(LABEL_FONT),
                style.grid_color,
            );
            break;
        }
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(x, y + 2.0), Vec2::splat(10.0)),
            2.0,
            style.series(i),
        );
        painter.text(
            Pos2::new(x + 16.0, y),
            Align2::LEFT_TOP,
            format!("{} ({})", entry.token, entry.count),
            FontId::proportional(LABEL_FONT),
            style.text_color,
        );
        y += 16.0;
    }
}

/// Inner plot area with room for axis labels
fn plot_area(rect: Rect) -> Rect {
    Rect::from_min_max(
        Pos2::new(rect.left() + MARGIN, rect.top() + 10.0),
        Pos2::new(rect.right() - 10.0, rect.bottom() - 22.0),
    )
}

fn max_count(entries: &[TokenCount]) -> f32 {
    entries.iter().map(|e| e.count).max().unwrap_or(1).max(1) as f32
}

fn draw_value_axis(painter: &egui::Painter, plot: Rect, max: f32, style: &ChartPaint) {
    for tick in 0..=4 {
        let frac = tick as f32 / 4.0;
        let y = plot.bottom() - plot.height() * frac;
        painter.line_segment(
            [Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
            Stroke::new(0.5, style.grid_color),
        );
        painter.text(
            Pos2::new(plot.left() - 4.0, y),
            Align2::RIGHT_CENTER,
            format!("{:.0}", max * frac),
            FontId::proportional(LABEL_FONT - 1.0),
            style.grid_color,
        );
    }
}

/// Token labels along the category axis, thinned when they would collide.
fn draw_token_labels(
    painter: &egui::Painter,
    plot: Rect,
    entries: &[TokenCount],
    style: &ChartPaint,
    x_of: impl Fn(usize) -> f32,
) {
    let stride = (entries.len() as f32 * 30.0 / plot.width()).ceil().max(1.0) as usize;
    for (i, entry) in entries.iter().enumerate() {
        if i % stride != 0 {
            continue;
        }
        let label: String = entry.token.chars().take(6).collect();
        painter.text(
            Pos2::new(x_of(i), plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            label,
            FontId::proportional(LABEL_FONT),
            style.text_color,
        );
    }
}

fn draw_bar(painter: &egui::Painter, rect: Rect, entries: &[TokenCount], style: &ChartPaint) {
    let plot = plot_area(rect);
    let max = max_count(entries);
    draw_value_axis(painter, plot, max, style);

    let slot = plot.width() / entries.len() as f32;
    let bar_w = (slot * 0.7).min(48.0);
    for (i, entry) in entries.iter().enumerate() {
        let cx = plot.left() + slot * (i as f32 + 0.5);
        let h = plot.height() * entry.count as f32 / max;
        painter.rect_filled(
            Rect::from_min_max(
                Pos2::new(cx - bar_w * 0.5, plot.bottom() - h),
                Pos2::new(cx + bar_w * 0.5, plot.bottom()),
            ),
            2.0,
            style.series(i),
        );
    }
    draw_token_labels(painter, plot, entries, style, |i| {
        plot.left() + slot * (i as f32 + 0.5)
    });
}

fn draw_points(
    painter: &egui::Painter,
    rect: Rect,
    entries: &[TokenCount],
    style: &ChartPaint,
    connect: bool,
    fill: bool,
) {
    let plot = plot_area(rect);
    let max = max_count(entries);
    draw_value_axis(painter, plot, max, style);

    let x_of = |i: usize| {
        if entries.len() == 1 {
            plot.center().x
        } else {
            plot.left() + plot.width() * i as f32 / (entries.len() - 1) as f32
        }
    };
    let y_of = |count: usize| plot.bottom() - plot.height() * count as f32 / max;

    let points: Vec<Pos2> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| Pos2::new(x_of(i), y_of(e.count)))
        .collect();

    let accent = style.series(1);

    if fill {
        // One trapezoid per segment keeps every filled shape convex
        let fill_color = accent.gamma_multiply(0.25);
        for pair in points.windows(2) {
            painter.add(Shape::convex_polygon(
                vec![
                    pair[0],
                    pair[1],
                    Pos2::new(pair[1].x, plot.bottom()),
                    Pos2::new(pair[0].x, plot.bottom()),
                ],
                fill_color,
                Stroke::NONE,
            ));
        }
    }
    if connect && points.len() > 1 {
        painter.add(Shape::line(points.clone(), Stroke::new(2.0, accent)));
    }
    for p in &points {
        painter.circle_filled(*p, 3.0, accent);
    }
    draw_token_labels(painter, plot, entries, style, x_of);
}

fn draw_radar(painter: &egui::Painter, rect: Rect, entries: &[TokenCount], style: &ChartPaint) {
    let center = rect.center();
    let radius = rect.height() * 0.5 - 28.0;
    let max = max_count(entries);
    let n = entries.len();

    let angle_of = |i: usize| i as f32 / n as f32 * std::f32::consts::TAU - std::f32::consts::FRAC_PI_2;

    // Grid rings
    for ring in 1..=4 {
        let r = radius * ring as f32 / 4.0;
        let ring_points: Vec<Pos2> = (0..=48)
            .map(|s| {
                let a = s as f32 / 48.0 * std::f32::consts::TAU;
                Pos2::new(center.x + r * a.cos(), center.y + r * a.sin())
            })
            .collect();
        painter.add(Shape::line(ring_points, Stroke::new(0.5, style.grid_color)));
    }

    // Spokes + labels
    for (i, entry) in entries.iter().enumerate() {
        let a = angle_of(i);
        let tip = Pos2::new(center.x + radius * a.cos(), center.y + radius * a.sin());
        painter.line_segment([center, tip], Stroke::new(0.5, style.grid_color));
        let label: String = entry.token.chars().take(6).collect();
        painter.text(
            Pos2::new(
                center.x + (radius + 14.0) * a.cos(),
                center.y + (radius + 14.0) * a.sin(),
            ),
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(LABEL_FONT),
            style.text_color,
        );
    }

    // Value polygon (stroked; radar outlines are not convex in general)
    let mut poly: Vec<Pos2> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let a = angle_of(i);
            let r = radius * e.count as f32 / max;
            Pos2::new(center.x + r * a.cos(), center.y + r * a.sin())
        })
        .collect();
    if let Some(first) = poly.first().copied() {
        poly.push(first);
    }
    let accent = style.series(0);
    painter.add(Shape::line(poly.clone(), Stroke::new(2.0, accent)));
    for p in poly.iter().take(n) {
        painter.circle_filled(*p, 3.0, accent);
    }
}

fn draw_box(painter: &egui::Painter, rect: Rect, entries: &[TokenCount], style: &ChartPaint) {
    let Some(stats) = box_stats(entries) else {
        return;
    };
    let plot = plot_area(rect);
    let max = stats.max.max(1.0);
    draw_value_axis(painter, plot, max, style);

    let y_of = |v: f32| plot.bottom() - plot.height() * v / max;
    let cx = plot.center().x;
    let half_w = (plot.width() * 0.12).min(60.0);
    let accent = style.series(1);

    // Whiskers
    painter.line_segment(
        [Pos2::new(cx, y_of(stats.min)), Pos2::new(cx, y_of(stats.q1))],
        Stroke::new(1.5, accent),
    );
    painter.line_segment(
        [Pos2::new(cx, y_of(stats.q3)), Pos2::new(cx, y_of(stats.max))],
        Stroke::new(1.5, accent),
    );
    for v in [stats.min, stats.max] {
        painter.line_segment(
            [
                Pos2::new(cx - half_w * 0.5, y_of(v)),
                Pos2::new(cx + half_w * 0.5, y_of(v)),
            ],
            Stroke::new(1.5, accent),
        );
    }

    // Interquartile box
    painter.rect(
        Rect::from_min_max(
            Pos2::new(cx - half_w, y_of(stats.q3)),
            Pos2::new(cx + half_w, y_of(stats.q1)),
        ),
        2.0,
        accent.gamma_multiply(0.25),
        Stroke::new(1.5, accent),
    );

    // Median
    painter.line_segment(
        [
            Pos2::new(cx - half_w, y_of(stats.median)),
            Pos2::new(cx + half_w, y_of(stats.median)),
        ],
        Stroke::new(2.0, style.series(0)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tc(token: &str, count: usize) -> TokenCount {
        TokenCount {
            token: token.to_string(),
            count,
        }
    }

    #[test]
    fn empty_ranking_builds_no_chart_for_any_style() {
        for style in ChartStyle::ALL {
            assert!(Chart::build(style, &[]).is_none());
        }
    }

    #[test]
    fn non_empty_ranking_builds_for_every_style() {
        let ranked = [tc("a", 2), tc("b", 1)];
        for style in ChartStyle::ALL {
            let chart = Chart::build(style, &ranked).unwrap();
            assert_eq!(chart.entries.len(), 2);
        }
    }

    #[test]
    fn pie_slices_tile_a_full_turn() {
        let angles = pie_angles(&[tc("a", 3), tc("b", 1)]);
        assert_eq!(angles.len(), 2);
        assert!((angles[0].0 - 0.0).abs() < 1e-6);
        assert!((angles[1].1 - std::f32::consts::TAU).abs() < 1e-4);
        // 3:1 split
        let sweep0 = angles[0].1 - angles[0].0;
        assert!((sweep0 - std::f32::consts::TAU * 0.75).abs() < 1e-4);
    }

    #[test]
    fn box_stats_interpolates_quartiles() {
        let stats =
            box_stats(&[tc("a", 1), tc("b", 2), tc("c", 3), tc("d", 4)]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert!((stats.q1 - 1.75).abs() < 1e-6);
        assert!((stats.median - 2.5).abs() < 1e-6);
        assert!((stats.q3 - 3.25).abs() < 1e-6);
        assert_eq!(stats.max, 4.0);
    }

    #[test]
    fn box_stats_single_entry() {
        let stats = box_stats(&[tc("only", 7)]).unwrap();
        assert_eq!(stats.min, 7.0);
        assert_eq!(stats.median, 7.0);
        assert_eq!(stats.max, 7.0);
    }

    #[test]
    fn box_stats_empty_is_none() {
        assert!(box_stats(&[]).is_none());
    }
}
