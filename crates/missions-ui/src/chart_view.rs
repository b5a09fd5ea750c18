//! Chart rendering for section reports.
//!
//! [`render_chart`] draws one [`Chart`] into an area: a caption line on top
//! and the payload below, dispatched on its [`ChartData`] variant. Table-like
//! payloads are delegated to [`crate::table_view`].

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span, Text},
    widgets::{
        Axis, Bar as BarWidget, BarChart, BarGroup, Block, Borders, Chart as LineChart, Dataset,
        GraphType, Paragraph, Wrap,
    },
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use missions_core::formatting::format_number;
use missions_data::sections::{Bar, Chart, ChartData, Line as SeriesLine, Link, Share};

use crate::table_view;
use crate::themes::Theme;

/// Widest bar label before truncation.
pub const MAX_LABEL_WIDTH: usize = 24;

/// Render `chart` into `area`, skipping the first `scroll` rows or bars.
pub fn render_chart(frame: &mut Frame, area: Rect, chart: &Chart, scroll: usize, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(Span::styled(format!(" {} ", chart.title), theme.header));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let caption_height = if chart.caption.is_empty() { 0 } else { 2 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(caption_height), Constraint::Min(1)])
        .split(inner);

    if caption_height > 0 {
        frame.render_widget(
            Paragraph::new(Span::styled(chart.caption.as_str(), theme.caption))
                .wrap(Wrap { trim: true }),
            chunks[0],
        );
    }

    let body = chunks[1];
    if chart.is_empty() {
        render_empty(frame, body, theme);
        return;
    }

    match &chart.data {
        ChartData::Bars { bars } => render_bars(frame, body, bars, scroll, theme),
        ChartData::Shares { shares } => render_shares(frame, body, shares, scroll, theme),
        ChartData::Series {
            x_label,
            y_label,
            lines,
        } => render_series(frame, body, x_label, y_label, lines, theme),
        ChartData::Hierarchy { levels, rows } => {
            table_view::render_hierarchy(frame, body, levels, rows, scroll, theme)
        }
        ChartData::Geo { rows } => table_view::render_geo(frame, body, rows, scroll, theme),
        ChartData::Text { paragraphs, links } => {
            render_text(frame, body, paragraphs, links, scroll, theme)
        }
        ChartData::Records { rows } => table_view::render_records(frame, body, rows, scroll, theme),
    }
}

/// Placeholder for a chart with no data points.
pub fn render_empty(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No data for this view", theme.warning)),
        Line::from(Span::styled(
            "The loaded table has no launches matching its filters.",
            theme.dim,
        )),
    ];
    frame.render_widget(Paragraph::new(Text::from(text)), area);
}

// ── Bars ──────────────────────────────────────────────────────────────────────

/// Cut `label` to at most `max` terminal columns, marking the cut with `…`.
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.width() <= max {
        return label.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in label.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

/// Scale a non-negative value into the integer domain `BarChart` draws.
fn bar_units(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        (value * 100.0).round() as u64
    } else {
        0
    }
}

fn horizontal_bars(
    frame: &mut Frame,
    area: Rect,
    items: Vec<(String, f64, String)>,
    scroll: usize,
    theme: &Theme,
) {
    let capacity = area.height as usize;
    let start = scroll.min(items.len().saturating_sub(1));
    let bars: Vec<BarWidget> = items
        .into_iter()
        .skip(start)
        .take(capacity)
        .map(|(label, value, display)| {
            BarWidget::default()
                .value(bar_units(value))
                .text_value(display)
                .label(Line::from(truncate_label(&label, MAX_LABEL_WIDTH)))
        })
        .collect();

    let chart = BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(theme.bar)
        .value_style(theme.bar_value)
        .label_style(theme.label)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn render_bars(frame: &mut Frame, area: Rect, bars: &[Bar], scroll: usize, theme: &Theme) {
    let items = bars
        .iter()
        .map(|b| (b.label.clone(), b.value, b.display.clone()))
        .collect();
    horizontal_bars(frame, area, items, scroll, theme);
}

fn render_shares(frame: &mut Frame, area: Rect, shares: &[Share], scroll: usize, theme: &Theme) {
    let items = shares
        .iter()
        .map(|s| {
            (
                s.label.clone(),
                s.percent,
                format!("{:.1}% ({})", s.percent, format_number(s.count as f64, 0)),
            )
        })
        .collect();
    horizontal_bars(frame, area, items, scroll, theme);
}

// ── Series ────────────────────────────────────────────────────────────────────

/// `[min, max]` over every point's coordinate, widened when degenerate.
fn bounds(lines: &[SeriesLine], pick: fn(&(f64, f64)) -> f64) -> [f64; 2] {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in lines.iter().flat_map(|l| l.points.iter()) {
        min = min.min(pick(p));
        max = max.max(pick(p));
    }
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if (max - min).abs() < f64::EPSILON {
        return [min - 1.0, max + 1.0];
    }
    [min, max]
}

fn axis_labels(b: [f64; 2], decimals: u32, style: Style) -> Vec<Span<'static>> {
    let mid = (b[0] + b[1]) / 2.0;
    [b[0], mid, b[1]]
        .into_iter()
        .map(|v| Span::styled(format_number(v, decimals), style))
        .collect()
}

fn render_series(
    frame: &mut Frame,
    area: Rect,
    x_label: &str,
    y_label: &str,
    lines: &[SeriesLine],
    theme: &Theme,
) {
    let x = bounds(lines, |p| p.0);
    let mut y = bounds(lines, |p| p.1);
    y[0] = y[0].min(0.0);

    let datasets: Vec<Dataset> = lines
        .iter()
        .enumerate()
        .map(|(i, l)| {
            Dataset::default()
                .name(l.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme.series_color(i)))
                .data(&l.points)
        })
        .collect();

    let chart = LineChart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled(x_label.to_string(), theme.axis))
                .style(theme.axis)
                .bounds(x)
                .labels(axis_labels(x, 0, theme.label)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(y_label.to_string(), theme.axis))
                .style(theme.axis)
                .bounds(y)
                .labels(axis_labels(y, 0, theme.label)),
        );
    frame.render_widget(chart, area);
}

// ── Text ──────────────────────────────────────────────────────────────────────

fn render_text(
    frame: &mut Frame,
    area: Rect,
    paragraphs: &[String],
    links: &[Link],
    scroll: usize,
    theme: &Theme,
) {
    let mut lines: Vec<Line> = Vec::new();
    for p in paragraphs {
        lines.push(Line::from(Span::styled(p.as_str(), theme.text)));
        lines.push(Line::from(""));
    }
    for link in links {
        lines.push(Line::from(vec![
            Span::styled(" • ", theme.dim),
            Span::styled(link.label.as_str(), theme.bold),
        ]));
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(link.url.as_str(), theme.link),
        ]));
    }
    let offset = u16::try_from(scroll).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .scroll((offset, 0)),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
