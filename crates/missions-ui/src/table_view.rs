//! Table renderers for hierarchy, per-country and record-browser payloads.
//!
//! Each renders a [`ratatui::widgets::Table`] with a styled header row and
//! alternating row styles, starting `scroll` rows into the data.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use missions_core::formatting::{format_money, format_number};
use missions_core::models::LaunchRecord;
use missions_data::sections::{GeoRow, HierarchyRow};

use crate::themes::Theme;

/// Placeholder cell for countries that have no ISO code.
pub const UNMAPPED: &str = "— unmappable";

/// Index range of the rows visible in a table `height` rows tall (one row
/// taken by the header).
pub fn visible_range(len: usize, scroll: usize, height: u16) -> std::ops::Range<usize> {
    let capacity = (height as usize).saturating_sub(1);
    let start = scroll.min(len.saturating_sub(1));
    start..(start + capacity).min(len)
}

fn header_row<'a>(titles: &[&'a str], theme: &Theme) -> Row<'a> {
    Row::new(
        titles
            .iter()
            .map(|t| Cell::from(*t).style(theme.table_header))
            .collect::<Vec<_>>(),
    )
    .height(1)
}

/// Country → company → outcome counts, one row per leaf.
pub fn render_hierarchy(
    frame: &mut Frame,
    area: Rect,
    levels: &[String],
    rows: &[HierarchyRow],
    scroll: usize,
    theme: &Theme,
) {
    let mut titles: Vec<&str> = levels.iter().map(String::as_str).collect();
    titles.push("Launches");

    let range = visible_range(rows.len(), scroll, area.height);
    let data_rows: Vec<Row> = rows[range.clone()]
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells: Vec<Cell> = row.path.iter().map(|p| Cell::from(p.clone())).collect();
            if let Some(last) = row.path.last() {
                cells.pop();
                cells.push(Cell::from(last.clone()).style(theme.status_style(last)));
            }
            cells.push(Cell::from(format_number(row.count as f64, 0)));
            Row::new(cells).style(theme.row_style(range.start + i))
        })
        .collect();

    let mut widths: Vec<Constraint> = levels.iter().map(|_| Constraint::Fill(1)).collect();
    widths.push(Constraint::Length(10));

    let table = Table::new(data_rows, widths)
        .header(header_row(&titles, theme))
        .style(theme.text);
    frame.render_widget(table, area);
}

/// Launches per country with the map code; blank codes are flagged.
pub fn render_geo(frame: &mut Frame, area: Rect, rows: &[GeoRow], scroll: usize, theme: &Theme) {
    let range = visible_range(rows.len(), scroll, area.height);
    let data_rows: Vec<Row> = rows[range.clone()]
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let code = match &row.code {
                Some(code) => Cell::from(code.clone()),
                None => Cell::from(UNMAPPED).style(theme.warning),
            };
            Row::new(vec![
                Cell::from(row.country.clone()),
                code,
                Cell::from(format_number(row.count as f64, 0)),
            ])
            .style(theme.row_style(range.start + i))
        })
        .collect();

    let widths = [
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Length(10),
    ];
    let table = Table::new(data_rows, widths)
        .header(header_row(&["Country", "Code", "Count"], theme))
        .style(theme.text);
    frame.render_widget(table, area);
}

/// The canonical table, one launch per row.
pub fn render_records(
    frame: &mut Frame,
    area: Rect,
    rows: &[LaunchRecord],
    scroll: usize,
    theme: &Theme,
) {
    let range = visible_range(rows.len(), scroll, area.height.saturating_sub(1));
    let data_rows: Vec<Row> = rows[range.clone()]
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let status = r.mission_status.label().to_string();
            Row::new(vec![
                Cell::from(r.launched_at.format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(r.company.clone()),
                Cell::from(r.country.clone()),
                Cell::from(r.country_code.clone().unwrap_or_default()),
                Cell::from(r.detail.clone()),
                Cell::from(r.rocket_status.label().to_string()),
                Cell::from(if r.cost > 0.0 {
                    format_money(r.cost)
                } else {
                    String::new()
                }),
                Cell::from(status.clone()).style(theme.status_style(&status)),
            ])
            .style(theme.row_style(range.start + i))
        })
        .collect();

    let widths = [
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(18),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(13),
        Constraint::Length(14),
        Constraint::Length(17),
    ];
    let table = Table::new(data_rows, widths)
        .header(header_row(
            &[
                "Date", "Company", "Country", "Code", "Detail", "Rocket", "Cost", "Mission",
            ],
            theme,
        ))
        .style(theme.text);

    let position = if rows.is_empty() {
        "0 of 0".to_string()
    } else {
        format!(
            "{}–{} of {}",
            range.start + 1,
            range.end,
            format_number(rows.len() as f64, 0)
        )
    };

    let table_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let footer_area = Rect {
        y: area.y + table_area.height,
        height: area.height.min(1),
        ..area
    };
    frame.render_widget(table, table_area);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("rows ", theme.dim),
            Span::styled(position, theme.label),
            Span::styled("  PgUp/PgDn to scroll", theme.dim),
        ])),
        footer_area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use missions_core::models::{MissionStatus, RocketStatus};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn record(i: u32) -> LaunchRecord {
        LaunchRecord {
            company: "SpaceX".to_string(),
            location: "LC-39A, Kennedy Space Center, Florida, USA".to_string(),
            launched_at: NaiveDate::from_ymd_opt(2020, 8, 1 + i % 28)
                .unwrap()
                .and_hms_opt(5, 12, 0)
                .unwrap(),
            detail: format!("Falcon 9 Block 5 | Starlink V1 L{i}"),
            rocket_status: RocketStatus::Active,
            cost: 50_000_000.0,
            mission_status: MissionStatus::Success,
            year: 2020,
            month: 8,
            weekday: 4,
            country: "USA".to_string(),
            country_code: Some("USA".to_string()),
        }
    }

    fn screen(render: impl FnOnce(&mut Frame)) -> String {
        let backend = TestBackend::new(140, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(render).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_visible_range() {
        assert_eq!(visible_range(100, 0, 11), 0..10);
        assert_eq!(visible_range(100, 95, 11), 95..100);
        assert_eq!(visible_range(100, 500, 11), 99..100);
        assert_eq!(visible_range(0, 3, 11), 0..0);
        assert_eq!(visible_range(5, 0, 0), 0..0);
    }

    #[test]
    fn test_render_records_scrolled() {
        let rows: Vec<LaunchRecord> = (0..50).map(record).collect();
        let theme = Theme::dark();
        let out = screen(|f| render_records(f, f.area(), &rows, 10, &theme));
        assert!(out.contains("Starlink V1 L10"));
        assert!(!out.contains("Starlink V1 L9 "));
        assert!(out.contains("11–28 of 50"), "footer missing");
    }

    #[test]
    fn test_render_records_empty() {
        let theme = Theme::dark();
        let out = screen(|f| render_records(f, f.area(), &[], 0, &theme));
        assert!(out.contains("0 of 0"));
    }

    #[test]
    fn test_render_geo_flags_unmappable() {
        let rows = vec![
            GeoRow {
                country: "USA".to_string(),
                code: Some("USA".to_string()),
                count: 1344,
            },
            GeoRow {
                country: "Iran".to_string(),
                code: None,
                count: 14,
            },
        ];
        let theme = Theme::dark();
        let out = screen(|f| render_geo(f, f.area(), &rows, 0, &theme));
        assert!(out.contains("1,344"));
        assert!(out.contains("unmappable"));
    }

    #[test]
    fn test_render_hierarchy_does_not_panic() {
        let rows = vec![HierarchyRow {
            path: vec![
                "China".to_string(),
                "CASC".to_string(),
                "Success".to_string(),
            ],
            count: 231,
        }];
        let levels = vec![
            "Country".to_string(),
            "Company".to_string(),
            "Mission Status".to_string(),
        ];
        let theme = Theme::light();
        let out = screen(|f| render_hierarchy(f, f.area(), &levels, &rows, 0, &theme));
        assert!(out.contains("CASC"));
    }
}
