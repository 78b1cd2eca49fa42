use crate::model::ElementKind;
use crate::ui::app::{App, FocusPanel, CATEGORIES};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table,
    },
    Frame,
};

// Brandbook colors
const BRAND_DARK: Color = Color::Rgb(0x1F, 0x2F, 0x3C); // #1f2f3c
const BRAND_SELECT_BG: Color = Color::Rgb(0xC3, 0xD3, 0xE0); // #c3d3e0
const BRAND_GREEN: Color = Color::Rgb(0x82, 0x9A, 0x68); // #829a68 count
const BRAND_ORANGE: Color = Color::Rgb(0x9E, 0x68, 0x3C); // #9e683c focus
const BRAND_MUTED: Color = Color::Rgb(0x71, 0x65, 0x65); // #716565 footer

// Styles
const HEADER_STYLE: Style = Style::new().fg(BRAND_DARK).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new()
    .bg(BRAND_SELECT_BG)
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD);
const COUNT_COLOR: Color = BRAND_GREEN;

pub fn draw_dashboard(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Main content
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_main_content(frame, chunks[1], app);
    draw_footer(
        frame,
        chunks[2],
        " ←→ Panel | ↑↓ Select | Enter Details | q Quit ",
    );
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let summary = &app.report.summary;
    let skipped = summary.skipped_elements + summary.skipped_hits + summary.failed_openings;
    let skipped_note = if skipped > 0 {
        format!("| {skipped} skipped ")
    } else {
        String::new()
    };
    let title = format!(
        " Hole Placer | {} ← {} | {} openings ({} ducts, {} pipes) {skipped_note}",
        app.report.host,
        app.report.companion,
        summary.total_openings(),
        summary.duct_openings,
        summary.pipe_openings,
    );

    let header = Paragraph::new(title)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_main_content(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::horizontal([
        Constraint::Percentage(20), // Levels
        Constraint::Percentage(15), // Categories
        Constraint::Percentage(65), // Openings
    ])
    .split(area);

    draw_levels(frame, chunks[0], app);
    draw_categories(frame, chunks[1], app);
    draw_openings(frame, chunks[2], app);
}

fn item_style(is_selected: bool, is_focused: bool) -> Style {
    if is_selected && is_focused {
        SELECTED_STYLE
    } else if is_selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn focus_marker(is_selected: bool, is_focused: bool) -> &'static str {
    if is_selected && is_focused {
        " ◄"
    } else {
        ""
    }
}

fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(BRAND_ORANGE)
    } else {
        Style::default()
    }
}

fn draw_levels(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus_panel == FocusPanel::Levels;

    let mut items: Vec<ListItem> = Vec::new();

    // "All" option (index 0)
    let all_selected = app.selected_level == 0;
    items.push(ListItem::new(Line::from(vec![
        Span::styled("All", item_style(all_selected, is_focused)),
        Span::styled(
            focus_marker(all_selected, is_focused),
            Style::default().fg(BRAND_ORANGE),
        ),
    ])));

    for (i, level) in app.levels.iter().enumerate() {
        let is_selected = (i + 1) == app.selected_level;

        let elev_str = if level.elevation >= 0.0 {
            format!("+{:.2}", level.elevation)
        } else {
            format!("{:.2}", level.elevation)
        };

        items.push(ListItem::new(Line::from(vec![
            Span::styled(&level.name, item_style(is_selected, is_focused)),
            Span::styled(format!(" {elev_str}"), Style::default().fg(BRAND_MUTED)),
            Span::styled(
                format!(" ({})", app.get_level_count(level.id)),
                Style::default().fg(COUNT_COLOR),
            ),
            Span::styled(
                focus_marker(is_selected, is_focused),
                Style::default().fg(BRAND_ORANGE),
            ),
        ])));
    }

    let title = format!(" Levels ({}) ", app.levels.len() + 1); // +1 for "All"
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style(is_focused)),
    );

    frame.render_widget(list, area);
}

fn draw_categories(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus_panel == FocusPanel::Categories;

    let items: Vec<ListItem> = CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let is_selected = i == app.selected_category;
            let count = app.get_filtered_category_count(*kind);

            ListItem::new(Line::from(vec![
                Span::styled(kind.plural(), item_style(is_selected, is_focused)),
                Span::raw(" "),
                Span::styled(format!("({count})"), Style::default().fg(COUNT_COLOR)),
                Span::styled(
                    focus_marker(is_selected, is_focused),
                    Style::default().fg(BRAND_ORANGE),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Categories ")
            .borders(Borders::ALL)
            .border_style(border_style(is_focused)),
    );

    frame.render_widget(list, area);
}

fn draw_openings(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus_panel == FocusPanel::Openings;
    let openings = app.get_filtered_openings();

    // Subtract 3 for borders and header
    let visible_rows = (area.height as usize).saturating_sub(3);
    let scroll_offset = if app.selected_opening >= visible_rows {
        app.selected_opening - visible_rows + 1
    } else {
        0
    };

    let header = Row::new(vec!["Element", "Wall", "Level", "Point", "Size"])
        .style(HEADER_STYLE)
        .height(1);

    let rows: Vec<Row> = openings
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_rows)
        .map(|(i, r)| {
            let style = item_style(i == app.selected_opening, is_focused);
            let wall = match r.link_id {
                Some(link) => format!("#{} @{link}", r.wall_id),
                None => format!("#{}", r.wall_id),
            };

            Row::new(vec![
                format!("#{}", r.element_id),
                wall,
                r.level_name.clone(),
                format!("({:.2}, {:.2}, {:.2})", r.x, r.y, r.z),
                format!("{:.3} × {:.3}", r.width, r.height),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Percentage(14),
        Constraint::Percentage(16),
        Constraint::Percentage(18),
        Constraint::Percentage(32),
        Constraint::Percentage(20),
    ];

    let title = format!(
        " {} on {} ({}) ",
        app.selected_kind().plural(),
        app.get_selected_level_name(),
        openings.len()
    );
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style(is_focused)),
    );

    frame.render_widget(table, area);

    if openings.len() > visible_rows {
        draw_scrollbar(frame, area, openings.len(), app.selected_opening);
    }
}

fn draw_scrollbar(frame: &mut Frame, area: Rect, len: usize, position: usize) {
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"));
    let mut scrollbar_state = ScrollbarState::new(len).position(position);

    let scrollbar_area = Rect {
        x: area.x + area.width - 1,
        y: area.y + 2,
        width: 1,
        height: area.height.saturating_sub(3),
    };
    frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
}

fn draw_footer(frame: &mut Frame, area: Rect, help: &str) {
    let footer = Paragraph::new(help)
        .style(Style::default().fg(BRAND_MUTED))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

pub fn draw_opening_detail(frame: &mut Frame, app: &App) {
    let record = match app.get_selected_opening() {
        Some(r) => r,
        None => return,
    };
    let count = app.get_filtered_openings().len();

    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Length(3), // Info
        Constraint::Min(6),    // Properties
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    let kind_label = match record.kind {
        ElementKind::Duct => "duct",
        ElementKind::Pipe => "pipe",
    };
    let header = Paragraph::new(format!(
        " Opening for {kind_label} #{} ",
        record.element_id
    ))
    .style(HEADER_STYLE)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let info_text = format!(
        "Level filter: {}  |  Opening: {}/{}  |  View: {}",
        app.get_selected_level_name(),
        app.selected_opening + 1,
        count,
        app.report.view
    );
    let info_widget = Paragraph::new(info_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(info_widget, chunks[1]);

    let rows: Vec<Row> = app
        .get_opening_properties()
        .into_iter()
        .map(|(name, value)| Row::new(vec![name, value]))
        .collect();

    let prop_widths = [Constraint::Percentage(40), Constraint::Percentage(60)];
    let prop_header = Row::new(vec!["Property", "Value"]).style(HEADER_STYLE);
    let prop_table = Table::new(rows, prop_widths)
        .header(prop_header)
        .block(Block::default().title(" Placement ").borders(Borders::ALL));
    frame.render_widget(prop_table, chunks[2]);

    draw_footer(
        frame,
        chunks[3],
        " Esc Back | ←→ Opening | q Quit ",
    );
}
