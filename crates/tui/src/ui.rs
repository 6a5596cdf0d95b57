//! Grid rendering.
//!
//! Sticky header row, row-number gutter, span-merged cells drawn once at
//! their owner row, and selection/fill highlighting taken straight from the
//! committed selection state.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use spangrid_core::coordinate::{col_to_letters, Coordinate};
use spangrid_core::shape::GridShape;
use spangrid_core::state::InteractionMode;

use crate::app::{GridApp, CELL_WIDTH, GUTTER_WIDTH};

pub fn draw(app: &GridApp, frame: &mut Frame) {
    let area = frame.area();
    let header_hidden = app.shape.column_header_hidden();

    let chunks = if header_hidden {
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area)
    } else {
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area)
    };

    draw_title(app, frame, chunks[0]);
    if header_hidden {
        draw_grid(app, frame, chunks[1]);
        draw_status(app, frame, chunks[2]);
    } else {
        draw_header(app, frame, chunks[1]);
        draw_grid(app, frame, chunks[2]);
        draw_status(app, frame, chunks[3]);
    }
}

fn draw_title(app: &GridApp, frame: &mut Frame, area: Rect) {
    let model = app.shape.0.borrow();
    let title = format!(
        " spangrid | {} rows x {} cols | mode: {:?} ",
        model.rows, model.cols, app.state.mode
    );
    let para = Paragraph::new(Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(Color::Cyan));
    frame.render_widget(para, area);
}

fn draw_header(app: &GridApp, frame: &mut Frame, area: Rect) {
    let visible_cols = visible_col_count(area.width);
    let mut spans = vec![Span::styled(
        " ".repeat(GUTTER_WIDTH as usize),
        Style::default().fg(Color::DarkGray),
    )];

    for i in 0..visible_cols {
        let col = app.scroll_col + i;
        if col > app.shape.max_col() {
            break;
        }
        let header_coord = Coordinate::header(col);
        let selected = app.state.is_selected(header_coord);
        let is_primary = app.state.primary == header_coord;

        let style = if is_primary {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else if selected || col == app.state.primary.col {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if !app.shape.is_column_selectable(col) {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        };
        spans.push(Span::styled(pad_cell(&col_to_letters(col)), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_grid(app: &GridApp, frame: &mut Frame, area: Rect) {
    let model = app.shape.0.borrow();
    let visible_cols = visible_col_count(area.width);
    let visible_rows = area.height as i32;

    let active = app.state.active_region().copied();
    let mut lines: Vec<Line> = Vec::with_capacity(visible_rows as usize);

    for i in 0..visible_rows {
        let row = app.scroll_row + i;
        if row > app.shape.max_row() {
            break;
        }

        let row_selected = app
            .state
            .selections
            .iter()
            .any(|r| r.row_range().contains(row));
        let gutter_style = if row_selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![Span::styled(
            format!("{:>width$} ", row + 1, width = GUTTER_WIDTH as usize - 1),
            gutter_style,
        )];

        for j in 0..visible_cols {
            let col = app.scroll_col + j;
            if col > app.shape.max_col() {
                break;
            }
            let coord = Coordinate::cell(row, col);
            let owner_row = model.owner_row(row, col);

            // Span-merged cells render their value once, on the owner row.
            let mut text = if owner_row == row {
                model.value(row, col)
            } else {
                String::new()
            };
            if app.state.mode == InteractionMode::Edit && app.state.primary == coord {
                if let Some(buffer) = &app.edit_buffer {
                    text = format!("{buffer}_");
                }
            }

            let in_selection = app.state.is_selected(coord);
            let in_fill = app
                .state
                .fill
                .map(|f| f.contains(coord))
                .unwrap_or(false);
            let is_primary = app.state.primary == coord
                || (app.state.primary.row == owner_row && app.state.primary.col == col);

            let style = if app.state.mode == InteractionMode::Edit && is_primary {
                Style::default()
                    .fg(Color::Yellow)
                    .bg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else if is_primary {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else if in_fill {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else if in_selection {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else if !app.shape.is_column_selectable(col) {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut display = pad_cell(&text);
            // Fill handle marker on the active region's corner cell.
            if let Some(region) = active {
                if row == region.row_range().end && col == region.col_range().end {
                    display.pop();
                    display.push('◆');
                }
            }
            spans.push(Span::styled(display, style));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_status(app: &GridApp, frame: &mut Frame, area: Rect) {
    let left = if app.state.mode == InteractionMode::Edit {
        format!(
            " {} editing: {}",
            app.state.primary,
            app.edit_buffer.as_deref().unwrap_or("")
        )
    } else if app.state.selections.is_empty() {
        " no selection (click or press a key)".to_string()
    } else {
        let region_info = app
            .state
            .active_region()
            .map(|r| {
                format!(
                    " [{}..{} x {}..{}]",
                    r.row_range().start + 1,
                    r.row_range().end + 1,
                    col_to_letters(r.col_range().start),
                    col_to_letters(r.col_range().end)
                )
            })
            .unwrap_or_default();
        format!(
            " {}{} | {} region(s)",
            app.state.primary,
            region_info,
            app.state.selections.len()
        )
    };
    let right = "F2: edit  esc: cancel  ctrl+q: quit ";

    let padding = (area.width as usize).saturating_sub(left.chars().count() + right.len());
    let status = format!("{}{:pad$}{}", left, "", right, pad = padding);

    let para = Paragraph::new(Line::from(Span::styled(
        status,
        Style::default().fg(Color::Black).bg(Color::DarkGray),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}

fn visible_col_count(width: u16) -> i32 {
    (width.saturating_sub(GUTTER_WIDTH) / CELL_WIDTH) as i32
}

fn pad_cell(text: &str) -> String {
    let width = CELL_WIDTH as usize - 1;
    let mut out: String = text.chars().take(width).collect();
    while out.chars().count() < width {
        out.push(' ');
    }
    out.push(' ');
    out
}
