//! Script list view

use ratatui::{
    prelude::*,
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::cli::tui::app::{InputMode, Picker};
use crate::cli::tui::item::{PickerItem, ScriptRow};

/// Screen lines used by each list item (title + description)
pub const ROWS_PER_ITEM: u16 = 2;

const MARGIN_V: u16 = 1;
const MARGIN_H: u16 = 2;
const HEADER_HEIGHT: u16 = 2;
const FOOTER_HEIGHT: u16 = 2;

/// Lines taken by everything except the list itself
pub const CHROME_HEIGHT: u16 = MARGIN_V * 2 + HEADER_HEIGHT + FOOTER_HEIGHT;

const TITLE: &str = "Select a script to run";

/// Height left for list items in a terminal of the given size
pub fn list_height(width: u16, height: u16) -> u16 {
    if width <= MARGIN_H * 2 {
        return 0;
    }
    height.saturating_sub(CHROME_HEIGHT)
}

/// Draw the picker
pub fn draw(frame: &mut Frame, picker: &Picker) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .vertical_margin(MARGIN_V)
        .horizontal_margin(MARGIN_H)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    draw_header(frame, picker, chunks[0]);
    draw_list(frame, picker, chunks[1]);
    draw_footer(frame, picker, chunks[2]);
}

fn draw_header(frame: &mut Frame, picker: &Picker, area: Rect) {
    let title = Line::from(Span::styled(
        format!(" {} ", TITLE),
        Style::default()
            .fg(Color::White)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    ));

    let second = if picker.mode() == InputMode::Filter || !picker.query().is_empty() {
        let cursor = if picker.mode() == InputMode::Filter { "_" } else { "" };
        Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::Magenta)),
            Span::raw(format!("{}{}", picker.query(), cursor)),
        ])
    } else {
        let noun = if picker.total_len() == 1 { "script" } else { "scripts" };
        Line::from(Span::styled(
            format!("{} {}", picker.total_len(), noun),
            Style::default().fg(Color::DarkGray),
        ))
    };

    frame.render_widget(Paragraph::new(vec![title, second]), area);
}

fn draw_list(frame: &mut Frame, picker: &Picker, area: Rect) {
    if picker.visible_len() == 0 {
        let message = if picker.total_len() == 0 {
            "No scripts in package.json"
        } else {
            "No matches"
        };
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    // Room for the highlight symbol
    let text_width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = picker
        .visible_rows()
        .map(|row| row_item(row, text_width))
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().fg(Color::Magenta))
        .highlight_symbol("│ ");

    let mut state = ListState::default();
    state.select(Some(picker.selected_index()));

    frame.render_stateful_widget(list, area, &mut state);
}

fn row_item(row: &ScriptRow, width: usize) -> ListItem<'static> {
    let description_style = if row.is_suggestion() {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    ListItem::new(vec![
        Line::from(Span::styled(
            fit(row.title(), width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(fit(row.description(), width), description_style)),
    ])
}

fn draw_footer(frame: &mut Frame, picker: &Picker, area: Rect) {
    let position = if picker.visible_len() == 0 {
        "0/0".to_string()
    } else {
        format!("{}/{}", picker.selected_index() + 1, picker.visible_len())
    };

    let help = match picker.mode() {
        InputMode::Browse => "↑/k up • ↓/j down • / filter • enter run • q quit",
        InputMode::Filter => "↑/↓ move • enter run • esc clear filter • q/ctrl+c quit",
    };

    let lines = vec![
        Line::from(Span::styled(position, Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Shorten `s` to `width` characters, ending in an ellipsis when cut
fn fit(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('…');
    out
}
