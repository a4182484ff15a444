//! Form widgets shared by the login and signup pages.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};

use super::text::{mask, tail_to_width};

/// Height of a bordered single-line input.
pub const INPUT_HEIGHT: u16 = 3;

const CURSOR: &str = "▏";

pub fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn error_style() -> Style {
    Style::default().fg(Color::Red)
}

fn bordered(title: &str, focused: bool, error: Option<&str>) -> Block<'static> {
    let mut block = Block::bordered()
        .title(format!(" {title} "))
        .border_style(focus_style(focused));
    if let Some(error) = error {
        block = block.title_bottom(Line::styled(format!(" {error} "), error_style()));
    }
    block
}

/// Single-line text input. Masked inputs show one bullet per character.
pub fn text_input(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    masked: bool,
    error: Option<&str>,
) {
    let block = bordered(label, focused, error);
    let width = usize::from(block.inner(area).width.saturating_sub(1));
    let shown = if masked { mask(value) } else { value.to_string() };

    let mut spans = vec![Span::raw(tail_to_width(&shown, width))];
    if focused {
        spans.push(Span::styled(CURSOR, Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Bordered list of checkboxes. `cursor` is highlighted when the list has
/// focus.
pub fn checklist(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &[(&str, bool)],
    cursor: Option<usize>,
    error: Option<&str>,
) {
    let focused = cursor.is_some();
    let rows: Vec<ListItem> = items
        .iter()
        .map(|(label, checked)| {
            let mark = if *checked { "[x] " } else { "[ ] " };
            ListItem::new(Line::from(vec![Span::raw(mark), Span::raw(label.to_string())]))
        })
        .collect();

    let list = List::new(rows)
        .block(bordered(title, focused, error))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(cursor);
    frame.render_stateful_widget(list, area, &mut state);
}

/// One-line button. Disabled buttons render dimmed.
pub fn button(frame: &mut Frame, area: Rect, label: &str, focused: bool, enabled: bool) {
    let mut style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    if !enabled {
        style = Style::default().fg(Color::DarkGray);
    }
    let text = Line::styled(format!("[ {label} ]"), style);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

/// Centered line of text in `style`.
pub fn message(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    frame.render_widget(
        Paragraph::new(Line::styled(text.to_string(), style)).alignment(Alignment::Center),
        area,
    );
}
