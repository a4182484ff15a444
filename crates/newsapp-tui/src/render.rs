//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use newsapp_core::routes::{APP_TITLE, DASHBOARD_WELCOME, NavAction, Route};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::common::text::tail_to_width;
use crate::features::login::render_login_page;
use crate::features::signup::render_signup_page;
use crate::state::AppState;

/// Spinner frames shown while a request is in flight.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

const NAVBAR_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;

/// Widest the page card grows.
const CARD_MAX_WIDTH: u16 = 72;
const LOGIN_CARD_HEIGHT: u16 = 12;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let [navbar_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(NAVBAR_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(frame.area());

    render_navbar(app, frame, navbar_area);

    let page = app.page();
    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
    match page {
        Route::Login => {
            let area = card(body_area, LOGIN_CARD_HEIGHT);
            render_login_page(frame, area, &app.login, spinner);
        }
        Route::Signup => {
            let area = card(body_area, body_area.height);
            render_signup_page(frame, area, &app.signup, spinner);
        }
        Route::Dashboard => render_dashboard(frame, body_area),
    }

    render_footer(app, page, frame, footer_area);
}

/// Horizontally centered card of at most `height` rows, one row below the
/// navbar.
fn card(area: Rect, height: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Max(CARD_MAX_WIDTH)])
        .flex(Flex::Center)
        .areas(area);
    let [_, card] = Layout::vertical([Constraint::Length(1), Constraint::Max(height)])
        .areas(column);
    card
}

fn render_navbar(app: &AppState, frame: &mut Frame, area: Rect) {
    let block = Block::bordered().border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let action = NavAction::for_session(&app.session);
    let action_text = format!("{}  ^N", action.label());
    let action_width = u16::try_from(action_text.chars().count()).unwrap_or(u16::MAX);

    let [title_area, action_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(action_width)]).areas(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        APP_TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, title_area);

    let action_line = Paragraph::new(Line::from(vec![
        Span::styled(action.label(), Style::default().fg(Color::Yellow)),
        Span::styled("  ^N", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(action_line, action_area);
}

fn render_dashboard(frame: &mut Frame, area: Rect) {
    let [_, line] = Layout::vertical([Constraint::Length(2), Constraint::Length(1)]).areas(area);
    frame.render_widget(
        Paragraph::new(DASHBOARD_WELCOME)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD)),
        line,
    );
}

fn key_hints(page: Route) -> &'static str {
    match page {
        Route::Login => "Tab: next field · Enter: login · ^N: sign up · ^C: quit",
        Route::Signup => {
            "Tab: next · ↑↓: move · Space: toggle · Enter: add/submit · Esc: back · ^C: quit"
        }
        Route::Dashboard => "^N: logout · ^C: quit",
    }
}

fn render_footer(app: &AppState, page: Route, frame: &mut Frame, area: Rect) {
    let width = usize::from(area.width);
    let line = match &app.status {
        Some(status) => Line::styled(
            tail_to_width(status, width),
            Style::default().fg(Color::Red),
        ),
        None => Line::styled(
            tail_to_width(&format!("{}  {}", key_hints(page), app.api_base_url), width),
            Style::default().fg(Color::DarkGray),
        ),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use newsapp_core::session::{SessionContext, SessionToken};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_login_page_shows_sign_up_action() {
        let app = AppState::new(SessionContext::in_memory(), "http://localhost:3007");
        let screen = draw(&app);
        assert!(screen.contains("NewsApp"));
        assert!(screen.contains("Sign Up"));
        assert!(screen.contains("Login"));
    }

    #[test]
    fn test_password_is_masked() {
        let mut app = AppState::new(SessionContext::in_memory(), "http://localhost:3007");
        app.login.form.set_field(
            newsapp_core::forms::LoginFieldValue::Password("hunter22".to_string()),
        );
        let screen = draw(&app);
        assert!(!screen.contains("hunter22"));
        assert!(screen.contains("••••••••"));
    }

    #[test]
    fn test_dashboard_with_session() {
        let session = SessionContext::in_memory();
        session.set_token(Some(SessionToken::new("tok"))).unwrap();
        let mut app = AppState::new(session, "http://localhost:3007");
        app.navigate(Route::Dashboard);

        let screen = draw(&app);
        assert!(screen.contains(DASHBOARD_WELCOME));
        assert!(screen.contains("Logout"));
    }

    #[test]
    fn test_signup_page_lists_options() {
        let mut app = AppState::new(SessionContext::in_memory(), "http://localhost:3007");
        app.navigate(Route::Signup);
        let screen = draw(&app);
        assert!(screen.contains("Categories"));
        assert!(screen.contains("Preferences"));
        assert!(screen.contains("[ ] "));
    }
}
