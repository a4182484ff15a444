use newsapp_core::forms::Field;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Block;

use super::{LoginFocus, LoginPageState};
use crate::common::widgets::{self, INPUT_HEIGHT};

pub fn render_login_page(frame: &mut Frame, area: Rect, page: &LoginPageState, spinner: &str) {
    let block = Block::bordered().title(" Login ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [error_area, email_area, password_area, _, button_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    if let Some(message) = page.submission.failure_message() {
        widgets::message(frame, error_area, message, widgets::error_style());
    }

    let state = page.form.state();
    widgets::text_input(
        frame,
        email_area,
        "Email",
        &state.email,
        page.focus == LoginFocus::Email,
        false,
        page.errors.message(Field::Email),
    );
    widgets::text_input(
        frame,
        password_area,
        "Password",
        &state.password,
        page.focus == LoginFocus::Password,
        true,
        page.errors.message(Field::Password),
    );

    let label = if page.submission.is_pending() {
        format!("{spinner} Logging in")
    } else {
        "Login".to_string()
    };
    widgets::button(
        frame,
        button_area,
        &label,
        page.focus == LoginFocus::Submit,
        page.submission.can_submit(),
    );
}
