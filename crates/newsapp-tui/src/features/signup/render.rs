use newsapp_core::forms::{Category, Field};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;

use super::{SignupFocus, SignupPageState};
use crate::common::widgets::{self, INPUT_HEIGHT};

pub fn render_signup_page(frame: &mut Frame, area: Rect, page: &SignupPageState, spinner: &str) {
    let block = Block::bordered().title(" Sign up ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [
        notice_area,
        name_area,
        email_area,
        password_area,
        lists_area,
        custom_area,
        button_area,
    ] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Min(5),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(inner);

    if let Some(notice) = page.notice() {
        let style = if page.submission.failure_message().is_some() {
            widgets::error_style()
        } else {
            Style::default().fg(Color::Green)
        };
        widgets::message(frame, notice_area, notice, style);
    }

    let state = page.form.state();
    let errors = &page.errors;
    widgets::text_input(
        frame,
        name_area,
        "Full name",
        &state.full_name,
        page.focus == SignupFocus::FullName,
        false,
        errors.message(Field::FullName),
    );
    widgets::text_input(
        frame,
        email_area,
        "Email",
        &state.email,
        page.focus == SignupFocus::Email,
        false,
        errors.message(Field::Email),
    );
    widgets::text_input(
        frame,
        password_area,
        "Password",
        &state.password,
        page.focus == SignupFocus::Password,
        true,
        errors.message(Field::Password),
    );

    let [categories_area, preferences_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(lists_area);

    let categories: Vec<(&str, bool)> = Category::all()
        .iter()
        .map(|c| (c.as_str(), state.categories.contains(c)))
        .collect();
    widgets::checklist(
        frame,
        categories_area,
        "Categories",
        &categories,
        (page.focus == SignupFocus::Categories).then_some(page.category_cursor),
        errors.message(Field::Categories),
    );

    let preferences: Vec<(&str, bool)> = page
        .form
        .preference_options()
        .as_slice()
        .iter()
        .map(|p| (p.as_str(), state.preferences.contains(p)))
        .collect();
    widgets::checklist(
        frame,
        preferences_area,
        "Preferences",
        &preferences,
        (page.focus == SignupFocus::Preferences).then_some(page.preference_cursor),
        errors.message(Field::Preferences),
    );

    widgets::text_input(
        frame,
        custom_area,
        "Add a preference (Enter)",
        page.form.custom_preference(),
        page.focus == SignupFocus::CustomPreference,
        false,
        None,
    );

    let label = if page.submission.is_pending() {
        format!("{spinner} Signing up")
    } else {
        "Sign Up".to_string()
    };
    widgets::button(
        frame,
        button_area,
        &label,
        page.focus == SignupFocus::Submit,
        page.submission.can_submit(),
    );
}
