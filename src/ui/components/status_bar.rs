use crate::app::AppState;
use crate::feedback::Pulse;
use crate::keybindings::Action;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render<C>(f: &mut Frame, state: &AppState<C>, area: Rect) {
    let mode_text = format!("{}", state.mode);
    let count_text = format!(
        "{}/{} domains",
        state.session.visible().len(),
        state.session.catalog().len()
    );
    let message = state
        .status_message
        .as_ref()
        .map(|(m, _)| format!(" | {m}"))
        .unwrap_or_default();

    let hint = |action: Action, label: &str| {
        state
            .keybindings
            .navigate_key_for(action)
            .map(|key| format!("{key} {label}"))
    };
    let nav_hint = [
        hint(Action::EnterSearch, "search"),
        hint(Action::Copy, "copy"),
        hint(Action::ToggleHelp, "help"),
        hint(Action::Quit, "quit"),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join("  ");
    let version_text = format!("v{VERSION}");

    let left_content = format!(" {} | {}{}", mode_text, count_text, message);

    let padding = (area.width as usize).saturating_sub(
        left_content.width() + nav_hint.width() + version_text.width() + 3,
    );

    let base_style = Style::default()
        .fg(state.theme.status_bar_fg)
        .bg(state.theme.status_bar_bg);

    let style = match state.flash.active() {
        Some(Pulse::Success) => base_style.bg(state.theme.copied).add_modifier(Modifier::BOLD),
        Some(Pulse::Failure) => base_style.bg(state.theme.error).add_modifier(Modifier::BOLD),
        None => base_style,
    };

    let status_line = format!(
        "{} {} {:>padding$} {}",
        left_content,
        nav_hint,
        "",
        version_text,
        padding = padding
    );

    let status = Paragraph::new(Line::from(vec![Span::styled(status_line, style)]));

    f.render_widget(status, area);
}
