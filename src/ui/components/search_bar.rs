use crate::app::{AppState, Mode};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const PLACEHOLDER: &str = "Search domains";

pub fn render<C>(f: &mut Frame, state: &AppState<C>, area: Rect) {
    let query = state.session.query();
    let searching = state.mode == Mode::Search;

    let border_style = if searching {
        Style::default().fg(state.theme.accent)
    } else {
        Style::default().fg(state.theme.muted)
    };

    let title = format!(" {} temporary mail domains ", state.session.catalog().len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            title,
            Style::default()
                .fg(state.theme.foreground)
                .add_modifier(Modifier::BOLD),
        ));

    let line = if query.is_empty() && !searching {
        Line::from(vec![
            Span::styled(" / ", Style::default().fg(state.theme.muted)),
            Span::styled(PLACEHOLDER, Style::default().fg(state.theme.muted)),
        ])
    } else {
        Line::from(vec![
            Span::styled(" / ", Style::default().fg(state.theme.accent)),
            Span::styled(query.to_string(), Style::default().fg(state.theme.foreground)),
        ])
    };

    f.render_widget(Paragraph::new(line).block(block), area);

    if searching {
        let before_cursor = &query[..state.query_cursor_pos.min(query.len())];
        let x = area.x + 1 + 3 + before_cursor.width() as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        f.set_cursor_position(Position::new(x.min(max_x), area.y + 1));
    }
}
