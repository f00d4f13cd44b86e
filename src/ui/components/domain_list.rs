use crate::app::{AppState, Mode};
use crate::utils::unicode::truncate_to_width;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const COPIED_MARKER: &str = "✓ Copied";
const COPY_HINT: &str = "⧉";

pub fn render<C>(f: &mut Frame, state: &AppState<C>, area: Rect) {
    let visible = state.session.visible();

    let title = if state.session.is_filtered() {
        format!(" {} matching domains ", visible.len())
    } else {
        " All domains ".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(state.theme.muted))
        .title(Span::styled(title, Style::default().fg(state.theme.foreground)));

    if visible.is_empty() {
        render_no_results(f, state, block, area);
        return;
    }

    let available_width = area.width.saturating_sub(2) as usize;
    let marker_width = COPIED_MARKER.width() + 1;

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(idx, domain)| {
            let is_cursor = idx == state.cursor_position && state.mode == Mode::Navigate;
            let is_copied = state.session.is_confirmed(domain);

            let domain_style = if is_cursor {
                Style::default()
                    .fg(state.theme.cursor)
                    .add_modifier(Modifier::REVERSED)
            } else if is_copied {
                Style::default()
                    .fg(state.theme.copied)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(state.theme.foreground)
            };

            let label = truncate_to_width(
                &format!(" {domain}"),
                available_width.saturating_sub(marker_width),
            );
            let padding = available_width
                .saturating_sub(label.width())
                .saturating_sub(marker_width);

            let (marker, marker_style) = if is_copied {
                (
                    COPIED_MARKER,
                    Style::default()
                        .fg(state.theme.copied)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (COPY_HINT, Style::default().fg(state.theme.muted))
            };

            ListItem::new(Line::from(vec![
                Span::styled(label, domain_style),
                Span::raw(" ".repeat(padding + 1)),
                Span::styled(marker, marker_style),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.cursor_position));

    let list = List::new(items).block(block);
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_no_results<C>(f: &mut Frame, state: &AppState<C>, block: Block, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No matching domains",
            Style::default().fg(state.theme.foreground),
        )),
        Line::from(Span::styled(
            "Try another keyword",
            Style::default().fg(state.theme.muted),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
