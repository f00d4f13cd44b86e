pub mod domain_list;
pub mod search_bar;
pub mod status_bar;

use crate::app::AppState;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Rows taken by everything except the list body: search box, list borders,
/// status bar.
pub const CHROME_HEIGHT: u16 = 3 + 2 + 1;

pub fn render<C>(f: &mut Frame, state: &AppState<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Min(1),    // Domain list
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    search_bar::render(f, state, chunks[0]);
    domain_list::render(f, state, chunks[1]);
    status_bar::render(f, state, chunks[2]);

    if state.show_help {
        render_help_overlay(f, state);
    }
}

fn render_help_overlay<C>(f: &mut Frame, state: &AppState<C>) {
    let help_text = r#"
    Domain Picker Help

    Navigate Mode:
      ↑/↓ or j/k            Move cursor
      g g / G               Jump to top / bottom
      PgUp / PgDn           Move a page
      Enter, y or Space     Copy domain to clipboard
      /                     Search
      Ctrl+u                Clear search
      ?                     Toggle help
      q                     Quit

    Search Mode:
      (type)                Filter as you type
      Enter                 Keep filter, back to list
      Esc                   Clear filter, back to list
      ←/→  Home/End         Move within the query
      Backspace / Del       Delete character
    "#;

    let area = centered_rect(60, 70, f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(state.theme.background));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Style::default().fg(state.theme.foreground))
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_state;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text<C>(state: &AppState<C>) -> String {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();

        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_renders_all_domains() {
        let state = test_state(&["aaa.com", "bbb.com"]);
        let text = screen_text(&state);
        assert!(text.contains("All domains"));
        assert!(text.contains("aaa.com"));
        assert!(text.contains("bbb.com"));
        assert!(text.contains("2 temporary mail domains"));
    }

    #[test]
    fn test_renders_no_results() {
        let mut state = test_state(&["aaa.com"]);
        state.set_query("zzz".to_string());
        let text = screen_text(&state);
        assert!(text.contains("No matching domains"));
        assert!(text.contains("0 matching domains"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_renders_copied_marker() {
        let mut state = test_state(&["aaa.com", "bbb.com"]);
        state.session.request_copy("bbb.com").await;
        state.record_copy_outcome("bbb.com", &crate::copy::CopyOutcome::Confirmed);
        let text = screen_text(&state);
        assert!(text.contains("✓ Copied"));
        state.show_help = true;
        assert!(screen_text(&state).contains("Help"));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 70, outer);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
        assert!(inner.y >= outer.y && inner.bottom() <= outer.bottom());
    }
}
