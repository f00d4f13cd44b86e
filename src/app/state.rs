use super::mode::Mode;
use crate::catalog::Catalog;
use crate::copy::CopyOutcome;
use crate::feedback::FlashFeedback;
use crate::keybindings::{KeyBinding, KeybindingCache};
use crate::session::Session;
use crate::ui::theme::Theme;
use crate::utils::unicode::{next_char_boundary, prev_char_boundary};
use std::sync::Arc;
use std::time::{Duration, Instant};

const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

pub struct AppState<C> {
    pub session: Session<C, FlashFeedback>,
    pub flash: FlashFeedback,
    pub cursor_position: usize,
    pub mode: Mode,
    pub query_cursor_pos: usize,
    pub should_quit: bool,
    pub show_help: bool,
    pub theme: Theme,
    pub keybindings: KeybindingCache,
    pub pending_key: Option<KeyBinding>,
    pub pending_key_time: Option<Instant>,
    pub timeoutlen: u64,
    pub pending_copy: Option<String>,
    pub status_message: Option<(String, Instant)>,
    pub page_size: usize,
}

impl<C> AppState<C> {
    pub fn new(
        catalog: Arc<Catalog>,
        clipboard: C,
        flash: FlashFeedback,
        theme: Theme,
        keybindings: KeybindingCache,
        timeoutlen: u64,
    ) -> Self {
        Self {
            session: Session::mount(catalog, clipboard, flash.clone()),
            flash,
            cursor_position: 0,
            mode: Mode::Navigate,
            query_cursor_pos: 0,
            should_quit: false,
            show_help: false,
            theme,
            keybindings,
            pending_key: None,
            pending_key_time: None,
            timeoutlen,
            pending_copy: None,
            status_message: None,
            page_size: 10,
        }
    }

    pub fn visible_len(&self) -> usize {
        self.session.visible().len()
    }

    pub fn selected_domain(&self) -> Option<&str> {
        self.session
            .visible()
            .get(self.cursor_position)
            .map(String::as_str)
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor_position + 1 < self.visible_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_by_page(&mut self, forward: bool) {
        let step = self.page_size.max(1);
        if forward {
            self.cursor_position = self.cursor_position.saturating_add(step);
        } else {
            self.cursor_position = self.cursor_position.saturating_sub(step);
        }
        self.clamp_cursor();
    }

    pub fn move_to_top(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_to_bottom(&mut self) {
        self.cursor_position = self.visible_len().saturating_sub(1);
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor_position = self.cursor_position.min(self.visible_len().saturating_sub(1));
    }

    /// Replace the query, keep the selection on the same domain when it is
    /// still visible, and clamp otherwise.
    pub fn set_query(&mut self, query: String) {
        let selected = self.selected_domain().map(str::to_string);
        self.session.set_query(query);
        self.query_cursor_pos = self.query_cursor_pos.min(self.session.query().len());

        match selected.and_then(|d| self.session.visible().iter().position(|v| *v == d)) {
            Some(idx) => self.cursor_position = idx,
            None => self.clamp_cursor(),
        }
    }

    pub fn clear_query(&mut self) {
        self.set_query(String::new());
        self.query_cursor_pos = 0;
    }

    pub fn insert_query_char(&mut self, c: char) {
        let mut query = self.session.query().to_string();
        query.insert(self.query_cursor_pos, c);
        self.query_cursor_pos += c.len_utf8();
        self.set_query(query);
    }

    pub fn delete_query_char_before_cursor(&mut self) {
        if self.query_cursor_pos == 0 {
            return;
        }
        let mut query = self.session.query().to_string();
        let start = prev_char_boundary(&query, self.query_cursor_pos);
        query.replace_range(start..self.query_cursor_pos, "");
        self.query_cursor_pos = start;
        self.set_query(query);
    }

    pub fn delete_query_char_at_cursor(&mut self) {
        let mut query = self.session.query().to_string();
        if self.query_cursor_pos >= query.len() {
            return;
        }
        let end = next_char_boundary(&query, self.query_cursor_pos);
        query.replace_range(self.query_cursor_pos..end, "");
        self.set_query(query);
    }

    pub fn move_query_cursor_left(&mut self) {
        self.query_cursor_pos = prev_char_boundary(self.session.query(), self.query_cursor_pos);
    }

    pub fn move_query_cursor_right(&mut self) {
        self.query_cursor_pos = next_char_boundary(self.session.query(), self.query_cursor_pos);
    }

    pub fn enter_search_mode(&mut self) {
        self.mode = Mode::Search;
        self.query_cursor_pos = self.session.query().len();
    }

    /// Queue the selected domain for copying; the event loop performs the
    /// actual clipboard write.
    pub fn request_copy_selected(&mut self) {
        self.pending_copy = self.selected_domain().map(str::to_string);
    }

    pub fn record_copy_outcome(&mut self, domain: &str, outcome: &CopyOutcome) {
        let message = match outcome {
            CopyOutcome::Confirmed => format!("Copied {domain}"),
            CopyOutcome::Failed(err) => format!("Copy failed: {err}"),
        };
        self.set_status_message(message);
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    pub fn clear_expired_status_message(&mut self) {
        if let Some((_, since)) = &self.status_message {
            if since.elapsed() >= STATUS_MESSAGE_TTL {
                self.status_message = None;
            }
        }
    }

    pub fn clear_expired_pending_key(&mut self) {
        if let Some(since) = self.pending_key_time {
            if since.elapsed() >= Duration::from_millis(self.timeoutlen) {
                self.pending_key = None;
                self.pending_key_time = None;
            }
        }
    }

    pub fn teardown(self) {
        self.session.teardown();
    }
}
