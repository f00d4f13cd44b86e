pub mod components;
pub mod theme;

use crate::app::{AppState, event::handle_key_event};
use crate::clipboard::ClipboardWriter;
use anyhow::Result;
use crossterm::{
    event::{
        self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const TICK: Duration = Duration::from_millis(100);

struct TerminalGuard {
    keyboard_enhancement: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.keyboard_enhancement {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = stdout.flush();
    }
}

pub async fn run_tui<C: ClipboardWriter>(mut state: AppState<C>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let supports_keyboard_enhancement = execute!(
        stdout,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    )
    .is_ok();

    let _guard = TerminalGuard {
        keyboard_enhancement: supports_keyboard_enhancement,
    };

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (key_tx, key_rx) = mpsc::unbounded_channel();
    spawn_key_reader(key_tx);

    let result = run_app(&mut terminal, &mut state, key_rx).await;
    terminal.show_cursor()?;

    state.teardown();
    result
}

/// crossterm's `poll`/`read` block, so keys are read on a plain thread and
/// forwarded to the async loop. The thread exits once the receiver is gone.
fn spawn_key_reader(tx: mpsc::UnboundedSender<KeyEvent>) {
    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(TICK) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.send(key).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "Failed to read terminal event");
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "Failed to poll terminal events");
                    break;
                }
            }
        }
        debug!("Key reader stopped");
    });
}

async fn run_app<C: ClipboardWriter>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState<C>,
    mut key_rx: mpsc::UnboundedReceiver<KeyEvent>,
) -> Result<()> {
    loop {
        state.clear_expired_status_message();
        state.page_size = terminal
            .size()?
            .height
            .saturating_sub(components::CHROME_HEIGHT) as usize;

        terminal.draw(|f| {
            components::render(f, state);
        })?;

        tokio::select! {
            key = key_rx.recv() => match key {
                Some(key) => handle_key_event(key, state),
                None => break,
            },
            _ = tokio::time::sleep(TICK) => {}
        }

        if let Some(domain) = state.pending_copy.take() {
            let outcome = state.session.request_copy(&domain).await;
            state.record_copy_outcome(&domain, &outcome);
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
