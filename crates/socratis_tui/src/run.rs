//! TUI run loop: terminal setup, event handling, draw.
//!
//! Key events are read on a dedicated thread so the loop never blocks on
//! terminal input. Turn events arrive on a tokio channel and are applied to
//! the session here; turns to drive go out on another channel.

use std::io;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use socratis_core::ChatEvent;
use socratis_runtime::TurnRequest;
use tokio::sync::mpsc as tokio_mpsc;
use tracing::{info, warn};

use crate::state::{Screen, TuiState};
use crate::view;

const STATUS_TIMEOUT: Duration = Duration::from_secs(5);
const TICK: Duration = Duration::from_millis(50);

/// Channels connecting the UI loop to the task that drives turns.
pub struct TuiChannels {
    pub events: tokio_mpsc::Receiver<ChatEvent>,
    pub turns: tokio_mpsc::Sender<TurnRequest>,
}

/// Run the TUI until the student quits. Terminal state is restored on every exit path.
pub fn run_tui(mut state: TuiState, mut channels: TuiChannels) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("tui started");
    let result = run_loop(&mut terminal, &mut state, &mut channels);

    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    disable_raw_mode()?;

    result
}

/// What the loop should do after a key.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut TuiState,
    channels: &mut TuiChannels,
) -> anyhow::Result<()> {
    let (key_tx, key_rx) = mpsc::channel();
    let _reader = std::thread::spawn(move || {
        loop {
            if event::poll(TICK).unwrap_or(false)
                && let Ok(ev) = event::read()
                && key_tx.send(ev).is_err()
            {
                break;
            }
        }
    });

    loop {
        while let Ok(event) = channels.events.try_recv() {
            state.apply_event(event);
        }

        if let Some(set_at) = state.status_set_at
            && set_at.elapsed() > STATUS_TIMEOUT
        {
            state.clear_status();
        }

        // The thinking dots and streaming cursor animate.
        if state.needs_redraw || state.session.is_busy() {
            state.frame_count = state.frame_count.wrapping_add(1);
            terminal.draw(|f| view::draw(f, state, f.area()))?;
            state.needs_redraw = false;
        }

        match key_rx.recv_timeout(TICK) {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if handle_key(state, key, &channels.turns) == Flow::Quit {
                    break;
                }
            }
            Ok(Event::Resize(_, _)) => {
                state.cache_dirty = true;
                state.needs_redraw = true;
            }
            Ok(Event::Mouse(me)) => match me.kind {
                MouseEventKind::ScrollUp if state.screen == Screen::DebugTraces => {
                    state.trace_scroll_up(3)
                }
                MouseEventKind::ScrollDown if state.screen == Screen::DebugTraces => {
                    state.trace_scroll_down(3)
                }
                MouseEventKind::ScrollUp => state.scroll_up(3),
                MouseEventKind::ScrollDown => state.scroll_down(3),
                _ => {}
            },
            Ok(_) | Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
    info!("tui stopped");
    Ok(())
}

fn handle_key(
    state: &mut TuiState,
    key: KeyEvent,
    turns: &tokio_mpsc::Sender<TurnRequest>,
) -> Flow {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let main = state.screen == Screen::Main;
    match key.code {
        KeyCode::Char('c') if ctrl => return Flow::Quit,
        KeyCode::Char('d') if ctrl => state.toggle_logs(),
        KeyCode::Esc if !main => state.toggle_logs(),
        KeyCode::Up if !main => state.trace_scroll_up(1),
        KeyCode::Down if !main => state.trace_scroll_down(1),
        KeyCode::PageUp if !main => state.trace_scroll_up(10),
        KeyCode::PageDown if !main => state.trace_scroll_down(10),
        _ if !main => {}
        KeyCode::Char('q') if state.input_buffer.is_empty() => return Flow::Quit,
        KeyCode::Char('y') if ctrl => copy_last_answer(state),
        KeyCode::Char('u') if ctrl => state.input_clear_line(),
        KeyCode::Enter => submit(state, turns),
        KeyCode::Up => state.scroll_up(1),
        KeyCode::Down => state.scroll_down(1),
        KeyCode::PageUp => state.scroll_up(10),
        KeyCode::PageDown => state.scroll_down(10),
        KeyCode::Backspace => state.input_backspace(),
        KeyCode::Delete => state.input_delete(),
        KeyCode::Left => state.input_cursor_left(),
        KeyCode::Right => state.input_cursor_right(),
        KeyCode::Home => state.input_cursor_home(),
        KeyCode::End => state.input_cursor_end(),
        KeyCode::Char(c) if !ctrl => state.input_insert(c),
        _ => {}
    }
    Flow::Continue
}

/// Hands the turn to the driver task. If that task is gone the turn is
/// failed locally so the session does not stay busy.
fn submit(state: &mut TuiState, turns: &tokio_mpsc::Sender<TurnRequest>) {
    let Some(turn) = state.submit_input() else {
        return;
    };
    if let Err(e) = turns.try_send(turn) {
        warn!(error = %e, "turn driver unavailable");
        state.apply_event(ChatEvent::turn_failed(None, format!("turn driver unavailable: {e}")));
    }
}

/// Ctrl+Y: copy the last answer to the system clipboard.
fn copy_last_answer(state: &mut TuiState) {
    let Some(text) = state.last_answer() else {
        state.set_status("Nothing to copy yet");
        return;
    };
    match cli_clipboard::set_contents(text) {
        Ok(()) => state.set_status("Copied to clipboard"),
        Err(e) => {
            warn!(error = %e, "clipboard unavailable");
            state.set_status("Clipboard unavailable");
        }
    }
}
