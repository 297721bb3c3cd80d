//! Terminal front-end
//!
//! Owns the terminal (raw mode plus alternate screen, restored on exit and on
//! panic) and runs the event loop: decoded keys and effect results are fed to
//! [`State::update`] one at a time, and every effect it returns is executed
//! on its own task whose result comes back through a channel.

use crate::app::handlers::effects::Backend;
use crate::app::{Effect, Key, Message, State, view};
use crate::config::AppConfig;
use crate::core::ufw::CommandRunner;
use crossterm::cursor::Show;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures_util::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};

/// Restores the terminal when dropped, on normal return and on unwinding
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Decodes a terminal key event. Only presses count; releases and repeats
/// reported by some terminals are dropped.
pub fn map_key(event: KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c' | 'd' | 'q') => Some(Key::Quit),
            _ => None,
        };
    }

    Some(match event.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    })
}

/// Spawns every leaf of `effect`. Returns true if the program should quit.
fn dispatch<R: CommandRunner>(
    effect: Effect,
    backend: &Backend<R>,
    tx: &UnboundedSender<Message>,
) -> bool {
    if effect.is_quit() {
        return true;
    }

    for leaf in effect.into_leaves() {
        let backend = backend.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(message) = backend.execute(leaf).await {
                // Receiver only goes away on shutdown
                let _ = tx.send(message);
            }
        });
    }
    false
}

/// Runs the interactive front-end until the user quits
///
/// # Errors
/// Returns an error if the terminal cannot be set up or drawn to.
pub async fn run<R: CommandRunner>(config: &AppConfig, backend: Backend<R>) -> io::Result<()> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    let _guard = TerminalGuard;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let (tx, mut rx) = unbounded_channel::<Message>();
    let (mut state, effect) = State::new(config);
    if dispatch(effect, &backend, &tx) {
        return Ok(());
    }

    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| view::render(frame, &state))?;

        let message = tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => match map_key(key) {
                    Some(key) => Message::Key(key),
                    None => continue,
                },
                // Resize and friends only need a redraw
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e),
                None => break,
            },
            Some(message) = rx.recv() => message,
        };

        let effect = state.update(message);
        if dispatch(effect, &backend, &tx) {
            tracing::info!("Quit requested");
            break;
        }
    }

    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_control_keys_quit() {
        for c in ['c', 'd', 'q'] {
            assert_eq!(
                map_key(press(KeyCode::Char(c), KeyModifiers::CONTROL)),
                Some(Key::Quit)
            );
        }
        assert_eq!(map_key(press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_plain_q_is_text() {
        assert_eq!(
            map_key(press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Key::Char('q'))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Key::Char('A'))
        );
    }

    #[test]
    fn test_releases_ignored() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release), None);
        assert_eq!(map_key(press(KeyCode::Enter, KeyModifiers::NONE)), Some(Key::Enter));
        assert_eq!(map_key(press(KeyCode::Tab, KeyModifiers::NONE)), None);
    }
}
