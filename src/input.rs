use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};

use crate::app::App;
use crate::config::Config;
use crate::ui;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running the app
    Continue,
    /// Exit the app
    Exit,
}

/// Run the main application loop.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &Config,
) -> io::Result<()> {
    let behavior = &config.behavior;

    loop {
        // Pick up the answer before drawing so it shows on this frame
        app.process_response();

        terminal.draw(|f| ui::ui(f, app, config))?;

        // Poll faster while waiting so the spinner animates
        let timeout = if app.is_waiting() {
            Duration::from_millis(behavior.busy_poll_ms)
        } else {
            Duration::from_millis(behavior.idle_poll_ms)
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && handle_key_event(app, key.code, key.modifiers, config) == HandleResult::Exit
                {
                    return Ok(());
                }
            }
        }
    }
}

/// Handle a key event and return whether to continue or exit.
pub fn handle_key_event(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    config: &Config,
) -> HandleResult {
    let page_size = config.behavior.scroll_page_size;
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    match code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => return HandleResult::Exit,
        KeyCode::Char('l') if ctrl => app.clear_history(),
        KeyCode::Home if ctrl => app.scroll.scroll_to_top(),
        KeyCode::End if ctrl => app.scroll.scroll_to_bottom(),
        KeyCode::Char(_) if ctrl => {}
        KeyCode::Enter => app.submit_message(),
        KeyCode::Char(c) => app.handle_char(c),
        KeyCode::Backspace => app.handle_backspace(),
        KeyCode::Delete => app.handle_delete(),
        KeyCode::Left => app.move_cursor_left(),
        KeyCode::Right => app.move_cursor_right(),
        KeyCode::Home => app.move_cursor_home(),
        KeyCode::End => app.move_cursor_end(),
        KeyCode::Up => app.scroll.scroll_up(),
        KeyCode::Down => app.scroll.scroll_down(),
        KeyCode::PageUp => app.scroll.scroll_page_up(page_size),
        KeyCode::PageDown => app.scroll.scroll_page_down(page_size),
        KeyCode::Esc => return HandleResult::Exit,
        _ => {}
    }
    HandleResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::AskClient;

    fn app() -> App {
        App::new(AskClient::http("http://127.0.0.1:9/api/ask", "student"))
    }

    fn press(app: &mut App, code: KeyCode) -> HandleResult {
        handle_key_event(app, code, KeyModifiers::NONE, &Config::default())
    }

    #[test]
    fn test_typing_and_editing() {
        let mut app = app();
        for c in "helo".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.chat.input, "hello");

        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.chat.input, "ell");
    }

    #[test]
    fn test_exit_keys() {
        let mut app = app();
        let config = Config::default();
        assert_eq!(press(&mut app, KeyCode::Esc), HandleResult::Exit);
        assert_eq!(
            handle_key_event(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL, &config),
            HandleResult::Exit
        );
        assert_eq!(
            handle_key_event(&mut app, KeyCode::Char('d'), KeyModifiers::CONTROL, &config),
            HandleResult::Exit
        );
    }

    #[test]
    fn test_control_chars_are_not_typed() {
        let mut app = app();
        let config = Config::default();
        handle_key_event(&mut app, KeyCode::Char('x'), KeyModifiers::CONTROL, &config);
        assert!(app.chat.input.is_empty());
    }

    #[test]
    fn test_ctrl_l_clears_history() {
        let mut app = app();
        let config = Config::default();
        handle_key_event(&mut app, KeyCode::Char('l'), KeyModifiers::CONTROL, &config);
        assert!(app.chat.messages.is_empty());
    }

    #[test]
    fn test_enter_on_blank_input_sends_nothing() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(press(&mut app, KeyCode::Enter), HandleResult::Continue);
        assert!(!app.is_waiting());
        assert_eq!(app.chat.messages.len(), 1);
    }

    #[test]
    fn test_scroll_keys() {
        let mut app = app();
        app.scroll.update(50, 10);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.scroll.offset, 30);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.scroll.offset, 29);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.scroll.offset, 30);

        let config = Config::default();
        handle_key_event(&mut app, KeyCode::Home, KeyModifiers::CONTROL, &config);
        assert_eq!(app.scroll.offset, 0);
        handle_key_event(&mut app, KeyCode::End, KeyModifiers::CONTROL, &config);
        assert_eq!(app.scroll.offset, 40);
        assert!(app.scroll.follow);
    }
}
