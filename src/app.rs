use std::time::Instant;

use ratatui::widgets::ScrollbarState;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{error, info, warn};

use crate::client::{AskClient, AskError, AskResult};
use crate::message::Message;

/// Spinner frames shown while waiting for an answer.
const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Milliseconds each spinner frame is shown.
const SPINNER_FRAME_MS: u128 = 120;

/// Lifecycle of the current question/answer exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeStatus {
    /// Nothing sent yet
    #[default]
    Idle,
    /// A question is in flight
    Waiting { since: Instant },
    /// The last exchange finished, successfully or not
    Rendered { failed: bool },
}

/// Chat-related state: messages and input.
#[derive(Debug, Default)]
pub struct ChatState {
    /// Chat message history
    pub messages: Vec<Message>,
    /// Current input text
    pub input: String,
    /// Cursor position in input, counted in characters
    pub cursor_position: usize,
}

impl ChatState {
    /// Create a new ChatState with initial messages.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            input: String::new(),
            cursor_position: 0,
        }
    }

    /// Byte offset of the character at `char_idx`.
    fn byte_index(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Input split at the cursor, for rendering.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.input.split_at(self.byte_index(self.cursor_position))
    }

    /// Handle a character input.
    pub fn handle_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor_position);
        self.input.insert(idx, c);
        self.cursor_position += 1;
    }

    /// Handle backspace key.
    pub fn handle_backspace(&mut self) {
        if self.cursor_position > 0 {
            let idx = self.byte_index(self.cursor_position - 1);
            self.input.remove(idx);
            self.cursor_position -= 1;
        }
    }

    /// Handle delete key.
    pub fn handle_delete(&mut self) {
        if self.cursor_position < self.input_len() {
            let idx = self.byte_index(self.cursor_position);
            self.input.remove(idx);
        }
    }

    /// Move cursor left.
    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.input_len();
    }

    /// Clear input and reset cursor.
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
    }
}

/// Scroll-related state for the message list, in rendered lines.
#[derive(Debug)]
pub struct ScrollState {
    /// First visible line
    pub offset: usize,
    /// Stick to the bottom as new lines arrive
    pub follow: bool,
    /// Total rendered lines, updated on every draw
    pub total_lines: usize,
    /// Visible lines, updated on every draw
    pub viewport: usize,
    /// Scrollbar state for ratatui
    pub scrollbar: ScrollbarState,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0,
            follow: true,
            total_lines: 0,
            viewport: 0,
            scrollbar: ScrollbarState::default(),
        }
    }
}

impl ScrollState {
    /// Largest valid offset for the current content.
    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport)
    }

    /// Scroll up one line.
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
        self.follow = false;
    }

    /// Scroll down one line.
    pub fn scroll_down(&mut self) {
        self.offset = (self.offset + 1).min(self.max_scroll());
        self.follow = self.offset >= self.max_scroll();
    }

    /// Scroll up by page size.
    pub fn scroll_page_up(&mut self, page_size: usize) {
        self.offset = self.offset.saturating_sub(page_size);
        self.follow = false;
    }

    /// Scroll down by page size.
    pub fn scroll_page_down(&mut self, page_size: usize) {
        self.offset = (self.offset + page_size).min(self.max_scroll());
        self.follow = self.offset >= self.max_scroll();
    }

    /// Scroll to top.
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.follow = false;
    }

    /// Scroll to bottom and keep following new content.
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_scroll();
        self.follow = true;
    }

    /// Record the latest layout and clamp the offset to it.
    pub fn update(&mut self, total_lines: usize, viewport: usize) {
        self.total_lines = total_lines;
        self.viewport = viewport;
        if self.follow {
            self.offset = self.max_scroll();
        } else {
            self.offset = self.offset.min(self.max_scroll());
        }
        self.scrollbar = self
            .scrollbar
            .content_length(self.max_scroll() + 1)
            .position(self.offset);
    }
}

/// Application state for the chat client.
pub struct App {
    /// Chat state: messages, input, cursor
    pub chat: ChatState,
    /// Scroll state: offset and scrollbar
    pub scroll: ScrollState,
    /// Client used to ask questions
    pub client: AskClient,
    /// Current exchange status
    pub status: ExchangeStatus,
    /// Receiver for the in-flight answer
    pub pending: Option<oneshot::Receiver<AskResult>>,
}

impl App {
    /// Create a new App with a welcome notice.
    pub fn new(client: AskClient) -> Self {
        let welcome = format!(
            "Ask a question and press Enter. Answers come from {}. \
             Up/Down/PgUp/PgDn scroll, Ctrl+L clears, Esc quits.",
            client.endpoint()
        );
        Self {
            chat: ChatState::new(vec![Message::notice(welcome)]),
            scroll: ScrollState::default(),
            client,
            status: ExchangeStatus::Idle,
            pending: None,
        }
    }

    /// Check if a question is in flight.
    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    /// Submit the current input as a question.
    ///
    /// Blank input is ignored. While a question is in flight the input is
    /// kept and nothing is sent.
    pub fn submit_message(&mut self) {
        let question = self.chat.input.trim().to_string();
        if question.is_empty() {
            return;
        }
        if self.is_waiting() {
            warn!("question submitted while another is in flight; ignoring");
            return;
        }

        info!(chars = question.chars().count(), "submitting question");
        self.chat.messages.push(Message::user(question.clone()));
        self.chat.clear_input();
        self.scroll.scroll_to_bottom();

        self.pending = Some(self.client.spawn_ask(question));
        self.status = ExchangeStatus::Waiting {
            since: Instant::now(),
        };
    }

    /// Poll the in-flight question. Returns true if a message was rendered.
    pub fn process_response(&mut self) -> bool {
        let Some(rx) = self.pending.as_mut() else {
            return false;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(AskError::Dropped),
        };
        self.pending = None;
        self.render_result(result);
        true
    }

    /// Append the outcome of an exchange to the chat.
    pub fn render_result(&mut self, result: AskResult) {
        match result {
            Ok(response) => {
                let meta = response.meta();
                self.chat
                    .messages
                    .push(Message::bot(response.answer).with_meta(meta));
                self.status = ExchangeStatus::Rendered { failed: false };
            }
            Err(e) => {
                error!(endpoint = %self.client.endpoint(), error = %e, "question failed");
                self.chat
                    .messages
                    .push(Message::error(error_text(self.client.endpoint())));
                self.status = ExchangeStatus::Rendered { failed: true };
            }
        }
        self.scroll.scroll_to_bottom();
    }

    /// Remove all messages from the view.
    pub fn clear_history(&mut self) {
        self.chat.messages.clear();
        self.scroll = ScrollState::default();
    }

    /// Spinner frame for the current wait, if any.
    pub fn spinner(&self) -> Option<&'static str> {
        match self.status {
            ExchangeStatus::Waiting { since } => {
                let frame = since.elapsed().as_millis() / SPINNER_FRAME_MS;
                Some(SPINNER[frame as usize % SPINNER.len()])
            }
            _ => None,
        }
    }

    pub fn handle_char(&mut self, c: char) {
        self.chat.handle_char(c);
    }

    pub fn handle_backspace(&mut self) {
        self.chat.handle_backspace();
    }

    pub fn handle_delete(&mut self) {
        self.chat.handle_delete();
    }

    pub fn move_cursor_left(&mut self) {
        self.chat.move_cursor_left();
    }

    pub fn move_cursor_right(&mut self) {
        self.chat.move_cursor_right();
    }

    pub fn move_cursor_home(&mut self) {
        self.chat.move_cursor_home();
    }

    pub fn move_cursor_end(&mut self) {
        self.chat.move_cursor_end();
    }
}

/// Text shown in the chat when an exchange fails.
pub fn error_text(endpoint: &str) -> String {
    format!("Error: could not reach the backend at {endpoint}. Check that the server is running.")
}
