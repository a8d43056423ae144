use chrono::{DateTime, Local};

/// Represents who sent a message in the chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// Returns the display prefix for this role.
    pub fn prefix(&self) -> &'static str {
        match self {
            Role::User => "You: ",
            Role::Bot => "Bot: ",
        }
    }
}

/// How a message should be presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageKind {
    /// A question or an answer.
    #[default]
    Chat,
    /// A failed exchange, shown in the error color.
    Error,
    /// Informational line from the client itself.
    Notice,
}

/// Extra details the backend may return alongside an answer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnswerMeta {
    pub sources: Vec<String>,
    pub confidence: Option<f64>,
    pub response_time: Option<f64>,
    pub cached: bool,
}

impl AnswerMeta {
    /// Returns true if there is nothing worth displaying.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
            && self.confidence.is_none()
            && self.response_time.is_none()
            && !self.cached
    }

    /// One-line summary, e.g. `sources: Official Database · 0.42s · cached`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.sources.is_empty() {
            parts.push(format!("sources: {}", self.sources.join(", ")));
        }
        if let Some(confidence) = self.confidence {
            parts.push(format!("confidence {:.0}%", confidence * 100.0));
        }
        if let Some(secs) = self.response_time {
            parts.push(format!("{secs:.2}s"));
        }
        if self.cached {
            parts.push("cached".to_string());
        }
        parts.join(" · ")
    }
}

/// A single message in the chat history.
#[derive(Clone, Debug)]
pub struct Message {
    pub role: Role,
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Local>,
    pub meta: Option<AnswerMeta>,
}

impl Message {
    /// Create a new chat message with the given role and content.
    pub fn new(role: Role, content: String) -> Self {
        Self {
            role,
            kind: MessageKind::Chat,
            content,
            timestamp: Local::now(),
            meta: None,
        }
    }

    /// Create a new user message.
    pub fn user(content: String) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new bot answer.
    pub fn bot(content: String) -> Self {
        Self::new(Role::Bot, content)
    }

    /// Create a bot message reporting a failed exchange.
    pub fn error(content: String) -> Self {
        Self {
            kind: MessageKind::Error,
            ..Self::bot(content)
        }
    }

    /// Create an informational notice.
    pub fn notice(content: String) -> Self {
        Self {
            kind: MessageKind::Notice,
            ..Self::bot(content)
        }
    }

    /// Attach answer metadata, dropping it if empty.
    pub fn with_meta(mut self, meta: AnswerMeta) -> Self {
        self.meta = (!meta.is_empty()).then_some(meta);
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }

    /// Short local time used in the chat view.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}
