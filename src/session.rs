use std::collections::VecDeque;
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builtin;
use crate::error::{FaqError, Result};
use crate::matcher::QuestionMatcher;
use crate::model::FaqEntry;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1200);
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Like,
    Dislike,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub sender: Sender,
    pub content: String,
    /// Display time, e.g. `09:41`.
    pub time: String,
    pub sent_at: DateTime<Local>,
    /// For bot replies: the user message being answered. `None` on the greeting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<u64>,
    /// For bot replies: the catalog entry the answer came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}

impl Message {
    pub fn is_fallback(&self) -> bool {
        self.sender == Sender::Bot && self.reply_to.is_some() && self.entry_id.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub reply_delay: Duration,
    pub greeting: String,
    pub time_format: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            greeting: builtin::GREETING.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct PendingReply {
    reply_to: u64,
    due: DateTime<Local>,
    entry_id: Option<String>,
    content: String,
}

/// Conversation state of the chat widget.
///
/// Replies are not delivered on `submit`; they become due after the reply
/// delay and are handed out by `poll`. `clear` and `close` drop everything
/// still pending.
#[derive(Debug, Clone)]
pub struct ChatSession {
    matcher: QuestionMatcher,
    options: SessionOptions,
    reply_delay: TimeDelta,
    fallback: String,
    messages: Vec<Message>,
    pending: VecDeque<PendingReply>,
    next_id: u64,
    open: bool,
    show_suggestions: bool,
}

impl ChatSession {
    pub fn new(matcher: QuestionMatcher, options: SessionOptions) -> Result<Self> {
        let reply_delay = TimeDelta::from_std(options.reply_delay).map_err(|_| {
            FaqError::InvalidArg(format!(
                "reply delay out of range: {}",
                humantime::format_duration(options.reply_delay)
            ))
        })?;
        if StrftimeItems::new(&options.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(FaqError::InvalidArg(format!(
                "invalid time format: {}",
                options.time_format
            )));
        }
        let fallback = matcher.catalog().fallback_message();

        Ok(Self {
            matcher,
            options,
            reply_delay,
            fallback,
            messages: Vec::new(),
            pending: VecDeque::new(),
            next_id: 1,
            open: false,
            show_suggestions: true,
        })
    }

    pub fn open(&mut self, now: DateTime<Local>) {
        self.open = true;
        if self.messages.is_empty() {
            self.post_greeting(now);
        }
    }

    pub fn close(&mut self) {
        self.open = false;
        self.cancel_pending();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Records a user message and schedules its reply. Returns the message id,
    /// or `None` when the widget is closed or the text is blank.
    pub fn submit(&mut self, text: &str, now: DateTime<Local>) -> Option<u64> {
        if !self.open || text.trim().is_empty() {
            return None;
        }

        let id = self.push(Sender::User, text.to_string(), now, None, None);
        self.show_suggestions = false;

        let (entry_id, content) = match self.matcher.find(text) {
            Some(entry) => (Some(entry.id.clone()), entry.answer.clone()),
            None => (None, self.fallback.clone()),
        };
        debug!(message_id = id, entry = entry_id.as_deref(), "scheduled reply");

        self.pending.push_back(PendingReply {
            reply_to: id,
            due: now + self.reply_delay,
            entry_id,
            content,
        });
        Some(id)
    }

    /// Delivers every reply due at `now`, oldest first. Each reply is handed out once.
    pub fn poll(&mut self, now: DateTime<Local>) -> Vec<Message> {
        let mut delivered = Vec::new();
        while self.pending.front().is_some_and(|p| p.due <= now) {
            let Some(reply) = self.pending.pop_front() else {
                break;
            };
            let fallback = reply.entry_id.is_none();
            let id = self.push(
                Sender::Bot,
                reply.content,
                now,
                Some(reply.reply_to),
                reply.entry_id,
            );
            if fallback {
                self.show_suggestions = true;
            }
            if let Some(message) = self.messages.iter().find(|m| m.id == id) {
                delivered.push(message.clone());
            }
        }
        delivered
    }

    pub fn next_due(&self) -> Option<DateTime<Local>> {
        self.pending.front().map(|p| p.due)
    }

    pub fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Starts a new conversation: only the greeting remains.
    pub fn clear(&mut self, now: DateTime<Local>) {
        self.cancel_pending();
        self.messages.clear();
        self.next_id = 1;
        self.post_greeting(now);
    }

    pub fn rate(&mut self, message_id: u64, feedback: Feedback) -> Result<()> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or(FaqError::UnknownMessage(message_id))?;
        if message.sender != Sender::Bot || message.reply_to.is_none() {
            return Err(FaqError::InvalidArg(format!(
                "message {message_id} is not a bot reply"
            )));
        }
        message.feedback = Some(feedback);
        Ok(())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Suggestions show after the greeting and after every fallback reply,
    /// however long the conversation is; a submission hides them.
    pub fn suggestions_visible(&self) -> bool {
        self.open && self.show_suggestions
    }

    pub fn suggestions(&self) -> &[FaqEntry] {
        self.matcher.catalog().entries()
    }

    /// Question text to place in the input field for suggestion `index`.
    pub fn pick_suggestion(&self, index: usize) -> Option<&str> {
        self.suggestions().get(index).map(|e| e.question.as_str())
    }

    pub fn fallback_message(&self) -> &str {
        &self.fallback
    }

    fn post_greeting(&mut self, now: DateTime<Local>) {
        let greeting = self.options.greeting.clone();
        self.push(Sender::Bot, greeting, now, None, None);
        self.show_suggestions = true;
    }

    fn cancel_pending(&mut self) {
        if !self.pending.is_empty() {
            debug!(cancelled = self.pending.len(), "dropping pending replies");
            self.pending.clear();
        }
    }

    fn push(
        &mut self,
        sender: Sender,
        content: String,
        now: DateTime<Local>,
        reply_to: Option<u64>,
        entry_id: Option<String>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            sender,
            content,
            time: now.format(&self.options.time_format).to_string(),
            sent_at: now,
            reply_to,
            entry_id,
            feedback: None,
        });
        id
    }
}
