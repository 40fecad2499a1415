//! Scripted transport
//!
//! Replays queued replies in order and records every command it receives.
//! Used to pin exact wire commands and to inject malformed responses or
//! connection failures.

use std::collections::VecDeque;
use std::io;

use crate::network::Transport;
use crate::protocol::Command;

/// Transport that answers from a queue of canned outcomes
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: VecDeque<io::Result<Vec<String>>>,
    sent: Vec<Command>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response
    pub fn reply<S: AsRef<str>>(mut self, raw: &[S]) -> Self {
        self.push_reply(raw);
        self
    }

    /// Queue a connection failure of the given kind
    pub fn fail(mut self, kind: io::ErrorKind) -> Self {
        self.push_failure(kind);
        self
    }

    pub fn push_reply<S: AsRef<str>>(&mut self, raw: &[S]) {
        self.replies
            .push_back(Ok(raw.iter().map(|s| s.as_ref().to_string()).collect()));
    }

    pub fn push_failure(&mut self, kind: io::ErrorKind) {
        self.replies
            .push_back(Err(io::Error::new(kind, "scripted connection failure")));
    }

    /// Every command executed so far, oldest first
    pub fn sent(&self) -> &[Command] {
        &self.sent
    }

    /// The most recent command
    pub fn last(&self) -> Option<&Command> {
        self.sent.last()
    }

    /// Replies not consumed yet
    pub fn pending(&self) -> usize {
        self.replies.len()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&mut self, command: &Command) -> io::Result<Vec<String>> {
        self.sent.push(command.clone());
        self.replies.pop_front().unwrap_or_else(|| {
            Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no scripted reply left",
            ))
        })
    }
}
