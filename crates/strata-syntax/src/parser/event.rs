//! # Parser Events
//!
//! The parser never touches Rowan directly. It emits a **flat sequence** of
//! events and the [`Sink`](super::sink::Sink) turns them into a tree:
//!
//! ```text
//! Start(HEADING)
//!   Token(HEADING_MARKER, 2 raw)   ← `==` folded into one token
//!   Token(WHITESPACE)
//!   Token(TEXT)
//! Finish
//! Token(NEWLINE)                   ← terminating newline stays outside
//! ```
//!
//! Because headings, content blocks and code blocks are opened and closed by
//! the flat markup driver rather than by nested function calls, events are
//! also the only place where nesting is recorded: every `Start` is matched by
//! exactly one `Finish`.

use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node.
    Start { kind: SyntaxKind },

    /// Add a token to the current node, gluing `n_raw_tokens` lexer tokens
    /// into one (a run of `EQ` becomes a single `HEADING_MARKER`).
    Token { kind: SyntaxKind, n_raw_tokens: u32 },

    /// Finish the current node.
    Finish,

    /// Reserved slot for a node whose kind is not decided yet. Abandoned
    /// placeholders are skipped by the sink.
    Placeholder,
}

impl Event {
    /// Create a start event.
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start { kind }
    }

    /// Create a token event for a single raw token.
    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token {
            kind,
            n_raw_tokens: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_start_creation() {
        assert_eq!(
            Event::start(SyntaxKind::HEADING),
            Event::Start {
                kind: SyntaxKind::HEADING
            }
        );
    }

    #[test]
    fn event_token_creation() {
        assert_eq!(
            Event::token(SyntaxKind::EQ),
            Event::Token {
                kind: SyntaxKind::EQ,
                n_raw_tokens: 1
            }
        );
    }
}
