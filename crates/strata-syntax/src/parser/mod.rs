//! # Parser - Event-Based Tree Construction
//!
//! This module turns the token stream into a syntax tree using the
//! **event-based** architecture from rust-analyzer.
//!
//! ## Why Event-Based Parsing?
//!
//! Heading recognition is context sensitive and headings can nest inside
//! content containers to any depth. Instead of building tree nodes while
//! deciding, the parser emits a flat list of [`Event`]s and the [`Sink`]
//! builds the Rowan tree afterwards. A heading that turns out to be plain
//! text never leaves a half-built node behind.
//!
//! ## The Marker System
//!
//! `parser.start()` pushes a placeholder and returns a [`Marker`]. A marker
//! **must** be either completed (`marker.complete(parser, KIND)`) or abandoned
//! (`marker.abandon(parser)`); dropping it otherwise panics. The markup
//! driver keeps markers for open headings, containers and code blocks on an
//! explicit stack and completes them as those constructs close.
//!
//! ## Context
//!
//! The parser owns a [`ContextTracker`]: the single source of truth for
//! whether the current position is a block start. Grammar code reads
//! snapshots from it and reports newlines, containers and code blocks back.
//!
//! ## Public API
//!
//! ```
//! use strata_syntax::parse;
//!
//! let tree = parse("= Hello\n");
//! println!("{:#?}", tree);
//! ```

pub mod context;
pub mod event;
pub mod sink;

pub(crate) mod grammar;

pub use context::{ContextState, ContextTracker};
pub use grammar::continuation::{Continuation, LineStart};
pub use grammar::heading::{EscapeState, Resolution, resolve};
pub use grammar::marker::MarkerRun;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// The parser state machine.
///
/// Holds the token stream, current position, accumulated events and the
/// block context. Grammar functions receive `&mut Parser` and use its
/// methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `at()`, `at_end()`, `column()`
/// - Consume tokens: `bump()`, `bump_n()`, `eat()`
/// - Build structure: `start()` → `Marker` → `complete()`/`abandon()`
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
    /// Byte offset of each token, plus one trailing entry for end of input.
    offsets: Vec<usize>,
    /// Column (in chars since the last line break) of each token.
    columns: Vec<usize>,
    pub(crate) context: ContextTracker,
}

impl<'t, 'input> Parser<'t, 'input> {
    /// Create a new parser from a slice of tokens.
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        let mut offsets = Vec::with_capacity(tokens.len() + 1);
        let mut columns = Vec::with_capacity(tokens.len());
        let mut offset = 0;
        let mut column = 0;

        for token in tokens {
            offsets.push(offset);
            columns.push(column);
            offset += token.text.len();
            column = if token.kind == SyntaxKind::NEWLINE {
                0
            } else {
                column + token.text.chars().count()
            };
        }
        offsets.push(offset);

        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            offsets,
            columns,
            context: ContextTracker::new(),
        }
    }

    /// Parse the tokens and return a syntax tree.
    pub fn parse(mut self) -> SyntaxNode {
        grammar::root(&mut self);
        log::debug!(
            "parsed {} tokens into {} events",
            self.tokens.len(),
            self.events.len()
        );
        let sink = Sink::new(self.tokens, self.events);
        sink.finish()
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Text of the token n ahead, or "" past the end.
    pub fn nth_text(&self, n: usize) -> &'input str {
        self.tokens.get(self.pos + n).map(|t| t.text).unwrap_or("")
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Consume n tokens as a single composite token.
    pub fn bump_n(&mut self, n: usize, kind: SyntaxKind) {
        if n > 0 && self.pos + n <= self.tokens.len() {
            self.events.push(Event::Token {
                kind,
                n_raw_tokens: n as u32,
            });
            self.pos += n;
        }
    }

    /// Get the text of the current token.
    pub fn current_text(&self) -> &'input str {
        self.nth_text(0)
    }

    /// Byte offset of the token n ahead (end of input past the last token).
    pub fn offset(&self, n: usize) -> usize {
        let last = self.offsets.len() - 1;
        self.offsets[(self.pos + n).min(last)]
    }

    /// Column of the current token within its line.
    pub fn column(&self) -> usize {
        self.columns.get(self.pos).copied().unwrap_or(0)
    }

    /// Number of consecutive `kind` tokens starting at the current position.
    pub fn run_len(&self, kind: SyntaxKind) -> usize {
        let mut n = 0;
        while self.nth(n) == kind {
            n += 1;
        }
        n
    }
}

/// A marker for a node being constructed.
///
/// When you call `parser.start()`, a `Placeholder` event is pushed and you
/// get a `Marker` pointing to it. Every marker must be completed or
/// abandoned; dropping one otherwise panics, which catches grammar bugs
/// before they produce a corrupt tree.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() or abandon() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::start(kind);
        p.events.push(Event::Finish);
    }

    /// Abandon this marker without creating a node.
    ///
    /// The placeholder is removed if nothing was pushed after it; otherwise it
    /// stays inert and the Sink skips it.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// Parse markup source into a syntax tree.
pub fn parse(source: &str) -> SyntaxNode {
    let tokens = lex(source);
    let parser = Parser::new(&tokens);
    parser.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_empty_input() {
        let tree = parse("");
        assert_eq!(tree.kind(), SyntaxKind::ROOT);
        assert_eq!(tree.children().count(), 0);
    }

    #[test]
    fn parse_preserves_all_text() {
        let input = "= Hello\n  world\n\\= not [= a {b}] `c`";
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn columns_reset_after_newline() {
        let tokens = lex("ab =\n  =");
        let mut parser = Parser::new(&tokens);
        parser.pos = 2;
        assert_eq!(parser.current(), SyntaxKind::EQ);
        assert_eq!(parser.column(), 3);

        parser.pos = 5;
        assert_eq!(parser.current(), SyntaxKind::EQ);
        assert_eq!(parser.column(), 2);
    }

    #[test]
    fn columns_count_chars_not_bytes() {
        let tokens = lex("éé =");
        let mut parser = Parser::new(&tokens);
        parser.pos = 2;
        assert_eq!(parser.column(), 3);
        assert_eq!(parser.offset(0), 5);
    }

    #[test]
    fn offset_past_end_is_input_length() {
        let tokens = lex("==");
        let parser = Parser::new(&tokens);
        assert_eq!(parser.offset(0), 0);
        assert_eq!(parser.offset(2), 2);
        assert_eq!(parser.offset(10), 2);
    }

    #[test]
    fn run_len_counts_consecutive_kinds() {
        let tokens = lex("=== x");
        let parser = Parser::new(&tokens);
        assert_eq!(parser.run_len(SyntaxKind::EQ), 3);
        assert_eq!(parser.run_len(SyntaxKind::TEXT), 0);
    }

    #[test]
    fn marker_must_be_completed() {
        let result = std::panic::catch_unwind(|| {
            let tokens = lex("test");
            let mut parser = Parser::new(&tokens);
            let _marker = parser.start();
        });
        assert!(result.is_err());
    }

    #[test]
    fn marker_can_be_abandoned() {
        let tokens = lex("test");
        let mut parser = Parser::new(&tokens);
        let marker = parser.start();
        marker.abandon(&mut parser);
        assert!(parser.events.is_empty());
    }
}
