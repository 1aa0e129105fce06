//! Heading continuation across lines.
//!
//! A heading body does not stop at the first line break. Each time the body
//! reaches a newline, the line after it is inspected (one line of lookahead)
//! and the heading either swallows it or ends.

use crate::parser::Parser;
use crate::parser::context::ContextState;
use crate::syntax_kind::SyntaxKind;

/// What follows a newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStart {
    /// Content after `indent` columns of whitespace.
    Indented(usize),
    /// A line holding nothing but whitespace.
    Blank,
    /// End of input.
    End,
}

/// Peek at the line following the newline at the current position.
pub fn next_line(p: &Parser<'_, '_>) -> LineStart {
    debug_assert!(p.at(SyntaxKind::NEWLINE));
    let (indent, after) = if p.nth(1) == SyntaxKind::WHITESPACE {
        (p.nth_text(1).chars().count(), 2)
    } else {
        (0, 1)
    };

    match p.nth(after) {
        SyntaxKind::EOF => LineStart::End,
        SyntaxKind::NEWLINE => LineStart::Blank,
        _ => LineStart::Indented(indent),
    }
}

/// Extent tracking for one open heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Continuation {
    start_column: usize,
}

impl Continuation {
    pub fn new(start_column: usize) -> Self {
        Self { start_column }
    }

    /// Column of the heading's first marker.
    pub fn start_column(&self) -> usize {
        self.start_column
    }

    /// Whether the heading body goes on past the current newline.
    ///
    /// `body` is the heading's own context frame. While a code block opened
    /// in the body is still open, every line belongs to the body. Otherwise
    /// the next line must hold content indented past the marker column.
    pub fn continues(&self, body: ContextState, next: LineStart) -> bool {
        if body.inside_code > 0 {
            return true;
        }
        match next {
            LineStart::Indented(indent) => indent > self.start_column,
            LineStart::Blank | LineStart::End => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn peek(input: &str) -> LineStart {
        let tokens = lex(input);
        let parser = Parser::new(&tokens);
        next_line(&parser)
    }

    #[rstest]
    #[case("\nabc", LineStart::Indented(0))]
    #[case("\n  abc", LineStart::Indented(2))]
    #[case("\n\tabc", LineStart::Indented(1))]
    #[case("\n\n", LineStart::Blank)]
    #[case("\n   \nx", LineStart::Blank)]
    #[case("\n", LineStart::End)]
    #[case("\n  ", LineStart::End)]
    fn peeks_next_line(#[case] input: &str, #[case] expected: LineStart) {
        assert_eq!(peek(input), expected);
    }

    #[test]
    fn continues_only_past_marker_column() {
        let body = ContextState::heading_body(0);
        let heading = Continuation::new(0);
        assert!(!heading.continues(body, LineStart::Indented(0)));
        assert!(heading.continues(body, LineStart::Indented(1)));

        let nested = Continuation::new(4);
        assert!(!nested.continues(body, LineStart::Indented(4)));
        assert!(nested.continues(body, LineStart::Indented(5)));
    }

    #[test]
    fn blank_line_and_end_terminate() {
        let heading = Continuation::new(0);
        let body = ContextState::heading_body(0);
        assert!(!heading.continues(body, LineStart::Blank));
        assert!(!heading.continues(body, LineStart::End));
    }

    #[test]
    fn open_code_block_suspends_termination() {
        let heading = Continuation::new(2);
        let body = ContextState::heading_body(2).enter_code_block();
        assert!(heading.continues(body, LineStart::Indented(0)));
        assert!(heading.continues(body, LineStart::Blank));

        let closed = body.exit_code_block();
        assert!(!heading.continues(closed, LineStart::Indented(0)));
    }
}
