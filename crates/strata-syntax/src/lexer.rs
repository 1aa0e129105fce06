//! # Lexer - Tokenizing Markup Source
//!
//! This module provides the first stage of parsing: breaking source text into
//! tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token. Nothing is skipped,
//! which is what lets the CST reproduce its source:
//!
//! ```
//! use strata_syntax::lexer::lex;
//!
//! let input = "= Hello, world!\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! Tokens are **context-free**. The lexer has no idea whether `=` starts a
//! heading or sits in the middle of a sentence; that decision needs the block
//! context, which only the parser tracks. So each `=` becomes its own `EQ`
//! token and the parser's marker scanner counts runs of them.
//!
//! Escapes are the one exception: `\` glued to a non-space character is lexed
//! as a single `ESCAPE` token, so an escaped marker can never be confused with
//! the start of a run.
//!
//! Everything else becomes `TEXT`, grouped into runs for efficiency.

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`SyntaxKind`] because Logos needs to
/// derive on it. Each variant maps to a corresponding `SyntaxKind` token.
///
/// [`SyntaxKind`]: crate::syntax_kind::SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"")]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    /// `=` heading marker character
    #[token("=")]
    Eq,

    /// Backslash escape: `\` plus one non-space character
    #[regex(r"\\[^\s]")]
    Escape,

    /// `[` opens a content container
    #[token("[")]
    LBracket,

    /// `]` closes a content container
    #[token("]")]
    RBracket,

    /// `{` opens a code block
    #[token("{")]
    LBrace,

    /// `}` closes a code block
    #[token("}")]
    RBrace,

    /// Single backtick
    #[token("`")]
    Backtick,

    /// Plain text - anything not matched by other rules
    #[regex(r"[^\s\\\[\]{}=`]+")]
    Text,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::Escape => SyntaxKind::ESCAPE,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::LBrace => SyntaxKind::LBRACE,
            TokenKind::RBrace => SyntaxKind::RBRACE,
            TokenKind::Backtick => SyntaxKind::BACKTICK,
            TokenKind::Text => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            // Unrecognized input (a lone `\`, a bare `\r`) is plain text
            Err(()) => SyntaxKind::TEXT,
        };
        tokens.push((Token { kind, text }, span));
    }

    tokens
}
