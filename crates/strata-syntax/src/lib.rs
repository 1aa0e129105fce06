//! # strata-syntax
//!
//! Context-sensitive heading recognition for `=` markup, built as a lossless
//! syntax tree using [Rowan] + [Logos], following the [rust-analyzer]
//! architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## The Problem
//!
//! The same characters mean different things depending on where they stand:
//!
//! ```text
//! = Title          a level 1 heading
//! No = heading     plain text, the marker is mid-line
//! \= No heading    plain text, the marker is escaped
//! =x               plain text, the marker is glued to its body
//! [= Inner]        a heading, content containers start a fresh block
//! {= code}         plain text, code suspends headings
//! ```
//!
//! A heading also extends over following lines indented past its marker, and
//! over any code block opened inside it.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree → Nodes
//!               (Logos)          (Grammar)        (GreenNodeBuilder)  (lowering)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! [Logos] splits the input into a flat token stream. Every character belongs
//! to exactly one token, and each `=` is its own token so marker runs can be
//! measured by the parser.
//!
//! ### 2. Parser ([`parser`] module)
//!
//! A single loop over tokens keeps an explicit stack of open constructs and a
//! [`ContextTracker`] answering "is this a block start?". At each `=` the
//! [marker scanner](parser::MarkerRun) measures the run, the pure
//! [`resolve`] function decides, and at each newline the
//! [`Continuation`] of every open heading decides whether the heading goes
//! on.
//!
//! ### 3. Sink ([`parser::sink`] module)
//!
//! Events become a Rowan green tree. `parse(src).text() == src` always.
//!
//! ### 4. Lowering ([`node`] module) and outline ([`outline`] module)
//!
//! The CST lowers to [`Node`]s with escapes resolved and markers turned into
//! levels; the outline numbers every heading through a
//! [`NumberingPattern`].
//!
//! ## Module Structure
//!
//! ```text
//! strata-syntax/
//! ├── lib.rs             # This file - public API and tree snapshot tests
//! ├── syntax_kind.rs     # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── lexer.rs           # Logos-based tokenizer
//! ├── level.rs           # HeadingLevel newtype
//! ├── node.rs            # CST → Node lowering
//! ├── outline.rs         # Heading counters
//! ├── numbering.rs       # Numbering patterns (1.a.i, I., *)
//! └── parser/
//!     ├── mod.rs         # Parser struct, Marker system, public parse() function
//!     ├── context.rs     # ContextState snapshots and the frame stack
//!     ├── event.rs       # Event enum (Start, Token, Finish, Placeholder)
//!     ├── sink.rs        # Converts events to Rowan GreenNode
//!     └── grammar/
//!         ├── mod.rs          # Root document parsing
//!         ├── marker.rs       # Marker run scanning
//!         ├── heading.rs      # Heading resolution
//!         ├── continuation.rs # Multi-line heading extent
//!         └── markup.rs       # The driver loop
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use strata_syntax::{parse, parse_nodes, Node, SyntaxKind};
//!
//! let tree = parse("= Hello\n");
//!
//! // The tree preserves all text
//! assert_eq!(tree.text().to_string(), "= Hello\n");
//!
//! // Navigate the tree structure
//! assert_eq!(tree.kind(), SyntaxKind::ROOT);
//! let heading = tree.children().next().unwrap();
//! assert_eq!(heading.kind(), SyntaxKind::HEADING);
//!
//! // Or work with lowered nodes
//! let nodes = parse_nodes("= Hello\n");
//! let Node::Heading(h) = &nodes[0] else { unreachable!() };
//! assert_eq!(h.level.get(), 1);
//! assert_eq!(h.title(), "Hello");
//! ```

pub mod level;
pub mod lexer;
pub mod node;
pub mod numbering;
pub mod outline;
pub mod parser;
pub mod syntax_kind;

pub use level::{HeadingLevel, HeadingLevelError};
pub use node::{Heading, Node, dump, lower, parse_nodes};
pub use numbering::{NumberingError, NumberingPattern};
pub use outline::{OutlineEntry, outline};
pub use parser::{
    ContextState, ContextTracker, Continuation, EscapeState, LineStart, MarkerRun, Resolution,
    parse, resolve,
};
pub use syntax_kind::{MarkupLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
