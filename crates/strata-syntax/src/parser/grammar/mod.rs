//! # Grammar Rules
//!
//! Each function takes a `&mut Parser` and uses its methods to:
//!
//! 1. Inspect the current token (`p.current()`, `p.at()`, `p.nth()`)
//! 2. Consume tokens (`p.bump()`, `p.bump_n()`, `p.eat()`)
//! 3. Build tree structure (`p.start()` → marker → `complete()`/`abandon()`)
//!
//! ## Module Structure
//!
//! - [`marker`] - measures a run of `=` markers
//! - [`heading`] - decides whether a run opens a heading
//! - [`continuation`] - decides where an open heading ends
//! - `markup` - the driver loop tying them to containers and code
//!
//! ## Error Recovery
//!
//! Grammar functions never fail. Unclosed containers close at end of input,
//! stray closing delimiters are text, and markers that do not open a heading
//! are text. Every input byte ends up in the tree.

pub mod continuation;
pub mod heading;
pub mod marker;
mod markup;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root document.
///
/// This is the entry point for parsing. It creates a ROOT node containing
/// everything in the document.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();
    markup::markup(p);
    m.complete(p, SyntaxKind::ROOT);
}
