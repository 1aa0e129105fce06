//! The markup driver.
//!
//! A single loop walks the token stream once. Nesting is not expressed by
//! recursive grammar calls but by an explicit stack of open constructs
//! ([`Open`]); each one owns the [`Marker`] of its node and is completed when
//! the construct ends. Block context lives in the parser's
//! [`ContextTracker`](crate::parser::ContextTracker):
//!
//! | Construct        | Node            | Context effect                   |
//! |------------------|-----------------|----------------------------------|
//! | `= ...` heading  | `HEADING`       | pushes a heading-body frame      |
//! | `[...]`          | `CONTENT_BLOCK` | pushes a fresh container frame   |
//! | `{...}`          | `CODE_BLOCK`    | `inside_code += 1` on this frame |
//! | `` `...` ``      | `RAW`           | `inside_code += 1` on this frame |

use crate::parser::context::ContextState;
use crate::parser::{Marker, Parser};
use crate::syntax_kind::SyntaxKind;

use super::continuation;
use super::heading::{self, OpenHeading};

const EMPTY_RAW: usize = 2;

/// A construct whose node is still open.
enum Open {
    Heading(OpenHeading),
    Content(Marker),
    Code(Marker),
    Raw { marker: Marker, ticks: usize },
}

impl Open {
    /// Whether this construct owns a context frame (as opposed to only
    /// bumping `inside_code` on its parent's frame).
    fn owns_frame(&self) -> bool {
        matches!(self, Open::Heading(_) | Open::Content(_))
    }
}

/// Parse markup until the end of input, closing whatever is left open.
pub fn markup(p: &mut Parser<'_, '_>) {
    let mut open: Vec<Open> = Vec::new();

    while !p.at_end() {
        step(p, &mut open);
    }

    while let Some(construct) = open.pop() {
        close(p, construct);
    }
    debug_assert_eq!(p.context.depth(), 0);
}

fn step(p: &mut Parser<'_, '_>, open: &mut Vec<Open>) {
    if let Some(&Open::Raw { ticks, .. }) = open.last() {
        return raw_step(p, open, ticks);
    }

    match p.current() {
        SyntaxKind::NEWLINE => newline(p, open),
        SyntaxKind::WHITESPACE => p.bump(),
        SyntaxKind::EQ => markers(p, open),
        SyntaxKind::ESCAPE if p.current_text()[1..].starts_with('=') => markers(p, open),
        SyntaxKind::LBRACKET => {
            p.context.on_container_open(ContextState::container());
            let m = p.start();
            p.bump();
            open.push(Open::Content(m));
        }
        SyntaxKind::LBRACE => {
            p.context.enter_code_block();
            let m = p.start();
            p.bump();
            open.push(Open::Code(m));
        }
        SyntaxKind::BACKTICK => raw_open(p, open),
        SyntaxKind::RBRACKET => closing_delimiter(p, open, |o| matches!(o, Open::Content(_))),
        SyntaxKind::RBRACE => closing_delimiter(p, open, |o| matches!(o, Open::Code(_))),
        _ => {
            p.bump();
            p.context.on_content();
        }
    }
}

fn markers(p: &mut Parser<'_, '_>, open: &mut Vec<Open>) {
    if let Some(heading) = heading::heading_or_text(p) {
        open.push(Open::Heading(heading));
    }
}

/// Two backticks alone are an empty raw span, not an opener.
fn raw_open(p: &mut Parser<'_, '_>, open: &mut Vec<Open>) {
    let ticks = p.run_len(SyntaxKind::BACKTICK);
    let m = p.start();
    for _ in 0..ticks {
        p.bump();
    }
    if ticks == EMPTY_RAW {
        m.complete(p, SyntaxKind::RAW);
        p.context.on_content();
    } else {
        p.context.enter_code_block();
        open.push(Open::Raw { marker: m, ticks });
    }
}

/// Inside a raw span everything is literal until a backtick run of exactly
/// the opening length.
fn raw_step(p: &mut Parser<'_, '_>, open: &mut Vec<Open>, ticks: usize) {
    match p.current() {
        SyntaxKind::NEWLINE => newline(p, open),
        SyntaxKind::BACKTICK => {
            let run = p.run_len(SyntaxKind::BACKTICK);
            for _ in 0..run {
                p.bump();
            }
            if run == ticks
                && let Some(raw) = open.pop()
            {
                close(p, raw);
            }
        }
        _ => p.bump(),
    }
}

/// A newline either continues every open heading or ends the innermost ones.
///
/// Only the construct owning the current context frame gets a say: a newline
/// inside a content container belongs to the container, and a newline inside
/// a code block belongs to the heading that contains the block, which then
/// always continues.
fn newline(p: &mut Parser<'_, '_>, open: &mut Vec<Open>) {
    let next = continuation::next_line(p);

    while let Some(owner) = open.iter().rposition(Open::owns_frame) {
        let ends = match &open[owner] {
            Open::Heading(heading) => !heading.continuation.continues(p.context.state(), next),
            _ => false,
        };
        if !ends {
            break;
        }
        close_through(p, open, owner);
    }

    p.bump();
    let indent = if p.at(SyntaxKind::WHITESPACE) {
        let indent = p.current_text().chars().count();
        p.bump();
        indent
    } else {
        0
    };
    p.context.on_newline(indent);
}

/// Handle `]` or `}`.
///
/// It closes the innermost construct other than a heading if `is_target`
/// accepts it, ending any headings opened inside it first.
/// Otherwise the delimiter is stray and counts as text.
fn closing_delimiter(
    p: &mut Parser<'_, '_>,
    open: &mut Vec<Open>,
    is_target: impl Fn(&Open) -> bool,
) {
    let target = open
        .iter()
        .rposition(|o| !matches!(o, Open::Heading(_)))
        .filter(|&i| is_target(&open[i]));

    match target {
        Some(index) => {
            close_through(p, open, index + 1);
            p.bump();
            if let Some(construct) = open.pop() {
                close(p, construct);
            }
        }
        None => {
            p.bump();
            p.context.on_content();
        }
    }
}

/// Close every construct at `index` and above, innermost first.
fn close_through(p: &mut Parser<'_, '_>, open: &mut Vec<Open>, index: usize) {
    while open.len() > index {
        if let Some(construct) = open.pop() {
            close(p, construct);
        }
    }
}

fn close(p: &mut Parser<'_, '_>, construct: Open) {
    match construct {
        Open::Heading(h) => heading::close(p, h),
        Open::Content(m) => {
            p.context.on_container_close();
            m.complete(p, SyntaxKind::CONTENT_BLOCK);
        }
        Open::Code(m) => {
            p.context.exit_code_block();
            m.complete(p, SyntaxKind::CODE_BLOCK);
        }
        Open::Raw { marker, .. } => {
            p.context.exit_code_block();
            marker.complete(p, SyntaxKind::RAW);
        }
    }
}
