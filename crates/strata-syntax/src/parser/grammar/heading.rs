//! Heading resolution.
//!
//! Deciding whether a marker run is a heading is a pure function of four
//! local facts: the context snapshot, the escape state, the scanned run and
//! the token right after it. [`resolve`] is total over them; "not a heading"
//! is the common case, not an error, so it is just another [`Resolution`].
//!
//! Rejection is checked in a fixed order: context first, then escape, then
//! an empty run, then a glued follower. An escaped run followed by a glued
//! character is therefore reported as escaped.

use crate::level::HeadingLevel;
use crate::parser::context::ContextState;
use crate::parser::{Marker, Parser};
use crate::syntax_kind::SyntaxKind;

use super::continuation::Continuation;
use super::marker::{self, MarkerRun};

/// Whether the character at the candidate position is escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeState {
    #[default]
    Unescaped,
    /// Directly preceded by an unescaped backslash.
    Escaped,
}

/// Outcome of a heading recognition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Open a heading of this level.
    Heading { level: HeadingLevel },
    /// The markers are literal text.
    Plain,
}

/// Decide whether `run` opens a heading.
///
/// `follower` is the kind of the token directly after the run (`EOF` at end
/// of input).
pub fn resolve(
    context: ContextState,
    escape: EscapeState,
    run: Option<MarkerRun>,
    follower: SyntaxKind,
) -> Resolution {
    if !context.block_start() {
        return Resolution::Plain;
    }
    if escape == EscapeState::Escaped {
        return Resolution::Plain;
    }
    let Some(run) = run else {
        return Resolution::Plain;
    };
    if !follower.ends_marker_run() {
        return Resolution::Plain;
    }

    Resolution::Heading {
        level: HeadingLevel::clamped(run.count),
    }
}

/// A heading the markup driver has opened but not yet closed.
pub struct OpenHeading {
    pub marker: Marker,
    pub level: HeadingLevel,
    pub continuation: Continuation,
}

/// Try to open a heading at the current position.
///
/// The current token is either `EQ` or an `ESCAPE` of the marker character.
/// On success the marker run and the whitespace after it are consumed, a
/// heading-body frame is pushed on the context tracker and the open heading
/// is returned. Otherwise the run is consumed as plain text.
pub fn heading_or_text(p: &mut Parser<'_, '_>) -> Option<OpenHeading> {
    let (skip, escape) = if p.at(SyntaxKind::ESCAPE) {
        (1, EscapeState::Escaped)
    } else {
        (0, EscapeState::Unescaped)
    };

    let column = p.column();
    let run = marker::scan(p, skip);
    let run_len = run.map_or(0, |r| r.count);
    let follower = p.nth(skip + run_len);

    let m = p.start();
    match resolve(p.context.state(), escape, run, follower) {
        Resolution::Heading { level } => {
            p.bump_n(run_len, SyntaxKind::HEADING_MARKER);
            p.eat(SyntaxKind::WHITESPACE);
            p.context
                .on_container_open(ContextState::heading_body(column));
            log::trace!("open level {level} heading at column {column}");
            Some(OpenHeading {
                marker: m,
                level,
                continuation: Continuation::new(column),
            })
        }
        Resolution::Plain => {
            m.abandon(p);
            for _ in 0..(skip + run_len).max(1) {
                p.bump();
            }
            p.context.on_content();
            None
        }
    }
}

/// Finish an open heading and restore the enclosing context.
pub fn close(p: &mut Parser<'_, '_>, heading: OpenHeading) {
    p.context.on_container_close();
    heading.marker.complete(p, SyntaxKind::HEADING);
    log::trace!(
        "close level {} heading from column {}",
        heading.level,
        heading.continuation.start_column()
    );
}
