//! # Context Tracking
//!
//! Whether a `=` run opens a heading depends on *where* it sits: only a
//! position that starts fresh block content qualifies. That is:
//!
//! - the start of the document,
//! - the first character inside a newly opened content container (`[`),
//! - a line start whose indentation reaches the current frame's base indent,
//!
//! and never the inside of a code block (`{...}` or a raw span).
//!
//! The state lives in [`ContextState`], a small `Copy` snapshot. Transitions
//! are methods that return a new snapshot, so every decision the grammar
//! makes can be replayed from a value. [`ContextTracker`] keeps one snapshot
//! per open container in an explicit stack; nesting levels never share
//! mutable fields.

/// Block-start bookkeeping for one container frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextState {
    /// True when nothing but horizontal whitespace has been consumed since
    /// the last block boundary.
    pub at_block_start: bool,
    /// Minimum indentation a new line needs to count as a block start.
    pub base_indent: usize,
    /// Number of code blocks currently open in this frame.
    pub inside_code: usize,
}

impl ContextState {
    /// The frame for the top-level document.
    pub fn document() -> Self {
        Self {
            at_block_start: true,
            base_indent: 0,
            inside_code: 0,
        }
    }

    /// The frame for a content container; its first character is a block start.
    pub fn container() -> Self {
        Self::document()
    }

    /// The frame for a heading body whose first marker sits at `start_column`.
    ///
    /// The body begins mid-line, after the marker, so it is not at a block
    /// start. Continuation lines must be indented past the marker column.
    pub fn heading_body(start_column: usize) -> Self {
        Self {
            at_block_start: false,
            base_indent: start_column + 1,
            inside_code: 0,
        }
    }

    /// Whether a marker run at the current position may open a heading.
    pub fn block_start(self) -> bool {
        self.at_block_start && self.inside_code == 0
    }

    /// A newline was consumed and the next line is indented by `indent`.
    #[must_use]
    pub fn on_newline(self, indent: usize) -> Self {
        Self {
            at_block_start: indent >= self.base_indent,
            ..self
        }
    }

    /// Non-whitespace content was consumed.
    #[must_use]
    pub fn on_content(self) -> Self {
        Self {
            at_block_start: false,
            ..self
        }
    }

    /// A code block delimiter opened; the delimiter itself is content.
    #[must_use]
    pub fn enter_code_block(self) -> Self {
        Self {
            at_block_start: false,
            inside_code: self.inside_code + 1,
            ..self
        }
    }

    /// A code block closed; the closing delimiter is content too.
    #[must_use]
    pub fn exit_code_block(self) -> Self {
        Self {
            at_block_start: false,
            inside_code: self.inside_code.saturating_sub(1),
            ..self
        }
    }
}

impl Default for ContextState {
    fn default() -> Self {
        Self::document()
    }
}

/// Stack of [`ContextState`] frames, one per open container.
///
/// The document frame is always present and can never be popped.
#[derive(Debug, Clone, Default)]
pub struct ContextTracker {
    current: ContextState,
    saved: Vec<ContextState>,
}

impl ContextTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the innermost frame.
    pub fn state(&self) -> ContextState {
        self.current
    }

    /// Whether the current position is a block start.
    pub fn at_block_start(&self) -> bool {
        self.current.block_start()
    }

    /// Number of containers open above the document frame.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn on_newline(&mut self, indent: usize) {
        self.current = self.current.on_newline(indent);
    }

    pub fn on_content(&mut self) {
        self.current = self.current.on_content();
    }

    /// Push `frame` as the innermost context.
    ///
    /// The enclosing frame is saved as having consumed content: once the
    /// container closes, the position after it is mid-line.
    pub fn on_container_open(&mut self, frame: ContextState) {
        let outer = std::mem::replace(&mut self.current, frame);
        self.saved.push(outer.on_content());
    }

    /// Pop the innermost frame, restoring the enclosing one.
    pub fn on_container_close(&mut self) {
        if let Some(outer) = self.saved.pop() {
            self.current = outer;
        }
    }

    pub fn enter_code_block(&mut self) {
        self.current = self.current.enter_code_block();
    }

    pub fn exit_code_block(&mut self) {
        self.current = self.current.exit_code_block();
    }
}
