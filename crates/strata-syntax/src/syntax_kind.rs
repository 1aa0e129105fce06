//! SyntaxKind enum for all tokens and nodes in the markup CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the markup CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// Plain text content
    TEXT,
    /// A single `=` heading marker character
    EQ,
    /// Backslash plus the character it escapes, e.g. `\=`
    ESCAPE,
    /// `[` opening a content container
    LBRACKET,
    /// `]` closing a content container
    RBRACKET,
    /// `{` opening a code block
    LBRACE,
    /// `}` closing a code block
    RBRACE,
    /// Single backtick for raw spans
    BACKTICK,
    /// A run of `=` accepted as a heading marker (composite of EQ tokens)
    HEADING_MARKER,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    ROOT,
    /// Heading (`= ...`), including its continuation lines
    HEADING,
    /// Content container (`[...]`), a fresh block context
    CONTENT_BLOCK,
    /// Code block (`{...}`), suspends heading recognition
    CODE_BLOCK,
    /// Raw span or block (`` `...` ``, ```` ```...``` ````)
    RAW,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace/newlines).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE)
    }

    /// Returns true if a heading marker run may be followed by this kind.
    ///
    /// The marker must be separated from its body by whitespace or sit at a
    /// line end; anything glued to it makes the run literal text.
    pub fn ends_marker_run(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE | Self::EOF)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkupLang {}

impl rowan::Language for MarkupLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::RAW as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<MarkupLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<MarkupLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<MarkupLang>;
