//! Lowering from the lossless CST to the output node sequence.
//!
//! The CST keeps every byte; the node sequence keeps meaning. Heading markers
//! and the whitespace after them become the heading's level, the backslash of
//! an escape disappears, and continuation-line indentation is dropped from
//! markup text. Code and raw content stays verbatim.

use std::fmt::Write as _;

use rowan::NodeOrToken;

use crate::level::HeadingLevel;
use crate::parser::parse;
use crate::syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// One element of the lowered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Heading(Heading),
    /// Literal text, escapes resolved.
    Text(String),
    /// The inside of a `[...]` container.
    Content(Vec<Node>),
    /// The inside of a `{...}` code block, verbatim apart from nested
    /// content containers.
    Code(Vec<Node>),
    /// The inside of a raw span, delimiters removed.
    Raw(String),
}

/// A recognized heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: HeadingLevel,
    pub body: Vec<Node>,
    /// Column (in chars) of the first marker.
    pub start_column: usize,
}

impl Heading {
    /// The heading's own text on a single line, nested headings excluded.
    pub fn title(&self) -> String {
        let mut text = String::new();
        for node in &self.body {
            node.collect_text(&mut text);
        }
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Node {
    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Heading(_) => {}
            Node::Text(text) | Node::Raw(text) => out.push_str(text),
            Node::Content(nodes) | Node::Code(nodes) => {
                for node in nodes {
                    node.collect_text(out);
                }
            }
        }
    }

    /// Child nodes, if this node has any.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Heading(heading) => &heading.body,
            Node::Content(nodes) | Node::Code(nodes) => nodes,
            Node::Text(_) | Node::Raw(_) => &[],
        }
    }
}

/// Parse `source` and lower it to nodes.
pub fn parse_nodes(source: &str) -> Vec<Node> {
    lower(&parse(source))
}

/// Lower a parsed document.
pub fn lower(root: &SyntaxNode) -> Vec<Node> {
    let mut markup = Markup::default();
    markup.elements(root.children_with_tokens());
    markup.finish()
}

/// Render nodes as an indented outline, one node per line.
///
/// ```text
/// Heading level=1 column=0
///   Text "This"
/// Text "is not."
/// ```
pub fn dump(nodes: &[Node]) -> String {
    let mut out = String::new();
    dump_into(&mut out, nodes, 0);
    out
}

fn dump_into(out: &mut String, nodes: &[Node], depth: usize) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        // Writing to a String cannot fail.
        let _ = match node {
            Node::Heading(h) => writeln!(
                out,
                "{indent}Heading level={} column={}",
                h.level, h.start_column
            ),
            Node::Text(text) => writeln!(out, "{indent}Text {text:?}"),
            Node::Content(_) => writeln!(out, "{indent}Content"),
            Node::Code(_) => writeln!(out, "{indent}Code"),
            Node::Raw(text) => writeln!(out, "{indent}Raw {text:?}"),
        };
        dump_into(out, node.children(), depth + 1);
    }
}

/// Accumulates markup-mode text and nodes for one sequence.
#[derive(Default)]
struct Markup {
    nodes: Vec<Node>,
    text: String,
    line_start: bool,
}

impl Markup {
    fn elements(&mut self, elements: impl Iterator<Item = SyntaxElement>) {
        for element in elements {
            match element {
                NodeOrToken::Token(token) => self.token(&token),
                NodeOrToken::Node(node) => {
                    self.line_start = false;
                    self.push(lower_node(&node));
                }
            }
        }
    }

    fn token(&mut self, token: &SyntaxToken) {
        let line_start = std::mem::replace(&mut self.line_start, false);
        match token.kind() {
            SyntaxKind::NEWLINE => {
                self.text.push('\n');
                self.line_start = true;
            }
            SyntaxKind::WHITESPACE if line_start => {}
            SyntaxKind::ESCAPE => self.text.push_str(&token.text()[1..]),
            _ => self.text.push_str(token.text()),
        }
    }

    fn push(&mut self, node: Node) {
        self.flush();
        self.nodes.push(node);
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.nodes.push(Node::Text(std::mem::take(&mut self.text)));
        }
    }

    /// Trim text at the edges of the sequence and next to headings.
    fn finish(mut self) -> Vec<Node> {
        self.flush();
        let is_heading: Vec<bool> = self
            .nodes
            .iter()
            .map(|n| matches!(n, Node::Heading(_)))
            .collect();
        let last = self.nodes.len().saturating_sub(1);

        self.nodes
            .into_iter()
            .enumerate()
            .filter_map(|(i, node)| match node {
                Node::Text(text) => {
                    let mut trimmed = text.as_str();
                    if i == 0 || is_heading[i - 1] {
                        trimmed = trimmed.trim_start();
                    }
                    if i == last || is_heading[i + 1] {
                        trimmed = trimmed.trim_end();
                    }
                    (!trimmed.is_empty()).then(|| Node::Text(trimmed.to_owned()))
                }
                other => Some(other),
            })
            .collect()
    }
}

/// Accumulates verbatim text for code blocks.
#[derive(Default)]
struct Verbatim {
    nodes: Vec<Node>,
    text: String,
}

impl Verbatim {
    fn elements(&mut self, elements: impl Iterator<Item = SyntaxElement>) {
        for element in elements {
            match element {
                NodeOrToken::Token(token) => self.text.push_str(token.text()),
                NodeOrToken::Node(node) => match node.kind() {
                    SyntaxKind::CONTENT_BLOCK => {
                        if !self.text.is_empty() {
                            self.nodes.push(Node::Text(std::mem::take(&mut self.text)));
                        }
                        self.nodes.push(lower_node(&node));
                    }
                    SyntaxKind::CODE_BLOCK => self.elements(node.children_with_tokens()),
                    _ => self.text.push_str(&node.text().to_string()),
                },
            }
        }
    }

    fn finish(mut self) -> Vec<Node> {
        if !self.text.is_empty() {
            self.nodes.push(Node::Text(self.text));
        }
        self.nodes
    }
}

fn lower_node(node: &SyntaxNode) -> Node {
    match node.kind() {
        SyntaxKind::HEADING => Node::Heading(heading(node)),
        SyntaxKind::CONTENT_BLOCK => {
            let mut markup = Markup::default();
            markup.elements(delimited(node, SyntaxKind::LBRACKET, SyntaxKind::RBRACKET));
            Node::Content(markup.finish())
        }
        SyntaxKind::CODE_BLOCK => {
            let mut verbatim = Verbatim::default();
            verbatim.elements(delimited(node, SyntaxKind::LBRACE, SyntaxKind::RBRACE));
            Node::Code(verbatim.finish())
        }
        _ => Node::Raw(raw(node)),
    }
}

fn heading(node: &SyntaxNode) -> Heading {
    let mut elements = node.children_with_tokens().peekable();
    let marker = elements.next_if(|e| e.kind() == SyntaxKind::HEADING_MARKER);
    elements.next_if(|e| e.kind() == SyntaxKind::WHITESPACE);

    let count = marker
        .as_ref()
        .and_then(|e| e.as_token())
        .map_or(1, |t| t.text().len());

    let mut body = Markup::default();
    body.elements(elements);

    Heading {
        level: HeadingLevel::clamped(count),
        body: body.finish(),
        start_column: column(node),
    }
}

/// Children of a bracketed node without its delimiters. The closing one is
/// missing when the construct ran to the end of input.
fn delimited(
    node: &SyntaxNode,
    open: SyntaxKind,
    close: SyntaxKind,
) -> impl Iterator<Item = SyntaxElement> {
    let mut elements: Vec<SyntaxElement> = node.children_with_tokens().collect();
    if elements.len() > 1 && elements.last().is_some_and(|e| e.kind() == close) {
        elements.pop();
    }
    if elements.first().is_some_and(|e| e.kind() == open) {
        elements.remove(0);
    }
    elements.into_iter()
}

/// Raw text without its backtick delimiters. A lone pair of backticks is
/// an empty span, so nothing is left.
fn raw(node: &SyntaxNode) -> String {
    let text = node.text().to_string();
    let ticks = text.len() - text.trim_start_matches('`').len();
    let inner = &text[ticks..];
    let closing = inner.len() - inner.trim_end_matches('`').len();
    if closing == ticks {
        inner[..inner.len() - ticks].to_owned()
    } else {
        inner.to_owned()
    }
}

/// Column of a node's first character within its line.
fn column(node: &SyntaxNode) -> usize {
    let mut column = 0;
    let mut token = node.first_token().and_then(|t| t.prev_token());
    while let Some(t) = token {
        if t.kind() == SyntaxKind::NEWLINE {
            break;
        }
        column += t.text().chars().count();
        token = t.prev_token();
    }
    column
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Node {
        Node::Text(s.to_owned())
    }

    fn heading(level: u8, column: usize, body: Vec<Node>) -> Node {
        Node::Heading(Heading {
            level: HeadingLevel::new(level).unwrap(),
            body,
            start_column: column,
        })
    }

    #[test]
    fn lowers_simple_heading() {
        assert_eq!(
            parse_nodes("= Level 1"),
            vec![heading(1, 0, vec![text("Level 1")])]
        );
    }

    #[test]
    fn escape_drops_backslash() {
        assert_eq!(parse_nodes("\\= No heading"), vec![text("= No heading")]);
    }

    #[test]
    fn empty_raw_span_lowers_to_empty_raw() {
        assert_eq!(
            parse_nodes("``\n= Heading"),
            vec![
                Node::Raw(String::new()),
                heading(1, 0, vec![text("Heading")]),
            ]
        );
        assert_eq!(
            parse_nodes("a ```x`` y```"),
            vec![text("a "), Node::Raw("x`` y".to_owned())]
        );
    }

    #[test]
    fn continuation_indent_is_stripped() {
        assert_eq!(
            parse_nodes("= This\n  is\n    indented."),
            vec![heading(1, 0, vec![text("This\nis\nindented.")])]
        );
    }

    #[test]
    fn text_next_to_heading_is_trimmed() {
        assert_eq!(
            parse_nodes("before\n\n= A  \n\nafter\n"),
            vec![text("before"), heading(1, 0, vec![text("A")]), text("after")]
        );
    }

    #[test]
    fn crlf_lowers_to_newline() {
        assert_eq!(
            parse_nodes("= A\r\n  b\r\nc"),
            vec![heading(1, 0, vec![text("A\nb")]), text("c")]
        );
    }

    #[test]
    fn start_column_counts_chars() {
        let nodes = parse_nodes("é\n  == x");
        let Node::Heading(h) = &nodes[1] else {
            panic!("expected heading, got {nodes:?}");
        };
        assert_eq!(h.start_column, 2);
        assert_eq!(h.level.get(), 2);
    }

    #[test]
    fn code_is_verbatim() {
        assert_eq!(
            parse_nodes("{\n  = x \\= y\n}"),
            vec![Node::Code(vec![text("\n  = x \\= y\n")])]
        );
    }

    #[test]
    fn content_inside_code_is_markup() {
        assert_eq!(
            parse_nodes("{a [= B] {c}}"),
            vec![Node::Code(vec![
                text("a "),
                Node::Content(vec![heading(1, 4, vec![text("B")])]),
                text(" {c}"),
            ])]
        );
    }

    #[test]
    fn raw_delimiters_are_removed() {
        assert_eq!(parse_nodes("`a`"), vec![Node::Raw("a".into())]);
        assert_eq!(parse_nodes("``a`b``"), vec![Node::Raw("a`b".into())]);
        assert_eq!(parse_nodes("`open"), vec![Node::Raw("open".into())]);
    }

    #[test]
    fn unclosed_content_keeps_its_text() {
        assert_eq!(
            parse_nodes("[= A"),
            vec![Node::Content(vec![heading(1, 1, vec![text("A")])])]
        );
    }

    #[test]
    fn title_skips_nested_headings_and_joins_lines() {
        let nodes = parse_nodes("= A `b`\n  c\n  == D");
        let Node::Heading(h) = &nodes[0] else {
            panic!("expected heading, got {nodes:?}");
        };
        assert_eq!(h.title(), "A b c");
    }

    #[test]
    fn dump_nested_document() {
        let nodes = parse_nodes("= Intro\n  == Detail\n  text [= Inner]\nTail {code}");
        assert_snapshot!(dump(&nodes), @r#"
        Heading level=1 column=0
          Text "Intro"
          Heading level=2 column=2
            Text "Detail"
          Text "text "
          Content
            Heading level=1 column=8
              Text "Inner"
        Text "Tail "
        Code
          Text "code"
        "#);
    }
}
