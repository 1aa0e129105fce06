//! Document outline: every heading in document order with its hierarchical
//! counter.

use crate::level::HeadingLevel;
use crate::node::{Heading, Node};
use crate::numbering::NumberingPattern;

/// One heading in the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    /// Counter value, one number per level, e.g. `[2, 1]` for the first
    /// level 2 heading under the second level 1 heading.
    pub numbers: Vec<usize>,
    pub title: String,
    pub start_column: usize,
}

impl OutlineEntry {
    /// The counter rendered through `pattern`.
    pub fn number(&self, pattern: &NumberingPattern) -> String {
        pattern.apply(&self.numbers)
    }

    /// Only this heading's own level of the counter, e.g. `b` rather than
    /// `1.b` for the second level 2 heading under `1.a`.
    pub fn own_number(&self, pattern: &NumberingPattern) -> String {
        match self.numbers.split_last() {
            Some((&last, parents)) => pattern.apply_kth(parents.len(), last),
            None => String::new(),
        }
    }
}

/// Hierarchical heading counter.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Counter(Vec<usize>);

impl Counter {
    /// Advance at `level`, resetting deeper levels. Skipped levels start at 1.
    fn step(&mut self, level: HeadingLevel) {
        let level = level.as_usize();
        if self.0.len() >= level {
            self.0[level - 1] += 1;
            self.0.truncate(level);
        }
        while self.0.len() < level {
            self.0.push(1);
        }
    }
}

/// Collect every heading in `nodes`, including headings nested in heading
/// bodies and containers.
pub fn outline(nodes: &[Node]) -> Vec<OutlineEntry> {
    let mut counter = Counter::default();
    let mut entries = Vec::new();
    visit(nodes, &mut counter, &mut entries);
    log::debug!("outline has {} entries", entries.len());
    entries
}

fn visit(nodes: &[Node], counter: &mut Counter, entries: &mut Vec<OutlineEntry>) {
    for node in nodes {
        if let Node::Heading(heading) = node {
            entries.push(entry(heading, counter));
        }
        visit(node.children(), counter, entries);
    }
}

fn entry(heading: &Heading, counter: &mut Counter) -> OutlineEntry {
    counter.step(heading.level);
    OutlineEntry {
        level: heading.level,
        numbers: counter.0.clone(),
        title: heading.title(),
        start_column: heading.start_column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::parse_nodes;
    use pretty_assertions::assert_eq;

    fn numbered(source: &str, pattern: &str) -> Vec<String> {
        let pattern: NumberingPattern = pattern.parse().unwrap();
        outline(&parse_nodes(source))
            .iter()
            .map(|e| format!("{} {}", e.number(&pattern), e.title))
            .collect()
    }

    #[test]
    fn counts_levels() {
        assert_eq!(
            numbered("= A\n== B\n= C\n", "1.1"),
            vec!["1 A", "1.1 B", "2 C"]
        );
    }

    #[test]
    fn deeper_levels_reset() {
        assert_eq!(
            numbered("= A\n== B\n=== C\n== D\n=== E\n", "1.a.i"),
            vec!["1 A", "1.a B", "1.a.i C", "1.b D", "1.b.i E"]
        );
    }

    #[test]
    fn own_number_renders_one_level() {
        let pattern: NumberingPattern = "(1.a.i)".parse().unwrap();
        let own: Vec<String> = outline(&parse_nodes("= A\n== B\n== C\n=== D\n"))
            .iter()
            .map(|e| e.own_number(&pattern))
            .collect();
        assert_eq!(own, vec!["(1)", "(a)", "(b)", "(i)"]);
    }

    #[test]
    fn skipped_levels_start_at_one() {
        assert_eq!(numbered("=== Deep\n= Top\n", "1.1"), vec!["1.1.1 Deep", "2 Top"]);
    }

    #[test]
    fn nested_headings_in_document_order() {
        let entries = outline(&parse_nodes("= A\n  == B\n[= C]"));
        let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(entries[1].numbers, vec![1, 1]);
        assert_eq!(entries[1].start_column, 2);
        assert_eq!(entries[2].numbers, vec![2]);
    }

    #[test]
    fn clamped_levels_count_as_six() {
        let entries = outline(&parse_nodes("=========== Level 11"));
        assert_eq!(entries[0].level, HeadingLevel::MAX);
        assert_eq!(entries[0].numbers, vec![1; 6]);
    }

    #[test]
    fn no_headings_no_entries() {
        assert!(outline(&parse_nodes("No = heading")).is_empty());
    }
}
