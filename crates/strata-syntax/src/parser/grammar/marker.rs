//! Marker scanning: measuring a run of `=` at a candidate position.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// A maximal run of heading markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRun {
    /// Number of consecutive markers, at least 1.
    pub count: usize,
    /// Byte offset of the first marker.
    pub start_offset: usize,
    /// Byte offset just past the last marker.
    pub end_offset: usize,
}

/// Scan the marker run beginning `skip` tokens ahead of the current position.
///
/// Returns `None` when the token there is not a marker, i.e. a run of length
/// zero. The parser position is not moved.
pub fn scan(p: &Parser<'_, '_>, skip: usize) -> Option<MarkerRun> {
    let mut count = 0;
    while p.nth(skip + count) == SyntaxKind::EQ {
        count += 1;
    }

    if count == 0 {
        return None;
    }

    Some(MarkerRun {
        count,
        start_offset: p.offset(skip),
        end_offset: p.offset(skip + count),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use pretty_assertions::assert_eq;

    fn scan_str(input: &str, skip: usize) -> Option<MarkerRun> {
        let tokens = lex(input);
        let parser = Parser::new(&tokens);
        scan(&parser, skip)
    }

    #[test]
    fn scans_single_marker() {
        assert_eq!(
            scan_str("= a", 0),
            Some(MarkerRun {
                count: 1,
                start_offset: 0,
                end_offset: 1
            })
        );
    }

    #[test]
    fn scan_stops_at_first_non_marker() {
        let run = scan_str("===x=", 0).unwrap();
        assert_eq!(run.count, 3);
        assert_eq!(run.end_offset, 3);
    }

    #[test]
    fn scan_stops_at_end_of_input() {
        let run = scan_str("====", 0).unwrap();
        assert_eq!(run.count, 4);
        assert_eq!(run.end_offset, 4);
    }

    #[test]
    fn no_marker_is_no_run() {
        assert_eq!(scan_str("x = y", 0), None);
        assert_eq!(scan_str("", 0), None);
    }

    #[test]
    fn scan_after_escape() {
        let run = scan_str("\\== a", 1).unwrap();
        assert_eq!(
            run,
            MarkerRun {
                count: 1,
                start_offset: 2,
                end_offset: 3
            }
        );
    }
}
