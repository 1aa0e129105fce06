//! Numbering patterns for heading counters.
//!
//! A pattern such as `1.a.i)` holds counting symbols (`1`, `a`, `A`, `i`,
//! `I`, `*`), the prefix text in front of each symbol and one suffix after
//! the last. Applying it to `[2, 3]` gives `2.c)`. When there are more
//! numbers than symbols the last symbol repeats with its prefix.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberingError {
    #[error("numbering pattern {0:?} has no counting symbol (one of 1, a, A, i, I, *)")]
    NoCountingSymbol(String),
}

/// How a single number is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberingKind {
    Arabic,
    Letter,
    Roman,
    Symbol,
}

/// Letter case for letter and roman numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    Lower,
    Upper,
}

impl NumberingKind {
    /// Kind for a lowercase counting symbol.
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '1' => Self::Arabic,
            'a' => Self::Letter,
            'i' => Self::Roman,
            '*' => Self::Symbol,
            _ => return None,
        })
    }

    /// The lowercase counting symbol.
    pub fn to_char(self) -> char {
        match self {
            Self::Arabic => '1',
            Self::Letter => 'a',
            Self::Roman => 'i',
            Self::Symbol => '*',
        }
    }

    /// Spell `number`.
    pub fn apply(self, number: usize, case: Case) -> String {
        match self {
            Self::Arabic => number.to_string(),
            Self::Letter => letters(number, case),
            Self::Roman => roman(number, case),
            Self::Symbol => symbols(number),
        }
    }
}

/// `a`..`z`, then `aa`, `ab`, ...; zero has no letter.
fn letters(number: usize, case: Case) -> String {
    if number == 0 {
        return "-".into();
    }

    let base = match case {
        Case::Lower => b'a',
        Case::Upper => b'A',
    };
    let mut n = number - 1;
    let mut out = Vec::new();
    loop {
        out.push(char::from(base + (n % 26) as u8));
        n /= 26;
        if n == 0 {
            break;
        }
        n -= 1;
    }
    out.iter().rev().collect()
}

fn roman(mut number: usize, case: Case) -> String {
    const ROMAN: &[(&str, usize)] = &[
        ("M", 1000),
        ("CM", 900),
        ("D", 500),
        ("CD", 400),
        ("C", 100),
        ("XC", 90),
        ("L", 50),
        ("XL", 40),
        ("X", 10),
        ("IX", 9),
        ("V", 5),
        ("IV", 4),
        ("I", 1),
    ];

    if number == 0 {
        return "N".into();
    }

    let mut out = String::new();
    for &(name, value) in ROMAN {
        while number >= value {
            number -= value;
            out.push_str(name);
        }
    }
    match case {
        Case::Lower => out.to_lowercase(),
        Case::Upper => out,
    }
}

/// `*`, `†`, `‡`, `§`, `¶`, `‖`, then doubled, tripled, ...
fn symbols(number: usize) -> String {
    const SYMBOLS: &[char] = &['*', '†', '‡', '§', '¶', '‖'];

    if number == 0 {
        return "-".into();
    }

    let symbol = SYMBOLS[(number - 1) % SYMBOLS.len()];
    let amount = (number - 1) / SYMBOLS.len() + 1;
    std::iter::repeat_n(symbol, amount).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Piece {
    prefix: String,
    kind: NumberingKind,
    case: Case,
}

/// A parsed numbering pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberingPattern {
    pieces: Vec<Piece>,
    suffix: String,
}

impl NumberingPattern {
    /// Render a full counter, e.g. `[1, 2]` with `1.a` gives `1.b`.
    pub fn apply(&self, numbers: &[usize]) -> String {
        let mut out = String::new();
        let mut numbers = numbers.iter();

        for (piece, &number) in self.pieces.iter().zip(&mut numbers) {
            out.push_str(&piece.prefix);
            out.push_str(&piece.kind.apply(number, piece.case));
        }

        // Surplus numbers reuse the last piece; a piece without prefix is
        // separated by the suffix instead.
        if let Some(last) = self.pieces.last() {
            for &number in numbers {
                if last.prefix.is_empty() {
                    out.push_str(&self.suffix);
                } else {
                    out.push_str(&last.prefix);
                }
                out.push_str(&last.kind.apply(number, last.case));
            }
        }

        out.push_str(&self.suffix);
        out
    }

    /// Render only the `k`-th level of a counter.
    pub fn apply_kth(&self, k: usize, number: usize) -> String {
        let mut out = String::new();
        if let Some(first) = self.pieces.first() {
            out.push_str(&first.prefix);
        }
        let piece = self.pieces.get(k).or(self.pieces.last());
        if let Some(piece) = piece {
            out.push_str(&piece.kind.apply(number, piece.case));
        }
        out.push_str(&self.suffix);
        out
    }

    /// Number of counting symbols.
    pub fn pieces(&self) -> usize {
        self.pieces.len()
    }
}

impl Default for NumberingPattern {
    /// `1.1`
    fn default() -> Self {
        let arabic = |prefix: &str| Piece {
            prefix: prefix.to_owned(),
            kind: NumberingKind::Arabic,
            case: Case::Lower,
        };
        Self {
            pieces: vec![arabic(""), arabic(".")],
            suffix: String::new(),
        }
    }
}

impl FromStr for NumberingPattern {
    type Err = NumberingError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let mut pieces = Vec::new();
        let mut handled = 0;

        for (i, c) in pattern.char_indices() {
            let Some(kind) = NumberingKind::from_char(c.to_ascii_lowercase()) else {
                continue;
            };
            let case = if c.is_uppercase() {
                Case::Upper
            } else {
                Case::Lower
            };
            pieces.push(Piece {
                prefix: pattern[handled..i].to_owned(),
                kind,
                case,
            });
            handled = i + c.len_utf8();
        }

        if pieces.is_empty() {
            return Err(NumberingError::NoCountingSymbol(pattern.to_owned()));
        }

        Ok(Self {
            pieces,
            suffix: pattern[handled..].to_owned(),
        })
    }
}

impl fmt::Display for NumberingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in &self.pieces {
            let c = piece.kind.to_char();
            let c = match piece.case {
                Case::Lower => c,
                Case::Upper => c.to_ascii_uppercase(),
            };
            write!(f, "{}{c}", piece.prefix)?;
        }
        f.write_str(&self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn pattern(s: &str) -> NumberingPattern {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("1.1)", &[1, 2, 3], "1.2.3)")]
    #[case("1.a.i", &[1, 2], "1.b")]
    #[case("1.a.i", &[2, 3, 4], "2.c.iv")]
    #[case("I – 1", &[12, 2], "XII – 2")]
    #[case("(A)", &[28], "(AB)")]
    #[case("1.", &[1, 2, 3], "1.2.3.")]
    #[case("1.1", &[], "")]
    #[case("*", &[8], "††")]
    fn applies_patterns(#[case] pat: &str, #[case] numbers: &[usize], #[case] expected: &str) {
        assert_eq!(pattern(pat).apply(numbers), expected);
    }

    #[rstest]
    #[case(1, "a")]
    #[case(26, "z")]
    #[case(27, "aa")]
    #[case(52, "az")]
    #[case(53, "ba")]
    #[case(702, "zz")]
    #[case(703, "aaa")]
    fn letters_count_bijectively(#[case] number: usize, #[case] expected: &str) {
        assert_eq!(letters(number, Case::Lower), expected);
    }

    #[rstest]
    #[case(1, "i")]
    #[case(4, "iv")]
    #[case(9, "ix")]
    #[case(14, "xiv")]
    #[case(1994, "mcmxciv")]
    fn roman_numerals(#[case] number: usize, #[case] expected: &str) {
        assert_eq!(roman(number, Case::Lower), expected);
    }

    #[test]
    fn zero_has_placeholders() {
        assert_eq!(NumberingKind::Letter.apply(0, Case::Lower), "-");
        assert_eq!(NumberingKind::Roman.apply(0, Case::Upper), "N");
        assert_eq!(NumberingKind::Symbol.apply(0, Case::Lower), "-");
        assert_eq!(NumberingKind::Arabic.apply(0, Case::Lower), "0");
    }

    #[test]
    fn apply_kth_uses_one_level() {
        let p = pattern("(1.a.i)");
        assert_eq!(p.apply_kth(0, 3), "(3)");
        assert_eq!(p.apply_kth(1, 3), "(c)");
        assert_eq!(p.apply_kth(5, 3), "(iii)");
    }

    #[test]
    fn rejects_pattern_without_symbols() {
        assert_eq!(
            "--".parse::<NumberingPattern>(),
            Err(NumberingError::NoCountingSymbol("--".into()))
        );
        assert!("".parse::<NumberingPattern>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for s in ["1.1", "(A.i)", "* –", "I."] {
            assert_eq!(pattern(s).to_string(), s);
        }
        assert_eq!(NumberingPattern::default(), pattern("1.1"));
        assert_eq!(pattern("1.a").pieces(), 2);
    }
}
