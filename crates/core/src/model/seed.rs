use serde::{Deserialize, Serialize};
use std::fmt;

/// A value that makes question order reproducible.
///
/// Numeric seeds are used as the generator state as-is; text seeds are hashed
/// first. The two paths are intentionally distinct: `"0"` and `"abc"` do not
/// share a derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Seed {
    Number(f64),
    Text(String),
}

impl Seed {
    /// Interpret raw user input as an optional seed.
    ///
    /// Blank input means "no seed". Input that reads as a JavaScript number
    /// literal (`42`, `1.5`, `.5`, `1e3`, `0x10`, `0b11`, `0o17`, `-Infinity`)
    /// becomes [`Seed::Number`]; anything else becomes [`Seed::Text`] with
    /// surrounding whitespace removed.
    #[must_use]
    pub fn from_input(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(parse_number(trimmed).map_or_else(|| Self::Text(trimmed.to_owned()), Self::Number))
    }

    /// Short label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Seed::Number(_) => "number",
            Seed::Text(_) => "text",
        }
    }
}

impl From<i64> for Seed {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Number(n) if n.is_infinite() => {
                write!(f, "{}Infinity", if *n < 0.0 { "-" } else { "" })
            }
            Seed::Number(n) => write!(f, "{n}"),
            Seed::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Read `s` the way `Number()` does in a browser; `None` where that yields NaN.
fn parse_number(s: &str) -> Option<f64> {
    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0b" | "0B") => Some(2),
        Some("0o" | "0O") => Some(8),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix_digits(&s[2..], radix);
    }

    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if unsigned == "Infinity" {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }
    // Rust's float grammar also takes `inf`, `nan` and a second sign; only
    // plain decimal literals go through.
    let decimal = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal || unsigned.starts_with(['+', '-']) {
        return None;
    }
    s.parse::<f64>().ok()
}

// Unsigned only; exact up to 2^53.
fn parse_radix_digits(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(raw: &str) -> f64 {
        match Seed::from_input(raw) {
            Some(Seed::Number(n)) => n,
            other => panic!("{raw:?} parsed as {other:?}"),
        }
    }

    #[test]
    fn blank_input_means_no_seed() {
        assert_eq!(Seed::from_input(""), None);
        assert_eq!(Seed::from_input("   \t"), None);
    }

    #[test]
    fn integer_input_bypasses_text() {
        assert_eq!(Seed::from_input("0"), Some(Seed::Number(0.0)));
        assert_eq!(Seed::from_input(" 42 "), Some(Seed::Number(42.0)));
        assert_eq!(Seed::from_input("-7"), Some(Seed::Number(-7.0)));
        assert_eq!(Seed::from_input("+5"), Some(Seed::Number(5.0)));
        assert_eq!(Seed::from_input("00012"), Some(Seed::Number(12.0)));
    }

    #[test]
    fn decimal_literals_keep_their_value() {
        assert_eq!(number("1.5"), 1.5);
        assert_eq!(number(".5"), 0.5);
        assert_eq!(number("5."), 5.0);
        assert_eq!(number("1e3"), 1000.0);
        assert_eq!(number("1.5e+3"), 1500.0);
        assert_eq!(number("+.5e-1"), 0.05);
        assert_eq!(number("1e20"), 1e20);
    }

    #[test]
    fn radix_literals_and_infinity() {
        assert_eq!(number("0x10"), 16.0);
        assert_eq!(number("0X1f"), 31.0);
        assert_eq!(number("0b11"), 3.0);
        assert_eq!(number("0o17"), 15.0);
        assert_eq!(number("Infinity"), f64::INFINITY);
        assert_eq!(number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn non_numeric_input_is_text() {
        for raw in [
            "abc", "NaN", "inf", "infinity", "-0x10", "0x", "0x1g", "1_0", ".", "1e", "--1", "+-1",
        ] {
            assert_eq!(Seed::from_input(raw), Some(Seed::Text(raw.into())), "{raw}");
        }
        assert_eq!(Seed::from_input(" my seed "), Some(Seed::Text("my seed".into())));
    }

    #[test]
    fn kind_and_display() {
        assert_eq!(Seed::from(5).kind(), "number");
        assert_eq!(Seed::from("x").kind(), "text");
        assert_eq!(Seed::from("hello").to_string(), "hello");
        assert_eq!(Seed::from(-3).to_string(), "-3");
        assert_eq!(Seed::Number(1.5).to_string(), "1.5");
        assert_eq!(Seed::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
    }
}
