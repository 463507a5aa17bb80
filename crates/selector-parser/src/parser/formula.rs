/// [CSS Syntax § 6 The An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
///
/// Parses the text of an `an+b` argument into `(a, b)`. Accepts the keywords
/// `odd` and `even`, a lone integer, and `an`, `an+b`, `an-b` with optional
/// whitespace around the sign of `b`. Returns `None` for anything else.
#[must_use]
pub fn parse_formula(text: &str) -> Option<(i32, i32)> {
    let text = text.trim().to_ascii_lowercase();

    // "odd" is 2n+1, "even" is 2n.
    match text.as_str() {
        "odd" => return Some((2, 1)),
        "even" => return Some((2, 0)),
        _ => {}
    }

    let Some(n_index) = text.find('n') else {
        return parse_integer(&text).map(|b| (0, b));
    };

    let a = match &text[..n_index] {
        "" | "+" => 1,
        "-" => -1,
        coefficient => parse_integer(coefficient)?,
    };

    let rest = text[n_index + 1..].trim_start();
    if rest.is_empty() {
        return Some((a, 0));
    }

    let (sign, digits) = if let Some(digits) = rest.strip_prefix('+') {
        (1, digits)
    } else if let Some(digits) = rest.strip_prefix('-') {
        (-1, digits)
    } else {
        return None;
    };

    let digits = digits.trim_start();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let b: i32 = digits.parse().ok()?;
    Some((a, sign * b))
}

/// An optionally signed run of ASCII digits.
fn parse_integer(text: &str) -> Option<i32> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(parse_formula("odd"), Some((2, 1)));
        assert_eq!(parse_formula("EVEN"), Some((2, 0)));
    }

    #[test]
    fn test_integer_only() {
        assert_eq!(parse_formula("5"), Some((0, 5)));
        assert_eq!(parse_formula("-3"), Some((0, -3)));
        assert_eq!(parse_formula("+7"), Some((0, 7)));
    }

    #[test]
    fn test_step_forms() {
        assert_eq!(parse_formula("n"), Some((1, 0)));
        assert_eq!(parse_formula("+n"), Some((1, 0)));
        assert_eq!(parse_formula("-n+3"), Some((-1, 3)));
        assert_eq!(parse_formula("2n"), Some((2, 0)));
        assert_eq!(parse_formula("2n+1"), Some((2, 1)));
        assert_eq!(parse_formula(" 2n + 1 "), Some((2, 1)));
        assert_eq!(parse_formula("-2n-1"), Some((-2, -1)));
        assert_eq!(parse_formula("2n- 1"), Some((2, -1)));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse_formula(""), None);
        assert_eq!(parse_formula("2 n"), None);
        assert_eq!(parse_formula("2n+"), None);
        assert_eq!(parse_formula("2n + -1"), None);
        assert_eq!(parse_formula("3n1"), None);
        assert_eq!(parse_formula("first"), None);
        assert_eq!(parse_formula("--1"), None);
    }
}
