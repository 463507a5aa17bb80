//! Selector token types.
//!
//! The token set is a selector-oriented subset of
//! [CSS Syntax § 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization):
//! only the punctuation that can appear in a selector list is recognized, and
//! the two-character forms (`::`, `~=`, `|=`, ...) are folded into single tokens.

use core::fmt;

use strum_macros::Display;

/// The kind of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum TokenKind {
    /// "`<ident-token>`", e.g. `div`, `host-context`, `-webkit-foo`.
    Ident,
    /// "`<string-token>`"; the token text holds the unescaped contents.
    String,
    /// "`<number-token>`"; the token text holds the literal, e.g. `-2.5`.
    Number,
    /// U+003A COLON (`:`)
    Colon,
    /// Two consecutive colons (`::`), introducing a pseudo-element.
    DoubleColon,
    /// U+0028 LEFT PARENTHESIS (`(`)
    LeftParen,
    /// U+0029 RIGHT PARENTHESIS (`)`)
    RightParen,
    /// An explicit combinator symbol: `>`, `+` or `~`.
    Combinator,
    /// One or more whitespace code points. Between two compounds this is the
    /// descendant combinator; elsewhere the parser ignores it.
    Whitespace,
    /// U+002C COMMA (`,`)
    Comma,
    /// U+002E FULL STOP (`.`)
    Dot,
    /// `#name`; the token text holds the name without the `#`.
    Hash,
    /// U+002A ASTERISK (`*`)
    Asterisk,
    /// U+005B LEFT SQUARE BRACKET (`[`)
    LeftBracket,
    /// U+005D RIGHT SQUARE BRACKET (`]`)
    RightBracket,
    /// An attribute matcher: `=`, `~=`, `|=`, `^=`, `$=` or `*=`.
    AttributeOperator,
    /// "`<delim-token>`"; only a lone `-`, as in `:nth-child(2n - 1)`.
    Delim,
    /// End of input - always the last token of a stream.
    EndOfInput,
}

/// A single lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The token's value (see the individual [`TokenKind`] variants).
    pub text: String,
    /// Byte offset of the first character of the token in the input.
    pub position: usize,
}

impl Token {
    /// Create a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Returns true if this token has the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.is(TokenKind::EndOfInput)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "end of input"),
            TokenKind::Whitespace => write!(f, "whitespace"),
            TokenKind::String => write!(f, "string \"{}\"", self.text),
            TokenKind::Hash => write!(f, "\"#{}\"", self.text),
            _ => write!(f, "\"{}\"", self.text),
        }
    }
}
