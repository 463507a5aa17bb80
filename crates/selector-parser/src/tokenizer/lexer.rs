use super::token::{Token, TokenKind};
use crate::error::LexError;

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// Lazy selector lexer. Iterating yields one token at a time, finishing with a
/// single [`TokenKind::EndOfInput`] token. The lexer has no knowledge of which
/// pseudo-classes exist and does not track parenthesis depth.
pub struct Lexer<'a> {
    /// The input string being tokenized
    input: &'a str,
    /// Decoded code points paired with their byte offsets
    chars: Vec<(usize, char)>,
    /// Current index into `chars`
    position: usize,
    /// Set once the end-of-input token (or an error) has been produced
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().collect(),
            position: 0,
            finished: false,
        }
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> Result<Token, LexError> {
        // "Consume comments."
        self.consume_comments();

        let start = self.offset();

        // "Consume the next input code point."
        let Some(c) = self.consume() else {
            return Ok(Token::new(TokenKind::EndOfInput, "", start));
        };

        let token = match c {
            // "whitespace"
            // "Consume as much whitespace as possible. Return a <whitespace-token>."
            c if is_whitespace(c) => {
                self.consume_whitespace();
                Token::new(TokenKind::Whitespace, " ", start)
            }

            // "U+0022 QUOTATION MARK (")" / "U+0027 APOSTROPHE (')"
            // "Consume a string token and return it."
            '"' | '\'' => return self.consume_string_token(c, start),

            // "U+0023 NUMBER SIGN (#)"
            '#' => {
                // "If the next input code point is an ident code point or the next
                // two input code points are a valid escape..."
                if self.peek().is_some_and(is_ident_code_point)
                    || is_valid_escape(self.peek(), self.peek_at(1))
                {
                    let name = self.consume_ident_sequence();
                    Token::new(TokenKind::Hash, name, start)
                } else {
                    return Err(LexError::InvalidCharacter {
                        character: '#',
                        position: start,
                    });
                }
            }

            '(' => Token::new(TokenKind::LeftParen, "(", start),
            ')' => Token::new(TokenKind::RightParen, ")", start),
            ',' => Token::new(TokenKind::Comma, ",", start),
            '[' => Token::new(TokenKind::LeftBracket, "[", start),
            ']' => Token::new(TokenKind::RightBracket, "]", start),
            '>' => Token::new(TokenKind::Combinator, ">", start),
            '=' => Token::new(TokenKind::AttributeOperator, "=", start),

            ':' => {
                if self.peek() == Some(':') {
                    let _ = self.consume();
                    Token::new(TokenKind::DoubleColon, "::", start)
                } else {
                    Token::new(TokenKind::Colon, ":", start)
                }
            }

            // "U+002B PLUS SIGN (+)"
            '+' => {
                // "If the input stream starts with a number..."
                if self.would_start_number_with('+') {
                    self.reconsume();
                    self.consume_numeric_token(start)
                } else {
                    Token::new(TokenKind::Combinator, "+", start)
                }
            }

            // "U+002D HYPHEN-MINUS (-)"
            '-' => {
                if self.would_start_number_with('-') {
                    self.reconsume();
                    self.consume_numeric_token(start)
                }
                // "Otherwise, if the input stream starts with an ident sequence..."
                else if self.would_start_ident_sequence_with(Some('-'), 0) {
                    self.reconsume();
                    self.consume_ident_token(start)
                }
                // "Otherwise, return a <delim-token> with its value set to the current
                // input code point." Only meaningful inside `an+b` arguments.
                else {
                    Token::new(TokenKind::Delim, "-", start)
                }
            }

            // "U+002E FULL STOP (.)"
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.reconsume();
                    self.consume_numeric_token(start)
                } else {
                    Token::new(TokenKind::Dot, ".", start)
                }
            }

            '*' => self.operator_or(start, '*', TokenKind::Asterisk),
            '~' => self.operator_or(start, '~', TokenKind::Combinator),

            // `|`, `^` and `$` only appear as the first half of an attribute matcher.
            '|' | '^' | '$' => {
                if self.peek() == Some('=') {
                    let _ = self.consume();
                    Token::new(TokenKind::AttributeOperator, format!("{c}="), start)
                } else {
                    return Err(LexError::InvalidCharacter {
                        character: c,
                        position: start,
                    });
                }
            }

            // "U+005C REVERSE SOLIDUS (\)"
            '\\' => {
                if is_valid_escape(Some('\\'), self.peek()) {
                    self.reconsume();
                    self.consume_ident_token(start)
                } else {
                    return Err(LexError::InvalidCharacter {
                        character: '\\',
                        position: start,
                    });
                }
            }

            // "digit"
            c if c.is_ascii_digit() => {
                self.reconsume();
                self.consume_numeric_token(start)
            }

            // "ident-start code point"
            c if is_ident_start_code_point(c) => {
                self.reconsume();
                self.consume_ident_token(start)
            }

            // Anything else has no meaning in a selector.
            character => {
                return Err(LexError::InvalidCharacter {
                    character,
                    position: start,
                });
            }
        };

        Ok(token)
    }

    /// `*` and `~` are either standalone tokens or the first half of `*=` / `~=`.
    fn operator_or(&mut self, start: usize, c: char, standalone: TokenKind) -> Token {
        if self.peek() == Some('=') {
            let _ = self.consume();
            Token::new(TokenKind::AttributeOperator, format!("{c}="), start)
        } else {
            Token::new(standalone, c.to_string(), start)
        }
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// "...consume them and all following code points up to and including the
    /// first U+002A ASTERISK (*) followed by U+002F SOLIDUS (/), or up to an EOF
    /// code point."
    fn consume_comments(&mut self) {
        while self.peek() == Some('/') && self.peek_at(1) == Some('*') {
            let _ = self.consume(); // /
            let _ = self.consume(); // *

            loop {
                match self.consume() {
                    Some('*') if self.peek() == Some('/') => {
                        let _ = self.consume(); // /
                        break;
                    }
                    Some(_) => {}
                    None => break, // EOF
                }
            }
        }
    }

    /// Consume whitespace characters.
    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            let _ = self.consume();
        }
    }

    /// [§ 4.3.4 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Unlike CSS Syntax, reaching EOF or an unescaped newline is a hard error
    /// rather than a `<bad-string-token>`.
    fn consume_string_token(&mut self, ending: char, start: usize) -> Result<Token, LexError> {
        let mut value = String::new();

        loop {
            match self.consume() {
                // "ending code point"
                Some(c) if c == ending => {
                    return Ok(Token::new(TokenKind::String, value, start));
                }

                None | Some('\n') => {
                    return Err(LexError::UnterminatedString { position: start });
                }

                // "U+005C REVERSE SOLIDUS (\)"
                Some('\\') => match self.peek() {
                    // "If the next input code point is EOF, do nothing."
                    None => {}
                    // "Otherwise, if the next input code point is a newline, consume it."
                    Some('\n') => {
                        let _ = self.consume();
                    }
                    // "Otherwise... consume an escaped code point and append the
                    // returned code point to the <string-token>'s value."
                    Some(_) => value.push(self.consume_escaped_code_point()),
                },

                // "anything else"
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.5 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    ///
    /// Only the number itself is consumed; a trailing unit such as the `n` in
    /// `2n+1` is left for the next token.
    fn consume_numeric_token(&mut self, start: usize) -> Token {
        let mut repr = String::new();

        // "If the next input code point is U+002B PLUS SIGN (+) or U+002D HYPHEN-MINUS (-),
        // consume it and append it to repr."
        if let Some(sign @ ('+' | '-')) = self.peek() {
            let _ = self.consume();
            repr.push(sign);
        }

        self.consume_digits(&mut repr);

        // "If the next 2 input code points are U+002E FULL STOP (.) followed by a digit..."
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            let _ = self.consume();
            repr.push('.');
            self.consume_digits(&mut repr);
        }

        Token::new(TokenKind::Number, repr, start)
    }

    /// Consume a run of ASCII digits into `repr`.
    fn consume_digits(&mut self, repr: &mut String) {
        while let Some(digit) = self.peek().filter(char::is_ascii_digit) {
            let _ = self.consume();
            repr.push(digit);
        }
    }

    /// [§ 4.3.6 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    ///
    /// Function tokens are not produced: `name(` lexes as an ident followed by
    /// a `(` so the parser can treat every argument list the same way.
    fn consume_ident_token(&mut self, start: usize) -> Token {
        let name = self.consume_ident_sequence();
        Token::new(TokenKind::Ident, name, start)
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident_sequence(&mut self) -> String {
        let mut result = String::new();

        loop {
            match self.peek() {
                // "ident code point"
                Some(c) if is_ident_code_point(c) => {
                    let _ = self.consume();
                    result.push(c);
                }

                // "the stream starts with a valid escape"
                Some('\\') if is_valid_escape(Some('\\'), self.peek_at(1)) => {
                    let _ = self.consume();
                    result.push(self.consume_escaped_code_point());
                }

                // "anything else"
                _ => return result,
            }
        }
    }

    /// [§ 4.3.13 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    fn consume_escaped_code_point(&mut self) -> char {
        match self.consume() {
            // "hex digit"
            Some(c) if c.is_ascii_hexdigit() => {
                let mut hex = c.to_string();
                // "Consume as many hex digits as possible, but no more than 5."
                for _ in 0..5 {
                    match self.peek().filter(char::is_ascii_hexdigit) {
                        Some(digit) => {
                            let _ = self.consume();
                            hex.push(digit);
                        }
                        None => break,
                    }
                }
                // "If the next input code point is whitespace, consume it."
                if self.peek().is_some_and(is_whitespace) {
                    let _ = self.consume();
                }
                // "If this number is zero, or is for a surrogate, or is greater than the
                // maximum allowed code point, return U+FFFD REPLACEMENT CHARACTER."
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|&code_point| code_point != 0)
                    .and_then(char::from_u32)
                    .unwrap_or('\u{FFFD}')
            }
            // "EOF"
            // "This is a parse error. Return U+FFFD REPLACEMENT CHARACTER."
            None => '\u{FFFD}',
            // "anything else"
            Some(c) => c,
        }
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    ///
    /// `first` is the code point at `offset` from the current position.
    fn would_start_ident_sequence_with(&self, first: Option<char>, offset: usize) -> bool {
        match first {
            Some('-') => {
                let second = self.peek_at(offset);
                second.is_some_and(is_ident_start_code_point)
                    || second == Some('-')
                    || is_valid_escape(second, self.peek_at(offset + 1))
            }
            Some(c) if is_ident_start_code_point(c) => true,
            Some('\\') => is_valid_escape(Some('\\'), self.peek_at(offset)),
            _ => false,
        }
    }

    /// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
    ///
    /// Called after `sign` has already been consumed.
    fn would_start_number_with(&self, sign: char) -> bool {
        debug_assert!(matches!(sign, '+' | '-'));
        match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.peek_at(1).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// Byte offset of the current position.
    fn offset(&self) -> usize {
        self.chars
            .get(self.position)
            .map_or(self.input.len(), |&(offset, _)| offset)
    }

    /// Consume and return the next character.
    fn consume(&mut self) -> Option<char> {
        let (_, c) = *self.chars.get(self.position)?;
        self.position += 1;
        Some(c)
    }

    /// Put back the last consumed character.
    const fn reconsume(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        }
    }

    /// Peek at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Peek at a character at an offset from current position.
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).map(|&(_, c)| c)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.consume_token();
        if result.as_ref().map_or(true, Token::is_eof) {
            self.finished = true;
        }
        Some(result)
    }
}

/// Tokenize a complete selector string.
///
/// The returned vector always ends with a [`TokenKind::EndOfInput`] token.
///
/// # Errors
///
/// Returns [`LexError::UnterminatedString`] for a string missing its closing
/// quote and [`LexError::InvalidCharacter`] for characters that cannot appear
/// in a selector.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).collect()
}

/// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    first == Some('\\') && second.is_some_and(|c| c != '\n')
}

/// [§ 4.2 Definitions - whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
const fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ' | '\r' | '\x0C')
}

/// [§ 4.2 Definitions - ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
///
/// "A letter, a non-ASCII code point, or U+005F LOW LINE (_)."
const fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 Definitions - ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
///
/// "An ident-start code point, a digit, or U+002D HYPHEN-MINUS (-)."
const fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}
