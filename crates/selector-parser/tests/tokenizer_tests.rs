//! Integration tests for the selector tokenizer.

use selector_parser::LexError;
use selector_parser::tokenizer::{Token, TokenKind, tokenize};

/// Helper to tokenize a string and return the token kinds
fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_empty_input() {
    let tokens = tokenize("").unwrap();
    assert_eq!(tokens, vec![Token::new(TokenKind::EndOfInput, "", 0)]);
}

#[test]
fn test_whitespace_collapses() {
    let tokens = tokenize("a \t\n b").unwrap();
    assert_eq!(tokens.len(), 4); // ident, whitespace, ident, EOF
    assert_eq!(tokens[1], Token::new(TokenKind::Whitespace, " ", 1));
    assert_eq!(tokens[2].position, 5);
}

#[test]
fn test_pseudo_class_with_selector_argument() {
    let tokens = tokenize(":host(.special)").unwrap();
    let expected = vec![
        Token::new(TokenKind::Colon, ":", 0),
        Token::new(TokenKind::Ident, "host", 1),
        Token::new(TokenKind::LeftParen, "(", 5),
        Token::new(TokenKind::Dot, ".", 6),
        Token::new(TokenKind::Ident, "special", 7),
        Token::new(TokenKind::RightParen, ")", 14),
        Token::new(TokenKind::EndOfInput, "", 15),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn test_double_colon() {
    assert_eq!(
        kinds("::slotted(span)"),
        vec![
            TokenKind::DoubleColon,
            TokenKind::Ident,
            TokenKind::LeftParen,
            TokenKind::Ident,
            TokenKind::RightParen,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn test_nested_parens_are_flat() {
    assert_eq!(
        kinds(":not(:is(a))"),
        vec![
            TokenKind::Colon,
            TokenKind::Ident,
            TokenKind::LeftParen,
            TokenKind::Colon,
            TokenKind::Ident,
            TokenKind::LeftParen,
            TokenKind::Ident,
            TokenKind::RightParen,
            TokenKind::RightParen,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn test_combinators() {
    let tokens = tokenize("a>b~c + d").unwrap();
    let combinators: Vec<&str> = tokens
        .iter()
        .filter(|token| token.is(TokenKind::Combinator))
        .map(|token| token.text.as_str())
        .collect();
    assert_eq!(combinators, vec![">", "~", "+"]);
}

#[test]
fn test_hash_and_class() {
    let tokens = tokenize("#main.content").unwrap();
    assert_eq!(tokens[0], Token::new(TokenKind::Hash, "main", 0));
    assert_eq!(tokens[1], Token::new(TokenKind::Dot, ".", 5));
    assert_eq!(tokens[2], Token::new(TokenKind::Ident, "content", 6));
}

#[test]
fn test_attribute_operators() {
    let tokens = tokenize("[a=b][c~=d][e|=f][g^=h][i$=j][k*=l]").unwrap();
    let operators: Vec<&str> = tokens
        .iter()
        .filter(|token| token.is(TokenKind::AttributeOperator))
        .map(|token| token.text.as_str())
        .collect();
    assert_eq!(operators, vec!["=", "~=", "|=", "^=", "$=", "*="]);
}

#[test]
fn test_asterisk() {
    assert_eq!(
        kinds("*.a"),
        vec![
            TokenKind::Asterisk,
            TokenKind::Dot,
            TokenKind::Ident,
            TokenKind::EndOfInput
        ]
    );
}

#[test]
fn test_string_double_quoted() {
    let tokens = tokenize(r#""hello world""#).unwrap();
    assert_eq!(tokens[0], Token::new(TokenKind::String, "hello world", 0));
}

#[test]
fn test_string_single_quoted_with_escapes() {
    let tokens = tokenize(r"'it\'s \41'").unwrap();
    assert_eq!(tokens[0].text, "it's A");
}

#[test]
fn test_string_escaped_newline_continues() {
    let tokens = tokenize("\"a\\\nb\"").unwrap();
    assert_eq!(tokens[0].text, "ab");
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        tokenize("[title=\"abc"),
        Err(LexError::UnterminatedString { position: 7 })
    );
}

#[test]
fn test_newline_in_string_is_unterminated() {
    assert_eq!(
        tokenize("'a\nb'"),
        Err(LexError::UnterminatedString { position: 0 })
    );
}

#[test]
fn test_invalid_character() {
    let error = tokenize("a { }").unwrap_err();
    assert_eq!(
        error,
        LexError::InvalidCharacter {
            character: '{',
            position: 2
        }
    );
    assert_eq!(error.position(), 2);
}

#[test]
fn test_numbers() {
    let tokens = tokenize("-2.5 +3 .5 7").unwrap();
    let numbers: Vec<&str> = tokens
        .iter()
        .filter(|token| token.is(TokenKind::Number))
        .map(|token| token.text.as_str())
        .collect();
    assert_eq!(numbers, vec!["-2.5", "+3", ".5", "7"]);
}

#[test]
fn test_formula_tokens() {
    let tokens = tokenize("2n+1").unwrap();
    assert_eq!(tokens[0], Token::new(TokenKind::Number, "2", 0));
    assert_eq!(tokens[1], Token::new(TokenKind::Ident, "n", 1));
    assert_eq!(tokens[2], Token::new(TokenKind::Number, "+1", 2));
}

#[test]
fn test_lone_minus_is_delim() {
    assert_eq!(
        kinds("2n - 1"),
        vec![
            TokenKind::Number,
            TokenKind::Ident,
            TokenKind::Whitespace,
            TokenKind::Delim,
            TokenKind::Whitespace,
            TokenKind::Number,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn test_ident_starting_with_hyphens() {
    let tokens = tokenize("-webkit-scrollbar --custom").unwrap();
    assert_eq!(tokens[0].text, "-webkit-scrollbar");
    assert_eq!(tokens[2].text, "--custom");
}

#[test]
fn test_escaped_identifier() {
    let tokens = tokenize(r".a\:b").unwrap();
    assert_eq!(tokens[1], Token::new(TokenKind::Ident, "a:b", 1));
}

#[test]
fn test_token_display() {
    let tokens = tokenize("#x 'y'").unwrap();
    assert_eq!(tokens[0].to_string(), "\"#x\"");
    assert_eq!(tokens[1].to_string(), "whitespace");
    assert_eq!(tokens[2].to_string(), "string \"y\"");
    assert_eq!(tokens[3].to_string(), "end of input");
}
