//! Recursive-descent selector parser per
//! [Selectors Level 4 § 18 Grammar](https://www.w3.org/TR/selectors-4/#grammar).
//!
//! ```text
//! selector      := rule (',' rule)*
//! rule          := compound (combinator compound)*
//! compound      := simple-item+ pseudo-element?
//! simple-item   := tag | '*' | '.' ident | '#' ident | attribute | pseudo-class
//! pseudo-class  := ':' ident argument?
//! pseudo-element:= '::' ident argument?
//! argument      := '(' body ')'
//! attribute     := '[' ident (operator (ident | string) modifier?)? ']'
//! ```

use std::str::FromStr;

use selector_common::warning::Warning;

use super::formula::parse_formula;
use crate::ast::{
    self, Argument, AttributeOperator, AttributeSelector, CombinatorKind, Item, Rule, Selector,
};
use crate::config::UnknownPolicy;
use crate::dialect::Dialect;
use crate::error::{ParseError, UnknownFeatureError};
use crate::modules::{ArgumentGrammar, Category, PseudoSignature};
use crate::policy::{self, Outcome};
use crate::tokenizer::{Token, TokenKind, tokenize};

/// A successful parse together with the warnings it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    /// The parsed selector list.
    pub selector: Selector,
    /// Warnings recorded under the `warn` policy, in source order.
    pub warnings: Vec<Warning>,
}

impl ParseOutput {
    /// Print the warnings to stderr through [`Warning::report`], once per
    /// distinct message. Returns how many were printed for the first time.
    #[must_use]
    pub fn report(&self, component: &str) -> usize {
        self.warnings
            .iter()
            .filter(|warning| warning.report(component))
            .count()
    }
}

/// Parse selector text under a dialect.
///
/// # Errors
///
/// Returns [`ParseError::Lex`] when the text cannot be tokenized,
/// [`ParseError::Syntax`] when it does not follow the selector grammar, and
/// [`ParseError::UnknownFeature`] when the dialect rejects a construct.
pub fn parse(text: &str, dialect: &Dialect) -> Result<Selector, ParseError> {
    parse_with_warnings(text, dialect).map(|output| output.selector)
}

/// Parse selector text under a dialect, returning the warnings as well.
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_with_warnings(text: &str, dialect: &Dialect) -> Result<ParseOutput, ParseError> {
    let mut parser = Parser::new(text, dialect)?;
    let selector = parser.parse_selector_list()?;

    let token = parser.peek();
    if !token.is_eof() {
        return Err(unexpected(token));
    }

    Ok(ParseOutput {
        selector,
        warnings: parser.warnings,
    })
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    position: usize,
    dialect: &'a Dialect,
    warnings: Vec<Warning>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, dialect: &'a Dialect) -> Result<Self, ParseError> {
        Ok(Self {
            input,
            tokens: tokenize(input)?,
            position: 0,
            dialect,
            warnings: Vec::new(),
        })
    }

    /// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
    ///
    /// Stops before the first token that cannot continue the list, which is
    /// end of input at the top level and `)` inside an argument.
    fn parse_selector_list(&mut self) -> Result<Selector, ParseError> {
        let mut rules = Vec::new();

        let _ = self.skip_whitespace();
        loop {
            rules.push(self.parse_rule()?);

            if self.peek().is(TokenKind::Comma) {
                self.advance();
                let _ = self.skip_whitespace();
            } else {
                break;
            }
        }

        Ok(ast::selector(rules))
    }

    /// [§ 3.1 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
    ///
    /// Consumes trailing whitespace.
    fn parse_rule(&mut self) -> Result<Rule, ParseError> {
        let mut items = Vec::new();
        self.parse_compound(&mut items)?;

        loop {
            let had_whitespace = self.skip_whitespace();
            let token = self.peek();
            let position = token.position;

            let kind = match token.kind {
                TokenKind::Comma | TokenKind::RightParen | TokenKind::EndOfInput => break,
                TokenKind::Combinator => {
                    let kind = CombinatorKind::from_str(&token.text)
                        .map_err(|_| unexpected(token))?;
                    self.advance();
                    let _ = self.skip_whitespace();
                    kind
                }
                // "Whitespace between two compound selectors"
                _ if had_whitespace => CombinatorKind::Descendant,
                _ => return Err(unexpected(token)),
            };

            self.check_combinator(kind, position)?;
            items.push(ast::combinator(kind));
            self.parse_compound(&mut items)?;
        }

        Ok(ast::rule(items))
    }

    /// [§ 3.1 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
    ///
    /// Appends at least one item to `items`.
    fn parse_compound(&mut self, items: &mut Vec<Item>) -> Result<(), ParseError> {
        let start = items.len();
        let mut has_pseudo_element = false;

        loop {
            let token = self.peek();
            let starts_item = matches!(
                token.kind,
                TokenKind::Ident
                    | TokenKind::Asterisk
                    | TokenKind::Dot
                    | TokenKind::Hash
                    | TokenKind::LeftBracket
                    | TokenKind::Colon
                    | TokenKind::DoubleColon
            );
            if !starts_item {
                break;
            }
            if has_pseudo_element {
                return Err(ParseError::syntax(
                    "Pseudo-element must be the last item in a compound selector.",
                    token.position,
                ));
            }

            let is_first = items.len() == start;
            let item = match token.kind {
                TokenKind::Ident | TokenKind::Asterisk if !is_first => {
                    return Err(ParseError::syntax(
                        format!("Type selector {token} must come first in a compound selector."),
                        token.position,
                    ));
                }
                TokenKind::Ident => {
                    let item = ast::tag_name(token.text.clone());
                    self.advance();
                    item
                }
                TokenKind::Asterisk => {
                    self.advance();
                    ast::universal()
                }
                TokenKind::Dot => {
                    self.advance();
                    let name = self.expect_ident("Expected a class name after \".\"")?;
                    ast::class_name(name)
                }
                TokenKind::Hash => {
                    let item = ast::id_name(token.text.clone());
                    self.advance();
                    item
                }
                TokenKind::LeftBracket => self.parse_attribute()?,
                TokenKind::Colon => self.parse_pseudo(Category::PseudoClass)?,
                _ => {
                    has_pseudo_element = true;
                    self.parse_pseudo(Category::PseudoElement)?
                }
            };
            items.push(item);
        }

        if items.len() == start {
            let token = self.peek();
            return Err(ParseError::syntax(
                format!("Expected a selector but found {token}."),
                token.position,
            ));
        }
        Ok(())
    }

    /// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    fn parse_attribute(&mut self) -> Result<Item, ParseError> {
        self.advance(); // [
        let _ = self.skip_whitespace();
        let name = self.expect_ident("Expected an attribute name after \"[\"")?;
        let _ = self.skip_whitespace();

        let token = self.peek();
        if token.is(TokenKind::RightBracket) {
            self.advance();
            return Ok(ast::attribute(name));
        }
        if !token.is(TokenKind::AttributeOperator) {
            return Err(ParseError::syntax(
                format!("Expected \"]\" or an attribute operator but found {token}."),
                token.position,
            ));
        }

        let operator_position = token.position;
        let operator =
            AttributeOperator::from_str(&token.text).map_err(|_| unexpected(token))?;
        self.advance();
        if !self.dialect.allows_attribute_operator(operator) {
            self.apply_policy(
                self.dialect.attribute_policy(),
                UnknownFeatureError::AttributeOperator(operator.to_string()),
                operator_position,
            )?;
        }

        let _ = self.skip_whitespace();
        let token = self.peek();
        let value = match token.kind {
            TokenKind::Ident | TokenKind::String => token.text.clone(),
            _ => {
                return Err(ParseError::syntax(
                    format!("Expected an attribute value but found {token}."),
                    token.position,
                ));
            }
        };
        self.advance();
        let _ = self.skip_whitespace();

        let token = self.peek();
        let case_sensitivity = if token.is(TokenKind::Ident) {
            let modifier = token.text.clone();
            let modifier_position = token.position;
            self.advance();
            let _ = self.skip_whitespace();
            if !self.dialect.allows_case_sensitivity_modifier(&modifier) {
                self.apply_policy(
                    self.dialect.attribute_policy(),
                    UnknownFeatureError::CaseSensitivityModifier(modifier.clone()),
                    modifier_position,
                )?;
            }
            Some(modifier)
        } else {
            None
        };

        self.expect(TokenKind::RightBracket, "]")?;

        Ok(Item::Attribute(AttributeSelector {
            name,
            operator: Some(operator),
            value: Some(value),
            case_sensitivity,
        }))
    }

    /// [§ 3.6 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes) and
    /// [§ 3.6.1 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
    fn parse_pseudo(&mut self, category: Category) -> Result<Item, ParseError> {
        let prefix = self.peek().text.clone();
        self.advance();

        let token = self.peek();
        if !token.is(TokenKind::Ident) {
            return Err(ParseError::syntax(
                format!("Expected a {category} name after \"{prefix}\" but found {token}."),
                token.position,
            ));
        }
        let name = token.text.clone();
        let name_position = token.position;
        self.advance();

        let argument = match policy::resolve(&name, category, self.dialect) {
            Outcome::Known(signature) => {
                self.parse_known_argument(&prefix, &name, signature)?
            }
            Outcome::Rejected => return Err(unknown_pseudo(category, name).into()),
            Outcome::AcceptedWithWarning => {
                self.warn(&unknown_pseudo(category, name.clone()), name_position);
                self.parse_loose_argument()?
            }
            Outcome::AcceptedLoosely => self.parse_loose_argument()?,
        };

        Ok(match (category, argument) {
            (Category::PseudoClass, None) => ast::pseudo_class(name),
            (Category::PseudoClass, Some(argument)) => ast::pseudo_class_with(name, argument),
            (Category::PseudoElement, None) => ast::pseudo_element(name),
            (Category::PseudoElement, Some(argument)) => ast::pseudo_element_with(name, argument),
        })
    }

    /// Parse the argument of a known name, validating it against its signature.
    fn parse_known_argument(
        &mut self,
        prefix: &str,
        name: &str,
        signature: PseudoSignature,
    ) -> Result<Option<Argument>, ParseError> {
        let token = self.peek();
        let has_argument = token.is(TokenKind::LeftParen);

        match (has_argument, signature.argument()) {
            (false, _) if signature.accepts_no_argument() => Ok(None),
            (false, _) => Err(ParseError::syntax(
                format!("\"{prefix}{name}\" requires an argument."),
                token.position,
            )),
            (true, None | Some(ArgumentGrammar::NoArgument)) => Err(ParseError::syntax(
                format!("\"{prefix}{name}\" does not take an argument."),
                token.position,
            )),
            (true, Some(grammar)) => {
                let open = token.position;
                self.advance();
                let argument = self.parse_argument_body(grammar, open)?;
                self.expect(TokenKind::RightParen, ")")?;
                Ok(Some(argument))
            }
        }
    }

    /// Parse the tokens between `(` and `)` according to `grammar`. Leaves
    /// the closing parenthesis unconsumed.
    fn parse_argument_body(
        &mut self,
        grammar: ArgumentGrammar,
        open: usize,
    ) -> Result<Argument, ParseError> {
        match grammar {
            ArgumentGrammar::Selector => {
                let selector = self.parse_selector_list()?;
                Ok(Argument::Selector(selector))
            }
            ArgumentGrammar::Formula => {
                let (a, b) = self.parse_formula_tokens(open, None)?;
                Ok(Argument::Formula { a, b })
            }
            ArgumentGrammar::FormulaOfSelector => self.parse_formula_of_selector(open),
            ArgumentGrammar::String => {
                let value = self.parse_literal(TokenKind::String, "a string")?;
                Ok(Argument::String(value))
            }
            ArgumentGrammar::Identifier => {
                let value = self.parse_literal(TokenKind::Ident, "an identifier")?;
                Ok(Argument::Identifier(value))
            }
            ArgumentGrammar::Number => {
                let position = self.peek_past_whitespace().position;
                let text = self.parse_literal(TokenKind::Number, "a number")?;
                let value = text.parse().map_err(|_| {
                    ParseError::syntax(format!("Invalid number \"{text}\"."), position)
                })?;
                Ok(Argument::Number(value))
            }
            ArgumentGrammar::NoArgument => {
                Err(ParseError::syntax("Unexpected argument.", open))
            }
        }
    }

    /// [§ 14.4 `:nth-child()`](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
    ///
    /// "The `:nth-child(An+B [of S]?)` pseudo-class notation..."
    fn parse_formula_of_selector(&mut self, open: usize) -> Result<Argument, ParseError> {
        let Some(of_index) = self.find_of_keyword() else {
            let (a, b) = self.parse_formula_tokens(open, None)?;
            return Ok(Argument::FormulaOfSelector { a, b, selector: None });
        };

        let (a, b) = self.parse_formula_tokens(open, Some(of_index))?;

        self.position = of_index + 1;
        let selector = self.parse_selector_list()?;
        Ok(Argument::FormulaOfSelector {
            a,
            b,
            selector: Some(selector),
        })
    }

    /// Read an `an+b` from the tokens up to `stop`, or up to the `)` closing
    /// the argument opened at `open`. Leaves the stopping token unconsumed.
    ///
    /// The text is rebuilt from tokens, so comments are gone and escapes are
    /// resolved before the microsyntax sees it. Only the error message quotes
    /// the source as written.
    fn parse_formula_tokens(
        &mut self,
        open: usize,
        stop: Option<usize>,
    ) -> Result<(i32, i32), ParseError> {
        let start = self.peek_past_whitespace().position;
        let mut text = String::new();
        let mut well_formed = true;
        let mut depth = 0usize;

        while Some(self.position) != stop {
            let token = self.peek();
            match token.kind {
                TokenKind::RightParen if depth == 0 => break,
                TokenKind::EndOfInput => {
                    return Err(ParseError::syntax("Unclosed \"(\".", open));
                }
                TokenKind::Number
                | TokenKind::Ident
                | TokenKind::Delim
                | TokenKind::Combinator
                    if depth == 0 =>
                {
                    text.push_str(&token.text);
                }
                TokenKind::Whitespace if depth == 0 => text.push(' '),
                TokenKind::LeftParen => {
                    depth += 1;
                    well_formed = false;
                }
                TokenKind::RightParen => depth -= 1,
                _ => well_formed = false,
            }
            self.advance();
        }

        if well_formed {
            formula(text.trim(), start)
        } else {
            let end = self.peek().position;
            Err(invalid_formula(self.input[start..end].trim(), start))
        }
    }

    /// Index of an `of` identifier before the closing parenthesis of the
    /// current argument, if any.
    fn find_of_keyword(&self) -> Option<usize> {
        let mut depth = 0usize;
        for (index, token) in self.tokens.iter().enumerate().skip(self.position) {
            match token.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen if depth == 0 => return None,
                TokenKind::RightParen => depth -= 1,
                TokenKind::EndOfInput => return None,
                // "1of" is a dimension, not a number followed by `of`.
                TokenKind::Ident
                    if depth == 0
                        && token.text.eq_ignore_ascii_case("of")
                        && self.tokens[index - 1].is(TokenKind::Whitespace) =>
                {
                    return Some(index);
                }
                _ => {}
            }
        }
        None
    }

    /// A single literal token of `kind`, with optional surrounding whitespace.
    fn parse_literal(&mut self, kind: TokenKind, expected: &str) -> Result<String, ParseError> {
        let _ = self.skip_whitespace();
        let token = self.peek();
        if !token.is(kind) {
            return Err(ParseError::syntax(
                format!("Expected {expected} but found {token}."),
                token.position,
            ));
        }
        let text = token.text.clone();
        self.advance();
        let _ = self.skip_whitespace();
        Ok(text)
    }

    /// Argument of a name accepted without validation: the source text
    /// between the parentheses, trimmed, as a string. The text is verbatim,
    /// so comments and escapes inside it are kept as written.
    fn parse_loose_argument(&mut self) -> Result<Option<Argument>, ParseError> {
        let token = self.peek();
        if !token.is(TokenKind::LeftParen) {
            return Ok(None);
        }
        let open = token.position;
        self.advance();
        let (text, _) = self.raw_argument(open)?;
        self.expect(TokenKind::RightParen, ")")?;
        Ok(Some(Argument::String(text.to_string())))
    }

    /// Skip to the `)` matching an already consumed `(` at byte offset
    /// `open`, returning the trimmed source text in between and its offset.
    fn raw_argument(&mut self, open: usize) -> Result<(&'a str, usize), ParseError> {
        let start = self.peek().position;
        let mut depth = 0usize;

        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen if depth == 0 => {
                    let input = self.input;
                    return Ok((input[start..token.position].trim(), start));
                }
                TokenKind::RightParen => depth -= 1,
                TokenKind::EndOfInput => {
                    return Err(ParseError::syntax("Unclosed \"(\".", open));
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Check a combinator against the dialect's allowed list.
    fn check_combinator(&mut self, kind: CombinatorKind, position: usize) -> Result<(), ParseError> {
        if self.dialect.allows_combinator(kind) {
            return Ok(());
        }
        self.apply_policy(
            self.dialect.combinator_policy(),
            UnknownFeatureError::Combinator(kind.to_string()),
            position,
        )
    }

    /// Act on the policy for an unrecognized attribute operator, modifier or
    /// combinator. The node is kept unless the policy rejects it.
    fn apply_policy(
        &mut self,
        policy: UnknownPolicy,
        feature: UnknownFeatureError,
        position: usize,
    ) -> Result<(), ParseError> {
        match policy::unrecognized(policy) {
            Outcome::Rejected => Err(feature.into()),
            Outcome::AcceptedWithWarning => {
                self.warn(&feature, position);
                Ok(())
            }
            Outcome::AcceptedLoosely | Outcome::Known(_) => Ok(()),
        }
    }

    fn warn(&mut self, feature: &UnknownFeatureError, position: usize) {
        self.warnings.push(Warning::new(feature.to_string(), position));
    }

    fn expect(&mut self, kind: TokenKind, symbol: &str) -> Result<(), ParseError> {
        let token = self.peek();
        if token.is(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::syntax(
                format!("Expected \"{symbol}\" but found {token}."),
                token.position,
            ))
        }
    }

    fn expect_ident(&mut self, message: &str) -> Result<String, ParseError> {
        let token = self.peek();
        if token.is(TokenKind::Ident) {
            let text = token.text.clone();
            self.advance();
            Ok(text)
        } else {
            Err(ParseError::syntax(
                format!("{message} but found {token}."),
                token.position,
            ))
        }
    }

    /// Skip whitespace tokens, returning whether any were skipped.
    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while self.peek().is(TokenKind::Whitespace) {
            self.advance();
            skipped = true;
        }
        skipped
    }

    fn peek_past_whitespace(&self) -> &Token {
        let last = self.tokens.len() - 1;
        self.tokens[self.position..]
            .iter()
            .find(|token| !token.is(TokenKind::Whitespace))
            .unwrap_or(&self.tokens[last])
    }

    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    /// Move past the current token. End of input is never passed.
    fn advance(&mut self) {
        if !self.peek().is_eof() {
            self.position += 1;
        }
    }
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::syntax(format!("Unexpected {token}."), token.position)
}

fn unknown_pseudo(category: Category, name: String) -> UnknownFeatureError {
    match category {
        Category::PseudoClass => UnknownFeatureError::PseudoClass(name),
        Category::PseudoElement => UnknownFeatureError::PseudoElement(name),
    }
}

fn formula(text: &str, position: usize) -> Result<(i32, i32), ParseError> {
    parse_formula(text).ok_or_else(|| invalid_formula(text, position))
}

fn invalid_formula(text: &str, position: usize) -> ParseError {
    ParseError::syntax(format!("Invalid an+b expression \"{text}\"."), position)
}
