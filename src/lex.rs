//! Facilities for lexing the integer literals given on the command line.

use log::trace;
use logos::{self, Logos};
use num_bigint::BigUint;
use std::fmt;

//===========================================================================//

/// An error encountered while parsing an integer literal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    /// The byte offset within the input where the error occurred.
    pub column: usize,
    /// The error message to report to the user.
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at column {}: {}", self.column, self.message)
    }
}

//===========================================================================//

fn radix_literal(digits: &str, radix: u32) -> Option<BigUint> {
    let digits = digits
        .chars()
        .filter(|&chr| chr != '_')
        .map(|chr| chr.to_digit(radix).map(|digit| digit as u8))
        .collect::<Option<Vec<u8>>>()?;
    BigUint::from_radix_be(&digits, radix)
}

fn binary_literal_callback(
    lexer: &mut logos::Lexer<TokenKind>,
) -> Option<BigUint> {
    let slice = lexer.slice();
    let digits = slice.strip_prefix('%').unwrap_or_else(|| &slice[2..]);
    radix_literal(digits, 2)
}

fn decimal_literal_callback(
    lexer: &mut logos::Lexer<TokenKind>,
) -> Option<BigUint> {
    radix_literal(lexer.slice(), 10)
}

fn hex_literal_callback(
    lexer: &mut logos::Lexer<TokenKind>,
) -> Option<BigUint> {
    let slice = lexer.slice();
    let digits = slice.strip_prefix('$').unwrap_or_else(|| &slice[2..]);
    radix_literal(digits, 16)
}

#[derive(Debug, Eq, Logos, PartialEq)]
#[logos(skip r"[ \t]+")]
enum TokenKind {
    #[regex(r"0[bB][01][01_]*", binary_literal_callback)]
    #[regex(r"%[01][01_]*", binary_literal_callback)]
    #[regex(r"[0-9][0-9_]*", decimal_literal_callback)]
    #[regex(r"0[xX][0-9a-fA-F][0-9a-fA-F_]*", hex_literal_callback)]
    #[regex(r"\$[0-9a-fA-F][0-9a-fA-F_]*", hex_literal_callback)]
    IntLiteral(BigUint),
    #[token("-")]
    Minus,
}

//===========================================================================//

/// The contents of a single lexical token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenValue {
    /// An integer literal.
    IntLiteral(BigUint),
    /// A "`-`" symbol.
    Minus,
}

impl TokenValue {
    /// Returns the human-readable name for this kind of token.
    pub fn name(&self) -> &str {
        match &self {
            TokenValue::IntLiteral(_) => "int literal",
            TokenValue::Minus => "minus sign",
        }
    }
}

//===========================================================================//

/// A single lexical token, including location information.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    /// The byte offset within the input of the start of the token.
    pub column: usize,
    /// The contents of the token.
    pub value: TokenValue,
}

//===========================================================================//

/// A lexer for tokenizing a command-line argument.
pub struct TokenLexer<'a> {
    lexer: logos::Lexer<'a, TokenKind>,
}

impl<'a> TokenLexer<'a> {
    /// Constructs a new lexer in its initial state.
    pub fn new(input: &'a str) -> TokenLexer<'a> {
        TokenLexer { lexer: TokenKind::lexer(input) }
    }
}

impl Iterator for TokenLexer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Result<Token, ParseError>> {
        let value = match self.lexer.next()? {
            Ok(TokenKind::IntLiteral(int)) => TokenValue::IntLiteral(int),
            Ok(TokenKind::Minus) => TokenValue::Minus,
            Err(()) => {
                let column = self.lexer.span().start;
                let message =
                    format!("invalid character: {}", self.lexer.slice());
                return Some(Err(ParseError { column, message }));
            }
        };
        Some(Ok(Token { column: self.lexer.span().start, value }))
    }
}

//===========================================================================//

/// Parses a single unsigned integer literal, such as `42`, `0x2a`, `$2a`,
/// `0b101010`, or `%101010`, and converts it to the integer type `T`.
pub fn parse_literal<T: TryFrom<BigUint>>(
    input: &str,
) -> Result<T, ParseError> {
    let mut tokens = TokenLexer::new(input);
    let (column, int) = match tokens.next() {
        None => {
            let message = "expected an integer literal".to_string();
            return Err(ParseError { column: input.len(), message });
        }
        Some(Err(error)) => return Err(error),
        Some(Ok(Token { column, value: TokenValue::Minus })) => {
            let message = "negative values are not supported".to_string();
            return Err(ParseError { column, message });
        }
        Some(Ok(Token { column, value: TokenValue::IntLiteral(int) })) => {
            (column, int)
        }
    };
    match tokens.next() {
        None => {}
        Some(Err(error)) => return Err(error),
        Some(Ok(token)) => {
            let message = format!(
                "unexpected {} after integer literal",
                token.value.name()
            );
            return Err(ParseError { column: token.column, message });
        }
    }
    trace!("parsed literal {:?} as {int}", input.trim());
    T::try_from(int).map_err(|_| {
        let message = format!("value out of range: {}", input.trim());
        ParseError { column, message }
    })
}

//===========================================================================//


//===========================================================================//
