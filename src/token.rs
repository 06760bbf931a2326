use log::debug;
use serde::Serialize;
use std::fmt;

/// The different kinds of tokens recognized by the scanner.
///
/// No variant carries data: the literal text of numbers, identifiers and
/// operators lives in [`Token::lexeme`].
/// `EOF` marks the end of input.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    /// A run of decimal digits
    NUMBER,

    /// A user‑defined identifier
    IDENTIFIER,

    /// 'null'
    NULL,

    /// 'true' or 'false'
    BOOLEAN,

    /// '='
    EQUAL,

    /// '('
    LEFT_PAREN,

    /// ')'
    RIGHT_PAREN,

    /// '{'
    LEFT_BRACE,

    /// '}'
    RIGHT_BRACE,

    /// ','
    COMMA,

    /// ':'
    COLON,

    /// One of '+', '-', '*', '/', '%'
    BINARY_OPERATOR,

    /// 'let'
    LET,

    /// 'const'
    CONST,

    /// ';'
    SEMICOLON,

    /// End‑of‑file marker
    EOF,
}

impl TokenType {
    /// Upper-case name used in diagnostics and the `tokenize` output.
    pub const fn name(self) -> &'static str {
        match self {
            TokenType::NUMBER => "NUMBER",
            TokenType::IDENTIFIER => "IDENTIFIER",
            TokenType::NULL => "NULL",
            TokenType::BOOLEAN => "BOOLEAN",
            TokenType::EQUAL => "EQUAL",
            TokenType::LEFT_PAREN => "LEFT_PAREN",
            TokenType::RIGHT_PAREN => "RIGHT_PAREN",
            TokenType::LEFT_BRACE => "LEFT_BRACE",
            TokenType::RIGHT_BRACE => "RIGHT_BRACE",
            TokenType::COMMA => "COMMA",
            TokenType::COLON => "COLON",
            TokenType::BINARY_OPERATOR => "BINARY_OPERATOR",
            TokenType::LET => "LET",
            TokenType::CONST => "CONST",
            TokenType::SEMICOLON => "SEMICOLON",
            TokenType::EOF => "EOF",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token, including its type, the original lexeme,
/// and the line number where it was found.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Token<'a> {
    /// The category of this token.
    pub token_type: TokenType,

    /// The exact substring from the source that produced this token.
    pub lexeme: &'a str,

    /// 1‑based line number in the source.
    pub line: usize,
}

impl<'a> Token<'a> {
    /// Create a new Token with the given type, lexeme, and line.
    pub fn new(token_type: TokenType, lexeme: &'a str, line: usize) -> Self {
        debug!(
            "Creating new token: type={:?}, lexeme={}, line={}",
            token_type, lexeme, line
        );

        Self {
            token_type,
            lexeme,
            line,
        }
    }

    /// Short description for "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self.token_type {
            TokenType::EOF => "end of input".to_string(),
            tt => format!("{} '{}'", tt, self.lexeme),
        }
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.token_type, self.lexeme)
    }
}
