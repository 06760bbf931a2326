//! Module `scanner` implements a one‑pass, streaming lexer for letscript.
//!
//! It transforms a `&str` into a sequence of `Token<'a>`s, skipping whitespace
//! and comments, and emitting exactly one `EOF` token at the end. Designed as a
//! `FusedIterator`, it can be chained safely with other iterator adapters.
//!
//! # Public API
//!
//! - `Scanner::new(src: &'a str) -> Scanner<'a>`
//!   Create a strict lexer: unrecognised characters are syntax errors.
//!
//! - `Scanner::lenient(src: &'a str) -> Scanner<'a>`
//!   Unrecognised characters are logged at `warn` level and skipped.
//!
//! - `tokenize(src) -> Result<Vec<Token>>`
//!   Collect a whole token stream, stopping at the first error.
//!
//! # Token Recognition (`scan_token`)
//!
//! - Single‑character tokens: `(`, `)`, `{`, `}`, `,`, `:`, `;`, `=`.
//! - Binary operators: `+`, `-`, `*`, `/`, `%` (all one kind, lexeme tells them apart).
//! - Numeric literals: maximal run of ASCII digits.
//! - Identifiers/keywords: maximal run of alphabetic characters, where a
//!   character is alphabetic when its lowercase and uppercase forms differ.
//!   Keywords are resolved via a perfect‑hash `KEYWORDS` map.
//! - Comments: `//` to end of line, skipped with `memchr`.
//!
//! # Example
//!
//! ```rust
//! use letscript::scanner::Scanner;
//!
//! let mut scanner = Scanner::new("let x = 1; // example");
//! for result in &mut scanner {
//!     match result {
//!         Ok(token) => println!("{}", token),
//!         Err(err)  => eprintln!("{}", err),
//!     }
//! }
//! ```

use crate::error::{Result, ScriptError};
use crate::token::{Token, TokenType};
use log::{debug, info, warn};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static str, TokenType> = phf_map! {
    "let"   => TokenType::LET,
    "const" => TokenType::CONST,
    "null"  => TokenType::NULL,
    "true"  => TokenType::BOOLEAN,
    "false" => TokenType::BOOLEAN,
};

/// How the scanner treats characters it does not recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Report a syntax error.
    #[default]
    Strict,

    /// Emit a warning diagnostic and skip the character.
    Lenient,
}

/// "Alphabetic" means the character has distinct lower and upper case forms.
fn is_alpha(c: char) -> bool {
    !c.to_lowercase().eq(c.to_uppercase())
}

/// A single pass **scanner / lexer** that converts source text into a
/// sequence of [`Token`]s.  The lifetime `'a` ties every emitted token’s
/// `lexeme` slice back to the original source buffer.
pub struct Scanner<'a> {
    src: &'a str,               // entire source text
    start: usize,               // byte index of the *first* char of the current lexeme
    curr: usize,                // byte index *one past* the last char examined
    line: usize,                // 1‑based line counter (\n increments)
    mode: ScanMode,             // unrecognised‑character policy
    pending: Option<TokenType>, // recognised token kind waiting to be emitted
}

impl<'a> Scanner<'a> {
    /// Create a new strict lexer over `src`.
    #[inline]
    pub fn new(src: &'a str) -> Self {
        Self::with_mode(src, ScanMode::Strict)
    }

    /// Create a lexer that skips unrecognised characters with a warning.
    #[inline]
    pub fn lenient(src: &'a str) -> Self {
        Self::with_mode(src, ScanMode::Lenient)
    }

    pub fn with_mode(src: &'a str, mode: ScanMode) -> Self {
        info!("Scanner created over {} bytes ({:?})", src.len(), mode);

        Self {
            src,
            start: 0,
            curr: 0,
            line: 1,
            mode,
            pending: None,
        }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    /// Return the length of the input in bytes.
    #[inline(always)]
    const fn len(&self) -> usize {
        self.src.len()
    }

    /// Are we at (or past) the end of input?
    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.len()
    }

    /// Advance one character and return it.  Higher‑level code always guards
    /// with [`is_at_end`], so the `'\0'` fallback is never observed.
    #[inline(always)]
    fn advance(&mut self) -> char {
        let c = self.peek();
        self.curr += c.len_utf8();
        c
    }

    /// Peek at the current character without consuming it.  Returns `'\0'`
    /// past EOF to avoid branching at call‑site.
    #[inline(always)]
    fn peek(&self) -> char {
        self.src[self.curr..].chars().next().unwrap_or('\0')
    }

    /// Conditionally consume a character **iff** it matches `expected`.
    #[inline(always)]
    fn match_char(&mut self, expected: char) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* token starting at `self.curr`.  If the lexeme produces an
    /// actual token the kind is stored in `self.pending`.  Whitespace, comments
    /// and (in lenient mode) unknown characters are skipped by returning
    /// `Ok(())` with `pending = None`.
    fn scan_token(&mut self) -> Result<()> {
        let c = self.advance();

        match c {
            // ── single‑character punctuators ──────────────────────────────
            '(' => self.pending = Some(TokenType::LEFT_PAREN),
            ')' => self.pending = Some(TokenType::RIGHT_PAREN),
            '{' => self.pending = Some(TokenType::LEFT_BRACE),
            '}' => self.pending = Some(TokenType::RIGHT_BRACE),
            ',' => self.pending = Some(TokenType::COMMA),
            ':' => self.pending = Some(TokenType::COLON),
            ';' => self.pending = Some(TokenType::SEMICOLON),
            '=' => self.pending = Some(TokenType::EQUAL),

            // ── arithmetic operators ─────────────────────────────────────
            '+' | '-' | '*' | '%' => self.pending = Some(TokenType::BINARY_OPERATOR),

            // ── comments (// … until newline) or division ────────────────
            '/' => {
                if self.match_char('/') {
                    if let Some(pos) = memchr(b'\n', &self.src.as_bytes()[self.curr..]) {
                        self.curr += pos;
                    } else {
                        self.curr = self.len();
                    }

                    return Ok(());
                }

                self.pending = Some(TokenType::BINARY_OPERATOR);
            }

            // ── whitespace / newline ─────────────────────────────────────
            ' ' | '\r' | '\t' => {
                return Ok(()); // skip insignificants
            }

            '\n' => {
                self.line += 1; // track for diagnostics

                return Ok(());
            }

            // ── number literal ───────────────────────────────────────────
            '0'..='9' => {
                self.parse_number();
            }

            // ── identifiers / keywords ───────────────────────────────────
            c if is_alpha(c) => {
                self.parse_identifier();
            }

            // ── unexpected character ─────────────────────────────────────
            _ => match self.mode {
                ScanMode::Strict => {
                    return Err(ScriptError::lex(
                        self.line,
                        format!("Unexpected character: {}", c),
                    ));
                }

                ScanMode::Lenient => {
                    warn!(
                        "[line {}] unrecognized character {:?}, skipping",
                        self.line, c
                    );
                }
            },
        }

        Ok(())
    }

    /// Consume the rest of a digit run.  The value is parsed later by the
    /// evaluator; the token only keeps its text.
    fn parse_number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        self.pending = Some(TokenType::NUMBER);
    }

    /// Parse an identifier and decide if it is a **keyword** or a generic
    /// `IDENTIFIER` token.
    fn parse_identifier(&mut self) {
        while !self.is_at_end() && is_alpha(self.peek()) {
            self.advance();
        }

        let word: &str = &self.src[self.start..self.curr];

        let tt: TokenType = KEYWORDS
            .get(word)
            .copied()
            .unwrap_or(TokenType::IDENTIFIER);

        self.pending = Some(tt);
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        // Loop until we either emit a token, hit EOF, or see an error.
        while self.curr <= self.len() {
            // 1. EOF guard – emit exactly one EOF then terminate.
            if self.curr == self.len() {
                self.curr += 1; // ensure fused semantics
                return Some(Ok(Token::new(TokenType::EOF, "", self.line)));
            }

            // 2. Reset per‑token state.
            self.start = self.curr;
            self.pending = None;

            // 3. Attempt to scan a token.
            if let Err(e) = self.scan_token() {
                return Some(Err(e));
            }

            // 4. If a real token was recognised, build and return it.
            if let Some(tt) = self.pending.take() {
                let lex: &'a str = &self.src[self.start..self.curr];
                debug!("Scanned token ({:?}) on line {}", tt, self.line);

                return Some(Ok(Token::new(tt, lex, self.line)));
            }
            // Otherwise it was whitespace / comment → continue loop.
        }

        None // already yielded EOF
    }
}

impl<'a> FusedIterator for Scanner<'a> {}

/// Scan all of `src`, failing on the first lexical error.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>> {
    tokenize_with(src, ScanMode::Strict)
}

pub fn tokenize_with(src: &str, mode: ScanMode) -> Result<Vec<Token<'_>>> {
    let tokens: Vec<Token<'_>> = Scanner::with_mode(src, mode).collect::<Result<_>>()?;

    info!("Tokenized {} tokens", tokens.len());

    Ok(tokens)
}
