//! Centralised error hierarchy for **letscript**.
//!
//! Every stage (scanner, parser, interpreter, environment) converts its
//! failure modes into one of the variants defined here, so a caller such as the
//! REPL can report the error and carry on with the next input.
//!
//! The module **does not** print diagnostics itself

use std::fmt;
use thiserror::Error;

use log::info;

/// The pipeline stage that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lex,
    Parse,
    Evaluate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Lex => "lex",
            Stage::Parse => "parse",
            Stage::Evaluate => "evaluate",
        };

        f.write_str(name)
    }
}

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScriptError {
    /// Unrecognised character in the source.
    #[error("[line {line}] SyntaxError: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Grammar violation found by the parser.
    #[error("[line {line}] SyntaxError: {message}")]
    Parse { message: String, line: usize },

    /// Left-hand side of `=` is not a plain identifier. Only detectable once
    /// the evaluator sees the target node.
    #[error("SyntaxError: invalid assignment target: {0}")]
    InvalidAssignmentTarget(String),

    /// Use of an undeclared name, or redeclaration within one scope.
    #[error("NameError: {0}")]
    Name(String),

    /// Assignment to a `const` binding.
    #[error("ConstAssignmentError: {0}")]
    ConstAssignment(String),

    /// Operands of the wrong runtime type.
    #[error("TypeError: {0}")]
    Type(String),
}

impl ScriptError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        ScriptError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", line, message);

        ScriptError::Parse { message, line }
    }

    pub fn name<S: Into<String>>(msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Name error: msg={}", message);

        ScriptError::Name(message)
    }

    pub fn const_assignment<S: Into<String>>(msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating ConstAssignment error: msg={}", message);

        ScriptError::ConstAssignment(message)
    }

    pub fn type_error<S: Into<String>>(msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Type error: msg={}", message);

        ScriptError::Type(message)
    }

    /// Which stage of the pipeline raised this error.
    pub fn stage(&self) -> Stage {
        match self {
            ScriptError::Lex { .. } => Stage::Lex,
            ScriptError::Parse { .. } => Stage::Parse,
            ScriptError::InvalidAssignmentTarget(_)
            | ScriptError::Name(_)
            | ScriptError::ConstAssignment(_)
            | ScriptError::Type(_) => Stage::Evaluate,
        }
    }

    /// `true` for errors found before evaluation started (lexing or parsing).
    pub fn is_syntax(&self) -> bool {
        matches!(self.stage(), Stage::Lex | Stage::Parse)
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, ScriptError>;
