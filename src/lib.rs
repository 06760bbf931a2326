pub mod ast;
pub mod ast_printer;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod value;

pub use environment::{EnvRef, Environment};
pub use error::{Result, ScriptError, Stage};
pub use interpreter::{evaluate, Interpreter};
pub use parser::parse;
pub use scanner::tokenize;
pub use value::Value;

/// Run `source` as a complete program in a fresh global scope and return the
/// value of its last statement.
pub fn run(source: &str) -> Result<Value> {
    Interpreter::new().run(source)
}
