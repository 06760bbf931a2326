use serde::Serialize;
use std::fmt;

/// Arithmetic operator of a [`Node::BinaryExpression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    /// `+`
    Add,

    /// `-`
    Subtract,

    /// `*`
    Multiply,

    /// `/`
    Divide,

    /// `%`
    Modulo,
}

impl BinaryOperator {
    /// Map an operator lexeme to its variant.
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Subtract),
            "*" => Some(BinaryOperator::Multiply),
            "/" => Some(BinaryOperator::Divide),
            "%" => Some(BinaryOperator::Modulo),
            _ => None,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }

    /// `*`, `/` and `%` bind tighter than `+` and `-`.
    pub const fn is_multiplicative(self) -> bool {
        matches!(
            self,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo
        )
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One `key` or `key: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub key: String,

    /// `None` for the shorthand form, which reads the variable named `key`.
    pub value: Option<Node>,
}

/// **Abstract‑Syntax‑Tree node**.  The tree owns all of its children; the
/// parser copies token text into `String`s so the AST outlives the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Node {
    /// Parse root: the top-level statements in source order.
    Program { statements: Vec<Node> },

    /// A digit run, kept as written.
    NumericLiteral { text: String },

    /// Variable reference.
    Identifier { name: String },

    /// `true`, `false` or `null`.  Evaluated like an identifier against the
    /// seeded global constants.
    BooleanOrNullLiteral { text: String },

    /// Infix arithmetic: `left op right`.
    BinaryExpression {
        left: Box<Node>,
        right: Box<Node>,
        operator: BinaryOperator,
    },

    /// `let name (= initializer)?;` or `const name = initializer;`
    VariableDeclaration {
        name: String,
        constant: bool,
        initializer: Option<Box<Node>>,
    },

    /// `target = value`.  `target` is any expression here; the evaluator
    /// rejects anything but an identifier.
    AssignmentExpression { target: Box<Node>, value: Box<Node> },

    /// `{ a: 1, b }`
    ObjectLiteral { properties: Vec<Property> },
}

impl Node {
    /// Node kind name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Program { .. } => "Program",
            Node::NumericLiteral { .. } => "NumericLiteral",
            Node::Identifier { .. } => "Identifier",
            Node::BooleanOrNullLiteral { .. } => "BooleanOrNullLiteral",
            Node::BinaryExpression { .. } => "BinaryExpression",
            Node::VariableDeclaration { .. } => "VariableDeclaration",
            Node::AssignmentExpression { .. } => "AssignmentExpression",
            Node::ObjectLiteral { .. } => "ObjectLiteral",
        }
    }

    /// The statements of a `Program`, or `None` for any other node.
    pub fn statements(&self) -> Option<&[Node]> {
        match self {
            Node::Program { statements } => Some(statements),
            _ => None,
        }
    }
}
