use std::rc::Rc;

use log::{debug, info};

use crate::ast::{BinaryOperator, Node, Property};
use crate::environment::{EnvRef, Environment};
use crate::error::{Result, ScriptError};
use crate::parser;
use crate::scanner::ScanMode;
use crate::value::Value;

/// Evaluate `node` against `env` without keeping any interpreter state.
pub fn evaluate(node: &Node, env: &EnvRef) -> Result<Value> {
    Interpreter::with_environment(Rc::clone(env)).evaluate(node)
}

/// Tree‑walking evaluator.  Holds the scope in which nodes are evaluated;
/// declarations and assignments mutate it.
pub struct Interpreter {
    environment: EnvRef,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter over a freshly seeded global scope.
    pub fn new() -> Self {
        info!("Initializing Interpreter");

        Self::with_environment(Environment::global())
    }

    /// Creates an interpreter over a caller‑supplied scope.  The scope is
    /// expected to bind `true`, `false` and `null` somewhere in its chain.
    pub fn with_environment(environment: EnvRef) -> Self {
        Self { environment }
    }

    pub fn environment(&self) -> &EnvRef {
        &self.environment
    }

    /// Lex, parse and evaluate `source` in this interpreter's scope.
    pub fn run(&mut self, source: &str) -> Result<Value> {
        self.run_with(source, ScanMode::Strict)
    }

    pub fn run_with(&mut self, source: &str, mode: ScanMode) -> Result<Value> {
        let program: Node = parser::parse_with(source, mode)?;

        self.evaluate(&program)
    }

    /// Reduces a node to a value.
    pub fn evaluate(&mut self, node: &Node) -> Result<Value> {
        debug!("Evaluating {}", node.kind());

        let value = match node {
            Node::Program { statements } => self.evaluate_program(statements)?,

            Node::NumericLiteral { text } => text.parse::<f64>().map(Value::Number).map_err(|e| {
                ScriptError::type_error(format!("Invalid numeric literal '{}': {}", text, e))
            })?,

            // `true`, `false` and `null` are ordinary constant globals.
            Node::Identifier { name } | Node::BooleanOrNullLiteral { text: name } => {
                self.environment.borrow().lookup(name)?
            }

            Node::BinaryExpression {
                left,
                right,
                operator,
            } => self.evaluate_binary(left, *operator, right)?,

            Node::VariableDeclaration {
                name,
                constant,
                initializer,
            } => {
                let value = match initializer {
                    Some(init) => self.evaluate(init)?,
                    None => {
                        debug!("No initializer for '{}', using null", name);
                        Value::Null
                    }
                };

                self.environment
                    .borrow_mut()
                    .declare(name, value, *constant)?
            }

            Node::AssignmentExpression { target, value } => {
                let Node::Identifier { name } = target.as_ref() else {
                    debug!("Rejecting assignment to {}", target.kind());
                    return Err(ScriptError::InvalidAssignmentTarget(
                        target.kind().to_string(),
                    ));
                };

                let value = self.evaluate(value)?;

                self.environment.borrow_mut().assign(name, value)?
            }

            Node::ObjectLiteral { properties } => self.evaluate_object(properties)?,
        };

        debug!("{} evaluated to: {}", node.kind(), value);

        Ok(value)
    }

    /// The value of a program is the value of its last statement.
    fn evaluate_program(&mut self, statements: &[Node]) -> Result<Value> {
        debug!("Interpreting {} statements", statements.len());

        let mut last = Value::Null;

        for statement in statements {
            last = self.evaluate(statement)?;
        }

        info!("Program evaluated to: {}", last);

        Ok(last)
    }

    fn evaluate_binary(&mut self, left: &Node, op: BinaryOperator, right: &Node) -> Result<Value> {
        let left_val = self.evaluate(left)?;
        let right_val = self.evaluate(right)?;

        debug!("Left operand: {}, Right operand: {}", left_val, right_val);

        let (Some(a), Some(b)) = (left_val.as_number(), right_val.as_number()) else {
            return Err(ScriptError::type_error(format!(
                "Operator '{}' requires two numbers, got {} and {}",
                op,
                left_val.type_name(),
                right_val.type_name()
            )));
        };

        // Plain IEEE‑754: dividing by zero gives inf/NaN.
        let result = match op {
            BinaryOperator::Add => a + b,
            BinaryOperator::Subtract => a - b,
            BinaryOperator::Multiply => a * b,
            BinaryOperator::Divide => a / b,
            BinaryOperator::Modulo => a % b,
        };

        Ok(Value::Number(result))
    }

    fn evaluate_object(&mut self, properties: &[Property]) -> Result<Value> {
        let mut entries: Vec<(String, Value)> = Vec::with_capacity(properties.len());

        for Property { key, value } in properties {
            let value = match value {
                Some(expr) => self.evaluate(expr)?,
                None => self.environment.borrow().lookup(key)?,
            };

            // A repeated key keeps its first position and takes the last value.
            match entries.iter_mut().find(|(k, _)| k == key) {
                Some((_, slot)) => *slot = value,
                None => entries.push((key.clone(), value)),
            }
        }

        Ok(Value::Object(entries))
    }
}
