use crate::ast::{Node, Property};

/// Converts a syntax tree to a parenthesised prefix form, one line per
/// top-level statement.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(node: &Node) -> String {
        match node {
            // ── program root ────────────────────────────────────────────
            Node::Program { statements } => statements
                .iter()
                .map(Self::print)
                .collect::<Vec<_>>()
                .join("\n"),

            // ── leaves ──────────────────────────────────────────────────
            Node::NumericLiteral { text } => text.clone(),

            Node::Identifier { name } => name.clone(),

            Node::BooleanOrNullLiteral { text } => text.clone(),

            // ── binary operator ─────────────────────────────────────────
            Node::BinaryExpression {
                left,
                operator,
                right,
            } => format!("({} {} {})", operator, Self::print(left), Self::print(right)),

            // ── declarations / assignment ──────────────────────────────
            Node::VariableDeclaration {
                name,
                constant,
                initializer,
            } => {
                let keyword = if *constant { "const" } else { "let" };

                match initializer {
                    Some(init) => format!("({} {} {})", keyword, name, Self::print(init)),
                    None => format!("({} {})", keyword, name),
                }
            }

            Node::AssignmentExpression { target, value } => {
                format!("(= {} {})", Self::print(target), Self::print(value))
            }

            // ── object literal ──────────────────────────────────────────
            Node::ObjectLiteral { properties } => {
                let mut s = String::from("(object");
                for Property { key, value } in properties {
                    s.push(' ');
                    match value {
                        Some(v) => s.push_str(&format!("({} {})", key, Self::print(v))),
                        None => s.push_str(key),
                    }
                }
                s.push(')');
                s
            }
        }
    }
}
