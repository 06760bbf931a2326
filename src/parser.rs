/*!
Recursive‑descent parser for letscript.

Complexity
----------
* **n** = number of tokens (including the sole EOF).

Every token is consumed once via `advance()`, so parsing is **Θ(n)** time.
The AST holds one `Box` per interior node, O(n) space.

A flat chain like `1 + 1 + … + 1` nests one level per operator, and the
evaluator recurses once per level.  The parser therefore counts nesting
(chain links, parentheses, object values, assignment right‑hand sides) and
rejects anything deeper than [`MAX_NESTING`].

### Logging Policy

| Location                     | Level  | Purpose                                   |
|------------------------------|--------|-------------------------------------------|
| `Parser::new`, `parse`       | `info` | Lifecycle milestones.                     |
| `statement`, `var_declaration` | `debug`| Descent into grammar branches.          |
| Error paths (`consume`, etc.)| `debug`| Context before returning structured error.|

--------------------------------------------------------------------------------
Grammar (EBNF)
--------------

```text
program        → statement* EOF ;
statement      → varDecl | exprStmt ;
varDecl        → ( "let" | "const" ) IDENT ( ";" | "=" assignment ";" ) ;
exprStmt       → assignment ";" ;
assignment     → object ( "=" assignment )? ;
object         → "{" ( property ( "," | &"}" ) )* "}" | additive ;
property       → IDENT ( ":" assignment )? ;
additive       → multiplicative ( ( "+" | "-" ) multiplicative )* ;
multiplicative → primary ( ( "*" | "/" | "%" ) primary )* ;
primary        → NUMBER | IDENT | "null" | "true" | "false"
               | "(" assignment ")" ;
```

Precedence is encoded by each rule calling the next‑tighter one.  There is
no error recovery: the first violation aborts the parse.
*/

use crate::ast::{BinaryOperator, Node, Property};
use crate::error::{Result, ScriptError};
use crate::scanner::{tokenize_with, ScanMode};
use crate::token::{Token, TokenType};

use log::{debug, info};

/// Deepest AST the parser will build.
pub const MAX_NESTING: usize = 256;

/// Lex and parse `source` with the strict scanner.
pub fn parse(source: &str) -> Result<Node> {
    parse_with(source, ScanMode::Strict)
}

/// Lex `source` using `mode`, then parse the token stream into a `Program`.
pub fn parse_with(source: &str, mode: ScanMode) -> Result<Node> {
    let tokens: Vec<Token<'_>> = tokenize_with(source, mode)?;

    Parser::new(&tokens).parse()
}

/// Top‑level parser over an immutable slice of tokens.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Construct a new parser.  `tokens` must end with an `EOF` token, as
    /// every stream produced by the scanner does; [`Parser::parse`] rejects
    /// any other slice before reading it.
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse an entire program and return its `Program` node.
    pub fn parse(&mut self) -> Result<Node> {
        info!("Beginning parse phase");

        match self.tokens.last() {
            Some(last) if last.token_type == TokenType::EOF => {}
            last => {
                let line: usize = last.map_or(1, |t| t.line);

                return Err(ScriptError::parse(line, "Token stream must end with EOF"));
            }
        }

        let mut statements: Vec<Node> = Vec::new();

        while !self.is_at_end() {
            statements.push(self.statement()?);
        }

        info!("Parsed {} statements", statements.len());

        Ok(Node::Program { statements })
    }

    // ───────────────────────── statement rules ────────────────────

    fn statement(&mut self) -> Result<Node> {
        debug!("Entering statement at {}", self.peek().describe());

        if self.matches(TokenType::LET) {
            self.var_declaration(false)
        } else if self.matches(TokenType::CONST) {
            self.var_declaration(true)
        } else {
            self.expression_statement()
        }
    }

    fn var_declaration(&mut self, constant: bool) -> Result<Node> {
        let name: &Token<'_> = self.consume(TokenType::IDENTIFIER, "Expected variable name")?;

        debug!("Declaring '{}' (constant={})", name.lexeme, constant);

        if self.matches(TokenType::SEMICOLON) {
            if constant {
                return Err(ScriptError::parse(
                    name.line,
                    format!("Must assign value to constant '{}'", name.lexeme),
                ));
            }

            return Ok(Node::VariableDeclaration {
                name: name.lexeme.to_string(),
                constant,
                initializer: None,
            });
        }

        self.consume(TokenType::EQUAL, "Expected '=' or ';' after variable name")?;

        let initializer: Node = self.assignment()?;

        self.consume(
            TokenType::SEMICOLON,
            "Expected ';' after variable declaration",
        )?;

        Ok(Node::VariableDeclaration {
            name: name.lexeme.to_string(),
            constant,
            initializer: Some(Box::new(initializer)),
        })
    }

    fn expression_statement(&mut self) -> Result<Node> {
        let expr: Node = self.assignment()?;

        self.consume(TokenType::SEMICOLON, "Expected ';' after expression")?;

        Ok(expr)
    }

    // ─────────────────────── expression rules ─────────────────────

    fn assignment(&mut self) -> Result<Node> {
        let target: Node = self.object()?;

        if self.matches(TokenType::EQUAL) {
            // Right‑associative: `a = b = 1` is `a = (b = 1)`.
            self.enter()?;
            let value: Node = self.assignment()?;
            self.leave(1);

            return Ok(Node::AssignmentExpression {
                target: Box::new(target),
                value: Box::new(value),
            });
        }

        Ok(target)
    }

    fn object(&mut self) -> Result<Node> {
        if !self.matches(TokenType::LEFT_BRACE) {
            return self.additive();
        }

        let mut properties: Vec<Property> = Vec::new();

        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            let key: &Token<'_> = self.consume(TokenType::IDENTIFIER, "Expected property key")?;

            let value: Option<Node> = if self.matches(TokenType::COLON) {
                self.enter()?;
                let value: Node = self.assignment()?;
                self.leave(1);
                Some(value)
            } else {
                None
            };

            properties.push(Property {
                key: key.lexeme.to_string(),
                value,
            });

            if !self.check(TokenType::RIGHT_BRACE) {
                self.consume(TokenType::COMMA, "Expected ',' or '}' after property")?;
            }
        }

        self.consume(TokenType::RIGHT_BRACE, "Expected '}' after object literal")?;

        Ok(Node::ObjectLiteral { properties })
    }

    fn additive(&mut self) -> Result<Node> {
        let mut expr: Node = self.multiplicative()?;
        let mut links: usize = 0;

        while let Some(operator) = self.match_operator(|op| !op.is_multiplicative()) {
            self.enter()?;
            links += 1;

            let right: Node = self.multiplicative()?;

            expr = Node::BinaryExpression {
                left: Box::new(expr),
                right: Box::new(right),
                operator,
            };
        }

        self.leave(links);

        Ok(expr)
    }

    fn multiplicative(&mut self) -> Result<Node> {
        let mut expr: Node = self.primary()?;
        let mut links: usize = 0;

        while let Some(operator) = self.match_operator(BinaryOperator::is_multiplicative) {
            self.enter()?;
            links += 1;

            let right: Node = self.primary()?;

            expr = Node::BinaryExpression {
                left: Box::new(expr),
                right: Box::new(right),
                operator,
            };
        }

        self.leave(links);

        Ok(expr)
    }

    fn primary(&mut self) -> Result<Node> {
        if self.matches(TokenType::NUMBER) {
            return Ok(Node::NumericLiteral {
                text: self.previous().lexeme.to_string(),
            });
        }

        if self.matches(TokenType::IDENTIFIER) {
            return Ok(Node::Identifier {
                name: self.previous().lexeme.to_string(),
            });
        }

        if self.matches(TokenType::BOOLEAN) || self.matches(TokenType::NULL) {
            return Ok(Node::BooleanOrNullLiteral {
                text: self.previous().lexeme.to_string(),
            });
        }

        if self.matches(TokenType::LEFT_PAREN) {
            self.enter()?;
            let expr: Node = self.assignment()?;
            self.leave(1);

            self.consume(TokenType::RIGHT_PAREN, "Expected ')' after expression")?;

            return Ok(expr);
        }

        let found: &Token<'_> = self.peek();

        debug!("No expression starts at {}", found.describe());

        Err(ScriptError::parse(
            found.line,
            format!("Expected expression, found {}", found.describe()),
        ))
    }

    // ────────────────────── utility helpers ───────────────────────

    /// Go one level deeper, failing past [`MAX_NESTING`].
    fn enter(&mut self) -> Result<()> {
        self.depth += 1;

        if self.depth > MAX_NESTING {
            let line: usize = self.peek().line;

            debug!("Nesting limit {} exceeded on line {}", MAX_NESTING, line);

            return Err(ScriptError::parse(
                line,
                format!("Expression too deeply nested (limit {})", MAX_NESTING),
            ));
        }

        Ok(())
    }

    fn leave(&mut self, levels: usize) {
        self.depth -= levels;
    }

    /// Consume a `BINARY_OPERATOR` token whose operator satisfies `accept`.
    fn match_operator(&mut self, accept: impl Fn(BinaryOperator) -> bool) -> Option<BinaryOperator> {
        if !self.check(TokenType::BINARY_OPERATOR) {
            return None;
        }

        let operator = BinaryOperator::from_lexeme(self.peek().lexeme).filter(|op| accept(*op))?;

        self.advance();

        Some(operator)
    }

    #[inline(always)]
    fn matches(&mut self, ttype: TokenType) -> bool {
        if self.check(ttype) {
            self.advance();

            return true;
        }

        false
    }

    #[inline(always)]
    fn consume(&mut self, ttype: TokenType, message: &str) -> Result<&'a Token<'a>> {
        if self.check(ttype) {
            return Ok(self.advance());
        }

        let found: &Token<'_> = self.peek();

        debug!("consume({}) failed at {}", ttype, found.describe());

        Err(ScriptError::parse(
            found.line,
            format!("{} (expected {}), found {}", message, ttype, found.describe()),
        ))
    }

    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().token_type == ttype
    }

    #[inline(always)]
    fn advance(&mut self) -> &'a Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        matches!(self.peek().token_type, TokenType::EOF)
    }

    #[inline(always)]
    fn peek(&self) -> &'a Token<'a> {
        &self.tokens[self.current]
    }

    #[inline(always)]
    fn previous(&self) -> &'a Token<'a> {
        &self.tokens[self.current - 1]
    }
}
