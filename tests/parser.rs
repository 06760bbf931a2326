#[cfg(test)]
mod parser_tests {
    use letscript as script;

    use script::ast::{BinaryOperator, Node, Property};
    use script::ast_printer::AstPrinter;
    use script::error::{ScriptError, Stage};
    use script::parser::{parse, parse_with, Parser, MAX_NESTING};
    use script::scanner::{tokenize, ScanMode};
    use script::token::{Token, TokenType};

    fn statements(source: &str) -> Vec<Node> {
        match parse(source) {
            Ok(Node::Program { statements }) => statements,
            Ok(other) => panic!("Expected Program, got {:?}", other),
            Err(e) => panic!("Failed to parse {:?}: {}", source, e),
        }
    }

    /// Prefix form of a single-statement program.
    fn printed(source: &str) -> String {
        AstPrinter::print(&parse(source).unwrap())
    }

    fn assert_parse_error(source: &str, fragment: &str) {
        match parse(source) {
            Err(e @ ScriptError::Parse { .. }) => assert!(
                e.to_string().contains(fragment),
                "Expected error containing {:?}, got: {}",
                fragment,
                e
            ),
            other => panic!("Expected parse error for {:?}, got {:?}", source, other),
        }
    }

    fn num(text: &str) -> Box<Node> {
        Box::new(Node::NumericLiteral {
            text: text.to_string(),
        })
    }

    #[test]
    fn test_multiplicative_binds_tighter() {
        assert_eq!(printed("2 + 3 * 4;"), "(+ 2 (* 3 4))");
        assert_eq!(printed("2 * 3 + 4;"), "(+ (* 2 3) 4)");
        assert_eq!(printed("8 - 6 / 2 % 3;"), "(- 8 (% (/ 6 2) 3))");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(printed("(2 + 3) * 4;"), "(* (+ 2 3) 4)");
        assert_eq!(printed("((1));"), "1");
    }

    #[test]
    fn test_operators_are_left_associative() {
        assert_eq!(printed("1 - 2 - 3;"), "(- (- 1 2) 3)");
        assert_eq!(printed("8 / 4 / 2;"), "(/ (/ 8 4) 2)");
    }

    #[test]
    fn test_binary_expression_structure() {
        assert_eq!(
            statements("1 % 2;"),
            vec![Node::BinaryExpression {
                left: num("1"),
                right: num("2"),
                operator: BinaryOperator::Modulo,
            }]
        );
    }

    #[test]
    fn test_variable_declarations() {
        assert_eq!(
            statements("let x = 10; const y = 1; let z;"),
            vec![
                Node::VariableDeclaration {
                    name: "x".into(),
                    constant: false,
                    initializer: Some(num("10")),
                },
                Node::VariableDeclaration {
                    name: "y".into(),
                    constant: true,
                    initializer: Some(num("1")),
                },
                Node::VariableDeclaration {
                    name: "z".into(),
                    constant: false,
                    initializer: None,
                },
            ]
        );
    }

    #[test]
    fn test_const_requires_initializer() {
        assert_parse_error("const y;", "Must assign value");
    }

    #[test]
    fn test_missing_semicolons() {
        assert_parse_error("1 + 2", "Expected ';' after expression");
        assert_parse_error("let x = 1", "Expected ';' after variable declaration");
        assert_parse_error("let x 1;", "Expected '=' or ';'");
    }

    #[test]
    fn test_declaration_needs_identifier() {
        assert_parse_error("let 5 = 1;", "Expected variable name (expected IDENTIFIER), found NUMBER '5'");
    }

    #[test]
    fn test_unclosed_paren() {
        assert_parse_error("(1 + 2;", "Expected ')' after expression");
    }

    #[test]
    fn test_error_names_found_token_and_line() {
        let err = parse("let a = 1;\nlet b = ;").unwrap_err();

        assert!(matches!(err, ScriptError::Parse { line: 2, .. }));
        assert!(err.to_string().contains("found SEMICOLON ';'"), "{}", err);
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(printed("a = b = 3;"), "(= a (= b 3))");
    }

    #[test]
    fn test_assignment_target_validation_is_deferred() {
        // Parses fine; the evaluator rejects it.
        assert_eq!(printed("1 + 2 = 3;"), "(= (+ 1 2) 3)");
    }

    #[test]
    fn test_keyword_literals() {
        assert_eq!(
            statements("true; null;"),
            vec![
                Node::BooleanOrNullLiteral {
                    text: "true".into()
                },
                Node::BooleanOrNullLiteral {
                    text: "null".into()
                },
            ]
        );
    }

    #[test]
    fn test_object_literal_with_shorthand() {
        assert_eq!(
            statements("let obj = { x, y: 20 };"),
            vec![Node::VariableDeclaration {
                name: "obj".into(),
                constant: false,
                initializer: Some(Box::new(Node::ObjectLiteral {
                    properties: vec![
                        Property {
                            key: "x".into(),
                            value: None,
                        },
                        Property {
                            key: "y".into(),
                            value: Some(*num("20")),
                        },
                    ],
                })),
            }]
        );
    }

    #[test]
    fn test_object_literal_forms() {
        assert_eq!(printed("{};"), "(object)");
        assert_eq!(printed("{ a, };"), "(object a)");
        assert_eq!(printed("{ a: 1 + 2, b };"), "(object (a (+ 1 2)) b)");
        assert_eq!(printed("{ a: { b: 1 } };"), "(object (a (object (b 1))))");
    }

    #[test]
    fn test_object_literal_errors() {
        assert_parse_error("{ a b };", "Expected ',' or '}' after property");
        assert_parse_error("{ 1: 2 };", "Expected property key");
        assert_parse_error("{ a: 1;", "Expected ',' or '}'");
    }

    #[test]
    fn test_empty_program() {
        assert!(statements("").is_empty());
        assert!(statements("// nothing here").is_empty());
    }

    #[test]
    fn test_lexical_errors_abort_parse() {
        assert!(matches!(parse("1 + $;"), Err(ScriptError::Lex { .. })));
        assert!(parse_with("1 + $ 2;", ScanMode::Lenient).is_ok());
    }

    #[test]
    fn test_parser_over_token_slice() {
        let tokens = tokenize("let x = 1;").unwrap();
        let program = Parser::new(&tokens).parse().unwrap();

        assert_eq!(program.statements().map(<[Node]>::len), Some(1));
    }

    #[test]
    fn test_token_slice_without_eof_is_rejected() {
        let tokens = vec![Token::new(TokenType::NUMBER, "1", 1)];

        assert!(matches!(
            Parser::new(&tokens).parse(),
            Err(ScriptError::Parse { .. })
        ));
        assert!(Parser::new(&[]).parse().is_err());
    }

    fn chain(terms: usize, op: &str) -> String {
        format!("{};", vec!["1"; terms].join(op))
    }

    #[test]
    fn test_long_flat_chain_is_rejected() {
        for op in ["+", "*"] {
            let err = parse(&chain(10_000, op)).unwrap_err();

            assert_eq!(err.stage(), Stage::Parse);
            assert!(err.to_string().contains("too deeply nested"), "{}", err);
        }
    }

    #[test]
    fn test_chain_within_limit_parses() {
        let program = parse(&chain(MAX_NESTING, "+")).unwrap();

        assert_eq!(program.statements().map(<[Node]>::len), Some(1));
        assert!(parse(&chain(MAX_NESTING + 2, "+")).is_err());
    }

    #[test]
    fn test_deep_parentheses_and_objects_are_rejected() {
        let parens = format!("{}1{};", "(".repeat(10_000), ")".repeat(10_000));
        let objects = format!("{}1{};", "{ a: ".repeat(10_000), " }".repeat(10_000));
        let assignments = format!("{}1;", "a = ".repeat(10_000));

        for source in [parens, objects, assignments] {
            assert!(matches!(parse(&source), Err(ScriptError::Parse { .. })));
        }

        assert_eq!(printed("((((1))));"), "1");
    }

    #[test]
    fn test_nesting_depth_is_released_between_statements() {
        let source = chain(MAX_NESTING - 1, "+").repeat(4);

        assert_eq!(statements(&source).len(), 4);
    }

    #[test]
    fn test_ast_serializes_to_json() {
        let program = parse("let x = 1 + 2;").unwrap();
        let json = serde_json::to_value(&program).unwrap();

        assert_eq!(json["kind"], "Program");
        let decl = &json["statements"][0];
        assert_eq!(decl["kind"], "VariableDeclaration");
        assert_eq!(decl["name"], "x");
        assert_eq!(decl["initializer"]["kind"], "BinaryExpression");
        assert_eq!(decl["initializer"]["operator"], "Add");
    }
}
