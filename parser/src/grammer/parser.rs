use super::parsercore::Parser;
use super::stmt::Stmt;
use super::token::{Pos, Token, TokenKind::*};
use crate::error::ParseError;
use crate::{check, expect, optional, repeat};
use mips_ast::{Arity, BinaryOp, Data, DataMode, DataValue, Instruction, Operand, DATA, TEXT};

impl<I: Iterator<Item = Token>> Parser<I> {
    /// program = { line }
    pub fn parse(mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        loop {
            // Blank and comment-only lines
            while optional!(self, Newline).is_some() {}
            if self.peek().is_none() {
                break;
            }
            self.parse_line(&mut stmts)?;
        }
        Ok(stmts)
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// line = { ident ":" } [ directive | instruction ] eol
    fn parse_line(&mut self, stmts: &mut Vec<Stmt>) -> Result<(), ParseError> {
        let mut empty = true;

        // Labels and opcodes both start with an identifier
        while let Some(Token {
            kind: Ident(name),
            pos,
        }) = self.peek().cloned()
        {
            self.next();
            if optional!(self, Colon).is_some() {
                stmts.push(Stmt::Label(name, pos));
                empty = false;
            } else {
                let operands = self.parse_operands()?;
                stmts.push(Stmt::Instruction(Instruction::new(&name, operands)));
                return self.parse_eol();
            }
        }

        if let Some(Token {
            kind: Directive(name),
            pos,
        }) = self.peek().cloned()
        {
            self.next();
            stmts.push(self.parse_directive(name, pos)?);
        } else if empty {
            return Err(self.unexpected("label, directive or instruction"));
        }

        self.parse_eol()
    }

    /// eol = newline | end of input
    fn parse_eol(&mut self) -> Result<(), ParseError> {
        if self.peek().is_some() {
            expect!(self, Newline, "end of line")?;
        }
        Ok(())
    }

    /// directive = ".text" | ".data" | data-mode values
    fn parse_directive(&mut self, name: String, pos: Pos) -> Result<Stmt, ParseError> {
        if name == TEXT || name == DATA {
            return Ok(Stmt::Segment(name));
        }

        let mode = match name.parse::<DataMode>() {
            Ok(mode) => mode,
            Err(_) => return Err(ParseError::UnknownDirective { name, pos }),
        };

        let value = match mode.arity() {
            // ".ascii" | ".asciiz" string-lit
            Arity::Text => DataValue::Scalar(Operand::string(&self.parse_text()?)),

            // ".space" expr
            Arity::Single => DataValue::Scalar(self.parse_expr()?),

            // ".word" | ".half" | ".byte" | ".float" | ".double" expr { "," expr }
            Arity::List => {
                let values = repeat!(self, self.parse_expr(), Comma);
                match DataValue::from_values(values) {
                    Some(value) => value,
                    None => return Err(self.unexpected("value")),
                }
            }
        };

        Ok(Stmt::Data(Data { mode, value }))
    }

    /// operands = [ operand { "," operand } ]
    fn parse_operands(&mut self) -> Result<Vec<Operand>, ParseError> {
        if self.peek().is_none() || check!(self, Newline) {
            return Ok(Vec::new());
        }
        Ok(repeat!(self, self.parse_operand(), Comma))
    }

    /// operand = register | "(" register ")" | expr [ "(" register ")" ]
    fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        if check!(self, Register(_)) {
            return self.parse_register();
        }

        // "(" opens either a base register or a nested expression
        if check!(self, LParen) {
            self.enter()?;
            self.next();
            if check!(self, Register(_)) {
                let base = self.parse_register()?;
                expect!(self, RParen, "`)`")?;
                self.leave();
                return Ok(Operand::indexed(None, base));
            }
            let inner = self.parse_expr()?;
            expect!(self, RParen, "`)`")?;
            self.leave();
            let term = self.parse_term_rest(inner)?;
            let expr = self.parse_expr_rest(term)?;
            return self.parse_base(expr);
        }

        let expr = self.parse_expr()?;
        self.parse_base(expr)
    }

    /// base = [ "(" register ")" ]
    fn parse_base(&mut self, offset: Operand) -> Result<Operand, ParseError> {
        if optional!(self, LParen).is_some() {
            let base = self.parse_register()?;
            expect!(self, RParen, "`)`")?;
            return Ok(Operand::indexed(Some(offset), base));
        }
        Ok(offset)
    }

    /// expr = term { ( "+" | "-" ) term }
    fn parse_expr(&mut self) -> Result<Operand, ParseError> {
        let lhs = self.parse_term()?;
        self.parse_expr_rest(lhs)
    }

    fn parse_expr_rest(&mut self, mut lhs: Operand) -> Result<Operand, ParseError> {
        while let Some(token) = self.peek() {
            let op = match token.kind {
                Plus => BinaryOp::Add,
                Minus => BinaryOp::Sub,
                _ => break,
            };
            self.next();
            let rhs = self.parse_term()?;
            lhs = Operand::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// term = unary { ( "*" | "/" | "%" ) unary }
    fn parse_term(&mut self) -> Result<Operand, ParseError> {
        let lhs = self.parse_unary()?;
        self.parse_term_rest(lhs)
    }

    fn parse_term_rest(&mut self, mut lhs: Operand) -> Result<Operand, ParseError> {
        while let Some(token) = self.peek() {
            let op = match token.kind {
                Star => BinaryOp::Mul,
                Slash => BinaryOp::Div,
                Percent => BinaryOp::Mod,
                _ => break,
            };
            self.next();
            let rhs = self.parse_unary()?;
            lhs = Operand::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// unary = "-" num-lit | prim
    fn parse_unary(&mut self) -> Result<Operand, ParseError> {
        if optional!(self, Minus).is_some() {
            // Sign belongs to the literal
            if let Some(Token {
                kind: Number(kind, value),
                ..
            }) = self.peek().cloned()
            {
                self.next();
                return Ok(Operand::Number {
                    kind,
                    value: value.negate(),
                });
            }
            return Err(self.unexpected("number after `-`"));
        }
        self.parse_prim()
    }

    /// prim = num-lit | ident | "(" expr ")"
    fn parse_prim(&mut self) -> Result<Operand, ParseError> {
        match self.peek().cloned() {
            Some(Token {
                kind: Number(kind, value),
                ..
            }) => {
                self.next();
                Ok(Operand::Number { kind, value })
            }
            Some(Token {
                kind: Ident(name), ..
            }) => {
                self.next();
                Ok(Operand::ident(&name))
            }
            Some(Token { kind: LParen, .. }) => {
                self.enter()?;
                self.next();
                let expr = self.parse_expr()?;
                expect!(self, RParen, "`)`")?;
                self.leave();
                Ok(expr)
            }
            _ => Err(self.unexpected("number, identifier or `(`")),
        }
    }

    fn parse_register(&mut self) -> Result<Operand, ParseError> {
        if let Some(Token {
            kind: Register(name),
            ..
        }) = &self.peek().cloned()
        {
            self.next();
            return Ok(Operand::register(name));
        }
        Err(self.unexpected("register"))
    }

    fn parse_text(&mut self) -> Result<String, ParseError> {
        if let Some(Token { kind: Text(s), .. }) = &self.peek().cloned() {
            self.next();
            return Ok(s.clone());
        }
        Err(self.unexpected("string literal"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammer::lexer::Lexer;
    use crate::grammer::parsercore::MAX_DEPTH;

    fn parse(code: &str) -> Result<Vec<Stmt>, ParseError> {
        let tokens = Lexer::new(code).parse().unwrap();
        Parser::new(tokens.into_iter()).parse()
    }

    fn operand(code: &str) -> Operand {
        match parse(&format!("op {code}")).unwrap().pop() {
            Some(Stmt::Instruction(inst)) => inst.operands()[0].clone(),
            other => panic!("not an instruction: {other:?}"),
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            operand("1 + 2 * 3"),
            Operand::binary(
                BinaryOp::Add,
                Operand::int(1),
                Operand::binary(BinaryOp::Mul, Operand::int(2), Operand::int(3)),
            )
        );
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(
            operand("8 - 4 - 2"),
            Operand::binary(
                BinaryOp::Sub,
                Operand::binary(BinaryOp::Sub, Operand::int(8), Operand::int(4)),
                Operand::int(2),
            )
        );
    }

    #[test]
    fn test_parenthesized() {
        assert_eq!(
            operand("(1 + 2) * 3"),
            Operand::binary(
                BinaryOp::Mul,
                Operand::binary(BinaryOp::Add, Operand::int(1), Operand::int(2)),
                Operand::int(3),
            )
        );
    }

    #[test]
    fn test_indexed() {
        assert_eq!(
            operand("-4($sp)"),
            Operand::indexed(Some(Operand::int(-4)), Operand::register("$sp"))
        );
        assert_eq!(
            operand("($a0)"),
            Operand::indexed(None, Operand::register("$a0"))
        );
        assert_eq!(
            operand("buf+4($gp)"),
            Operand::indexed(
                Some(Operand::binary(
                    BinaryOp::Add,
                    Operand::ident("buf"),
                    Operand::int(4)
                )),
                Operand::register("$gp")
            )
        );
        assert_eq!(
            operand("(8)($t1)"),
            Operand::indexed(Some(Operand::int(8)), Operand::register("$t1"))
        );
    }

    #[test]
    fn test_labels_share_line() {
        let stmts = parse("foo: bar: nop").unwrap();
        assert_eq!(
            stmts,
            vec![
                Stmt::Label("foo".to_string(), Pos { line: 1, column: 1 }),
                Stmt::Label("bar".to_string(), Pos { line: 1, column: 6 }),
                Stmt::Instruction(Instruction::new("nop", vec![])),
            ]
        );
    }

    #[test]
    fn test_operands_end_at_newline() {
        let stmts = parse("syscall\nli $v0, 4").unwrap();
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0], Stmt::Instruction(Instruction::new("syscall", vec![])));
    }

    #[test]
    fn test_unknown_directive() {
        assert_eq!(
            parse("  .globl main").unwrap_err(),
            ParseError::UnknownDirective {
                name: ".globl".to_string(),
                pos: Pos { line: 1, column: 3 },
            }
        );
    }

    fn nested(depth: usize) -> String {
        format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn test_nesting_limit() {
        assert!(parse(&format!(".space {}", nested(MAX_DEPTH))).is_ok());
        assert_eq!(
            parse(&format!(".space {}", nested(MAX_DEPTH + 1))).unwrap_err(),
            ParseError::UnexpectedToken {
                expected: "shallower expression".to_string(),
                found: LParen,
                pos: Pos {
                    line: 1,
                    column: 8 + MAX_DEPTH,
                },
            }
        );
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let err = parse(&format!("lw $t0, {}", nested(100_000))).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_nesting_depth_resets() {
        let code = format!(".word {0}\n.word {0}", nested(MAX_DEPTH));
        assert_eq!(parse(&code).unwrap().len(), 2);
    }

    #[test]
    fn test_minus_without_number() {
        assert!(matches!(
            parse(".word -foo").unwrap_err(),
            ParseError::UnexpectedToken { .. }
        ));
    }
}
