use crate::expression::ast::{BinaryOp, Expr};
use crate::expression::error::ExprError;
use crate::expression::lexer::{Span, Token, TokenKind, lex};

/// Deepest allowed chain of parentheses and unary signs.
const MAX_NESTING: usize = 256;
/// Longest accepted token stream, which also bounds the depth of the tree.
const MAX_TOKENS: usize = 1024;

/// Parse `src` into an AST. A leading `=` is accepted and ignored.
///
/// Offsets in errors and variable nodes are relative to the trimmed source.
pub(crate) fn parse_expr(src: &str) -> Result<Expr, ExprError> {
    let src = src.trim();
    let src = src.strip_prefix('=').unwrap_or(src);
    if src.trim().is_empty() {
        return Err(ExprError::new(0, "empty expression"));
    }
    let tokens = lex(src)?;
    if tokens.len() > MAX_TOKENS {
        return Err(ExprError::new(
            tokens[MAX_TOKENS].span.start,
            format!("expression longer than {MAX_TOKENS} tokens"),
        ));
    }
    let mut p = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = p.parse_sum()?;
    p.expect(TokenKind::Eof)?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> Token {
        let t = self.tokens[self.pos].clone();
        // Eof is never consumed past.
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ExprError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ExprError::new(
                self.span().start,
                format!("expected {kind:?}, found {:?}", self.peek().kind),
            ))
        }
    }

    fn nested(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<Expr, ExprError>,
    ) -> Result<Expr, ExprError> {
        if self.depth >= MAX_NESTING {
            return Err(ExprError::new(
                self.span().start,
                "expression nested too deeply",
            ));
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_sum(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_product()?;
        loop {
            let op = if self.consume(TokenKind::Plus) {
                BinaryOp::Add
            } else if self.consume(TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let r = self.parse_product()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_product(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_unary()?;
        loop {
            let op = if self.consume(TokenKind::Star) {
                BinaryOp::Mul
            } else if self.consume(TokenKind::Slash) {
                BinaryOp::Div
            } else {
                break;
            };
            let r = self.parse_unary()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        if self.consume(TokenKind::Minus) {
            let e = self.nested(Self::parse_unary)?;
            return Ok(Expr::Neg(Box::new(e)));
        }
        if self.consume(TokenKind::Plus) {
            return self.nested(Self::parse_unary);
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let t = self.bump();
        match t.kind {
            TokenKind::Number(v) => Ok(Expr::Num(v)),
            TokenKind::Ident(first) => {
                let mut name = first;
                while self.consume(TokenKind::Dot) {
                    let seg = self.bump();
                    match seg.kind {
                        TokenKind::Ident(s) => {
                            name.push('.');
                            name.push_str(&s);
                        }
                        other => {
                            return Err(ExprError::new(
                                seg.span.start,
                                format!("expected identifier after '.', found {other:?}"),
                            ));
                        }
                    }
                }
                Ok(Expr::Var {
                    name,
                    offset: t.span.start,
                })
            }
            TokenKind::LParen => {
                let e = self.nested(Self::parse_sum)?;
                self.expect(TokenKind::RParen)?;
                Ok(e)
            }
            other => Err(ExprError::new(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
