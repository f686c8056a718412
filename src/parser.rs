use super::ast::{BinOp, Expr, Function, Prototype};
use super::config::Config;
use super::error::Error;
use super::token::{Token, TokenKind};
use log::trace;
use std::rc::Rc;

/// Recursive descent over a token buffer. Never backtracks; the cursor only
/// moves forward and stops at the trailing `Eof`.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_nesting: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, config: &Config) -> Parser {
        match tokens.last() {
            Some(Token {
                kind: TokenKind::Eof,
                ..
            }) => {}
            last => {
                let line = last.map_or(1, |t| t.line);
                tokens.push(Token::eof(line));
            }
        }
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            max_nesting: config.max_nesting,
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let t = self.peek().clone();
        if t.kind != TokenKind::Eof {
            self.pos += 1;
        }
        t
    }

    fn expect_kwd(&mut self, c: char, context: &str) -> Result<Token, Error> {
        if self.peek().is_kwd(c) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("expected '{}' {}", c, context)))
        }
    }

    fn at_statement_end(&self) -> bool {
        let t = self.peek();
        t.kind == TokenKind::Eof || t.is_kwd(';')
    }

    fn unexpected(&self, message: &str) -> Error {
        let t = self.peek();
        Error::parse(format!("{}, found {}", message, t.describe()), t.line)
    }

    fn ident(&mut self, context: &str) -> Result<String, Error> {
        match self.peek().kind {
            TokenKind::Ident(ref id) => {
                let id = id.clone();
                self.advance();
                Ok(id)
            }
            _ => Err(self.unexpected(&format!("expected identifier {}", context))),
        }
    }

    /// Parses a parenthesised, comma separated list. The opening paren has
    /// already been consumed at `open_line`; an unclosed list is reported there.
    fn list<T>(
        &mut self,
        open_line: usize,
        what: &str,
        mut item: impl FnMut(&mut Parser) -> Result<T, Error>,
    ) -> Result<Vec<T>, Error> {
        let mut items = Vec::new();
        if self.peek().is_kwd(')') {
            self.advance();
            return Ok(items);
        }
        loop {
            if self.at_statement_end() {
                return Err(Error::parse(
                    format!("unmatched '(' in {}", what),
                    open_line,
                ));
            }
            items.push(item(self)?);
            let t = self.peek();
            if t.is_kwd(',') {
                self.advance();
            } else if t.is_kwd(')') {
                self.advance();
                return Ok(items);
            } else if self.at_statement_end() {
                return Err(Error::parse(
                    format!("unmatched '(' in {}", what),
                    open_line,
                ));
            } else {
                return Err(self.unexpected(&format!("expected ',' or ')' in {}", what)));
            }
        }
    }

    fn args(&mut self, open_line: usize) -> Result<Vec<Expr>, Error> {
        self.list(open_line, "argument list", |p| p.expr())
    }

    fn call(&mut self, name: String) -> Result<Expr, Error> {
        let open = self.advance();
        let args = self.args(open.line)?;
        Ok(Expr::Call(name, args))
    }

    fn primary(&mut self) -> Result<Expr, Error> {
        let t = self.peek().clone();
        match t.kind {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::Number(n))
            }
            TokenKind::Kwd('(') => {
                self.advance();
                let e = self.expr()?;
                if self.peek().is_kwd(')') {
                    self.advance();
                    Ok(e)
                } else if self.at_statement_end() {
                    Err(Error::parse("unmatched '('", t.line))
                } else {
                    Err(self.unexpected("expected ')'"))
                }
            }
            TokenKind::Ident(id) => {
                self.advance();
                if self.peek().is_kwd('(') {
                    self.call(id)
                } else {
                    Ok(Expr::Variable(id))
                }
            }
            _ => Err(self.unexpected("expected expression")),
        }
    }

    /// Folds `operand (op operand)*` to the left for the operators in `ops`.
    fn chainl1(
        &mut self,
        ops: &[char],
        operand: fn(&mut Parser) -> Result<Expr, Error>,
    ) -> Result<Expr, Error> {
        let mut lhs = operand(self)?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Kwd(c) if ops.contains(&c) => BinOp::from_char(c),
                _ => None,
            };
            match op {
                Some(op) => {
                    self.advance();
                    let rhs = operand(self)?;
                    lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
                }
                None => return Ok(lhs),
            }
        }
    }

    fn mul(&mut self) -> Result<Expr, Error> {
        self.chainl1(&['*', '/'], Parser::primary)
    }

    /// Each parenthesised group, argument and body is one level deeper; the
    /// evaluator recurses once per level.
    fn expr(&mut self) -> Result<Expr, Error> {
        if self.depth >= self.max_nesting {
            return Err(self.unexpected(&format!(
                "expression nested more than {} levels deep",
                self.max_nesting
            )));
        }
        self.depth += 1;
        let e = self.chainl1(&['+', '-'], Parser::mul);
        self.depth -= 1;
        e
    }

    fn prototype(&mut self) -> Result<Prototype, Error> {
        let name = self.ident("after 'func'")?;
        let open = self.expect_kwd('(', "after function name")?;
        let params = self.list(open.line, "parameter list", |p| {
            let line = p.peek().line;
            p.ident("in parameter list").map(|id| (id, line))
        })?;

        let mut names: Vec<String> = Vec::with_capacity(params.len());
        for (param, line) in params {
            if names.contains(&param) {
                return Err(Error::parse(
                    format!("duplicate parameter '{}' in function '{}'", param, name),
                    line,
                ));
            }
            names.push(param);
        }
        Ok(Prototype(name, names))
    }

    fn definition(&mut self) -> Result<Expr, Error> {
        self.advance();
        let proto = self.prototype()?;
        self.expect_kwd('=', "before function body")?;
        let body = self.expr()?;
        Ok(Expr::Function(Rc::new(Function(proto, body))))
    }

    fn binding(&mut self) -> Result<Expr, Error> {
        self.advance();
        let name = self.ident("after 'let'")?;
        self.expect_kwd('=', &format!("after 'let {}'", name))?;
        let value = self.expr()?;
        Ok(Expr::Let(name, Box::new(value)))
    }

    fn statement(&mut self) -> Result<Expr, Error> {
        let line = self.peek().line;
        let stmt = match self.peek().kind {
            TokenKind::Let => self.binding()?,
            TokenKind::Func => self.definition()?,
            _ => self.expr()?,
        };
        if !self.peek().is_kwd(';') {
            return Err(Error::parse(
                format!(
                    "expected ';' to end the statement, found {}",
                    self.peek().describe()
                ),
                line,
            ));
        }
        self.advance();
        Ok(stmt)
    }

    /// Parses statements up to `Eof`. Empty statements (`;`) yield nothing.
    pub fn program(&mut self) -> Result<Vec<Expr>, Error> {
        let mut stmts = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::Eof => break,
                TokenKind::Kwd(';') => {
                    self.advance();
                }
                _ => stmts.push(self.statement()?),
            }
        }
        trace!("parsed {} statements", stmts.len());
        Ok(stmts)
    }
}

pub fn parse(tokens: Vec<Token>, config: &Config) -> Result<Vec<Expr>, Error> {
    Parser::new(tokens, config).program()
}
