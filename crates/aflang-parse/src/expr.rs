//! Recursive-descent expression parser.
//!
//! One function per precedence level, lowest first; each level consumes
//! operands from the next-higher level and loops on its own operators (or,
//! for the two right-associative levels — ternary and `**` — recurses into
//! itself for the right operand). See the grammar table in the crate docs.

use aflang_lex::{Keyword, NumberLit, Op, Punct, Token, TokenWithSpan};
use aflang_util::{Span, Symbol};

use crate::ast::{BinOp, Expr, KeywordOp, Literal, Node, TimeUnit, UnaryOp};
use crate::error::ParseError;

pub struct Parser<'a> {
    tokens: &'a [TokenWithSpan],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [TokenWithSpan]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses a complete expression and errors on anything left over.
    pub fn parse_program(&mut self) -> Result<Expr, ParseError> {
        if matches!(self.current().token, Token::End) {
            return Err(ParseError::new("empty expression", self.current().span));
        }
        let expr = self.parse_ternary()?;
        if !matches!(self.current().token, Token::End) {
            return Err(ParseError::new(
                format!("trailing input after complete expression: {:?}", self.current().token),
                self.current().span,
            ));
        }
        Ok(expr)
    }

    fn current(&self) -> &TokenWithSpan {
        // `tokenize` always terminates with `End`, and we never advance past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> TokenWithSpan {
        let tok = self.current().clone();
        if !matches!(tok.token, Token::End) {
            self.pos += 1;
        }
        tok
    }

    fn eat_punct(&mut self, p: Punct) -> bool {
        if self.current().token == Token::Punct(p) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, p: Punct, what: &str) -> Result<Span, ParseError> {
        if self.current().token == Token::Punct(p) {
            Ok(self.advance().span)
        } else {
            Err(ParseError::new(
                format!("expected {} but found {:?}", what, self.current().token),
                self.current().span,
            ))
        }
    }

    // Level 1: `?:`, right-associative.
    fn parse_ternary(&mut self) -> Result<Expr, ParseError> {
        let start = self.current().span;
        let cond = self.parse_bool()?;
        if self.eat_punct(Punct::Question) {
            let then_branch = self.parse_ternary()?;
            self.expect_punct(Punct::Colon, "':' in ternary expression")?;
            let else_branch = self.parse_ternary()?;
            let span = start.merge(else_branch.span);
            Ok(Expr::new(
                Node::Ternary(Box::new(cond), Box::new(then_branch), Box::new(else_branch)),
                span,
            ))
        } else {
            Ok(cond)
        }
    }

    // Level 3: `&`, `|`, `^`, left-associative. (Level 2, the arg-list comma,
    // is not a general expression operator — see `parse_call_args`.)
    fn parse_bool(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_eq()?;
        loop {
            let op = match &self.current().token {
                Token::Op(Op::Amp) => BinOp::And,
                Token::Op(Op::Pipe) => BinOp::Or,
                Token::Op(Op::Caret) => BinOp::Xor,
                _ => break,
            };
            self.advance();
            let right = self.parse_eq()?;
            let span = left.span.merge(right.span);
            left = Expr::new(Node::Binary(op, Box::new(left), Box::new(right)), span);
        }
        Ok(left)
    }

    // Level 4: `== != === !== = /=`, left-associative. `=` and `/=` are
    // alternate spellings of `==`/`!=` carried over from the source grammar.
    fn parse_eq(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_rel()?;
        loop {
            let op = match &self.current().token {
                Token::Op(Op::EqEq) | Token::Op(Op::Eq) => BinOp::Eq,
                Token::Op(Op::NotEq) | Token::Op(Op::SlashEq) => BinOp::NotEq,
                Token::Op(Op::EqEqEq) => BinOp::EqEqEq,
                Token::Op(Op::NotEqEq) => BinOp::NotEqEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_rel()?;
            let span = left.span.merge(right.span);
            left = Expr::new(Node::Binary(op, Box::new(left), Box::new(right)), span);
        }
        Ok(left)
    }

    // Level 5: `< <= > >=`, left-associative.
    fn parse_rel(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_add()?;
        loop {
            let op = match &self.current().token {
                Token::Op(Op::Lt) => BinOp::Lt,
                Token::Op(Op::LtEq) => BinOp::LtEq,
                Token::Op(Op::Gt) => BinOp::Gt,
                Token::Op(Op::GtEq) => BinOp::GtEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_add()?;
            let span = left.span.merge(right.span);
            left = Expr::new(Node::Binary(op, Box::new(left), Box::new(right)), span);
        }
        Ok(left)
    }

    // Level 6: binary `+ -`, left-associative.
    fn parse_add(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_mul()?;
        loop {
            let op = match &self.current().token {
                Token::Op(Op::Plus) => BinOp::Add,
                Token::Op(Op::Minus) => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_mul()?;
            let span = left.span.merge(right.span);
            left = Expr::new(Node::Binary(op, Box::new(left), Box::new(right)), span);
        }
        Ok(left)
    }

    // Level 7: `* / %`, left-associative.
    fn parse_mul(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_pow()?;
        loop {
            let op = match &self.current().token {
                Token::Op(Op::Star) => BinOp::Mul,
                Token::Op(Op::Slash) => BinOp::Div,
                Token::Op(Op::Percent) => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_pow()?;
            let span = left.span.merge(right.span);
            left = Expr::new(Node::Binary(op, Box::new(left), Box::new(right)), span);
        }
        Ok(left)
    }

    // Level 8: `**`, right-associative.
    fn parse_pow(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_keyword()?;
        if matches!(self.current().token, Token::Op(Op::StarStar)) {
            self.advance();
            let right = self.parse_pow()?;
            let span = left.span.merge(right.span);
            Ok(Expr::new(Node::Binary(BinOp::Pow, Box::new(left), Box::new(right)), span))
        } else {
            Ok(left)
        }
    }

    // Level 9: `in contains like matches rlike regex`, left-associative.
    fn parse_keyword(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_timeunit()?;
        loop {
            let op = match &self.current().token {
                Token::Keyword(Keyword::In) => KeywordOp::In,
                Token::Keyword(Keyword::Contains) => KeywordOp::Contains,
                Token::Keyword(Keyword::Like) => KeywordOp::Like,
                Token::Keyword(Keyword::Matches) => KeywordOp::Matches,
                Token::Keyword(Keyword::Rlike) => KeywordOp::Rlike,
                Token::Keyword(Keyword::Regex) => KeywordOp::Regex,
                _ => break,
            };
            self.advance();
            let right = self.parse_timeunit()?;
            let span = left.span.merge(right.span);
            left = Expr::new(Node::Keyword(op, Box::new(left), Box::new(right)), span);
        }
        Ok(left)
    }

    // Level 10: postfix time-unit keywords.
    fn parse_timeunit(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let unit = match &self.current().token {
                Token::Keyword(Keyword::Seconds) => TimeUnit::Seconds,
                Token::Keyword(Keyword::Minutes) => TimeUnit::Minutes,
                Token::Keyword(Keyword::Hours) => TimeUnit::Hours,
                Token::Keyword(Keyword::Days) => TimeUnit::Days,
                Token::Keyword(Keyword::Weeks) => TimeUnit::Weeks,
                Token::Keyword(Keyword::Years) => TimeUnit::Years,
                _ => break,
            };
            let span_end = self.advance().span;
            let span = left.span.merge(span_end);
            left = Expr::new(Node::TimeUnit(unit, Box::new(left)), span);
        }
        Ok(left)
    }

    // Level 11: unary `! + -`, right-associative (prefix, so really just
    // "recurse on itself").
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match &self.current().token {
            Token::Op(Op::Bang) => Some(UnaryOp::Not),
            Token::Op(Op::Plus) => Some(UnaryOp::Plus),
            Token::Op(Op::Minus) => Some(UnaryOp::Neg),
            _ => None,
        };
        if let Some(op) = op {
            let start = self.advance().span;
            let child = self.parse_unary()?;
            let span = start.merge(child.span);
            Ok(Expr::new(Node::Unary(op, Box::new(child)), span))
        } else {
            self.parse_atom()
        }
    }

    // Level 12: literal, variable, call, or parenthesized expression.
    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let tok = self.advance();
        match tok.token {
            Token::Number(NumberLit::Int(i)) => Ok(Expr::new(Node::Literal(Literal::Int(i)), tok.span)),
            Token::Number(NumberLit::Float(f)) => Ok(Expr::new(Node::Literal(Literal::Float(f)), tok.span)),
            Token::Str(s) => Ok(Expr::new(Node::Literal(Literal::Str(s)), tok.span)),
            Token::Ident(sym) => self.finish_variable_or_call(sym, tok.span),
            Token::Keyword(Keyword::True) => self.finish_variable_or_call(Symbol::intern("true"), tok.span),
            Token::Keyword(Keyword::False) => self.finish_variable_or_call(Symbol::intern("false"), tok.span),
            Token::Keyword(Keyword::Null) => self.finish_variable_or_call(Symbol::intern("null"), tok.span),
            Token::Keyword(Keyword::Int) => self.finish_variable_or_call(Symbol::intern("int"), tok.span),
            Token::Keyword(Keyword::StringCast) => self.finish_variable_or_call(Symbol::intern("string"), tok.span),
            Token::Keyword(Keyword::Float) => self.finish_variable_or_call(Symbol::intern("float"), tok.span),
            Token::Punct(Punct::LParen) => {
                let inner = self.parse_ternary()?;
                let close = self.expect_punct(Punct::RParen, "closing ')'")?;
                Ok(Expr::new(inner.node, tok.span.merge(close)))
            }
            other => Err(ParseError::new(
                format!("expected an expression but found {:?}", other),
                tok.span,
            )),
        }
    }

    /// After an identifier-like atom: `name(` starts a call, otherwise it's a
    /// bare variable reference. Never fails here; unresolved names are an
    /// evaluation-time concern.
    fn finish_variable_or_call(&mut self, name: Symbol, start: Span) -> Result<Expr, ParseError> {
        if self.current().token == Token::Punct(Punct::LParen) {
            self.advance();
            let args = self.parse_call_args()?;
            let close = self.expect_punct(Punct::RParen, "closing ')' in call arguments")?;
            Ok(Expr::new(Node::Call(name, args), start.merge(close)))
        } else {
            Ok(Expr::new(Node::Variable(name), start))
        }
    }

    /// Level 2: comma only ever appears here, separating call arguments.
    fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.current().token == Token::Punct(Punct::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_ternary()?);
            if self.eat_punct(Punct::Comma) {
                continue;
            }
            break;
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;
    use aflang_lex::tokenize;

    fn parse(source: &str) -> Expr {
        let tokens = tokenize(source).unwrap();
        Parser::new(&tokens).parse_program().unwrap()
    }

    fn parse_err(source: &str) -> ParseError {
        let tokens = tokenize(source).unwrap();
        Parser::new(&tokens).parse_program().unwrap_err()
    }

    #[test]
    fn precedence_mul_binds_tighter_than_add() {
        let e = parse("1 + 2 * 3");
        match e.node {
            Node::Binary(BinOp::Add, l, r) => {
                assert!(matches!(l.node, Node::Literal(Literal::Int(1))));
                assert!(matches!(r.node, Node::Binary(BinOp::Mul, _, _)));
            }
            other => panic!("unexpected node: {:?}", other),
        }
    }

    #[test]
    fn parens_override_precedence() {
        let e = parse("(1 + 2) * 3");
        match e.node {
            Node::Binary(BinOp::Mul, l, _) => {
                assert!(matches!(l.node, Node::Binary(BinOp::Add, _, _)));
            }
            other => panic!("unexpected node: {:?}", other),
        }
    }

    #[test]
    fn pow_is_right_associative() {
        // 2 ** 3 ** 2 == 2 ** (3 ** 2)
        let e = parse("2 ** 3 ** 2");
        match e.node {
            Node::Binary(BinOp::Pow, l, r) => {
                assert!(matches!(l.node, Node::Literal(Literal::Int(2))));
                assert!(matches!(r.node, Node::Binary(BinOp::Pow, _, _)));
            }
            other => panic!("unexpected node: {:?}", other),
        }
    }

    #[test]
    fn ternary_is_right_associative() {
        // a ? b : c ? d : e == a ? b : (c ? d : e)
        let e = parse("1 ? 2 : 3 ? 4 : 5");
        match e.node {
            Node::Ternary(_, _, else_branch) => {
                assert!(matches!(else_branch.node, Node::Ternary(_, _, _)));
            }
            other => panic!("unexpected node: {:?}", other),
        }
    }

    #[test]
    fn call_with_multiple_args() {
        let e = parse("foo(1, 2, 3)");
        match e.node {
            Node::Call(name, args) => {
                assert_eq!(name.as_str(), "foo");
                assert_eq!(args.len(), 3);
            }
            other => panic!("unexpected node: {:?}", other),
        }
    }

    #[test]
    fn call_with_zero_args() {
        let e = parse("foo()");
        assert!(matches!(e.node, Node::Call(_, args) if args.is_empty()));
    }

    #[test]
    fn bare_identifier_is_variable() {
        let e = parse("foo");
        assert!(matches!(e.node, Node::Variable(_)));
    }

    #[test]
    fn true_false_null_are_variables_not_literals() {
        assert!(matches!(parse("true").node, Node::Variable(s) if s.as_str() == "true"));
        assert!(matches!(parse("false").node, Node::Variable(s) if s.as_str() == "false"));
        assert!(matches!(parse("null").node, Node::Variable(s) if s.as_str() == "null"));
    }

    #[test]
    fn cast_keywords_parse_as_calls() {
        let e = parse("int(\"5\")");
        assert!(matches!(e.node, Node::Call(s, args) if s.as_str() == "int" && args.len() == 1));
    }

    #[test]
    fn keyword_operator_precedence_below_pow() {
        // level 9 ("in") binds tighter than level 8 ("**"), per the grammar table.
        let e = parse("2 ** 3 in x");
        assert!(matches!(e.node, Node::Binary(BinOp::Pow, _, r) if matches!(r.node, Node::Keyword(KeywordOp::In, _, _))));
    }

    #[test]
    fn time_unit_postfix() {
        let e = parse("5 minutes");
        assert!(matches!(e.node, Node::TimeUnit(TimeUnit::Minutes, _)));
    }

    #[test]
    fn unary_minus_is_right_associative_and_stacks() {
        let e = parse("- -5");
        assert!(matches!(e.node, Node::Unary(UnaryOp::Neg, inner) if matches!(inner.node, Node::Unary(UnaryOp::Neg, _))));
    }

    #[test]
    fn empty_expression_is_parse_error() {
        parse_err("");
    }

    #[test]
    fn trailing_tokens_are_parse_error() {
        parse_err("1 + 2 3");
    }

    #[test]
    fn unbalanced_paren_is_parse_error() {
        parse_err("(1 + 2");
    }

    #[test]
    fn missing_operand_is_parse_error() {
        parse_err("1 +");
    }

    #[test]
    fn eq_and_slasheq_are_equality_aliases() {
        let e = parse("1 = 1");
        assert!(matches!(e.node, Node::Binary(BinOp::Eq, _, _)));
        let e = parse("1 /= 2");
        assert!(matches!(e.node, Node::Binary(BinOp::NotEq, _, _)));
    }
}
