use log::debug;

use crate::ast::*;
use crate::token::{Literal, Token, TokenKind};

use super::context::Context;
use super::error::ParseError;

/// Output of a parse. Declarations that failed to parse are left out of
/// `statements`; each of them has exactly one entry in `errors`.
#[derive(Debug, Default)]
pub struct Parsed {
    pub statements: StatementList,
    pub errors: Vec<ParseError>,
}

impl Parsed {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub fn parse(items: &[Token]) -> Parsed {
    let mut state = Context::new(items);
    let mut statements = vec![];

    while !state.is_at_end() {
        let start = state.position();
        match parse_declaration(&mut state) {
            Ok(stmt) => statements.push(stmt),
            Err(err) => {
                debug!("recovering from `{}`", err);
                state.errors.push(err);
                state.synchronize(start);
            }
        }
    }

    debug!(
        "parsed {} statements with {} errors",
        statements.len(),
        state.errors.len()
    );
    Parsed {
        statements,
        errors: state.errors,
    }
}

fn parse_declaration(state: &mut Context) -> Result<Statement, ParseError> {
    if state.match_token(&[TokenKind::Var]).is_some() {
        return parse_var_declaration(state);
    }
    parse_stmt(state)
}

fn parse_var_declaration(state: &mut Context) -> Result<Statement, ParseError> {
    let name = state.consume_token(TokenKind::Identifier, "Expect variable name.")?;
    let initializer = match state.match_token(&[TokenKind::Equal]) {
        Some(_) => Some(parse_expr(state)?),
        None => None,
    };
    state.consume_token(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
    Ok(Statement::Declare(name, initializer))
}

fn parse_stmt(state: &mut Context) -> Result<Statement, ParseError> {
    if let Some(keyword) = state.match_token(&[TokenKind::Print]) {
        let expr = parse_expr(state)?;
        state.consume_token(TokenKind::Semicolon, "Expect ';' after value.")?;
        return Ok(Statement::Print(keyword, expr));
    }

    let expr = parse_expr(state)?;
    state.consume_token(TokenKind::Semicolon, "Expect ';' after expression.")?;
    Ok(Statement::Expr(expr))
}

fn parse_expr(state: &mut Context) -> Result<Expression, ParseError> {
    parse_assignment(state)
}

fn parse_assignment(state: &mut Context) -> Result<Expression, ParseError> {
    let expr = parse_equality(state)?;

    let Some(equals) = state.match_token(&[TokenKind::Equal]) else {
        return Ok(expr);
    };
    let value = parse_nested(state, parse_assignment)?;

    match expr {
        Expression::Variable(name) => Ok(Expression::assign(name, value)),
        // reported, but the statement keeps parsing from here
        _ => {
            state
                .errors
                .push(ParseError::InvalidAssignmentTarget { token: equals });
            Ok(expr)
        }
    }
}

fn parse_equality(state: &mut Context) -> Result<Expression, ParseError> {
    parse_recursive_binary(
        state,
        &[TokenKind::BangEqual, TokenKind::EqualEqual],
        parse_comparison,
    )
}

fn parse_comparison(state: &mut Context) -> Result<Expression, ParseError> {
    parse_recursive_binary(
        state,
        &[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ],
        parse_term,
    )
}

fn parse_term(state: &mut Context) -> Result<Expression, ParseError> {
    parse_recursive_binary(state, &[TokenKind::Minus, TokenKind::Plus], parse_factor)
}

fn parse_factor(state: &mut Context) -> Result<Expression, ParseError> {
    parse_recursive_binary(state, &[TokenKind::Slash, TokenKind::Star], parse_unary)
}

fn parse_recursive_binary<F>(
    state: &mut Context,
    match_tokens: &'static [TokenKind],
    lower_fn: F,
) -> Result<Expression, ParseError>
where
    F: Fn(&mut Context) -> Result<Expression, ParseError>,
{
    let mut lhs = lower_fn(state)?;

    while let Some(op) = state.match_token(match_tokens) {
        let rhs = lower_fn(state)?;
        lhs = Expression::binary(lhs, op, rhs);
    }

    Ok(lhs)
}

fn parse_unary(state: &mut Context) -> Result<Expression, ParseError> {
    match state.match_token(&[TokenKind::Bang, TokenKind::Minus]) {
        Some(op) => {
            let operand = parse_nested(state, parse_unary)?;
            Ok(Expression::Unary(op, Box::new(operand)))
        }
        None => parse_primary(state),
    }
}

fn parse_primary(state: &mut Context) -> Result<Expression, ParseError> {
    let li = state.get_curr();

    let scalar = match li.kind {
        TokenKind::Nil => ScalarNode::Nil,
        TokenKind::True => ScalarNode::Bool(true),
        TokenKind::False => ScalarNode::Bool(false),
        TokenKind::Number => match li.literal {
            Some(Literal::Number(v)) => ScalarNode::Number(v),
            _ => return Err(ParseError::unexpected(li, "Malformed number literal.")),
        },
        TokenKind::String => match &li.literal {
            Some(Literal::Str(v)) => ScalarNode::Str(v.clone()),
            _ => return Err(ParseError::unexpected(li, "Malformed string literal.")),
        },
        TokenKind::Identifier => return Ok(Expression::Variable(state.advance())),
        TokenKind::LeftParen => return parse_group(state),
        _ => return Err(ParseError::unexpected(li, "Expect expression.")),
    };

    state.advance();
    Ok(Expression::Scalar(scalar))
}

fn parse_group(state: &mut Context) -> Result<Expression, ParseError> {
    state.consume_token(TokenKind::LeftParen, "Expect '('.")?;
    let expr = parse_nested(state, parse_expr)?;
    state.consume_token(TokenKind::RightParen, "Expect ')' after expression.")?;
    Ok(Expression::Group(Box::new(expr)))
}

fn parse_nested<F>(state: &mut Context, parse_fn: F) -> Result<Expression, ParseError>
where
    F: FnOnce(&mut Context) -> Result<Expression, ParseError>,
{
    state.nest()?;
    let expr = parse_fn(state);
    state.unnest();
    expr
}
