use std::{cell::RefCell, io::Write, rc::Rc};

use log::{debug, trace};

use super::environment::Environment;
use super::error::Error;
use super::value::Value;
use crate::ast::*;
use crate::token::{Token, TokenKind};

pub struct Interpreter {
    print_writer: Rc<RefCell<dyn Write>>,
}

impl Interpreter {
    pub fn new(print_writer: Rc<RefCell<dyn Write>>) -> Self {
        Self { print_writer }
    }

    /// Runs `stmts` in order and stops at the first runtime error. Bindings
    /// made before the failing statement stay in `environment`.
    pub fn interpret(
        &mut self,
        stmts: &[Statement],
        environment: &mut Environment,
    ) -> Result<(), Error> {
        for stmt in stmts {
            trace!("{}", stmt);
            if let Err(err) = self.interpret_stmt(stmt, environment) {
                debug!("runtime error on line {}: {}", err.line(), err);
                return Err(err);
            }
        }
        Ok(())
    }

    fn interpret_stmt(&mut self, stmt: &Statement, env: &mut Environment) -> Result<(), Error> {
        match stmt {
            Statement::Expr(expr) => {
                self.interpret_expr(expr, env)?;
            }
            Statement::Print(keyword, expr) => {
                let value = self.interpret_expr(expr, env)?;
                let mut w = self.print_writer.borrow_mut();
                writeln!(w, "{}", value).map_err(|e| Error::WriteFailed(keyword.clone(), e))?;
            }
            Statement::Declare(name, initializer) => {
                let value = match initializer {
                    Some(expr) => self.interpret_expr(expr, env)?,
                    None => Value::Nil,
                };
                env.define(&name.lexeme, value);
            }
        }
        Ok(())
    }

    pub fn interpret_expr(
        &mut self,
        expr: &Expression,
        env: &mut Environment,
    ) -> Result<Value, Error> {
        match expr {
            Expression::Scalar(node) => Ok(Value::from(node)),
            Expression::Group(inner) => self.interpret_expr(inner, env),
            Expression::Unary(op, operand) => self.interpret_unary_op(op, operand, env),
            Expression::Binary(node) => self.interpret_binary_op(node, env),
            Expression::Variable(name) => env.get(name),
            Expression::Assign(AssignNode { name, value }) => {
                let value = self.interpret_expr(value, env)?;
                env.assign(name, value.clone())?;
                Ok(value)
            }
        }
    }

    fn interpret_unary_op(
        &mut self,
        op: &Token,
        operand: &Expression,
        env: &mut Environment,
    ) -> Result<Value, Error> {
        let res = self.interpret_expr(operand, env)?;
        match op.kind {
            TokenKind::Bang => Ok(Value::Bool(!res.is_truthy())),
            TokenKind::Minus => match res.get_number() {
                Some(v) => Ok(Value::Number(-v)),
                None => Err(Error::OperandMustBeNumber(op.clone())),
            },
            _ => Err(Error::UnknownOperator(op.clone())),
        }
    }

    fn interpret_binary_op(
        &mut self,
        BinaryOpNode { lhs, op, rhs }: &BinaryOpNode,
        env: &mut Environment,
    ) -> Result<Value, Error> {
        let lhs_val = self.interpret_expr(lhs, env)?;
        let rhs_val = self.interpret_expr(rhs, env)?;

        match op.kind {
            TokenKind::Plus => add(lhs_val, op, rhs_val),
            TokenKind::Minus | TokenKind::Star | TokenKind::Slash => {
                binary_number(lhs_val, op, rhs_val)
            }
            TokenKind::Greater
            | TokenKind::GreaterEqual
            | TokenKind::Less
            | TokenKind::LessEqual => ordering(lhs_val, op, rhs_val),
            TokenKind::EqualEqual => Ok(Value::Bool(lhs_val == rhs_val)),
            TokenKind::BangEqual => Ok(Value::Bool(lhs_val != rhs_val)),
            _ => Err(Error::UnknownOperator(op.clone())),
        }
    }
}

fn add(lhs: Value, op: &Token, rhs: Value) -> Result<Value, Error> {
    match (lhs, rhs) {
        (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
        (l @ Value::Str(_), r @ (Value::Str(_) | Value::Number(_)))
        | (l @ Value::Number(_), r @ Value::Str(_)) => Ok(Value::Str(format!("{}{}", l, r))),
        (l, r) => {
            debug!("`+` rejected {} and {}", l.type_name(), r.type_name());
            Err(Error::OperandsMustBeNumberOrString(op.clone()))
        }
    }
}

fn numbers(lhs: &Value, op: &Token, rhs: &Value) -> Result<(f64, f64), Error> {
    match (lhs.get_number(), rhs.get_number()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => {
            debug!(
                "`{}` rejected {} and {}",
                op.lexeme,
                lhs.type_name(),
                rhs.type_name()
            );
            Err(Error::OperandsMustBeNumbers(op.clone()))
        }
    }
}

fn binary_number(lhs: Value, op: &Token, rhs: Value) -> Result<Value, Error> {
    let (l, r) = numbers(&lhs, op, &rhs)?;

    let v = match op.kind {
        TokenKind::Minus => l - r,
        TokenKind::Star => l * r,
        TokenKind::Slash => {
            if r == 0.0 {
                return Err(Error::DivisionByZero(op.clone()));
            }
            l / r
        }
        _ => return Err(Error::UnknownOperator(op.clone())),
    };
    Ok(Value::Number(v))
}

fn ordering(lhs: Value, op: &Token, rhs: Value) -> Result<Value, Error> {
    let (l, r) = numbers(&lhs, op, &rhs)?;

    let v = match op.kind {
        TokenKind::Greater => l > r,
        TokenKind::GreaterEqual => l >= r,
        TokenKind::Less => l < r,
        TokenKind::LessEqual => l <= r,
        _ => return Err(Error::UnknownOperator(op.clone())),
    };
    Ok(Value::Bool(v))
}
