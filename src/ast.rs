use std::fmt;

use crate::token::Token;

#[derive(Debug, Clone, PartialEq)]
pub enum ScalarNode {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOpNode {
    pub lhs: Box<Expression>,
    pub op: Token,
    pub rhs: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignNode {
    pub name: Token,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Scalar(ScalarNode),
    Group(Box<Expression>),
    Unary(Token, Box<Expression>),
    Binary(BinaryOpNode),
    Variable(Token),
    Assign(AssignNode),
}

impl Expression {
    pub fn binary(lhs: Expression, op: Token, rhs: Expression) -> Self {
        Expression::Binary(BinaryOpNode {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        })
    }

    pub fn assign(name: Token, value: Expression) -> Self {
        Expression::Assign(AssignNode {
            name,
            value: Box::new(value),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expr(Expression),
    // keeps the `print` keyword for error lines
    Print(Token, Expression),
    Declare(Token, Option<Expression>),
}

pub type StatementList = Vec<Statement>;

// Debug rendering in parenthesized prefix form, e.g. `(+ 1 (group (* 2 3)))`.

impl fmt::Display for ScalarNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarNode::Nil => write!(f, "nil"),
            ScalarNode::Bool(v) => write!(f, "{}", v),
            ScalarNode::Number(v) => write!(f, "{}", v),
            ScalarNode::Str(v) => write!(f, "{}", v),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Scalar(node) => write!(f, "{}", node),
            Expression::Group(inner) => write!(f, "(group {})", inner),
            Expression::Unary(op, operand) => write!(f, "({} {})", op.lexeme, operand),
            Expression::Binary(BinaryOpNode { lhs, op, rhs }) => {
                write!(f, "({} {} {})", op.lexeme, lhs, rhs)
            }
            Expression::Variable(name) => write!(f, "(variable {})", name.lexeme),
            Expression::Assign(AssignNode { name, value }) => {
                write!(f, "(assign {} {})", name.lexeme, value)
            }
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Expr(expr) => write!(f, "(expr {})", expr),
            Statement::Print(_, expr) => write!(f, "(print {})", expr),
            Statement::Declare(name, None) => write!(f, "(var {})", name.lexeme),
            Statement::Declare(name, Some(init)) => write!(f, "(var {} {})", name.lexeme, init),
        }
    }
}
