use crate::token::{Token, TokenKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Unexpected character: {ch}")]
    UnexpectedCharacter { ch: char, line: usize },

    #[error("Unterminated string")]
    UnterminatedString { line: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { line, .. } => *line,
            LexError::UnterminatedString { line } => *line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Error {}: {message}", location(.token))]
    UnexpectedToken { token: Token, message: String },

    #[error("Error {}: Invalid assignment target", location(.token))]
    InvalidAssignmentTarget { token: Token },
}

impl ParseError {
    pub fn unexpected(token: &Token, message: impl Into<String>) -> Self {
        ParseError::UnexpectedToken {
            token: token.clone(),
            message: message.into(),
        }
    }

    pub fn token(&self) -> &Token {
        match self {
            ParseError::UnexpectedToken { token, .. } => token,
            ParseError::InvalidAssignmentTarget { token } => token,
        }
    }

    pub fn line(&self) -> usize {
        self.token().line
    }
}

fn location(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "at end".to_string(),
        _ => format!("at '{}'", token.lexeme),
    }
}
