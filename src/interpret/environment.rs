use std::collections::HashMap;

use super::{error::Error, value::Value};
use crate::token::Token;

/// Flat global store; there are no nested scopes.
#[derive(Debug, Default)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, replacing any earlier binding.
    pub fn define(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), Error> {
        match self.variables.get_mut(&name.lexeme) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::UndefinedVariable(name.clone())),
        }
    }

    pub fn get(&self, name: &Token) -> Result<Value, Error> {
        self.variables
            .get(&name.lexeme)
            .cloned()
            .ok_or_else(|| Error::UndefinedVariable(name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Literal, TokenKind};

    fn name(lexeme: &str) -> Token {
        Token::new(
            TokenKind::Identifier,
            lexeme,
            Some(Literal::Str(lexeme.to_string())),
            3,
        )
    }

    #[test]
    fn test_define_overwrites() {
        let mut env = Environment::new();
        env.define("x", Value::Number(1.0));
        env.define("x", Value::Str("two".to_string()));
        assert_eq!(env.get(&name("x")).unwrap(), Value::Str("two".to_string()));
    }

    #[test]
    fn test_assign_requires_binding() {
        let mut env = Environment::new();
        let err = env.assign(&name("y"), Value::Nil).unwrap_err();
        assert!(matches!(err, Error::UndefinedVariable(_)));
        assert_eq!(err.line(), 3);
        assert_eq!(err.to_string(), "Undefined variable 'y'.");
        assert!(env.get(&name("y")).is_err());

        env.define("y", Value::Nil);
        env.assign(&name("y"), Value::Bool(true)).unwrap();
        assert_eq!(env.get(&name("y")).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_get_unbound() {
        let env = Environment::new();
        assert!(matches!(
            env.get(&name("z")),
            Err(Error::UndefinedVariable(_))
        ));
    }
}
