use derive_more::Display;

use crate::ast::ScalarNode;

#[derive(Display, Debug, Clone, PartialEq)]
pub enum Value {
    #[display("nil")]
    Nil,

    #[display("{_0}")]
    Bool(bool),

    #[display("{_0}")]
    Number(f64),

    #[display("{_0}")]
    Str(String),
}

impl Value {
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn get_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
        }
    }
}

impl From<&ScalarNode> for Value {
    fn from(node: &ScalarNode) -> Self {
        match node {
            ScalarNode::Nil => Value::Nil,
            ScalarNode::Bool(v) => Value::Bool(*v),
            ScalarNode::Number(v) => Value::Number(*v),
            ScalarNode::Str(v) => Value::Str(v.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(0.0).is_truthy());
        assert!(Value::Str(String::new()).is_truthy());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Number(7.0).to_string(), "7");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Str("hi".to_string()).to_string(), "hi");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn test_equality_does_not_coerce() {
        assert_ne!(Value::Number(1.0), Value::Str("1".to_string()));
        assert_ne!(Value::Nil, Value::Bool(false));
        assert_eq!(Value::Str("a".to_string()), Value::Str("a".to_string()));
    }
}
