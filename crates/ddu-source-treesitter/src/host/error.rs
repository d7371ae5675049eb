use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host rejected or failed to evaluate the expression.
    Evaluation {
        expression: String,
        reason: String,
    },
    /// The host answered with a value of the wrong shape.
    UnexpectedType {
        expression: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl Display for HostError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Evaluation {
                expression,
                reason,
            } => {
                write!(f, "failed to evaluate `{expression}`: {reason}")
            },
            Self::UnexpectedType {
                expression,
                expected,
                found,
            } => {
                write!(f, "`{expression}` returned {found}, expected {expected}")
            },
        }
    }
}

impl std::error::Error for HostError {}
