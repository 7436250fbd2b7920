use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::UnexpectedInfixOperator { .. } => "UnexpectedInfixOperator",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::MalformedParameterList { .. } => "MalformedParameterList",
            ErrorImpl::TooManyArguments { .. } => "TooManyArguments",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::UnterminatedBlock { .. } => "UnterminatedBlock",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::SourceTooLarge { .. } => "SourceTooLarge",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected an expression",
                token
            )),
            ErrorImpl::UnexpectedEndOfInput { expected } => {
                ErrorTip::Suggestion(format!("Input ended while looking for {}", expected))
            }
            ErrorImpl::UnexpectedInfixOperator { token } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot appear after an expression",
                token
            )),
            ErrorImpl::ExpectedToken { expected, token } => {
                ErrorTip::Suggestion(format!("Expected {}, found `{}`", expected, token))
            }
            ErrorImpl::MalformedParameterList { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::TooManyArguments { max } => {
                ErrorTip::Suggestion(format!("A call can take at most {} arguments", max))
            }
            ErrorImpl::InvalidAssignmentTarget { token } => ErrorTip::Suggestion(format!(
                "Only a variable can be assigned to, found `{}`",
                token
            )),
            ErrorImpl::UnterminatedBlock { expected } => {
                ErrorTip::Suggestion(format!("Block is missing its closing {}", expected))
            }
            ErrorImpl::NestingTooDeep { max } => ErrorTip::Suggestion(format!(
                "Expressions and blocks can nest at most {} levels deep",
                max
            )),
            ErrorImpl::SourceTooLarge { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}:{}", self.internal_error, self.position.1, self.position.0)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: String },
    #[error("unexpected infix operator: {token:?}")]
    UnexpectedInfixOperator { token: String },
    #[error("expected {expected}, found {token:?}")]
    ExpectedToken { expected: String, token: String },
    #[error("malformed parameter list ({message}): {token:?}")]
    MalformedParameterList { token: String, message: String },
    #[error("too many arguments in call, at most {max} are allowed")]
    TooManyArguments { max: usize },
    #[error("invalid assignment target: {token:?}")]
    InvalidAssignmentTarget { token: String },
    #[error("unterminated block, expected {expected}")]
    UnterminatedBlock { expected: String },
    #[error("nesting too deep, at most {max} levels are allowed")]
    NestingTooDeep { max: usize },
    #[error("source of {len} bytes is too large to address")]
    SourceTooLarge { len: usize },
}
