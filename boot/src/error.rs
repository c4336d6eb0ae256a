//! Error types for adapter construction and invocation.
//!
//! Failures fall into two groups:
//!
//! - **Build-time** errors are raised once, while an adapter is being built,
//!   when the constructor or the type parameters are malformed.
//! - **Call-time** errors are raised by a built [`Func`](crate::Func) when the
//!   arguments it receives do not fit, or when the target field cannot be
//!   located inside the container instance.
//!
//! `ErrorKind` captures the category and [`ErrorKind::is_build_time`] tells
//! the two groups apart. `Error` stores the category and a human-readable
//! message.
//!
//! # Feature Flags
//!
//! - `tracing`: logs errors when they are created.
//! - `debug`: enables extra diagnostic formatting in `Display`.
//!
//! # Examples
//!
//! ```
//! use boot::error::{Error, ErrorKind};
//!
//! let err = Error::missing_parameter("fn(u32) -> u32", "app::Config");
//! assert!(err.kind.is_build_time());
//! assert!(err.message.contains("app::Config"));
//! ```

use core::fmt;

#[cfg(feature = "tracing")]
use tracing::error;

/// Error categories.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub enum ErrorKind {
    /// The constructor passed to the builder is not a function value.
    NotAFunction,
    /// The constructor signature is variadic.
    VariadicNotSupported,
    /// The container type is not a struct.
    ContainerNotStruct,
    /// The target type is not a struct.
    TargetNotStruct,
    /// No constructor parameter has the target type.
    MissingParameter,
    /// More than one constructor parameter has the target type.
    AmbiguousParameter,
    /// The target field could not be located inside the container value.
    TargetNotFound,
    /// A function was called with the wrong number of arguments.
    ArgumentCount,
    /// A function argument does not have the declared parameter type.
    ArgumentType,
    /// A value could not be downcast to the requested type.
    TypeMismatch,
}

impl ErrorKind {
    /// Returns `true` for failures detected while building an adapter.
    pub fn is_build_time(self) -> bool {
        matches!(
            self,
            ErrorKind::NotAFunction
                | ErrorKind::VariadicNotSupported
                | ErrorKind::ContainerNotStruct
                | ErrorKind::TargetNotStruct
                | ErrorKind::MissingParameter
                | ErrorKind::AmbiguousParameter
        )
    }
}

/// Library error.
///
/// `kind` enables programmatic handling, while `message` is human-readable.
#[derive(Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// If the `tracing` feature is enabled, the error is automatically logged.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let error = Self {
            kind,
            message: message.into(),
        };

        #[cfg(feature = "tracing")]
        error!("{}", error);

        error
    }

    /// The value handed to the builder is not a function.
    pub fn not_a_function(type_name: &str) -> Self {
        Self::new(
            ErrorKind::NotAFunction,
            format!(
                "Expected a constructor function, but a '{}' was passed",
                type_name
            ),
        )
    }

    pub fn variadic_not_supported(signature: &str) -> Self {
        Self::new(
            ErrorKind::VariadicNotSupported,
            format!("Constructor '{}' must not be variadic", signature),
        )
    }

    pub fn container_not_struct(type_name: &str) -> Self {
        Self::new(
            ErrorKind::ContainerNotStruct,
            format!("Container type '{}' must be a struct", type_name),
        )
    }

    pub fn target_not_struct(type_name: &str) -> Self {
        Self::new(
            ErrorKind::TargetNotStruct,
            format!("Target type '{}' must be a struct", type_name),
        )
    }

    /// No parameter of the constructor accepts the target type.
    pub fn missing_parameter(signature: &str, target: &str) -> Self {
        Self::new(
            ErrorKind::MissingParameter,
            format!("Constructor '{}' must take '{}' as a parameter", signature, target),
        )
    }

    /// Several parameters of the constructor accept the target type.
    pub fn ambiguous_parameter(signature: &str, target: &str, positions: &[usize]) -> Self {
        let positions: Vec<String> = positions.iter().map(ToString::to_string).collect();

        Self::new(
            ErrorKind::AmbiguousParameter,
            format!(
                "Constructor '{}' takes '{}' at more than one position: {}",
                signature,
                target,
                positions.join(", ")
            ),
        )
    }

    /// The target could not be found anywhere in the container's field graph.
    pub fn target_not_found(container: &str, target: &str) -> Self {
        Self::new(
            ErrorKind::TargetNotFound,
            format!("Cannot locate '{}' within '{}'", target, container),
        )
    }

    pub fn argument_count(signature: &str, expected: usize, found: usize) -> Self {
        Self::new(
            ErrorKind::ArgumentCount,
            format!(
                "Function '{}' expects {} argument(s), got {}",
                signature, expected, found
            ),
        )
    }

    pub fn argument_type(index: usize, expected: &str, found: &str) -> Self {
        Self::new(
            ErrorKind::ArgumentType,
            format!(
                "Argument {} has type '{}', expected '{}'",
                index, found, expected
            ),
        )
    }

    /// Type mismatch during a downcast.
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!("Type mismatch: expected '{}', found '{}'", expected, found),
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[cfg(feature = "debug")]
        {
            write!(f, "({:?}) - {}", self.kind, self.message)
        }
        #[cfg(not(feature = "debug"))]
        {
            write!(f, "{}", self.message)
        }
    }
}

#[cfg(feature = "debug")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_function_error() {
        let err = Error::not_a_function("u32");
        assert!(err.kind == ErrorKind::NotAFunction);
        assert!(err.message.contains("'u32'"));
    }

    #[test]
    fn missing_parameter_error() {
        let err = Error::missing_parameter("fn(u8) -> u8", "Config");
        assert!(err.kind == ErrorKind::MissingParameter);
        assert!(err.message.contains("fn(u8) -> u8"));
        assert!(err.message.contains("Config"));
    }

    #[test]
    fn ambiguous_parameter_lists_positions() {
        let err = Error::ambiguous_parameter("fn(A, A) -> u8", "A", &[0, 1]);
        assert!(err.kind == ErrorKind::AmbiguousParameter);
        assert!(err.message.ends_with("0, 1"));
    }

    #[test]
    fn target_not_found_error() {
        let err = Error::target_not_found("App", "Db");
        assert!(err.kind == ErrorKind::TargetNotFound);
        assert_eq!(err.message, "Cannot locate 'Db' within 'App'");
    }

    #[test]
    fn build_time_kinds() {
        assert!(ErrorKind::NotAFunction.is_build_time());
        assert!(ErrorKind::VariadicNotSupported.is_build_time());
        assert!(ErrorKind::ContainerNotStruct.is_build_time());
        assert!(ErrorKind::TargetNotStruct.is_build_time());
        assert!(ErrorKind::MissingParameter.is_build_time());
        assert!(ErrorKind::AmbiguousParameter.is_build_time());

        assert!(!ErrorKind::TargetNotFound.is_build_time());
        assert!(!ErrorKind::ArgumentCount.is_build_time());
        assert!(!ErrorKind::ArgumentType.is_build_time());
        assert!(!ErrorKind::TypeMismatch.is_build_time());
    }

    #[test]
    fn display_trait() {
        let err = Error::target_not_struct("X");
        let s = format!("{}", err);
        #[cfg(feature = "debug")]
        assert!(s.contains("TargetNotStruct"));
        assert!(s.contains("X"));
    }

    #[test]
    fn error_kind_equality() {
        let err1 = Error::type_mismatch("A", "B");
        let err2 = Error::type_mismatch("C", "D");
        assert!(err1.kind == err2.kind);
        assert_ne!(err1.message, err2.message);
    }
}
