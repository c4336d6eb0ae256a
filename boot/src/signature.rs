use std::fmt;

use crate::reflect::Type;

/// Parameter and result types of a function value.
///
/// ```
/// use boot::{Signature, Type};
///
/// let signature = Signature::new(
///     vec![Type::of::<u8>(), Type::of::<bool>()],
///     vec![Type::of::<String>()],
/// );
/// assert_eq!(signature.to_string(), "fn(u8, bool) -> alloc::string::String");
/// ```
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Signature {
    params: Vec<Type>,
    results: Vec<Type>,
    variadic: bool,
}

impl Signature {
    pub fn new(params: Vec<Type>, results: Vec<Type>) -> Self {
        Self {
            params,
            results,
            variadic: false,
        }
    }

    /// Marks the last parameter as accepting any number of trailing arguments.
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn params(&self) -> &[Type] {
        &self.params
    }

    pub fn results(&self) -> &[Type] {
        &self.results
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// Returns a copy of this signature with the parameter at `index`
    /// replaced by `ty`.
    pub fn with_param(&self, index: usize, ty: Type) -> Self {
        let mut signature = self.clone();
        signature.params[index] = ty;
        signature
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;

        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if self.variadic && i + 1 == self.params.len() {
                f.write_str("...")?;
            }
            f.write_str(param.name())?;
        }

        f.write_str(")")?;

        match self.results.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " -> {}", single),
            many => {
                f.write_str(" -> (")?;
                for (i, result) in many.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(result.name())?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_single_result() {
        let signature = Signature::new(vec![Type::of::<u8>()], vec![Type::of::<u16>()]);
        assert_eq!(signature.to_string(), "fn(u8) -> u16");
    }

    #[test]
    fn test_display_variadic_and_multiple_results() {
        let signature = Signature::new(
            vec![Type::of::<u8>(), Type::of::<Vec<u8>>()],
            vec![Type::of::<u8>(), Type::of::<bool>()],
        )
        .variadic();

        assert_eq!(
            signature.to_string(),
            "fn(u8, ...alloc::vec::Vec<u8>) -> (u8, bool)"
        );
    }

    #[test]
    fn test_display_no_results() {
        let signature = Signature::new(vec![], vec![]);
        assert_eq!(signature.to_string(), "fn()");
    }

    #[test]
    fn test_with_param_replaces_single_position() {
        let signature = Signature::new(
            vec![Type::of::<u8>(), Type::of::<u16>()],
            vec![Type::of::<u32>()],
        );
        let replaced = signature.with_param(1, Type::of::<bool>());

        assert_eq!(replaced.params()[0], Type::of::<u8>());
        assert_eq!(replaced.params()[1], Type::of::<bool>());
        assert_eq!(replaced.results(), signature.results());
        assert!(!replaced.is_variadic());
    }

    #[test]
    fn test_variadic_flag_affects_equality() {
        let plain = Signature::new(vec![Type::of::<u8>()], vec![]);
        let variadic = plain.clone().variadic();
        assert!(plain != variadic);
    }
}
