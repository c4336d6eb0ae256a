//! Type-erased runtime values.
//!
//! A [`Value`] owns a boxed value together with the [`Type`] describing it.
//! Function values are values too: a [`Func`] converts into a `Value` whose
//! kind is [`Kind::Func`], which is what the adapter builder inspects.

use std::any::Any;

use crate::error::Error;
use crate::func::Func;
use crate::reflect::{Kind, Reflect, Type};

pub struct Value {
    ty: Type,
    data: Box<dyn Any>,
}

impl Value {
    /// Wraps a reflected value.
    ///
    /// ```
    /// use boot::{Kind, Value};
    ///
    /// let value = Value::new(42u32);
    /// assert_eq!(value.kind(), Kind::Primitive);
    /// assert_eq!(value.downcast::<u32>().unwrap(), 42);
    /// ```
    pub fn new<T: Reflect>(value: T) -> Self {
        Self {
            ty: T::type_of(),
            data: Box::new(value),
        }
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn kind(&self) -> Kind {
        self.ty.kind()
    }

    pub fn as_any(&self) -> &dyn Any {
        self.data.as_ref()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }

    /// Unwraps the value, failing with [`ErrorKind::TypeMismatch`](crate::ErrorKind::TypeMismatch)
    /// if it does not hold a `T`.
    pub fn downcast<T: Any>(self) -> Result<T, Error> {
        let found = self.ty;

        self.data
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::type_mismatch(std::any::type_name::<T>(), found.name()))
    }
}

impl From<Func> for Value {
    fn from(func: Func) -> Self {
        Self {
            ty: Type::func(func.signature().clone()),
            data: Box::new(func),
        }
    }
}

#[cfg(feature = "debug")]
impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Value").field("ty", &self.ty).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_value_carries_its_type() {
        let value = Value::new(String::from("hello"));
        assert!(*value.ty() == Type::of::<String>());
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("hello"));
        assert!(value.downcast_ref::<u8>().is_none());
    }

    #[test]
    fn test_downcast_mismatch_reports_both_types() {
        let err = Value::new(1u8).downcast::<String>().unwrap_err();
        assert!(err.kind == ErrorKind::TypeMismatch);
        assert!(err.message.contains("u8"));
        assert!(err.message.contains("String"));
    }

    #[test]
    fn test_func_value_has_func_kind() {
        let func = Func::new(|x: u8| x as u16);
        let value = Value::from(func);

        assert!(value.kind() == Kind::Func);
        assert_eq!(value.ty().name(), "fn(u8) -> u16");
        assert!(value.downcast::<Func>().is_ok());
    }

    #[test]
    fn test_as_any_exposes_inner_value() {
        let value = Value::new(9i64);
        assert_eq!(value.as_any().downcast_ref::<i64>(), Some(&9));
    }
}
