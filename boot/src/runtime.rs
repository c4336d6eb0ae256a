//! Runtime type definitions selected by the `thread-safe` feature flag.
//!
//! - When `thread-safe` is enabled: [`Shared`] is `Arc` and every function body
//!   must be `Send + Sync`.
//! - When `thread-safe` is disabled: [`Shared`] is `Rc` and no thread bounds
//!   apply.
//!
//! [`Shared<T>`] is also the pointer type of the reflection model: a field or
//! parameter of type `Shared<T>` has [`Kind::Pointer`](crate::Kind::Pointer)
//! and points at a `T`.
//!
//! # Examples
//!
//! ```
//! use boot::runtime::Shared;
//!
//! let data = Shared::new(vec![1, 2, 3]);
//! let clone = Shared::clone(&data);
//! assert!(Shared::ptr_eq(&data, &clone));
//! ```

#[cfg(feature = "thread-safe")]
use std::sync::Arc;

#[cfg(not(feature = "thread-safe"))]
use std::rc::Rc;

use crate::error::Error;
use crate::value::Value;

/// Smart pointer for shared ownership.
///
/// When the `thread-safe` feature is enabled, this is [`Arc<T>`].
/// When disabled, this is [`Rc<T>`].
#[cfg(feature = "thread-safe")]
pub type Shared<T> = Arc<T>;
#[cfg(not(feature = "thread-safe"))]
pub type Shared<T> = Rc<T>;

/// Bound satisfied by every type, or only by `Send + Sync` types when the
/// `thread-safe` feature is enabled.
#[cfg(feature = "thread-safe")]
pub trait MaybeSendSync: Send + Sync {}
#[cfg(feature = "thread-safe")]
impl<T: Send + Sync + ?Sized> MaybeSendSync for T {}

#[cfg(not(feature = "thread-safe"))]
pub trait MaybeSendSync {}
#[cfg(not(feature = "thread-safe"))]
impl<T: ?Sized> MaybeSendSync for T {}

/// Type-erased body of a [`Func`](crate::Func).
#[cfg(feature = "thread-safe")]
pub type CallFn = dyn Fn(Vec<Value>) -> Result<Vec<Value>, Error> + Send + Sync + 'static;
#[cfg(not(feature = "thread-safe"))]
pub type CallFn = dyn Fn(Vec<Value>) -> Result<Vec<Value>, Error> + 'static;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_maybe_send_sync<T: MaybeSendSync>(_: &T) {}

    #[test]
    fn test_shared_can_be_cloned() {
        let data = Shared::new(100);
        let clone = Shared::clone(&data);

        assert_eq!(Shared::strong_count(&data), 2);

        drop(clone);

        assert_eq!(Shared::strong_count(&data), 1);
    }

    #[test]
    fn test_shared_values_satisfy_marker() {
        let data = Shared::new(String::from("shared"));
        assert_maybe_send_sync(&data);
    }

    #[test]
    fn test_call_fn_can_be_erased() {
        let body: Shared<CallFn> = Shared::new(|args: Vec<Value>| Ok::<_, Error>(args));
        let out = body(vec![Value::new(7u8)]).unwrap();
        assert_eq!(out.len(), 1);
    }
}
