//! Dynamic function values.
//!
//! A [`Func`] pairs a [`Signature`] with a type-erased body operating on
//! [`Value`]s. It can be created from an ordinary closure through
//! [`IntoFunc`], or from an explicit signature and body with
//! [`Func::from_fn`], which is how adapters are generated.
//!
//! # Examples
//!
//! ```
//! use boot::Func;
//!
//! let add = Func::new(|a: u32, b: u32| a + b);
//! assert_eq!(add.signature().to_string(), "fn(u32, u32) -> u32");
//!
//! let sum: u32 = add.invoke((2u32, 3u32)).unwrap();
//! assert_eq!(sum, 5);
//! ```

use crate::error::Error;
use crate::reflect::{Reflect, Type};
use crate::runtime::{CallFn, MaybeSendSync, Shared};
use crate::signature::Signature;
use crate::value::Value;

#[cfg(feature = "tracing")]
use tracing::trace;

/// A callable value with a runtime-visible signature.
#[derive(Clone)]
pub struct Func {
    signature: Signature,
    body: Shared<CallFn>,
}

impl Func {
    /// Converts a typed closure into a function value.
    pub fn new<Args, F>(f: F) -> Self
    where
        F: IntoFunc<Args>,
    {
        f.into_func()
    }

    /// Creates a function value from a signature and a body.
    ///
    /// [`Func::call`] checks the arguments against `signature` before `body`
    /// runs, so the body may assume the declared parameter types.
    pub fn from_fn<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Vec<Value>, Error> + MaybeSendSync + 'static,
    {
        Self {
            signature,
            body: Shared::new(body),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Calls the function with type-erased arguments.
    ///
    /// Fails with [`ErrorKind::ArgumentCount`](crate::ErrorKind::ArgumentCount)
    /// or [`ErrorKind::ArgumentType`](crate::ErrorKind::ArgumentType) when
    /// `args` does not fit the signature. For a variadic signature every
    /// trailing argument is checked against the last parameter type.
    pub fn call(&self, args: Vec<Value>) -> Result<Vec<Value>, Error> {
        self.check_args(&args)?;

        #[cfg(feature = "tracing")]
        trace!("Calling {} with {} argument(s)", self.signature, args.len());

        (self.body)(args)
    }

    /// Calls the function with a tuple of typed arguments and downcasts the
    /// first result.
    pub fn invoke<A, R>(&self, args: A) -> Result<R, Error>
    where
        A: IntoArgs,
        R: Reflect,
    {
        let results = self.call(args.into_args())?;

        results
            .into_iter()
            .next()
            .ok_or_else(|| Error::type_mismatch(std::any::type_name::<R>(), "()"))?
            .downcast::<R>()
    }

    fn check_args(&self, args: &[Value]) -> Result<(), Error> {
        let params = self.signature.params();

        let count_ok = if self.signature.is_variadic() {
            args.len() + 1 >= params.len()
        } else {
            args.len() == params.len()
        };

        if !count_ok {
            return Err(Error::argument_count(
                &self.signature.to_string(),
                params.len(),
                args.len(),
            ));
        }

        for (index, arg) in args.iter().enumerate() {
            let expected = params.get(index).or(params.last());

            if let Some(expected) = expected {
                if arg.ty() != expected {
                    return Err(Error::argument_type(index, expected.name(), arg.ty().name()));
                }
            }
        }

        Ok(())
    }
}

#[cfg(feature = "debug")]
impl std::fmt::Debug for Func {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Func")
            .field("signature", &self.signature.to_string())
            .finish()
    }
}

/// Closures that can become a [`Func`].
///
/// Implemented for `Fn` closures of up to six [`Reflect`] arguments that
/// return a [`Reflect`] value.
pub trait IntoFunc<Args> {
    fn into_func(self) -> Func;
}

/// Tuples of [`Reflect`] values usable as arguments to [`Func::invoke`].
pub trait IntoArgs {
    fn into_args(self) -> Vec<Value>;
}

fn next_arg<T: Reflect>(args: &mut impl Iterator<Item = Value>) -> Result<T, Error> {
    args.next()
        .ok_or_else(|| Error::type_mismatch(std::any::type_name::<T>(), "<missing>"))?
        .downcast::<T>()
}

macro_rules! impl_func_arity {
    ($($arg:ident),*) => {
        impl<F, R, $($arg,)*> IntoFunc<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> R + MaybeSendSync + 'static,
            R: Reflect,
            $($arg: Reflect,)*
        {
            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn into_func(self) -> Func {
                let signature = Signature::new(
                    vec![$(Type::of::<$arg>()),*],
                    vec![Type::of::<R>()],
                );

                Func::from_fn(signature, move |args: Vec<Value>| {
                    let mut args = args.into_iter();
                    $(let $arg = next_arg::<$arg>(&mut args)?;)*

                    Ok(vec![Value::new((self)($($arg),*))])
                })
            }
        }

        impl<$($arg: Reflect,)*> IntoArgs for ($($arg,)*) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Value> {
                let ($($arg,)*) = self;
                vec![$(Value::new($arg)),*]
            }
        }
    };
}

impl_func_arity!();
impl_func_arity!(A1);
impl_func_arity!(A1, A2);
impl_func_arity!(A1, A2, A3);
impl_func_arity!(A1, A2, A3, A4);
impl_func_arity!(A1, A2, A3, A4, A5);
impl_func_arity!(A1, A2, A3, A4, A5, A6);
