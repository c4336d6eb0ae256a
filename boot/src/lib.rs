//! Adapt constructors written against a narrow dependency to a broad container.
//!
//! Given a constructor `fn(.., N, ..) -> R` and a container struct `G` that
//! embeds an `N` somewhere in its fields, [`boot`] builds a [`Func`] with the
//! signature `fn(.., G, ..) -> R`. Calling it locates the `N` inside the `G`
//! and forwards everything to the constructor. [`boot_pointer`] does the same
//! for constructors and containers that hold the dependency behind
//! [`Shared`](runtime::Shared).

extern crate self as boot;

pub mod adapter;
pub mod error;
pub mod extract;
pub mod func;
pub mod reflect;
pub mod runtime;
pub mod signature;
pub mod value;

pub use adapter::*;
pub use error::*;
pub use func::*;
pub use reflect::*;
pub use signature::*;
pub use value::*;

#[cfg(feature = "derive")]
pub use boot_derive::Reflect;
