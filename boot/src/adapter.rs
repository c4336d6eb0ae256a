//! Adapter construction.
//!
//! An adapter wraps a constructor that takes a narrow dependency `N` and
//! exposes it as a function taking a broader container `G` instead. On every
//! call the adapter locates the `N` embedded somewhere inside the `G` it
//! receives, substitutes it for the container argument, and forwards the call
//! to the constructor.
//!
//! Both variants run through the same pipeline and differ only in their
//! [`Policy`]:
//!
//! - [`Policy::VALUE`]: the constructor takes `N`, the adapter takes `G`, and
//!   only fields of type `N` match.
//! - [`Policy::POINTER_AWARE`]: the constructor may take `N` or `Shared<N>`,
//!   the adapter takes `Shared<G>`, and fields of type `Shared<N>` match too.
//!
//! # Examples
//!
//! ```
//! use boot::{Func, Reflect};
//!
//! #[derive(Clone, Reflect)]
//! struct Database {
//!     url: String,
//! }
//!
//! #[derive(Clone, Reflect)]
//! struct App {
//!     database: Database,
//!     workers: u8,
//! }
//!
//! let connect = Func::new(|db: Database| format!("connecting to {}", db.url));
//! let adapter = boot::boot::<App, Database>(connect).unwrap();
//!
//! assert_eq!(adapter.signature().params()[0].name(), std::any::type_name::<App>());
//!
//! let app = App {
//!     database: Database { url: "postgres://localhost".into() },
//!     workers: 4,
//! };
//! let out: String = adapter.invoke((app,)).unwrap();
//! assert_eq!(out, "connecting to postgres://localhost");
//! ```

use std::marker::PhantomData;

use crate::error::Error;
use crate::extract::{self, Found};
use crate::func::Func;
use crate::reflect::{Kind, Reflect, Type};
use crate::runtime::Shared;
use crate::signature::Signature;
use crate::value::Value;

#[cfg(feature = "tracing")]
use tracing::{debug, info, warn};

/// Switches that select the adapter variant.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Policy {
    /// Accept `Shared<N>` parameters and `Shared<N>` container fields.
    pub match_pointers: bool,
    /// Receive the container as `Shared<G>` instead of `G`.
    pub container_by_pointer: bool,
}

impl Policy {
    /// Strict by-value matching.
    pub const VALUE: Policy = Policy {
        match_pointers: false,
        container_by_pointer: false,
    };

    /// Value or pointer matching, container received by pointer.
    pub const POINTER_AWARE: Policy = Policy {
        match_pointers: true,
        container_by_pointer: true,
    };
}

/// The constructor parameter the adapter substitutes.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Slot {
    pub index: usize,
    /// The parameter is `Shared<N>` rather than `N`.
    pub by_pointer: bool,
}

/// Finds the single parameter of `signature` that accepts `target`, or
/// `pointer` when given.
pub fn match_parameter(
    signature: &Signature,
    target: &Type,
    pointer: Option<&Type>,
) -> Result<Slot, Error> {
    let slots: Vec<Slot> = signature
        .params()
        .iter()
        .enumerate()
        .filter_map(|(index, param)| {
            if param == target {
                Some(Slot {
                    index,
                    by_pointer: false,
                })
            } else if pointer.is_some_and(|pointer| param == pointer) {
                Some(Slot {
                    index,
                    by_pointer: true,
                })
            } else {
                None
            }
        })
        .collect();

    match slots.as_slice() {
        [slot] => Ok(*slot),
        [] => Err(Error::missing_parameter(
            &signature.to_string(),
            target.name(),
        )),
        many => {
            let positions: Vec<usize> = many.iter().map(|slot| slot.index).collect();
            Err(Error::ambiguous_parameter(
                &signature.to_string(),
                target.name(),
                &positions,
            ))
        }
    }
}

/// Builder of adapters from constructors taking `N` to functions taking `G`.
pub struct Adapter<G, N> {
    policy: Policy,
    _marker: PhantomData<fn() -> (G, N)>,
}

impl<G, N> Adapter<G, N>
where
    G: Reflect,
    N: Reflect,
{
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            _marker: PhantomData,
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Builds the adapter for `constructor`.
    ///
    /// All structural checks happen here; see [`ErrorKind::is_build_time`](crate::ErrorKind::is_build_time)
    /// for the errors this can return. Whether the target is actually
    /// reachable inside `G` is only verified when the adapter is called.
    pub fn build(&self, constructor: impl Into<Value>) -> Result<Func, Error> {
        let constructor = constructor.into();

        if constructor.kind() != Kind::Func {
            return Err(Error::not_a_function(constructor.ty().name()));
        }

        let constructor = constructor.downcast::<Func>()?;
        let signature = constructor.signature();

        if signature.is_variadic() {
            return Err(Error::variadic_not_supported(&signature.to_string()));
        }

        let container = G::type_of();
        let target = N::type_of();

        if container.kind() != Kind::Struct {
            return Err(Error::container_not_struct(container.name()));
        }

        if target.kind() != Kind::Struct {
            return Err(Error::target_not_struct(target.name()));
        }

        if signature.params().is_empty() {
            return Err(Error::missing_parameter(
                &signature.to_string(),
                target.name(),
            ));
        }

        let target_ptr = self.policy.match_pointers.then(Shared::<N>::type_of);
        let slot = match_parameter(signature, &target, target_ptr.as_ref())?;

        let container_param = if self.policy.container_by_pointer {
            Shared::<G>::type_of()
        } else {
            container.clone()
        };
        let adapted = signature.with_param(slot.index, container_param);

        #[cfg(feature = "tracing")]
        match extract::field_path(&container, &target, target_ptr.as_ref()) {
            Some(path) => debug!(
                "Resolved '{}' inside '{}' at '{}'",
                target,
                container,
                path.join(".")
            ),
            None => warn!(
                "'{}' is not reachable inside '{}'; calls to the adapter will fail",
                target, container
            ),
        }

        #[cfg(feature = "tracing")]
        info!("Built adapter {} for constructor {}", adapted, signature);

        let policy = self.policy;

        Ok(Func::from_fn(adapted, move |mut args: Vec<Value>| {
            let container_arg = std::mem::replace(&mut args[slot.index], Value::new(()));
            args[slot.index] = substitute::<G, N>(
                container_arg,
                &container,
                &target,
                target_ptr.as_ref(),
                policy,
                slot,
            )?;

            constructor.call(args)
        }))
    }
}

/// Value-variant adapter: `fn(.., N, ..) -> R` becomes `fn(.., G, ..) -> R`.
pub fn boot<G, N>(constructor: impl Into<Value>) -> Result<Func, Error>
where
    G: Reflect,
    N: Reflect,
{
    Adapter::<G, N>::new(Policy::VALUE).build(constructor)
}

/// Pointer-aware adapter: `fn(.., N or Shared<N>, ..) -> R` becomes
/// `fn(.., Shared<G>, ..) -> R`, and `Shared<N>` fields inside `G` are
/// matched as well.
pub fn boot_pointer<G, N>(constructor: impl Into<Value>) -> Result<Func, Error>
where
    G: Reflect,
    N: Reflect,
{
    Adapter::<G, N>::new(Policy::POINTER_AWARE).build(constructor)
}

/// Turns the container argument into the argument the constructor expects.
fn substitute<G, N>(
    container_arg: Value,
    container: &Type,
    target: &Type,
    target_ptr: Option<&Type>,
    policy: Policy,
    slot: Slot,
) -> Result<Value, Error>
where
    G: Reflect,
    N: Reflect,
{
    let by_pointer;
    let by_value;
    let g: &G = if policy.container_by_pointer {
        by_pointer = container_arg.downcast::<Shared<G>>()?;
        &by_pointer
    } else {
        by_value = container_arg.downcast::<G>()?;
        &by_value
    };

    let located = extract::locate(g, container, target, target_ptr)
        .ok_or_else(|| Error::target_not_found(container.name(), target.name()))?;

    #[cfg(feature = "tracing")]
    debug!("Extracted '{}' from '{}.{}'", target, container, located.path_string());

    let mismatch = |found: &str| Error::type_mismatch(target.name(), found);

    let value = match (located.found, slot.by_pointer) {
        (Found::Value(field), false) => {
            let n = field.downcast_ref::<N>().ok_or_else(|| mismatch("field"))?;
            Value::new(n.clone())
        }
        (Found::Value(field), true) => {
            let n = field.downcast_ref::<N>().ok_or_else(|| mismatch("field"))?;
            Value::new(Shared::new(n.clone()))
        }
        (Found::Pointer(field), false) => {
            let ptr = field
                .downcast_ref::<Shared<N>>()
                .ok_or_else(|| mismatch("pointer field"))?;
            Value::new((**ptr).clone())
        }
        (Found::Pointer(field), true) => {
            let ptr = field
                .downcast_ref::<Shared<N>>()
                .ok_or_else(|| mismatch("pointer field"))?;
            Value::new(Shared::clone(ptr))
        }
    };

    Ok(value)
}
