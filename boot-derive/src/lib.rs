//! Derive macro for the `boot` reflection model.
//!
//! `#[derive(Reflect)]` implements `boot::Reflect` for a type:
//!
//! - Structs (named, tuple or unit) get a struct descriptor listing every
//!   field in declaration order, with an accessor for each.
//! - Enums get an opaque descriptor: adapters never look inside them.
//!
//! Every type parameter is required to implement `Reflect` as well.
//!
//! # Example
//!
//! ```ignore
//! use boot::Reflect;
//!
//! #[derive(Clone, Reflect)]
//! pub struct AppContainer {
//!     pub db: DatabaseConfig,
//!     pub http: HttpConfig,
//! }
//!
//! // Generated implementation:
//! // impl boot::Reflect for AppContainer {
//! //     fn type_of() -> boot::Type {
//! //         boot::Type::structure::<Self>(vec![
//! //             boot::Field::new("db", <DatabaseConfig as boot::Reflect>::type_of, |v| ..),
//! //             boot::Field::new("http", <HttpConfig as boot::Reflect>::type_of, |v| ..),
//! //         ])
//! //     }
//! // }
//! ```

use proc_macro::TokenStream;

mod reflect;

#[proc_macro_derive(Reflect)]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    reflect::derive_reflect_impl(input)
}
