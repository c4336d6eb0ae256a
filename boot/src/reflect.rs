//! Type descriptors used to inspect constructor signatures and container layouts.
//!
//! Every type that takes part in an adapter implements [`Reflect`], which
//! returns a [`Type`] describing it. A `Type` knows its name, its [`Kind`],
//! and, depending on the kind, its struct [`Field`]s, the type it points at,
//! or its function [`Signature`].
//!
//! Struct descriptors are normally generated with `#[derive(Reflect)]`.
//! Primitives, `String`, `Vec<T>`, `Option<T>` and [`Shared<T>`] are covered
//! by the impls in this module.
//!
//! # Examples
//!
//! ```
//! use boot::{Kind, Reflect, Type};
//! use boot::runtime::Shared;
//!
//! #[derive(Clone, Reflect)]
//! struct Database {
//!     url: String,
//! }
//!
//! let ty = Type::of::<Database>();
//! assert_eq!(ty.kind(), Kind::Struct);
//! assert_eq!(ty.fields()[0].name(), "url");
//!
//! let ptr = Type::of::<Shared<Database>>();
//! assert!(ptr.is_pointer_to(&ty));
//! ```

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;

use crate::runtime::Shared;
use crate::signature::Signature;

/// Types that can describe themselves with a [`Type`].
///
/// `Clone` is required because adapters hand owned copies of the located
/// field to the wrapped constructor.
pub trait Reflect: Any + Clone {
    fn type_of() -> Type;
}

/// The broad category of a [`Type`].
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub enum Kind {
    /// Scalars and strings.
    Primitive,
    /// A type with named or positional fields.
    Struct,
    /// [`Shared<T>`].
    Pointer,
    /// A function value.
    Func,
    /// Anything whose layout is not exposed, such as enums and collections.
    Opaque,
}

/// Descriptor of a single struct field.
#[derive(Clone, Copy)]
pub struct Field {
    name: &'static str,
    ty: fn() -> Type,
    get: fn(&dyn Any) -> Option<&dyn Any>,
}

impl Field {
    /// Creates a field descriptor.
    ///
    /// `ty` is resolved lazily so that types pointing at themselves through
    /// [`Shared`] do not recurse forever. `get` borrows the field out of a
    /// value of the owning struct and returns `None` for any other type.
    pub fn new(
        name: &'static str,
        ty: fn() -> Type,
        get: fn(&dyn Any) -> Option<&dyn Any>,
    ) -> Self {
        Self { name, ty, get }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ty(&self) -> Type {
        (self.ty)()
    }

    /// Borrows this field out of `owner`.
    pub fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.get)(owner)
    }
}

#[cfg(feature = "debug")]
impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("ty", &self.ty().name())
            .finish()
    }
}

enum Shape {
    Primitive,
    Opaque,
    Struct(Vec<Field>),
    Pointer(fn() -> Type),
    Func(Signature),
}

struct TypeInner {
    name: Cow<'static, str>,
    id: Option<TypeId>,
    shape: Shape,
}

/// Runtime description of a type.
///
/// Cloning is cheap. Named types compare by [`TypeId`]; function types have
/// no `TypeId` and compare by signature.
#[derive(Clone)]
pub struct Type {
    inner: Shared<TypeInner>,
}

impl Type {
    /// Shorthand for `T::type_of()`.
    pub fn of<T: Reflect>() -> Self {
        T::type_of()
    }

    pub fn primitive<T: Any>() -> Self {
        Self::named::<T>(Shape::Primitive)
    }

    pub fn opaque<T: Any>() -> Self {
        Self::named::<T>(Shape::Opaque)
    }

    /// Describes the struct `T` with its fields in declaration order.
    pub fn structure<T: Any>(fields: Vec<Field>) -> Self {
        Self::named::<T>(Shape::Struct(fields))
    }

    /// Describes the pointer type `T`, which points at `elem`.
    pub fn pointer<T: Any>(elem: fn() -> Type) -> Self {
        Self::named::<T>(Shape::Pointer(elem))
    }

    /// Describes a function type.
    pub fn func(signature: Signature) -> Self {
        Self {
            inner: Shared::new(TypeInner {
                name: Cow::Owned(signature.to_string()),
                id: None,
                shape: Shape::Func(signature),
            }),
        }
    }

    fn named<T: Any>(shape: Shape) -> Self {
        Self {
            inner: Shared::new(TypeInner {
                name: Cow::Borrowed(std::any::type_name::<T>()),
                id: Some(TypeId::of::<T>()),
                shape,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn kind(&self) -> Kind {
        match self.inner.shape {
            Shape::Primitive => Kind::Primitive,
            Shape::Opaque => Kind::Opaque,
            Shape::Struct(_) => Kind::Struct,
            Shape::Pointer(_) => Kind::Pointer,
            Shape::Func(_) => Kind::Func,
        }
    }

    /// `None` for function types.
    pub fn type_id(&self) -> Option<TypeId> {
        self.inner.id
    }

    /// Fields in declaration order. Empty unless this is a struct.
    pub fn fields(&self) -> &[Field] {
        match &self.inner.shape {
            Shape::Struct(fields) => fields,
            _ => &[],
        }
    }

    /// The pointee of a pointer type.
    pub fn elem(&self) -> Option<Type> {
        match self.inner.shape {
            Shape::Pointer(elem) => Some(elem()),
            _ => None,
        }
    }

    pub fn signature(&self) -> Option<&Signature> {
        match &self.inner.shape {
            Shape::Func(signature) => Some(signature),
            _ => None,
        }
    }

    /// Returns `true` if this is a pointer to `other`.
    pub fn is_pointer_to(&self, other: &Type) -> bool {
        self.elem().is_some_and(|elem| elem == *other)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        if Shared::ptr_eq(&self.inner, &other.inner) {
            return true;
        }

        match (self.inner.id, other.inner.id) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.signature() == other.signature(),
            _ => false,
        }
    }
}

impl Eq for Type {}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "debug")]
impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

macro_rules! impl_reflect_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_of() -> Type {
                    Type::primitive::<$ty>()
                }
            }
        )*
    };
}

impl_reflect_primitive!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
);

impl<T: Reflect> Reflect for Vec<T> {
    fn type_of() -> Type {
        Type::opaque::<Self>()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn type_of() -> Type {
        Type::opaque::<Self>()
    }
}

impl<T: Reflect> Reflect for Shared<T> {
    fn type_of() -> Type {
        Type::pointer::<Self>(T::type_of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Reflect for Point {
        fn type_of() -> Type {
            Type::structure::<Self>(vec![
                Field::new("x", i32::type_of, |value| {
                    value.downcast_ref::<Self>().map(|this| &this.x as &dyn Any)
                }),
                Field::new("y", i32::type_of, |value| {
                    value.downcast_ref::<Self>().map(|this| &this.y as &dyn Any)
                }),
            ])
        }
    }

    #[test]
    fn test_primitive_kinds() {
        assert_eq!(Type::of::<u32>().kind(), Kind::Primitive);
        assert_eq!(Type::of::<String>().kind(), Kind::Primitive);
        assert_eq!(Type::of::<Vec<u8>>().kind(), Kind::Opaque);
        assert_eq!(Type::of::<Option<u8>>().kind(), Kind::Opaque);
    }

    #[test]
    fn test_struct_fields_in_declaration_order() {
        let ty = Type::of::<Point>();
        assert_eq!(ty.kind(), Kind::Struct);

        let names: Vec<_> = ty.fields().iter().map(Field::name).collect();
        assert_eq!(names, ["x", "y"]);
        assert_eq!(ty.fields()[1].ty(), Type::of::<i32>());
    }

    #[test]
    fn test_field_accessor_borrows_from_owner() {
        let point = Point { x: 3, y: 4 };
        let ty = Type::of::<Point>();

        let y = ty.fields()[1].get(&point).unwrap();
        assert_eq!(y.downcast_ref::<i32>(), Some(&4));

        let x = ty.fields()[0].get(&point).unwrap();
        assert_eq!(x.downcast_ref::<i32>(), Some(&3));
    }

    #[test]
    fn test_field_accessor_rejects_foreign_owner() {
        let ty = Type::of::<Point>();
        assert!(ty.fields()[0].get(&"not a point").is_none());
    }

    #[test]
    fn test_pointer_elem() {
        let ptr = Type::of::<Shared<Point>>();
        assert_eq!(ptr.kind(), Kind::Pointer);
        assert_eq!(ptr.elem(), Some(Type::of::<Point>()));
        assert!(ptr.is_pointer_to(&Type::of::<Point>()));
        assert!(!ptr.is_pointer_to(&Type::of::<i32>()));
        assert!(Type::of::<Point>().elem().is_none());
    }

    #[test]
    fn test_equality_by_type_id() {
        assert_eq!(Type::of::<Point>(), Type::of::<Point>());
        assert_ne!(Type::of::<Point>(), Type::of::<Shared<Point>>());
        assert_ne!(Type::of::<u32>(), Type::of::<i32>());
    }

    #[test]
    fn test_func_types_compare_by_signature() {
        let a = Type::func(Signature::new(vec![Type::of::<u8>()], vec![Type::of::<String>()]));
        let b = Type::func(Signature::new(vec![Type::of::<u8>()], vec![Type::of::<String>()]));
        let c = Type::func(Signature::new(vec![Type::of::<u16>()], vec![Type::of::<String>()]));

        assert_eq!(a.kind(), Kind::Func);
        assert!(a.type_id().is_none());
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Type::of::<u8>());
    }

    #[test]
    fn test_non_struct_has_no_fields() {
        assert!(Type::of::<u64>().fields().is_empty());
        assert!(Type::of::<u64>().signature().is_none());
    }
}

#[cfg(all(test, feature = "derive"))]
mod derive_tests {
    use super::*;
    use crate::Reflect;

    #[derive(Clone, Reflect)]
    struct Unit;

    #[derive(Clone, Reflect)]
    struct Pair(u8, String);

    #[derive(Clone, Reflect)]
    struct Wrapper<T> {
        inner: T,
        count: usize,
    }

    #[derive(Clone, Reflect)]
    struct Keyword {
        r#type: String,
    }

    #[derive(Clone, Reflect)]
    #[allow(dead_code)]
    enum Mode {
        Fast,
        Slow(u8),
    }

    #[test]
    fn unit_struct_has_no_fields() {
        let ty = Type::of::<Unit>();
        assert!(ty.kind() == Kind::Struct);
        assert!(ty.fields().is_empty());
    }

    #[test]
    fn tuple_struct_fields_use_positions() {
        let ty = Type::of::<Pair>();
        let names: Vec<_> = ty.fields().iter().map(Field::name).collect();
        assert_eq!(names, ["0", "1"]);

        let pair = Pair(1, "one".into());
        let second = ty.fields()[1].get(&pair).unwrap();
        assert_eq!(second.downcast_ref::<String>().map(String::as_str), Some("one"));
    }

    #[test]
    fn generic_struct_resolves_parameter_types() {
        let ty = Type::of::<Wrapper<Pair>>();
        assert!(ty.fields()[0].ty() == Type::of::<Pair>());
        assert!(ty.fields()[1].ty() == Type::of::<usize>());
        assert!(Type::of::<Wrapper<Pair>>() != Type::of::<Wrapper<Unit>>());

        let wrapper = Wrapper {
            inner: Unit,
            count: 3,
        };
        let count = Type::of::<Wrapper<Unit>>().fields()[1].get(&wrapper).unwrap();
        assert_eq!(count.downcast_ref::<usize>(), Some(&3));
    }

    #[test]
    fn raw_identifiers_are_unescaped() {
        let ty = Type::of::<Keyword>();
        assert_eq!(ty.fields()[0].name(), "type");
    }

    #[test]
    fn enums_are_opaque() {
        let ty = Type::of::<Mode>();
        assert!(ty.kind() == Kind::Opaque);
        assert!(ty.fields().is_empty());
    }
}
