//! Depth-first search for a target field inside a container.
//!
//! Fields are visited in declaration order, pre-order: a field is checked
//! before its own children, and its children before its next sibling. The
//! first match wins: a field's own type is checked before descending into it,
//! and a match nested inside an earlier sibling beats a later direct field.
//!
//! A field matches when its type equals the target, or, when a pointer
//! target is supplied, when its type equals that pointer type. Struct fields
//! that do not match are searched recursively. Pointers that do not match are
//! never followed.

use std::any::Any;

use crate::reflect::{Kind, Type};

/// How the located field holds the target.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub enum Found<'a> {
    /// The field is the target value itself.
    Value(&'a dyn Any),
    /// The field is a pointer to the target.
    Pointer(&'a dyn Any),
}

/// A located field together with the names leading to it.
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Located<'a> {
    pub found: Found<'a>,
    pub path: Vec<&'static str>,
}

impl Located<'_> {
    /// The field path joined with `.`, e.g. `inner.db`.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}

/// Searches `value`, described by `ty`, for a field of type `target` (or of
/// type `pointer`, when given).
///
/// Returns `None` when no field in the whole field graph matches.
pub fn locate<'a>(
    value: &'a dyn Any,
    ty: &Type,
    target: &Type,
    pointer: Option<&Type>,
) -> Option<Located<'a>> {
    let mut path = Vec::new();
    let found = walk(value, ty, target, pointer, &mut path)?;

    Some(Located { found, path })
}

fn walk<'a>(
    value: &'a dyn Any,
    ty: &Type,
    target: &Type,
    pointer: Option<&Type>,
    path: &mut Vec<&'static str>,
) -> Option<Found<'a>> {
    for field in ty.fields() {
        let field_ty = field.ty();

        let Some(field_value) = field.get(value) else {
            continue;
        };

        path.push(field.name());

        if field_ty == *target {
            return Some(Found::Value(field_value));
        }

        if pointer.is_some_and(|pointer| field_ty == *pointer) {
            return Some(Found::Pointer(field_value));
        }

        if field_ty.kind() == Kind::Struct {
            if let Some(found) = walk(field_value, &field_ty, target, pointer, path) {
                return Some(found);
            }
        }

        path.pop();
    }

    None
}

/// Type-level counterpart of [`locate`]: the path to the first field of the
/// target type, without needing a container value.
pub fn field_path(ty: &Type, target: &Type, pointer: Option<&Type>) -> Option<Vec<&'static str>> {
    for field in ty.fields() {
        let field_ty = field.ty();

        if field_ty == *target || pointer.is_some_and(|pointer| field_ty == *pointer) {
            return Some(vec![field.name()]);
        }

        if field_ty.kind() == Kind::Struct {
            if let Some(mut rest) = field_path(&field_ty, target, pointer) {
                rest.insert(0, field.name());
                return Some(rest);
            }
        }
    }

    None
}
