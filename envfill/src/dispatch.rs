//! Compile-time dispatch for fields that are not primitive leaves
//!
//! The derive cannot see whether a field's type is a configuration struct.
//! It wraps the field and lets method resolution decide: a receiver whose
//! type implements [`Populate`] picks the by-value impl and is recursed into;
//! anything else only matches the impl on the autoref'd receiver and is
//! skipped. This works for concrete field types, which is what the derive
//! sees in non-generic structs.
//!
//! Used by macro-generated code.

use std::marker::PhantomData;

use crate::error::PopulateError;
use crate::populate::{Populate, Walker};
use crate::schema::{FieldKind, SkipReason};

/// Mutable access to a field during [`Populate::visit`].
pub struct Nested<'a, T>(pub &'a mut T);

pub trait NestedPopulate {
    fn visit_field(
        self,
        walker: &mut Walker,
        name: &'static str,
        annotation: Option<&'static str>,
        fallback: SkipReason,
    ) -> Result<(), PopulateError>;
}

impl<T: Populate> NestedPopulate for Nested<'_, T> {
    fn visit_field(
        self,
        walker: &mut Walker,
        name: &'static str,
        annotation: Option<&'static str>,
        _fallback: SkipReason,
    ) -> Result<(), PopulateError> {
        walker.group(name, annotation, self.0)
    }
}

pub trait NestedFallback {
    fn visit_field(
        self,
        walker: &mut Walker,
        name: &'static str,
        annotation: Option<&'static str>,
        fallback: SkipReason,
    ) -> Result<(), PopulateError>;
}

impl<T> NestedFallback for &Nested<'_, T> {
    fn visit_field(
        self,
        walker: &mut Walker,
        name: &'static str,
        annotation: Option<&'static str>,
        fallback: SkipReason,
    ) -> Result<(), PopulateError> {
        walker.skip(name, annotation, fallback)
    }
}

/// Type-only counterpart of [`Nested`] used to build [`Populate::fields`].
pub struct Probe<T>(PhantomData<T>);

impl<T> Probe<T> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

pub trait ProbePopulate {
    fn field_kind(self, annotation: Option<&'static str>, fallback: SkipReason) -> FieldKind;
}

impl<T: Populate> ProbePopulate for Probe<T> {
    fn field_kind(self, annotation: Option<&'static str>, _fallback: SkipReason) -> FieldKind {
        FieldKind::Group { prefix: annotation }
    }
}

pub trait ProbeFallback {
    fn field_kind(self, annotation: Option<&'static str>, fallback: SkipReason) -> FieldKind;
}

impl<T> ProbeFallback for &Probe<T> {
    fn field_kind(self, annotation: Option<&'static str>, fallback: SkipReason) -> FieldKind {
        FieldKind::Skip {
            key: annotation,
            reason: fallback,
        }
    }
}
