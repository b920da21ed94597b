//! Conversion from environment variables into leaf field types

use crate::resolve;
use crate::schema::LeafKind;

/// A primitive field type that can be read from a single environment variable.
///
/// Integer types narrower than 64 bits are read through the 64-bit resolvers
/// and treated as absent when the value does not fit. `f32` is narrowed from
/// `f64` on assignment; a finite value beyond the `f32` range is absent rather
/// than rounded to infinity, matching the overflow rule of the `f64` parser.
/// Explicit `inf` spellings stay infinite.
pub trait EnvValue: Sized {
    const KIND: LeafKind;

    fn resolve(key: &str) -> Option<Self>;
}

impl EnvValue for String {
    const KIND: LeafKind = LeafKind::String;

    fn resolve(key: &str) -> Option<Self> {
        resolve::resolve_string(key)
    }
}

impl EnvValue for bool {
    const KIND: LeafKind = LeafKind::Bool;

    fn resolve(key: &str) -> Option<Self> {
        resolve::resolve_bool(key)
    }
}

impl EnvValue for f64 {
    const KIND: LeafKind = LeafKind::Float;

    fn resolve(key: &str) -> Option<Self> {
        resolve::resolve_f64(key)
    }
}

impl EnvValue for f32 {
    const KIND: LeafKind = LeafKind::Float;

    fn resolve(key: &str) -> Option<Self> {
        let wide = resolve::resolve_f64(key)?;
        let narrow = wide as f32;
        if narrow.is_infinite() && wide.is_finite() {
            return None;
        }
        Some(narrow)
    }
}

macro_rules! impl_env_value_int {
    ($kind:ident, $resolver:path => $($ty:ty),+) => {
        $(
            impl EnvValue for $ty {
                const KIND: LeafKind = LeafKind::$kind;

                fn resolve(key: &str) -> Option<Self> {
                    $resolver(key).and_then(|v| <$ty>::try_from(v).ok())
                }
            }
        )+
    };
}

impl_env_value_int!(Int, resolve::resolve_i64 => i8, i16, i32, i64, isize);
impl_env_value_int!(Uint, resolve::resolve_u64 => u8, u16, u32, u64, usize);
