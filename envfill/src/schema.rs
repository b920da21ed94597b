//! Static field schema generated for each configuration type

use std::fmt;

/// Type category a leaf field is resolved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    String,
    Int,
    Uint,
    Bool,
    Float,
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Int => "signed integer",
            Self::Uint => "unsigned integer",
            Self::Bool => "boolean",
            Self::Float => "float",
        })
    }
}

/// Why a field is not populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The field carries no `#[env(...)]` annotation.
    Untagged,
    /// The field is annotated but its type is not a supported primitive.
    Unsupported,
    /// The field is annotated but private to its struct.
    ///
    /// Rejected under [`PresencePolicy::Strict`](crate::PresencePolicy::Strict).
    Unsettable,
    /// The field is marked `#[env(skip)]`.
    Ignored,
}

/// How a field takes part in population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Resolved directly from the environment variable `key`.
    Leaf { key: &'static str, kind: LeafKind },
    /// Nested structure visited recursively.
    ///
    /// `prefix` only affects keys under [`KeyMode::Joined`](crate::KeyMode::Joined).
    Group { prefix: Option<&'static str> },
    /// Never touched. `key` is kept when the field was annotated.
    Skip {
        key: Option<&'static str>,
        reason: SkipReason,
    },
}

/// One field of a configuration type, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn leaf(name: &'static str, key: &'static str, kind: LeafKind) -> Self {
        Self {
            name,
            kind: FieldKind::Leaf { key, kind },
        }
    }

    pub const fn group(name: &'static str, prefix: Option<&'static str>) -> Self {
        Self {
            name,
            kind: FieldKind::Group { prefix },
        }
    }

    pub const fn skip(name: &'static str, key: Option<&'static str>, reason: SkipReason) -> Self {
        Self {
            name,
            kind: FieldKind::Skip { key, reason },
        }
    }

    /// Environment key or group prefix attached to the field, if any.
    pub fn annotation(&self) -> Option<&'static str> {
        match self.kind {
            FieldKind::Leaf { key, .. } => Some(key),
            FieldKind::Group { prefix } => prefix,
            FieldKind::Skip { key, .. } => key,
        }
    }
}
