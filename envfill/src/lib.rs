//! Populate configuration structs in place from environment variables
//!
//! `envfill` maps annotated struct fields to environment variables, recurses
//! into nested groups of settings, and converts values to the field's type.
//! Whether a missing variable is tolerated or fatal is chosen per call with a
//! [`PresencePolicy`].
//!
//! # Features
//!
//! - **Declarative**: `#[derive(Populate)]` generates an explicit field schema
//!   and walker, no runtime reflection
//! - **In place**: fields keep their current value unless the environment
//!   provides a new one
//! - **Two presence policies**: [`PresencePolicy::Permissive`] keeps defaults,
//!   [`PresencePolicy::Strict`] fails on the first unresolved variable
//! - **Nested groups**: optional key namespacing with [`KeyMode::Joined`]
//!
//! # Value Parsing
//!
//! - Strings: taken verbatim, the empty string included
//! - Integers (`i8`..`i64`, `isize`, `u8`..`u64`, `usize`): base 10,
//!   out-of-range values are rejected
//! - Booleans: `1 t T TRUE true True` and `0 f F FALSE false False`
//! - Floats (`f32`, `f64`): decimal literals
//!
//! A variable that is set but does not parse is treated exactly like an
//! unset one.
//!
//! # Example
//!
//! ```rust
//! use envfill::{Populate, PresencePolicy};
//!
//! #[derive(Debug, Default, Populate)]
//! struct Config {
//!     #[env(name = "PORT")]
//!     pub port: u16,
//!
//!     #[env(name = "HOST")]
//!     pub host: String,
//! }
//!
//! # fn main() -> Result<(), envfill::PopulateError> {
//! #     std::env::set_var("PORT", "8080");
//! #     std::env::remove_var("HOST");
//! let mut config = Config::default();
//! envfill::populate(&mut config, PresencePolicy::Permissive)?;
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.host, "");
//! #     Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[env(name = "KEY")]`
//!
//! Bind a primitive field to the environment variable `KEY`. Primitive
//! fields without an annotation are never touched.
//!
//! ## Nested structs
//!
//! A field whose type also implements `Populate` is recursed into, with or
//! without an annotation. `#[env(group = "PREFIX")]` (or `name = "PREFIX"`)
//! attaches a prefix to it, which is ignored by default; with
//! [`KeyMode::Joined`] it is prepended to every key inside the group.
//! Non-primitive fields of any other type are skipped rather than rejected.
//!
//! ```rust
//! # use envfill::{KeyMode, Populate, Populator};
//! #[derive(Debug, Default, Populate)]
//! pub struct Database {
//!     #[env(name = "DSN")]
//!     pub dsn: String,
//! }
//!
//! #[derive(Debug, Default, Populate)]
//! pub struct Config {
//!     // Reads DSN, or DB_DSN with KeyMode::Joined
//!     #[env(group = "DB")]
//!     pub database: Database,
//! }
//! # fn main() -> Result<(), envfill::PopulateError> {
//! #     std::env::set_var("DB_DSN", "postgres://localhost/db");
//! #     let mut config = Config::default();
//! #     Populator::strict().key_mode(KeyMode::Joined).populate(&mut config)?;
//! #     assert_eq!(config.database.dsn, "postgres://localhost/db");
//! #     Ok(())
//! # }
//! ```
//!
//! ## `#[env(skip)]`
//!
//! Exclude a field explicitly.
//!
//! # Field visibility
//!
//! Only fields visible outside their struct (`pub`, `pub(crate)`, ...) are
//! written. A private annotated field is skipped under
//! [`PresencePolicy::Permissive`] and reported as
//! [`PopulateError::Unsettable`] under [`PresencePolicy::Strict`].

#[doc(hidden)]
pub mod dispatch;

mod error;
mod populate;
pub mod resolve;
mod schema;
mod value;

pub use envfill_derive::Populate;
pub use error::PopulateError;
pub use populate::{
    populate, KeyMode, Populate, Populator, PresencePolicy, Summary, Walker, KEY_SEPARATOR,
};
pub use schema::{FieldKind, FieldSpec, LeafKind, SkipReason};
pub use value::EnvValue;
