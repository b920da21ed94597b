//! Struct traversal and presence policies

use std::borrow::Cow;

use crate::error::PopulateError;
use crate::schema::{FieldSpec, SkipReason};
use crate::value::EnvValue;

/// Separator between a group prefix and a child key in [`KeyMode::Joined`].
pub const KEY_SEPARATOR: &str = "_";

/// What happens when a leaf's environment variable is unset or malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PresencePolicy {
    /// Keep the field's current value and carry on. Never fails.
    #[default]
    Permissive,
    /// Stop at the first unresolved or unwritable field and return an error.
    Strict,
}

/// How group prefixes affect the keys of the fields inside them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyMode {
    /// Keys are used exactly as annotated; group prefixes are ignored.
    #[default]
    Literal,
    /// Keys are prefixed with every enclosing group prefix, joined by
    /// [`KEY_SEPARATOR`]: `#[env(group = "DB")]` turns `HOST` into `DB_HOST`.
    Joined,
}

/// A configuration type whose fields can be filled from the environment.
///
/// Usually implemented with `#[derive(Populate)]`. A manual implementation
/// lists its fields in `fields` and calls the matching [`Walker`] method for
/// each of them, in the same order, from `visit`.
pub trait Populate {
    /// Every field of the type in declaration order, skipped ones included.
    fn fields() -> Vec<FieldSpec>;

    fn visit(&mut self, walker: &mut Walker) -> Result<(), PopulateError>;

    /// Build a value from `Default` and populate it under `policy`.
    fn from_env(policy: PresencePolicy) -> Result<Self, PopulateError>
    where
        Self: Default + Sized,
    {
        let mut config = Self::default();
        Populator::new(policy).populate(&mut config)?;
        Ok(config)
    }
}

/// Counts of what a successful populate call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Leaf fields written from the environment
    pub set: usize,
    /// Leaf fields left untouched because their variable was unresolved
    pub absent: usize,
    /// Fields skipped without a lookup
    pub skipped: usize,
}

/// Entry point holding the policy and key mode for populate calls.
///
/// ```rust
/// use envfill::{KeyMode, Populate, Populator};
///
/// #[derive(Debug, Default, Populate)]
/// struct Config {
///     #[env(name = "PORT")]
///     pub port: u16,
/// }
///
/// # fn main() -> Result<(), envfill::PopulateError> {
/// #     std::env::set_var("APP_PORT", "3000");
/// let mut config = Config { port: 8080 };
/// Populator::strict()
///     .key_mode(KeyMode::Joined)
///     .prefix("APP")
///     .populate(&mut config)?;
/// assert_eq!(config.port, 3000);
/// #     Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Populator {
    policy: PresencePolicy,
    key_mode: KeyMode,
    prefix: Option<String>,
}

impl Populator {
    pub fn new(policy: PresencePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn permissive() -> Self {
        Self::new(PresencePolicy::Permissive)
    }

    pub fn strict() -> Self {
        Self::new(PresencePolicy::Strict)
    }

    pub fn key_mode(mut self, key_mode: KeyMode) -> Self {
        self.key_mode = key_mode;
        self
    }

    /// Prefix for the top-level struct, as if it were itself a group.
    ///
    /// Only affects keys under [`KeyMode::Joined`].
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into()).filter(|p| !p.is_empty());
        self
    }

    /// Visit every field of `target` and write the resolved values in place.
    ///
    /// # Errors
    ///
    /// Under [`PresencePolicy::Strict`] only:
    /// - a leaf's environment variable is unset or cannot be parsed
    /// - an annotated field is private to its struct
    pub fn populate<T: Populate + ?Sized>(
        &self,
        target: &mut T,
    ) -> Result<Summary, PopulateError> {
        let span = tracing::debug_span!(
            "populate",
            config = std::any::type_name::<T>(),
            policy = ?self.policy,
            key_mode = ?self.key_mode,
        );
        let _enter = span.enter();

        let mut walker = Walker {
            policy: self.policy,
            key_mode: self.key_mode,
            prefix: self.prefix.clone(),
            path: Vec::new(),
            summary: Summary::default(),
        };
        target.visit(&mut walker)?;

        let summary = walker.summary;
        tracing::debug!(
            set = summary.set,
            absent = summary.absent,
            skipped = summary.skipped,
            "populate finished"
        );
        Ok(summary)
    }
}

/// Populate `target` with literal keys under `policy`.
pub fn populate<T: Populate + ?Sized>(
    target: &mut T,
    policy: PresencePolicy,
) -> Result<Summary, PopulateError> {
    Populator::new(policy).populate(target)
}

/// Traversal state passed to [`Populate::visit`].
#[derive(Debug)]
pub struct Walker {
    policy: PresencePolicy,
    key_mode: KeyMode,
    prefix: Option<String>,
    path: Vec<&'static str>,
    summary: Summary,
}

impl Walker {
    /// Resolve `key` and assign it to `slot`.
    pub fn leaf<T: EnvValue>(
        &mut self,
        name: &'static str,
        key: &'static str,
        slot: &mut T,
    ) -> Result<(), PopulateError> {
        let key = self.effective_key(key);
        match T::resolve(&key) {
            Some(value) => {
                *slot = value;
                self.summary.set += 1;
                tracing::debug!(
                    field = %self.field_path(name),
                    key = %key,
                    "field set from environment"
                );
                Ok(())
            }
            None => match self.policy {
                PresencePolicy::Permissive => {
                    self.summary.absent += 1;
                    tracing::debug!(
                        field = %self.field_path(name),
                        key = %key,
                        "environment variable unset or invalid, keeping current value"
                    );
                    Ok(())
                }
                PresencePolicy::Strict => {
                    Err(PopulateError::missing(key, self.field_path(name), T::KIND))
                }
            },
        }
    }

    /// Recurse into a nested configuration struct.
    pub fn group<T: Populate + ?Sized>(
        &mut self,
        name: &'static str,
        prefix: Option<&'static str>,
        target: &mut T,
    ) -> Result<(), PopulateError> {
        let outer = match prefix.filter(|p| !p.is_empty()) {
            Some(prefix) => {
                let joined = match &self.prefix {
                    Some(outer) => format!("{outer}{KEY_SEPARATOR}{prefix}"),
                    None => prefix.to_string(),
                };
                self.prefix.replace(joined)
            }
            None => self.prefix.clone(),
        };
        self.path.push(name);

        let result = target.visit(self);

        self.path.pop();
        self.prefix = outer;
        result
    }

    /// Record a field that is not populated.
    ///
    /// Fails only for [`SkipReason::Unsettable`] under [`PresencePolicy::Strict`].
    pub fn skip(
        &mut self,
        name: &'static str,
        key: Option<&'static str>,
        reason: SkipReason,
    ) -> Result<(), PopulateError> {
        if reason == SkipReason::Unsettable && self.policy == PresencePolicy::Strict {
            return Err(PopulateError::unsettable(self.field_path(name), key));
        }
        self.summary.skipped += 1;
        tracing::trace!(field = %self.field_path(name), ?reason, "field skipped");
        Ok(())
    }

    fn effective_key<'k>(&self, key: &'k str) -> Cow<'k, str> {
        match (self.key_mode, &self.prefix) {
            (KeyMode::Joined, Some(prefix)) => {
                Cow::Owned(format!("{prefix}{KEY_SEPARATOR}{key}"))
            }
            _ => Cow::Borrowed(key),
        }
    }

    fn field_path(&self, name: &str) -> String {
        let mut path = self.path.join(".");
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(name);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LeafKind;
    use serial_test::serial;
    use std::env;

    #[derive(Debug, Default, PartialEq)]
    struct Pool {
        size: u32,
    }

    impl Populate for Pool {
        fn fields() -> Vec<FieldSpec> {
            vec![FieldSpec::leaf("size", "SIZE", LeafKind::Uint)]
        }

        fn visit(&mut self, walker: &mut Walker) -> Result<(), PopulateError> {
            walker.leaf("size", "SIZE", &mut self.size)
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Database {
        dsn: String,
        pool: Pool,
    }

    impl Populate for Database {
        fn fields() -> Vec<FieldSpec> {
            vec![
                FieldSpec::leaf("dsn", "DSN", LeafKind::String),
                FieldSpec::group("pool", Some("POOL")),
            ]
        }

        fn visit(&mut self, walker: &mut Walker) -> Result<(), PopulateError> {
            walker.leaf("dsn", "DSN", &mut self.dsn)?;
            walker.group("pool", Some("POOL"), &mut self.pool)?;
            Ok(())
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Service {
        port: u16,
        host: String,
        debug: bool,
        database: Database,
        token: String,
    }

    impl Populate for Service {
        fn fields() -> Vec<FieldSpec> {
            vec![
                FieldSpec::leaf("port", "PORT", LeafKind::Uint),
                FieldSpec::leaf("host", "HOST", LeafKind::String),
                FieldSpec::leaf("debug", "DEBUG", LeafKind::Bool),
                FieldSpec::group("database", Some("DB")),
                FieldSpec::skip("token", Some("TOKEN"), SkipReason::Unsettable),
            ]
        }

        fn visit(&mut self, walker: &mut Walker) -> Result<(), PopulateError> {
            walker.leaf("port", "PORT", &mut self.port)?;
            walker.leaf("host", "HOST", &mut self.host)?;
            walker.leaf("debug", "DEBUG", &mut self.debug)?;
            walker.group("database", Some("DB"), &mut self.database)?;
            walker.skip("token", Some("TOKEN"), SkipReason::Unsettable)?;
            Ok(())
        }
    }

    const KEYS: &[&str] = &[
        "PORT",
        "HOST",
        "DEBUG",
        "DSN",
        "SIZE",
        "TOKEN",
        "DB_DSN",
        "DB_POOL_SIZE",
        "APP_PORT",
        "APP_DB_DSN",
    ];

    fn clear() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_permissive_keeps_defaults() {
        clear();
        env::set_var("PORT", "8080");

        let mut service = Service {
            host: "localhost".to_string(),
            ..Service::default()
        };
        let summary = Populator::permissive().populate(&mut service).unwrap();

        assert_eq!(service.port, 8080);
        assert_eq!(service.host, "localhost");
        assert_eq!(
            summary,
            Summary {
                set: 1,
                absent: 4,
                skipped: 1
            }
        );
        clear();
    }

    #[test]
    #[serial]
    fn test_strict_stops_at_first_missing_field() {
        clear();
        env::set_var("PORT", "8080");
        env::set_var("DEBUG", "true");

        let mut service = Service::default();
        let err = Populator::strict().populate(&mut service).unwrap_err();

        assert!(matches!(
            &err,
            PopulateError::Missing {
                key,
                field,
                expected: LeafKind::String,
            } if key == "HOST" && field == "host"
        ));
        // written before the failure
        assert_eq!(service.port, 8080);
        // never visited
        assert!(!service.debug);
        clear();
    }

    #[test]
    #[serial]
    fn test_strict_malformed_value_is_missing() {
        clear();
        env::set_var("PORT", "invalid");

        let err = populate(&mut Service::default(), PresencePolicy::Strict).unwrap_err();
        assert_eq!(err.key(), Some("PORT"));
        clear();
    }

    #[test]
    #[serial]
    fn test_strict_rejects_unsettable_field() {
        clear();
        let values = [
            ("PORT", "1"),
            ("HOST", "h"),
            ("DEBUG", "0"),
            ("DSN", "d"),
            ("SIZE", "2"),
        ];
        for (key, value) in values {
            env::set_var(key, value);
        }

        let err = Populator::strict().populate(&mut Service::default()).unwrap_err();
        assert!(matches!(&err, PopulateError::Unsettable { field, .. } if field == "token"));
        assert_eq!(err.key(), Some("TOKEN"));

        let summary = Populator::permissive()
            .populate(&mut Service::default())
            .unwrap();
        assert_eq!(summary.set, 5);
        assert_eq!(summary.skipped, 1);
        clear();
    }

    #[test]
    #[serial]
    fn test_literal_mode_ignores_group_prefix() {
        clear();
        env::set_var("DSN", "postgres://localhost/literal");
        env::set_var("DB_DSN", "postgres://localhost/joined");

        let mut database = Database::default();
        Populator::permissive().populate(&mut database).unwrap();
        assert_eq!(database.dsn, "postgres://localhost/literal");
        clear();
    }

    #[test]
    #[serial]
    fn test_joined_mode_accumulates_prefixes() {
        clear();
        env::set_var("DSN", "postgres://localhost/literal");
        env::set_var("DB_DSN", "postgres://localhost/joined");
        env::set_var("DB_POOL_SIZE", "16");

        let mut service = Service::default();
        Populator::permissive()
            .key_mode(KeyMode::Joined)
            .populate(&mut service)
            .unwrap();

        assert_eq!(service.database.dsn, "postgres://localhost/joined");
        assert_eq!(service.database.pool.size, 16);
        clear();
    }

    #[test]
    #[serial]
    fn test_joined_mode_root_prefix() {
        clear();
        env::set_var("PORT", "1");
        env::set_var("APP_PORT", "2");
        env::set_var("APP_DB_DSN", "sqlite::memory:");

        let mut service = Service::default();
        Populator::permissive()
            .key_mode(KeyMode::Joined)
            .prefix("APP")
            .populate(&mut service)
            .unwrap();
        assert_eq!(service.port, 2);
        assert_eq!(service.database.dsn, "sqlite::memory:");

        // inert in literal mode
        let mut service = Service::default();
        Populator::permissive()
            .prefix("APP")
            .populate(&mut service)
            .unwrap();
        assert_eq!(service.port, 1);
        clear();
    }

    #[test]
    #[serial]
    fn test_nested_error_reports_field_path() {
        clear();
        env::set_var("DSN", "d");
        env::set_var("DB_DSN", "d");

        let err = Populator::strict()
            .key_mode(KeyMode::Joined)
            .populate(&mut Database::default())
            .unwrap_err();
        assert_eq!(err.key(), Some("POOL_SIZE"));
        assert_eq!(err.field(), "pool.size");
        clear();
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clear();
        env::set_var("SIZE", "4");
        assert_eq!(Pool::from_env(PresencePolicy::Strict).unwrap(), Pool { size: 4 });

        env::remove_var("SIZE");
        assert!(Pool::from_env(PresencePolicy::Strict).is_err());
        assert_eq!(Pool::from_env(PresencePolicy::Permissive).unwrap(), Pool::default());
    }
}
