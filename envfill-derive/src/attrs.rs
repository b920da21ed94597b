//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates the annotations on struct fields during
//! macro expansion.

use syn::{Field, Lit};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Environment variable the field is bound to.
    ///
    /// An empty name counts as no annotation.
    pub name: Option<String>,

    /// Group marker:
    /// - `None`: not a group
    /// - `Some(None)`: `#[env(group)]`
    /// - `Some(Some(prefix))`: `#[env(group = "PREFIX")]`
    pub group: Option<Option<String>>,

    /// `#[env(skip)]`
    pub skip: bool,
}

impl FieldAttrs {
    /// Extract and validate the `#[env(...)]` attributes of a struct field.
    ///
    /// Attributes under other paths are left to other macros. Unknown keys
    /// inside `#[env(...)]` and contradictory combinations are errors.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    let value = meta.value()?;
                    match value.parse::<Lit>()? {
                        Lit::Str(s) => {
                            attrs.name = Some(s.value()).filter(|n| !n.is_empty());
                        }
                        lit => {
                            return Err(syn::Error::new_spanned(lit, "expected a string literal"));
                        }
                    }
                    return Ok(());
                }

                // group or group = "..."
                if meta.path.is_ident("group") {
                    if meta.input.peek(syn::Token![=]) {
                        let value = meta.value()?;
                        match value.parse::<Lit>()? {
                            Lit::Str(s) => {
                                attrs.group = Some(Some(s.value()).filter(|p| !p.is_empty()));
                            }
                            lit => {
                                return Err(syn::Error::new_spanned(
                                    lit,
                                    "expected a string literal",
                                ));
                            }
                        }
                    } else {
                        attrs.group = Some(None);
                    }
                    return Ok(());
                }

                // skip
                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        attrs.validate(field)?;
        Ok(attrs)
    }

    fn validate(&self, field: &Field) -> syn::Result<()> {
        let message = match (self.skip, self.name.is_some(), self.group.is_some()) {
            (true, true, _) | (true, _, true) => {
                "`skip` cannot be combined with other env attributes"
            }
            (false, true, true) => {
                "a field is either a `group` or bound to a variable with `name`, not both"
            }
            _ => return Ok(()),
        };
        match &field.ident {
            Some(ident) => Err(syn::Error::new_spanned(ident, message)),
            None => Err(syn::Error::new_spanned(field, message)),
        }
    }
}
