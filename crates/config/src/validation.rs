use crate::ResolversConfig;
use std::fmt;

/// A mismatch between the `models` map and the schema.
///
/// Never fatal: generation goes on and the affected values are typed with
/// a fallback marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingWarning {
    /// A `models` entry naming no object, interface or union
    UnknownType {
        type_name: String,
        suggestion: Option<String>,
    },
    /// A non-root object, interface or union without a `models` entry
    Unbound { type_name: String },
}

impl BindingWarning {
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::UnknownType { type_name, .. } | Self::Unbound { type_name } => type_name,
        }
    }
}

impl fmt::Display for BindingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType {
                type_name,
                suggestion,
            } => {
                write!(
                    f,
                    "models entry '{type_name}' does not name an object, interface or union type"
                )?;
                match suggestion {
                    Some(suggestion) => write!(f, " (did you mean '{suggestion}'?)"),
                    None => Ok(()),
                }
            }
            Self::Unbound { type_name } => write!(
                f,
                "type '{type_name}' has no models entry; its values are typed as unknown"
            ),
        }
    }
}

/// Check the `models` map against the schema's resolvable type names, in
/// both directions.
///
/// Entries naming no schema type come first, in `models` order. Schema
/// types without an entry follow in schema order; types for which
/// `is_root` holds are exempt since they never need a model.
#[must_use]
pub fn binding_warnings<'a>(
    resolvers: &ResolversConfig,
    type_names: impl IntoIterator<Item = &'a str>,
    is_root: impl Fn(&str) -> bool,
) -> Vec<BindingWarning> {
    let type_names: Vec<&str> = type_names.into_iter().collect();

    let unknown = resolvers
        .models
        .keys()
        .filter(|bound| !type_names.contains(&bound.as_str()))
        .map(|bound| BindingWarning::UnknownType {
            type_name: bound.clone(),
            suggestion: closest_match(bound, &type_names).map(str::to_string),
        });

    let unbound = type_names
        .iter()
        .filter(|&&name| !is_root(name) && !resolvers.models.contains_key(name))
        .map(|name| BindingWarning::Unbound {
            type_name: (*name).to_string(),
        });

    unknown
        .chain(unbound)
        .inspect(|warning| tracing::warn!(%warning, "Model binding mismatch"))
        .collect()
}

/// The closest candidate by edit distance, if it is close enough to be a
/// plausible typo.
fn closest_match<'a>(name: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let max_distance = (name.chars().count() / 3).max(2);
    candidates
        .iter()
        .map(|candidate| (strsim::levenshtein(name, candidate), *candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .min()
        .map(|(_, candidate)| candidate)
}
