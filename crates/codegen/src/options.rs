use crate::decl::TsType;
use std::collections::BTreeMap;

/// Schema type name to backing model name.
///
/// Lookups never fail; callers choose the marker used for a missing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelBinding {
    models: BTreeMap<String, String>,
}

impl ModelBinding {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, type_name: impl Into<String>, model: impl Into<String>) -> Self {
        self.insert(type_name, model);
        self
    }

    pub fn insert(&mut self, type_name: impl Into<String>, model: impl Into<String>) {
        self.models.insert(type_name.into(), model.into());
    }

    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&str> {
        self.models.get(type_name).map(String::as_str)
    }

    /// The bound model as a type reference, or `fallback` when unbound.
    #[must_use]
    pub fn model_or(&self, type_name: &str, fallback: TsType) -> TsType {
        self.get(type_name).map_or(fallback, TsType::named)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.models.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ModelBinding {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            models: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Everything a generation run needs besides the schema graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub models: ModelBinding,
    /// Module the bound model names are imported from
    pub models_module: Option<String>,
    /// Context type used verbatim in every resolver signature
    pub context_type: Option<String>,
    pub context_module: Option<String>,
    pub default_resolvers: bool,
    /// Custom scalar name to TypeScript type
    pub scalars: BTreeMap<String, String>,
    /// Run the output through the TypeScript formatter
    pub format: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            models: ModelBinding::default(),
            models_module: None,
            context_type: None,
            context_module: None,
            default_resolvers: false,
            scalars: BTreeMap::new(),
            format: true,
        }
    }
}

impl GenerateOptions {
    #[must_use]
    pub fn context(&self) -> TsType {
        self.context_type
            .as_deref()
            .map_or_else(TsType::any, TsType::named)
    }

    /// The TypeScript spelling of a scalar, built-ins first.
    #[must_use]
    pub fn scalar(&self, name: &str) -> TsType {
        match name {
            "ID" | "String" => TsType::string(),
            "Int" | "Float" => TsType::number(),
            "Boolean" => TsType::boolean(),
            custom => self
                .scalars
                .get(custom)
                .map_or_else(TsType::any, TsType::named),
        }
    }
}
