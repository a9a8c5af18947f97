//! Immutable schema graph consumed by the resolver type generator.
//!
//! SDL sources are merged and validated with apollo-compiler, then lowered
//! into closed sum types: every type reference is tagged with the kind of
//! the definition it names, and nullability is an explicit modifier.
//!
//! ```
//! use graphql_hir::SchemaGraph;
//!
//! let graph = SchemaGraph::parse([(
//!     "schema.graphql",
//!     "type Query { users: [User!]! } type User { id: ID! }",
//! )])
//! .unwrap();
//! assert_eq!(graph.objects().len(), 2);
//! ```

mod error;
mod structure;

pub use error::{GraphError, Result, SchemaDiagnostic};
pub use structure::*;

use apollo_compiler::diagnostic::ToCliReport;
use apollo_compiler::parser::Parser;
use apollo_compiler::schema::{ExtendedType, SchemaBuilder};
use apollo_compiler::validation::{DiagnosticList, Valid};
use apollo_compiler::Schema;

/// Every definition of one schema, in declaration order.
///
/// Built once per generation run and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaGraph {
    objects: Vec<ObjectTypeDef>,
    interfaces: Vec<InterfaceTypeDef>,
    unions: Vec<UnionTypeDef>,
    inputs: Vec<InputTypeDef>,
    enums: Vec<EnumTypeDef>,
    roots: RootTypes,
}

impl SchemaGraph {
    /// Merge and validate SDL sources, then lower them into a graph.
    ///
    /// Each source is a `(path, text)` pair; the path only appears in
    /// diagnostics.
    #[tracing::instrument(skip(sources))]
    pub fn parse<I, P, T>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<std::path::Path>,
        T: Into<String>,
    {
        let mut builder = SchemaBuilder::new();
        let mut parser = Parser::new();
        let mut source_count = 0usize;

        for (path, text) in sources {
            tracing::debug!(path = %path.as_ref().display(), "Adding schema source");
            parser.parse_into_schema_builder(text, path, &mut builder);
            source_count += 1;
        }
        tracing::debug!(source_count, "Building schema");

        let schema = builder.build().map_err(|with_errors| {
            tracing::warn!(
                error_count = with_errors.errors.len(),
                "Failed to build schema"
            );
            GraphError::Invalid {
                diagnostics: collect_diagnostics(&with_errors.errors),
            }
        })?;

        let valid = schema.validate().map_err(|with_errors| {
            tracing::warn!(
                error_count = with_errors.errors.len(),
                "Schema validation failed"
            );
            GraphError::Invalid {
                diagnostics: collect_diagnostics(&with_errors.errors),
            }
        })?;

        Self::from_schema(&valid)
    }

    /// Lower a validated schema. Built-in and introspection types are skipped.
    pub fn from_schema(schema: &Valid<Schema>) -> Result<Self> {
        let roots = structure::extract_root_types(schema);
        let mut graph = Self {
            roots,
            ..Self::default()
        };

        for ty in schema.types.values() {
            if ty.is_built_in() {
                continue;
            }
            match ty {
                ExtendedType::Object(obj) => graph
                    .objects
                    .push(structure::extract_object_type(schema, obj, &graph.roots)?),
                ExtendedType::Interface(iface) => graph
                    .interfaces
                    .push(structure::extract_interface_type(schema, iface)?),
                ExtendedType::Union(union_def) => {
                    graph.unions.push(structure::extract_union_type(union_def));
                }
                ExtendedType::Enum(enum_def) => {
                    graph.enums.push(structure::extract_enum_type(enum_def));
                }
                ExtendedType::InputObject(input) => graph
                    .inputs
                    .push(structure::extract_input_object_type(schema, input)?),
                // Custom scalars are referenced by name only
                ExtendedType::Scalar(_) => {}
            }
        }

        tracing::debug!(
            objects = graph.objects.len(),
            interfaces = graph.interfaces.len(),
            unions = graph.unions.len(),
            inputs = graph.inputs.len(),
            enums = graph.enums.len(),
            "Schema graph built"
        );
        Ok(graph)
    }

    #[must_use]
    pub fn objects(&self) -> &[ObjectTypeDef] {
        &self.objects
    }

    #[must_use]
    pub fn interfaces(&self) -> &[InterfaceTypeDef] {
        &self.interfaces
    }

    #[must_use]
    pub fn unions(&self) -> &[UnionTypeDef] {
        &self.unions
    }

    #[must_use]
    pub fn inputs(&self) -> &[InputTypeDef] {
        &self.inputs
    }

    #[must_use]
    pub fn enums(&self) -> &[EnumTypeDef] {
        &self.enums
    }

    #[must_use]
    pub const fn roots(&self) -> &RootTypes {
        &self.roots
    }

    #[must_use]
    pub fn object(&self, name: &str) -> Option<&ObjectTypeDef> {
        self.objects.iter().find(|o| o.name.as_ref() == name)
    }

    #[must_use]
    pub fn interface(&self, name: &str) -> Option<&InterfaceTypeDef> {
        self.interfaces.iter().find(|i| i.name.as_ref() == name)
    }

    #[must_use]
    pub fn union(&self, name: &str) -> Option<&UnionTypeDef> {
        self.unions.iter().find(|u| u.name.as_ref() == name)
    }

    #[must_use]
    pub fn input(&self, name: &str) -> Option<&InputTypeDef> {
        self.inputs.iter().find(|i| i.name.as_ref() == name)
    }

    #[must_use]
    pub fn enumeration(&self, name: &str) -> Option<&EnumTypeDef> {
        self.enums.iter().find(|e| e.name.as_ref() == name)
    }

    /// Names of every object, interface and union, the types that get a
    /// resolver declaration group.
    pub fn resolvable_type_names(&self) -> impl Iterator<Item = &str> {
        self.objects
            .iter()
            .map(|o| o.name.as_ref())
            .chain(self.interfaces.iter().map(|i| i.name.as_ref()))
            .chain(self.unions.iter().map(|u| u.name.as_ref()))
    }
}

fn collect_diagnostics(errors: &DiagnosticList) -> Vec<SchemaDiagnostic> {
    errors
        .iter()
        .map(|apollo_diag| {
            let path = apollo_diag.error.location().and_then(|location| {
                apollo_diag
                    .sources
                    .get(&location.file_id())
                    .map(|source_file| source_file.path().to_string_lossy().to_string())
            });
            let line_column = apollo_diag
                .line_column_range()
                .map(|range| (range.start.line, range.start.column));
            SchemaDiagnostic {
                path,
                line_column,
                message: apollo_diag.error.to_string(),
            }
        })
        .collect()
}
