//! TypeScript resolver type generation for GraphQL schemas.
//!
//! A [`SchemaGraph`] is indexed once, every object, interface and union is
//! turned into a [`DeclGroup`] describing the resolvers it needs, and the
//! resulting [`Document`] is rendered and optionally formatted.
//!
//! ```
//! use graphql_codegen::{generate, GenerateOptions, ModelBinding};
//! use graphql_hir::SchemaGraph;
//!
//! let graph = SchemaGraph::parse([(
//!     "schema.graphql",
//!     "type Query { me: User } type User { id: ID! }",
//! )])
//! .unwrap();
//! let options = GenerateOptions {
//!     models: ModelBinding::new().with("User", "UserModel"),
//!     format: false,
//!     ..GenerateOptions::default()
//! };
//! let output = generate(&graph, &options).unwrap();
//! assert!(output.code.contains("export namespace UserResolvers {"));
//! ```

pub mod assemble;
pub mod context;
pub mod contract;
pub mod decl;
pub mod emit;
mod error;
pub mod format;
pub mod index;
pub mod options;
pub mod render;
pub mod type_ref;

pub use assemble::{assemble, Document};
pub use context::CodegenContext;
pub use decl::{Decl, DeclGroup, Member, TsType};
pub use error::{CodegenError, Result};
pub use format::{format_typescript, FormatDiagnostic, GeneratedOutput};
pub use options::{GenerateOptions, ModelBinding};

use graphql_hir::SchemaGraph;

/// Assemble the document for `graph` without rendering it.
pub fn build_document(graph: &SchemaGraph, options: &GenerateOptions) -> Result<Document> {
    let cx = CodegenContext::new(graph, options);
    assemble(&cx)
}

/// Generate the resolver declarations for `graph` as TypeScript text.
///
/// Formatting failures never fail generation; they come back as
/// diagnostics next to the unformatted text.
#[tracing::instrument(skip_all, fields(format = options.format))]
pub fn generate(graph: &SchemaGraph, options: &GenerateOptions) -> Result<GeneratedOutput> {
    let text = build_document(graph, options)?.to_string();
    tracing::debug!(bytes = text.len(), "Rendered resolver declarations");

    if options.format {
        Ok(format_typescript(&text))
    } else {
        Ok(GeneratedOutput::unformatted(text))
    }
}
