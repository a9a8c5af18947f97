use crate::index::SchemaIndex;
use crate::options::GenerateOptions;
use graphql_hir::SchemaGraph;

/// Read-only inputs shared by every resolver and emitter of one run.
#[derive(Debug, Clone)]
pub struct CodegenContext<'g> {
    pub graph: &'g SchemaGraph,
    pub index: SchemaIndex<'g>,
    pub options: &'g GenerateOptions,
}

impl<'g> CodegenContext<'g> {
    #[must_use]
    pub fn new(graph: &'g SchemaGraph, options: &'g GenerateOptions) -> Self {
        Self {
            graph,
            index: SchemaIndex::build(graph),
            options,
        }
    }
}
