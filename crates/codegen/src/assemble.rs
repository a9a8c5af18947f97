//! Whole-file assembly: header, enums, shared inputs, groups, aggregate.

use crate::context::CodegenContext;
use crate::contract::INFO_TYPE;
use crate::decl::{namespace_name, Decl, DeclGroup, Member, TsType, CONTRACT_TYPE};
use crate::emit::{emit_interface_group, emit_object_group, emit_union_group, input_decl};
use crate::error::{CodegenError, Result};
use crate::render::{write_decl, write_group};
use graphql_hir::NamedType;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

pub const BANNER: &str = "// Code generated by graphql-codegen. DO NOT EDIT.";

/// Name of the final aggregate interface.
pub const AGGREGATE_TYPE: &str = "Resolvers";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub names: Vec<String>,
    pub module: String,
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "import {{ {} }} from \"{}\";",
            self.names.join(", "),
            self.module
        )
    }
}

/// The complete generated file as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub imports: Vec<Import>,
    pub enums: Vec<Decl>,
    /// Inputs referenced from input fields or interface arguments, declared
    /// at module level so nested references resolve
    pub shared_inputs: Vec<Decl>,
    /// Objects, then interfaces, then unions
    pub groups: Vec<DeclGroup>,
    pub aggregate: Decl,
}

impl Document {
    #[must_use]
    pub fn group(&self, type_name: &str) -> Option<&DeclGroup> {
        self.groups.iter().find(|g| g.type_name == type_name)
    }

    /// Entries of the final `Resolvers` interface.
    #[must_use]
    pub fn aggregate_members(&self) -> &[Member] {
        match &self.aggregate {
            Decl::Interface { members, .. } => members,
            _ => &[],
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BANNER}")?;
        for import in &self.imports {
            writeln!(f, "{import}")?;
        }
        for decl in self.enums.iter().chain(&self.shared_inputs) {
            writeln!(f)?;
            write_decl(f, decl, 0)?;
        }
        for group in &self.groups {
            writeln!(f)?;
            write_group(f, group)?;
        }
        writeln!(f)?;
        write_decl(f, &self.aggregate, 0)
    }
}

/// Build every part of the output file.
#[tracing::instrument(skip_all)]
pub fn assemble(cx: &CodegenContext<'_>) -> Result<Document> {
    let graph = cx.graph;

    let mut groups = graph
        .objects()
        .iter()
        .map(|object| emit_object_group(cx, object))
        .collect::<Result<Vec<_>>>()?;
    groups.extend(
        graph
            .interfaces()
            .iter()
            .map(|iface| emit_interface_group(cx, iface)),
    );
    groups.extend(
        graph
            .unions()
            .iter()
            .map(|union_def| emit_union_group(cx, union_def)),
    );

    let document = Document {
        imports: imports(cx),
        enums: enum_decls(cx),
        shared_inputs: shared_inputs(cx),
        aggregate: aggregate(cx),
        groups,
    };
    check_collisions(&document)?;
    tracing::debug!(
        groups = document.groups.len(),
        enums = document.enums.len(),
        shared_inputs = document.shared_inputs.len(),
        "Document assembled"
    );
    Ok(document)
}

/// Generated names derive from schema names, so distinct schema names can
/// still meet: fields `id` and `Id` both produce `IdResolver`, and an input
/// named `Type` lands next to the group contract.
fn check_collisions(document: &Document) -> Result<()> {
    for group in &document.groups {
        if let Some(name) = first_duplicate(group.decls.iter().map(Decl::name)) {
            return Err(CodegenError::NameCollision {
                scope: format!("namespace `{}`", group.namespace()),
                name: name.to_string(),
            });
        }
    }

    let namespaces: Vec<String> = document.groups.iter().map(DeclGroup::namespace).collect();
    let module_names = document
        .imports
        .iter()
        .flat_map(|import| &import.names)
        .map(String::as_str)
        .chain(
            document
                .enums
                .iter()
                .chain(&document.shared_inputs)
                .map(Decl::name),
        )
        .chain(namespaces.iter().map(String::as_str))
        .chain([document.aggregate.name()]);
    match first_duplicate(module_names) {
        Some(name) => Err(CodegenError::NameCollision {
            scope: "the module scope".to_string(),
            name: name.to_string(),
        }),
        None => Ok(()),
    }
}

fn first_duplicate<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.into_iter().find(|name| !seen.insert(*name))
}

fn imports(cx: &CodegenContext<'_>) -> Vec<Import> {
    let options = cx.options;
    let mut imports = vec![Import {
        names: vec![INFO_TYPE.to_string()],
        module: "graphql".to_string(),
    }];

    if let Some(module) = &options.models_module {
        let names: BTreeSet<&str> = options.models.iter().map(|(_, model)| model).collect();
        if !names.is_empty() {
            imports.push(Import {
                names: names.into_iter().map(str::to_string).collect(),
                module: module.clone(),
            });
        }
    }

    if let (Some(context), Some(module)) = (&options.context_type, &options.context_module) {
        imports.push(Import {
            names: vec![context.clone()],
            module: module.clone(),
        });
    }
    imports
}

fn enum_decls(cx: &CodegenContext<'_>) -> Vec<Decl> {
    cx.graph
        .enums()
        .iter()
        .map(|enum_def| Decl::TypeAlias {
            name: enum_def.name.to_string(),
            ty: TsType::union(
                enum_def
                    .values
                    .iter()
                    .map(|value| TsType::literal(value.as_ref())),
            ),
        })
        .collect()
}

/// Registered inputs that an object group cannot scope: those nested in
/// other inputs and those used by interface arguments.
fn shared_inputs(cx: &CodegenContext<'_>) -> Vec<Decl> {
    let nested = cx
        .index
        .inputs()
        .flat_map(|input| &input.fields)
        .map(|field| field.type_ref.named());
    let interface_args = cx
        .graph
        .interfaces()
        .iter()
        .flat_map(|iface| &iface.fields)
        .flat_map(|field| &field.arguments)
        .map(|arg| arg.type_ref.named());

    nested
        .chain(interface_args)
        .filter_map(|named| match named {
            NamedType::Input(name) => Some(name.as_ref()),
            _ => None,
        })
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .filter_map(|name| cx.index.input(name))
        .map(|input| input_decl(cx, input))
        .collect()
}

/// `Resolvers`: objects required, interfaces and unions optional.
fn aggregate(cx: &CodegenContext<'_>) -> Decl {
    let graph = cx.graph;
    let contract = |type_name: &str| {
        TsType::named(format!("{}.{CONTRACT_TYPE}", namespace_name(type_name)))
    };

    let objects = graph
        .objects()
        .iter()
        .map(|object| Member::required(object.name.as_ref(), contract(&object.name)));
    let abstracts = graph
        .interfaces()
        .iter()
        .map(|iface| iface.name.as_ref())
        .chain(graph.unions().iter().map(|u| u.name.as_ref()))
        .map(|name| Member::optional(name, contract(name)));

    Decl::Interface {
        name: AGGREGATE_TYPE.to_string(),
        members: objects.chain(abstracts).collect(),
    }
}
