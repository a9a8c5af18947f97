//! Lookup structures derived once from the schema graph.
//!
//! Each index is a separate fold over the graph producing an immutable map.

use graphql_hir::{FieldDef, InputTypeDef, NamedType, ObjectTypeDef, SchemaGraph};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaIndex<'g> {
    inputs: BTreeMap<&'g str, &'g InputTypeDef>,
    type_inputs: BTreeMap<&'g str, BTreeSet<&'g str>>,
    implementors: BTreeMap<&'g str, Vec<&'g ObjectTypeDef>>,
    members: BTreeMap<&'g str, Vec<&'g ObjectTypeDef>>,
}

impl<'g> SchemaIndex<'g> {
    #[tracing::instrument(skip_all)]
    pub fn build(graph: &'g SchemaGraph) -> Self {
        let index = Self {
            inputs: input_registry(graph),
            type_inputs: type_input_association(graph),
            implementors: interface_implementors(graph),
            members: union_members(graph),
        };
        tracing::debug!(
            inputs = index.inputs.len(),
            associated_types = index.type_inputs.len(),
            "Schema index built"
        );
        index
    }

    #[must_use]
    pub fn input(&self, name: &str) -> Option<&'g InputTypeDef> {
        self.inputs.get(name).copied()
    }

    /// Every registered input, ordered by name.
    pub fn inputs(&self) -> impl Iterator<Item = &'g InputTypeDef> + '_ {
        self.inputs.values().copied()
    }

    /// Inputs referenced directly by the arguments of `type_name`'s fields,
    /// ordered by name.
    pub fn inputs_for(&self, type_name: &str) -> impl Iterator<Item = &'g str> + '_ {
        self.type_inputs
            .get(type_name)
            .into_iter()
            .flat_map(|names| names.iter().copied())
    }

    /// Objects implementing `interface`, in declaration order.
    #[must_use]
    pub fn implementors(&self, interface: &str) -> &[&'g ObjectTypeDef] {
        self.implementors.get(interface).map_or(&[], Vec::as_slice)
    }

    /// Objects belonging to `union`, in member-list order.
    #[must_use]
    pub fn members(&self, union: &str) -> &[&'g ObjectTypeDef] {
        self.members.get(union).map_or(&[], Vec::as_slice)
    }

    /// Implementors of an interface or members of a union.
    #[must_use]
    pub fn possible_types(&self, abstract_type: &str) -> &[&'g ObjectTypeDef] {
        self.implementors
            .get(abstract_type)
            .or_else(|| self.members.get(abstract_type))
            .map_or(&[], Vec::as_slice)
    }

    /// Interfaces and unions containing `object`, interfaces first.
    pub fn containing_abstract_types<'a>(
        &'a self,
        object: &'a str,
    ) -> impl Iterator<Item = &'g str> + 'a {
        let contains = move |possible: &Vec<&'g ObjectTypeDef>| {
            possible.iter().any(|o| o.name.as_ref() == object)
        };
        self.implementors
            .iter()
            .chain(&self.members)
            .filter(move |(_, possible)| contains(possible))
            .map(|(name, _)| *name)
    }
}

fn argument_inputs(field: &FieldDef) -> impl Iterator<Item = &str> {
    field
        .arguments
        .iter()
        .filter_map(|arg| match arg.type_ref.named() {
            NamedType::Input(name) => Some(name.as_ref()),
            _ => None,
        })
}

fn input_field_inputs(input: &InputTypeDef) -> impl Iterator<Item = &str> {
    input
        .fields
        .iter()
        .filter_map(|field| match field.type_ref.named() {
            NamedType::Input(name) => Some(name.as_ref()),
            _ => None,
        })
}

/// Inputs reachable from any field argument, following nested input fields.
fn input_registry(graph: &SchemaGraph) -> BTreeMap<&str, &InputTypeDef> {
    let roots: Vec<&str> = graph
        .objects()
        .iter()
        .flat_map(|o| &o.fields)
        .chain(graph.interfaces().iter().flat_map(|i| &i.fields))
        .flat_map(argument_inputs)
        .collect();

    let mut registry = BTreeMap::new();
    let mut pending = roots;
    while let Some(name) = pending.pop() {
        if registry.contains_key(name) {
            continue;
        }
        match graph.input(name) {
            Some(def) => {
                pending.extend(input_field_inputs(def));
                registry.insert(def.name.as_ref(), def);
            }
            None => tracing::warn!(input = name, "Input type is referenced but not defined"),
        }
    }
    registry
}

fn type_input_association(graph: &SchemaGraph) -> BTreeMap<&str, BTreeSet<&str>> {
    graph
        .objects()
        .iter()
        .fold(BTreeMap::new(), |mut acc, object| {
            let used: BTreeSet<&str> = object.fields.iter().flat_map(argument_inputs).collect();
            if !used.is_empty() {
                acc.insert(object.name.as_ref(), used);
            }
            acc
        })
}

fn interface_implementors(graph: &SchemaGraph) -> BTreeMap<&str, Vec<&ObjectTypeDef>> {
    let declared = graph
        .interfaces()
        .iter()
        .map(|iface| (iface.name.as_ref(), Vec::new()))
        .collect::<BTreeMap<_, _>>();

    graph.objects().iter().fold(declared, |mut acc, object| {
        for interface in &object.implements {
            if let Some(implementors) = acc.get_mut(interface.as_ref()) {
                implementors.push(object);
            }
        }
        acc
    })
}

fn union_members(graph: &SchemaGraph) -> BTreeMap<&str, Vec<&ObjectTypeDef>> {
    graph
        .unions()
        .iter()
        .map(|union_def| {
            let members = union_def
                .members
                .iter()
                .filter_map(|member| {
                    let object = graph.object(member);
                    if object.is_none() {
                        tracing::warn!(
                            union = %union_def.name,
                            member = %member,
                            "Union member is not an object type"
                        );
                    }
                    object
                })
                .collect();
            (union_def.name.as_ref(), members)
        })
        .collect()
}
