//! One declaration group per object, interface and union.

use crate::context::CodegenContext;
use crate::contract::{field_contract, is_type_of_member, resolve_type_member, Owner};
use crate::decl::{Decl, DeclGroup, Member, TsType, CONTRACT_TYPE};
use crate::error::{CodegenError, Result};
use crate::type_ref::{resolve_type_ref, Position};
use graphql_hir::{InputTypeDef, InterfaceTypeDef, ObjectTypeDef, UnionTypeDef};

/// Declaration group for an object type.
///
/// Order within the group: default resolvers, inputs used by arguments,
/// argument records, per-field aliases, then the `Type` contract.
pub fn emit_object_group(cx: &CodegenContext<'_>, object: &ObjectTypeDef) -> Result<DeclGroup> {
    let mut decls = Vec::new();

    if cx.options.default_resolvers {
        decls.extend(default_resolvers(cx, object));
    }

    for name in cx.index.inputs_for(&object.name) {
        let input = cx.index.input(name).ok_or_else(|| CodegenError::MissingInput {
            name: name.to_string(),
            owner: object.name.to_string(),
        })?;
        decls.push(input_decl(cx, input));
    }

    let contracts: Vec<_> = object
        .fields
        .iter()
        .map(|field| field_contract(cx, Owner::Object(object), field))
        .collect();

    decls.extend(contracts.iter().filter_map(|c| c.args_record.clone()));
    decls.extend(contracts.iter().map(|c| c.alias.clone()));

    let mut members: Vec<Member> = object
        .fields
        .iter()
        .zip(&contracts)
        .map(|(field, contract)| {
            Member::required(field.name.as_ref(), TsType::named(contract.alias_name()))
        })
        .collect();
    members.extend(is_type_of_member(cx, object));
    decls.push(Decl::Interface {
        name: CONTRACT_TYPE.to_string(),
        members,
    });

    tracing::trace!(object = %object.name, decls = decls.len(), "Emitted object group");
    Ok(DeclGroup {
        type_name: object.name.to_string(),
        decls,
    })
}

/// Declaration group for an interface: argument records and a mandatory
/// `__resolveType`.
#[must_use]
pub fn emit_interface_group(cx: &CodegenContext<'_>, iface: &InterfaceTypeDef) -> DeclGroup {
    let mut decls: Vec<Decl> = iface
        .fields
        .iter()
        .filter_map(|field| field_contract(cx, Owner::Interface(iface), field).args_record)
        .collect();
    decls.push(Decl::Interface {
        name: CONTRACT_TYPE.to_string(),
        members: vec![resolve_type_member(cx, &iface.name, false)],
    });

    DeclGroup {
        type_name: iface.name.to_string(),
        decls,
    }
}

/// Declaration group for a union: an optional `__resolveType` only.
#[must_use]
pub fn emit_union_group(cx: &CodegenContext<'_>, union_def: &UnionTypeDef) -> DeclGroup {
    DeclGroup {
        type_name: union_def.name.to_string(),
        decls: vec![Decl::Interface {
            name: CONTRACT_TYPE.to_string(),
            members: vec![resolve_type_member(cx, &union_def.name, true)],
        }],
    }
}

/// An input object as an interface, fields in argument position.
#[must_use]
pub fn input_decl(cx: &CodegenContext<'_>, input: &InputTypeDef) -> Decl {
    Decl::Interface {
        name: input.name.to_string(),
        members: input
            .fields
            .iter()
            .map(|field| {
                Member::required(
                    field.name.as_ref(),
                    resolve_type_ref(&field.type_ref, cx.options, Position::Argument),
                )
            })
            .collect(),
    }
}

/// Pass-through resolvers for zero-argument fields of a bound, non-root
/// object.
fn default_resolvers(cx: &CodegenContext<'_>, object: &ObjectTypeDef) -> Option<Decl> {
    if cx.graph.roots().contains(&object.name) {
        return None;
    }
    let model = cx.options.models.get(&object.name)?;
    let fields: Vec<String> = object
        .fields
        .iter()
        .filter(|field| field.arguments.is_empty())
        .map(|field| field.name.to_string())
        .collect();
    if fields.is_empty() {
        return None;
    }
    Some(Decl::DefaultResolvers {
        parent: TsType::named(model),
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{GenerateOptions, ModelBinding};
    use graphql_hir::SchemaGraph;

    const SCHEMA: &str = r"
type Query { users(where: UserWhere): [User!]! }
type User { id: ID!, name: String, posts(limit: Int, filter: PostFilter): [Post!]! }
type Post { id: ID! }
input UserWhere { name: String, address: Address }
input Address { city: String! }
input PostFilter { title: String }
";

    fn names(group: &DeclGroup) -> Vec<&str> {
        group.decls.iter().map(Decl::name).collect()
    }

    #[test]
    fn test_object_group_order() {
        let graph = SchemaGraph::parse([("schema.graphql", SCHEMA)]).unwrap();
        let options = GenerateOptions {
            models: ModelBinding::new().with("User", "UserModel"),
            default_resolvers: true,
            ..GenerateOptions::default()
        };
        let cx = CodegenContext::new(&graph, &options);

        let group = emit_object_group(&cx, graph.object("User").unwrap()).unwrap();
        assert_eq!(group.namespace(), "UserResolvers");
        assert_eq!(
            names(&group),
            [
                "defaultResolvers",
                "PostFilter",
                "ArgsPosts",
                "IdResolver",
                "NameResolver",
                "PostsResolver",
                "Type"
            ]
        );
        assert_eq!(
            group.get("defaultResolvers"),
            Some(&Decl::DefaultResolvers {
                parent: TsType::named("UserModel"),
                fields: vec!["id".to_string(), "name".to_string()],
            })
        );
    }

    #[test]
    fn test_root_and_unbound_objects_get_no_default_resolvers() {
        let graph = SchemaGraph::parse([("schema.graphql", SCHEMA)]).unwrap();
        let options = GenerateOptions {
            models: ModelBinding::new().with("Query", "Root"),
            default_resolvers: true,
            ..GenerateOptions::default()
        };
        let cx = CodegenContext::new(&graph, &options);

        let query = emit_object_group(&cx, graph.object("Query").unwrap()).unwrap();
        assert!(query.get("defaultResolvers").is_none());
        let post = emit_object_group(&cx, graph.object("Post").unwrap()).unwrap();
        assert!(post.get("defaultResolvers").is_none());
    }

    #[test]
    fn test_inputs_are_scoped_to_their_object() {
        let graph = SchemaGraph::parse([("schema.graphql", SCHEMA)]).unwrap();
        let options = GenerateOptions::default();
        let cx = CodegenContext::new(&graph, &options);

        let query = emit_object_group(&cx, graph.object("Query").unwrap()).unwrap();
        assert!(query.get("UserWhere").is_some());
        assert!(query.get("Address").is_none());
        assert!(query.get("PostFilter").is_none());

        assert_eq!(
            query.get("UserWhere"),
            Some(&Decl::Interface {
                name: "UserWhere".to_string(),
                members: vec![
                    Member::required(
                        "name",
                        TsType::union([TsType::string(), TsType::undefined()])
                    ),
                    Member::required(
                        "address",
                        TsType::union([TsType::named("Address"), TsType::undefined()])
                    ),
                ],
            })
        );
    }

    #[test]
    fn test_contract_members_reference_aliases() {
        let graph = SchemaGraph::parse([("schema.graphql", SCHEMA)]).unwrap();
        let options = GenerateOptions::default();
        let cx = CodegenContext::new(&graph, &options);

        let group = emit_object_group(&cx, graph.object("Post").unwrap()).unwrap();
        assert_eq!(
            group.contract_members(),
            [Member::required("id", TsType::named("IdResolver"))]
        );
    }

    #[test]
    fn test_abstract_groups() {
        let graph = SchemaGraph::parse([(
            "schema.graphql",
            r"
type Query { node(id: ID!): Node, search: [SearchResult!]! }
interface Node { id: ID!, related(first: Int): [Node!]! }
type User implements Node { id: ID!, related(first: Int): [Node!]! }
union SearchResult = User
",
        )])
        .unwrap();
        let options = GenerateOptions::default();
        let cx = CodegenContext::new(&graph, &options);

        let node = emit_interface_group(&cx, graph.interface("Node").unwrap());
        assert_eq!(names(&node), ["ArgsRelated", "Type"]);
        let [resolve_type] = node.contract_members() else {
            panic!("interface contract must hold exactly __resolveType");
        };
        assert_eq!(resolve_type.name, "__resolveType");
        assert!(!resolve_type.optional);

        let search = emit_union_group(&cx, graph.union("SearchResult").unwrap());
        assert_eq!(names(&search), ["Type"]);
        assert!(search.contract_members()[0].optional);

        let user = emit_object_group(&cx, graph.object("User").unwrap()).unwrap();
        let is_type_of = user.contract_members().last().unwrap();
        assert_eq!(is_type_of.name, "__isTypeOf");
        assert!(is_type_of.optional);
    }
}
