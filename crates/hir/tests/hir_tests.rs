//! Integration tests for graphql-hir.
//!
//! These tests verify that SDL is lowered into the schema graph with
//! tagged type references and explicit nullability.

use graphql_hir::{GraphError, NamedType, SchemaGraph, TypeRef};
use std::sync::Arc;

fn parse(sdl: &str) -> SchemaGraph {
    SchemaGraph::parse([("schema.graphql", sdl)]).unwrap()
}

fn named(kind: fn(Arc<str>) -> NamedType, name: &str) -> TypeRef {
    TypeRef::Named(kind(Arc::from(name)))
}

#[test]
fn test_non_null_scalar_has_no_modifier() {
    let graph = parse("type Query { user: User } type User { id: ID! }");
    let user = graph.object("User").unwrap();
    assert_eq!(user.fields.len(), 1);
    assert_eq!(user.fields[0].name.as_ref(), "id");
    assert_eq!(user.fields[0].type_ref, named(NamedType::Scalar, "ID"));
}

#[test]
fn test_list_of_non_null_objects() {
    let graph = parse("type Query { posts: [Post!] } type Post { id: ID! }");
    let query = graph.object("Query").unwrap();
    assert_eq!(
        query.fields[0].type_ref,
        named(NamedType::Object, "Post").list().nullable()
    );
    assert_eq!(query.fields[0].type_ref.to_string(), "[Post!]");
}

#[test]
fn test_arguments_are_tagged() {
    let graph = parse(
        r"
type Query { search(filter: SearchFilter!, first: Int, order: Order): [Result!]! }
input SearchFilter { text: String }
enum Order { ASC DESC }
union Result = Query
",
    );
    let search = &graph.object("Query").unwrap().fields[0];
    assert_eq!(search.arguments.len(), 3);
    assert_eq!(
        search.arguments[0].type_ref,
        named(NamedType::Input, "SearchFilter")
    );
    assert_eq!(
        search.arguments[1].type_ref,
        named(NamedType::Scalar, "Int").nullable()
    );
    assert_eq!(
        search.arguments[2].type_ref,
        named(NamedType::Enum, "Order").nullable()
    );
    assert_eq!(
        search.type_ref,
        named(NamedType::Union, "Result").list()
    );
}

#[test]
fn test_default_subscription_root_is_flagged() {
    let graph = parse(
        r"
type Query { ok: Boolean }
type Subscription { postAdded: Post! }
type Post { id: ID! }
",
    );
    assert!(graph.object("Subscription").unwrap().is_subscription);
    assert!(!graph.object("Query").unwrap().is_subscription);
    assert!(!graph.object("Post").unwrap().is_subscription);
    assert_eq!(graph.roots().subscription.as_deref(), Some("Subscription"));
}

#[test]
fn test_explicit_subscription_root_is_flagged() {
    let graph = parse(
        r"
schema { query: Root subscription: Events }
type Root { ok: Boolean }
type Events { tick: Int! }
",
    );
    assert!(graph.object("Events").unwrap().is_subscription);
    assert!(graph.roots().contains("Root"));
}

#[test]
fn test_interfaces_and_unions() {
    let graph = parse(
        r"
type Query { node(id: ID!): Node }
interface Node { id: ID! }
type User implements Node { id: ID! }
type Post implements Node { id: ID! }
union SearchResult = User | Post
",
    );
    assert_eq!(graph.interfaces().len(), 1);
    let user = graph.object("User").unwrap();
    assert_eq!(user.implements, vec![Arc::<str>::from("Node")]);

    let union_def = graph.union("SearchResult").unwrap();
    let members: Vec<&str> = union_def.members.iter().map(AsRef::as_ref).collect();
    assert_eq!(members, ["User", "Post"]);

    let names: Vec<&str> = graph.resolvable_type_names().collect();
    assert_eq!(names, ["Query", "User", "Post", "Node", "SearchResult"]);
}

#[test]
fn test_enums_and_custom_scalars() {
    let graph = parse(
        r"
scalar DateTime
enum Color { RED GREEN }
type Query { now: DateTime, color: Color }
",
    );
    let color = graph.enumeration("Color").unwrap();
    let values: Vec<&str> = color.values.iter().map(AsRef::as_ref).collect();
    assert_eq!(values, ["RED", "GREEN"]);
    let now = &graph.object("Query").unwrap().fields[0];
    assert_eq!(
        now.type_ref,
        TypeRef::Nullable(Box::new(named(NamedType::Scalar, "DateTime")))
    );
}

#[test]
fn test_input_fields_are_lowered() {
    let graph = parse(
        r"
type Query { users(where: UserWhere): [String] }
input UserWhere { name: String!, tags: [String!] }
",
    );
    let input = graph.input("UserWhere").unwrap();
    assert_eq!(input.fields.len(), 2);
    assert!(input.fields.iter().all(|f| f.arguments.is_empty()));
    assert_eq!(input.fields[1].type_ref.to_string(), "[String!]");
}

#[test]
fn test_multiple_sources_are_merged() {
    let graph = SchemaGraph::parse([
        ("a.graphql", "type Query { user: User }"),
        ("b.graphql", "type User { id: ID! }\nextend type User { name: String }"),
    ])
    .unwrap();
    assert_eq!(graph.object("User").unwrap().fields.len(), 2);
}

#[test]
fn test_invalid_schema_reports_diagnostics() {
    let result = SchemaGraph::parse([("broken.graphql", "type Query { user: Missing }")]);
    match result {
        Err(GraphError::Invalid { diagnostics }) => {
            assert!(!diagnostics.is_empty());
            assert!(diagnostics.iter().any(|d| d.message.contains("Missing")));
        }
        other => panic!("expected invalid schema, got {other:?}"),
    }
}

#[test]
fn test_built_in_types_are_skipped() {
    let graph = parse("type Query { ok: Boolean }");
    assert_eq!(graph.objects().len(), 1);
    assert!(graph.object("__Schema").is_none());
}
