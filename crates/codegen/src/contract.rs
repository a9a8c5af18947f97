//! Resolver contracts for fields and abstract types.

use crate::context::CodegenContext;
use crate::decl::{Decl, Member, Param, TsType};
use crate::type_ref::{resolve_type_ref, Position};
use graphql_hir::{FieldDef, InterfaceTypeDef, ObjectTypeDef};

/// Type of the request-info parameter, imported from `graphql`.
pub const INFO_TYPE: &str = "GraphQLResolveInfo";

/// The type declaring a field.
#[derive(Debug, Clone, Copy)]
pub enum Owner<'g> {
    Object(&'g ObjectTypeDef),
    Interface(&'g InterfaceTypeDef),
}

impl Owner<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Object(object) => &object.name,
            Self::Interface(iface) => &iface.name,
        }
    }

    const fn is_subscription(&self) -> bool {
        matches!(self, Self::Object(object) if object.is_subscription)
    }
}

/// Declarations one field contributes to its group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContract {
    /// `ArgsF`, present iff the field takes arguments
    pub args_record: Option<Decl>,
    /// `FResolver`, bound to the full contract
    pub alias: Decl,
}

impl FieldContract {
    #[must_use]
    pub fn alias_name(&self) -> &str {
        self.alias.name()
    }

    /// The contract type the alias is bound to.
    #[must_use]
    pub fn contract(&self) -> Option<&TsType> {
        match &self.alias {
            Decl::TypeAlias { ty, .. } => Some(ty),
            _ => None,
        }
    }
}

/// Upper-cases the first character: `posts` becomes `Posts`.
#[must_use]
pub fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[must_use]
pub fn args_record_name(field_name: &str) -> String {
    format!("Args{}", pascal_case(field_name))
}

#[must_use]
pub fn alias_name(field_name: &str) -> String {
    format!("{}Resolver", pascal_case(field_name))
}

/// The value a field resolver receives as its parent.
///
/// An object's bound model, or `undefined` when unbound. For an interface
/// it is the union of every implementor's model.
#[must_use]
pub fn parent_type(cx: &CodegenContext<'_>, owner: Owner<'_>) -> TsType {
    let models = &cx.options.models;
    match owner {
        Owner::Object(object) => models.model_or(&object.name, TsType::undefined()),
        Owner::Interface(iface) => TsType::union(
            cx.index
                .implementors(&iface.name)
                .iter()
                .map(|object| models.model_or(&object.name, TsType::undefined())),
        ),
    }
}

/// `{}` for a field without arguments, its `ArgsF` record otherwise.
#[must_use]
pub fn args_type(field: &FieldDef) -> TsType {
    if field.arguments.is_empty() {
        TsType::empty_record()
    } else {
        TsType::named(args_record_name(&field.name))
    }
}

#[must_use]
pub fn args_record(cx: &CodegenContext<'_>, field: &FieldDef) -> Option<Decl> {
    if field.arguments.is_empty() {
        return None;
    }
    let members = field
        .arguments
        .iter()
        .map(|arg| {
            Member::required(
                arg.name.as_ref(),
                resolve_type_ref(&arg.type_ref, cx.options, Position::Argument),
            )
        })
        .collect();
    Some(Decl::Interface {
        name: args_record_name(&field.name),
        members,
    })
}

fn resolver_params(cx: &CodegenContext<'_>, parent: TsType, args: TsType) -> Vec<Param> {
    vec![
        Param::new("parent", parent),
        Param::new("args", args),
        Param::new("context", cx.options.context()),
        Param::new("info", TsType::named(INFO_TYPE)),
    ]
}

/// Build the contract for one field of `owner`.
///
/// Fields of the subscription root get `{ subscribe; resolve? }`. Every
/// other field accepts a plain function or the delegated
/// `{ fragment; resolve }` form.
#[must_use]
pub fn field_contract(cx: &CodegenContext<'_>, owner: Owner<'_>, field: &FieldDef) -> FieldContract {
    let params = resolver_params(cx, parent_type(cx, owner), args_type(field));
    let ty = if owner.is_subscription() {
        subscription_contract(cx, params, field)
    } else {
        let result = resolve_type_ref(&field.type_ref, cx.options, Position::Return);
        delegating_contract(TsType::function(params, result))
    };

    FieldContract {
        args_record: args_record(cx, field),
        alias: Decl::TypeAlias {
            name: alias_name(&field.name),
            ty,
        },
    }
}

fn delegating_contract(function: TsType) -> TsType {
    let delegated = TsType::Object(vec![
        Member::required("fragment", TsType::string()),
        Member::required("resolve", function.clone()),
    ]);
    TsType::union([function, delegated])
}

fn subscription_contract(cx: &CodegenContext<'_>, params: Vec<Param>, field: &FieldDef) -> TsType {
    let event = resolve_type_ref(&field.type_ref, cx.options, Position::Argument);
    let stream = TsType::deferred(TsType::async_iterator(event.clone()));
    TsType::Object(vec![
        Member::required("subscribe", TsType::function(params.clone(), stream)),
        Member::optional("resolve", TsType::function(params, TsType::deferred(event))),
    ])
}

fn possible_values(cx: &CodegenContext<'_>, possible: &[&ObjectTypeDef]) -> TsType {
    TsType::union(
        possible
            .iter()
            .map(|object| cx.options.models.model_or(&object.name, TsType::unknown())),
    )
}

fn abstract_params(cx: &CodegenContext<'_>, value: TsType) -> Vec<Param> {
    vec![
        Param::new("value", value),
        Param::new("context", cx.options.context()),
        Param::new("info", TsType::named(INFO_TYPE)),
    ]
}

/// `__resolveType` for an interface or union.
///
/// Takes a value of any possible model and returns the literal name of its
/// concrete type. No possible types leaves both sides `never`.
#[must_use]
pub fn resolve_type_member(cx: &CodegenContext<'_>, abstract_type: &str, optional: bool) -> Member {
    let possible = cx.index.possible_types(abstract_type);
    let discriminant = TsType::union(
        possible
            .iter()
            .map(|object| TsType::literal(object.name.as_ref())),
    );
    let ty = TsType::function(
        abstract_params(cx, possible_values(cx, possible)),
        TsType::deferred(discriminant),
    );
    Member {
        name: "__resolveType".to_string(),
        optional,
        ty,
    }
}

/// `__isTypeOf?` for an object that belongs to at least one interface or
/// union.
#[must_use]
pub fn is_type_of_member(cx: &CodegenContext<'_>, object: &ObjectTypeDef) -> Option<Member> {
    let candidates: Vec<&ObjectTypeDef> = cx
        .index
        .containing_abstract_types(&object.name)
        .flat_map(|abstract_type| cx.index.possible_types(abstract_type).iter().copied())
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let ty = TsType::function(
        abstract_params(cx, possible_values(cx, &candidates)),
        TsType::deferred(TsType::boolean()),
    );
    Some(Member::optional("__isTypeOf", ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{GenerateOptions, ModelBinding};
    use graphql_hir::SchemaGraph;

    const SCHEMA: &str = r"
type Query { node(id: ID!): Node, search(text: String!): [SearchResult!]! }
type Subscription { postAdded(author: ID): Post! }
interface Node { id: ID! }
type User implements Node { id: ID!, posts(limit: Int): [Post!]! }
type Post implements Node { id: ID!, title: String }
union SearchResult = User | Post
";

    fn graph() -> SchemaGraph {
        SchemaGraph::parse([("schema.graphql", SCHEMA)]).unwrap()
    }

    fn options() -> GenerateOptions {
        GenerateOptions {
            models: ModelBinding::new().with("User", "UserModel"),
            ..GenerateOptions::default()
        }
    }

    fn field<'a>(object: &'a ObjectTypeDef, name: &str) -> &'a FieldDef {
        object.fields.iter().find(|f| f.name.as_ref() == name).unwrap()
    }

    fn member<'a>(ty: &'a TsType, name: &str) -> &'a Member {
        match ty {
            TsType::Object(members) => members.iter().find(|m| m.name == name).unwrap(),
            other => panic!("expected an object type, got {other}"),
        }
    }

    #[test]
    fn test_pascal_case_names() {
        assert_eq!(pascal_case("posts"), "Posts");
        assert_eq!(pascal_case("postAdded"), "PostAdded");
        assert_eq!(pascal_case(""), "");
        assert_eq!(args_record_name("posts"), "ArgsPosts");
        assert_eq!(alias_name("posts"), "PostsResolver");
    }

    #[test]
    fn test_field_contract_with_arguments() {
        let graph = graph();
        let options = options();
        let cx = CodegenContext::new(&graph, &options);
        let user = graph.object("User").unwrap();

        let contract = field_contract(&cx, Owner::Object(user), field(user, "posts"));
        assert_eq!(contract.alias_name(), "PostsResolver");
        assert_eq!(
            contract.args_record,
            Some(Decl::Interface {
                name: "ArgsPosts".to_string(),
                members: vec![Member::required(
                    "limit",
                    TsType::union([TsType::number(), TsType::undefined()])
                )],
            })
        );
        assert_eq!(
            contract.contract().unwrap().to_string(),
            "((parent: UserModel, args: ArgsPosts, context: any, info: GraphQLResolveInfo) \
             => Array<unknown> | Promise<Array<unknown>>) \
             | { fragment: string; resolve: (parent: UserModel, args: ArgsPosts, context: any, \
             info: GraphQLResolveInfo) => Array<unknown> | Promise<Array<unknown>> }"
        );
    }

    #[test]
    fn test_field_without_arguments_uses_empty_record() {
        let graph = graph();
        let options = options();
        let cx = CodegenContext::new(&graph, &options);
        let post = graph.object("Post").unwrap();

        let contract = field_contract(&cx, Owner::Object(post), field(post, "title"));
        assert!(contract.args_record.is_none());
        let TsType::Union(choices) = contract.contract().unwrap() else {
            panic!("expected function or delegated form");
        };
        let TsType::Function(sig) = &choices[0] else {
            panic!("expected a plain function first");
        };
        assert_eq!(sig.params[0].ty, TsType::undefined());
        assert_eq!(sig.params[1].ty, TsType::empty_record());
    }

    #[test]
    fn test_subscription_contract_shape() {
        let graph = graph();
        let options = options();
        let cx = CodegenContext::new(&graph, &options);
        let subscription = graph.object("Subscription").unwrap();

        let contract = field_contract(
            &cx,
            Owner::Object(subscription),
            field(subscription, "postAdded"),
        );
        let ty = contract.contract().unwrap();
        let TsType::Object(members) = ty else {
            panic!("expected subscribe/resolve record, got {ty}");
        };
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["subscribe", "resolve"]);

        let subscribe = member(ty, "subscribe");
        assert!(!subscribe.optional);
        let TsType::Function(sig) = &subscribe.ty else {
            panic!("subscribe must be a function");
        };
        assert_eq!(
            sig.ret.to_string(),
            "AsyncIterator<unknown> | Promise<AsyncIterator<unknown>>"
        );
        assert!(member(ty, "resolve").optional);
    }

    #[test]
    fn test_interface_field_parent_is_union_of_implementors() {
        let graph = graph();
        let options = options();
        let cx = CodegenContext::new(&graph, &options);
        let node = graph.interface("Node").unwrap();

        assert_eq!(
            parent_type(&cx, Owner::Interface(node)).to_string(),
            "UserModel | undefined"
        );
    }

    #[test]
    fn test_interface_resolve_type() {
        let graph = graph();
        let options = options();
        let cx = CodegenContext::new(&graph, &options);

        let resolve_type = resolve_type_member(&cx, "Node", false);
        assert!(!resolve_type.optional);
        assert_eq!(
            resolve_type.ty.to_string(),
            "(value: UserModel | unknown, context: any, info: GraphQLResolveInfo) \
             => \"User\" | \"Post\" | Promise<\"User\" | \"Post\">"
        );
    }

    #[test]
    fn test_abstract_type_without_possible_types() {
        let graph = SchemaGraph::parse([(
            "schema.graphql",
            "type Query { a: Lonely } interface Lonely { id: ID! }",
        )])
        .unwrap();
        let options = GenerateOptions::default();
        let cx = CodegenContext::new(&graph, &options);

        let resolve_type = resolve_type_member(&cx, "Lonely", false);
        let TsType::Function(sig) = &resolve_type.ty else {
            panic!("expected a function");
        };
        assert_eq!(sig.params[0].ty, TsType::never());
    }

    #[test]
    fn test_is_type_of_only_for_abstract_members() {
        let graph = graph();
        let options = options();
        let cx = CodegenContext::new(&graph, &options);

        let user = is_type_of_member(&cx, graph.object("User").unwrap()).unwrap();
        assert!(user.optional);
        assert_eq!(
            user.ty.to_string(),
            "(value: UserModel | unknown, context: any, info: GraphQLResolveInfo) \
             => boolean | Promise<boolean>"
        );
        assert!(is_type_of_member(&cx, graph.object("Query").unwrap()).is_none());
    }
}
