use crate::decl::TsType;
use crate::options::GenerateOptions;
use graphql_hir::{NamedType, TypeRef};

/// Where a resolved type appears in a resolver contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Argument or input field, used as given
    Argument,
    /// Field result, also accepted in deferred form
    Return,
}

/// Resolve a schema type reference to its TypeScript type.
///
/// Modifiers are applied innermost-out: `[Post!]` becomes
/// `Array<PostModel> | undefined`. Unbound object, interface and union
/// names resolve to `unknown`.
#[must_use]
pub fn resolve_type_ref(type_ref: &TypeRef, options: &GenerateOptions, position: Position) -> TsType {
    let resolved = resolve_wrapped(type_ref, options);
    match position {
        Position::Argument => resolved,
        Position::Return => TsType::deferred(resolved),
    }
}

fn resolve_wrapped(type_ref: &TypeRef, options: &GenerateOptions) -> TsType {
    match type_ref {
        TypeRef::Named(named) => resolve_named(named, options),
        TypeRef::List(item) => TsType::array(resolve_wrapped(item, options)),
        TypeRef::Nullable(inner) => {
            TsType::union([resolve_wrapped(inner, options), TsType::undefined()])
        }
    }
}

fn resolve_named(named: &NamedType, options: &GenerateOptions) -> TsType {
    match named {
        NamedType::Scalar(name) => options.scalar(name),
        NamedType::Enum(name) | NamedType::Input(name) => TsType::named(name.as_ref()),
        NamedType::Object(name) | NamedType::Interface(name) | NamedType::Union(name) => {
            options.models.model_or(name, TsType::unknown())
        }
    }
}
