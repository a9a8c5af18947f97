//! Declarations as data.
//!
//! Resolvers build these nodes; nothing here knows about text layout. The
//! single rendering pass lives in [`crate::render`].

/// A TypeScript type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TsType {
    /// A type name used verbatim: `string`, `UserModel`, `ArgsPosts`
    Named(String),
    /// A string literal type such as `"User"`
    Literal(String),
    Array(Box<TsType>),
    /// Flattened and deduplicated, never fewer than two members
    Union(Vec<TsType>),
    Promise(Box<TsType>),
    AsyncIterator(Box<TsType>),
    Function(Box<FnSig>),
    /// Inline object type; empty renders as `{}`
    Object(Vec<Member>),
}

impl TsType {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    #[must_use]
    pub fn array(item: Self) -> Self {
        Self::Array(Box::new(item))
    }

    #[must_use]
    pub fn promise(inner: Self) -> Self {
        Self::Promise(Box::new(inner))
    }

    #[must_use]
    pub fn async_iterator(inner: Self) -> Self {
        Self::AsyncIterator(Box::new(inner))
    }

    #[must_use]
    pub fn function(params: Vec<Param>, ret: Self) -> Self {
        Self::Function(Box::new(FnSig { params, ret }))
    }

    #[must_use]
    pub const fn empty_record() -> Self {
        Self::Object(Vec::new())
    }

    /// Union of `members`, flattening nested unions and dropping repeats.
    ///
    /// One distinct member collapses to itself; none yields `never`.
    #[must_use]
    pub fn union(members: impl IntoIterator<Item = Self>) -> Self {
        let flat = members
            .into_iter()
            .flat_map(|member| match member {
                Self::Union(inner) => inner,
                other => vec![other],
            })
            .fold(Vec::new(), |mut acc: Vec<Self>, member| {
                if !acc.contains(&member) {
                    acc.push(member);
                }
                acc
            });

        match flat.len() {
            0 => Self::never(),
            1 => flat.into_iter().next().unwrap_or_else(Self::never),
            _ => Self::Union(flat),
        }
    }

    /// `T | Promise<T>`, the value either directly or deferred.
    #[must_use]
    pub fn deferred(inner: Self) -> Self {
        Self::union([inner.clone(), Self::promise(inner)])
    }

    #[must_use]
    pub fn any() -> Self {
        Self::named("any")
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self::named("unknown")
    }

    #[must_use]
    pub fn undefined() -> Self {
        Self::named("undefined")
    }

    #[must_use]
    pub fn never() -> Self {
        Self::named("never")
    }

    #[must_use]
    pub fn string() -> Self {
        Self::named("string")
    }

    #[must_use]
    pub fn number() -> Self {
        Self::named("number")
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::named("boolean")
    }

    /// Members of a union, or the type itself.
    #[must_use]
    pub fn members(&self) -> &[Self] {
        match self {
            Self::Union(members) => members,
            other => std::slice::from_ref(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FnSig {
    pub params: Vec<Param>,
    pub ret: TsType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: String,
    pub ty: TsType,
}

impl Param {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Property of an interface or inline object type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    pub name: String,
    pub optional: bool,
    pub ty: TsType,
}

impl Member {
    #[must_use]
    pub fn required(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            optional: false,
            ty,
        }
    }

    #[must_use]
    pub fn optional(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            optional: true,
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Decl {
    /// `export interface Name { ... }`
    Interface { name: String, members: Vec<Member> },
    /// `export type Name = ...;`
    TypeAlias { name: String, ty: TsType },
    /// `export const defaultResolvers = { field: (parent: Model) => parent.field };`
    DefaultResolvers { parent: TsType, fields: Vec<String> },
}

impl Decl {
    /// The declared name. Default resolvers always use `defaultResolvers`.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Interface { name, .. } | Self::TypeAlias { name, .. } => name,
            Self::DefaultResolvers { .. } => "defaultResolvers",
        }
    }
}

/// Every declaration emitted for one schema type, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclGroup {
    pub type_name: String,
    pub decls: Vec<Decl>,
}

impl DeclGroup {
    /// Namespace wrapping the group: `<TypeName>Resolvers`.
    #[must_use]
    pub fn namespace(&self) -> String {
        namespace_name(&self.type_name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Decl> {
        self.decls.iter().find(|decl| decl.name() == name)
    }

    /// Members of the group's `Type` interface.
    #[must_use]
    pub fn contract_members(&self) -> &[Member] {
        match self.get(CONTRACT_TYPE) {
            Some(Decl::Interface { members, .. }) => members,
            _ => &[],
        }
    }
}

/// Name of the contract interface inside every group.
pub const CONTRACT_TYPE: &str = "Type";

#[must_use]
pub fn namespace_name(type_name: &str) -> String {
    format!("{type_name}Resolvers")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_flattens_and_dedups() {
        let nested = TsType::union([TsType::string(), TsType::undefined()]);
        let ty = TsType::union([nested, TsType::string(), TsType::number()]);
        assert_eq!(
            ty,
            TsType::Union(vec![
                TsType::string(),
                TsType::undefined(),
                TsType::number()
            ])
        );
    }

    #[test]
    fn test_union_degenerate_cases() {
        assert_eq!(TsType::union([]), TsType::never());
        assert_eq!(
            TsType::union([TsType::string(), TsType::string()]),
            TsType::string()
        );
    }

    #[test]
    fn test_deferred_widens_every_member() {
        let ty = TsType::deferred(TsType::union([TsType::string(), TsType::undefined()]));
        assert_eq!(ty.members().len(), 3);
        assert_eq!(
            ty.members()[2],
            TsType::promise(TsType::union([TsType::string(), TsType::undefined()]))
        );
    }
}
