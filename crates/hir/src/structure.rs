use crate::{GraphError, Result};
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::{ast, Schema};
use std::fmt;
use std::sync::Arc;

/// A reference to a named type, tagged by the kind of its definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamedType {
    Scalar(Arc<str>),
    Enum(Arc<str>),
    Object(Arc<str>),
    Interface(Arc<str>),
    Union(Arc<str>),
    Input(Arc<str>),
}

impl NamedType {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(name)
            | Self::Enum(name)
            | Self::Object(name)
            | Self::Interface(name)
            | Self::Union(name)
            | Self::Input(name) => name,
        }
    }
}

/// Reference to a type with explicit list and nullability modifiers.
///
/// GraphQL types are nullable unless marked with `!`; here the opposite
/// holds and nullability is an explicit wrapper, so `[Post!]` is
/// `Nullable(List(Named(Object("Post"))))`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(NamedType),
    List(Box<TypeRef>),
    Nullable(Box<TypeRef>),
}

impl TypeRef {
    #[must_use]
    pub fn nullable(self) -> Self {
        Self::Nullable(Box::new(self))
    }

    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// The innermost named type, with every modifier stripped.
    #[must_use]
    pub fn named(&self) -> &NamedType {
        match self {
            Self::Named(named) => named,
            Self::List(inner) | Self::Nullable(inner) => inner.named(),
        }
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }
}

impl fmt::Display for TypeRef {
    /// Writes the GraphQL spelling of the reference, e.g. `[String!]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_inner(ty: &TypeRef, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match ty {
                TypeRef::Named(named) => f.write_str(named.name()),
                TypeRef::List(inner) => {
                    f.write_str("[")?;
                    fmt::Display::fmt(inner, f)?;
                    f.write_str("]")
                }
                TypeRef::Nullable(inner) => write_inner(inner, f),
            }
        }

        write_inner(self, f)?;
        if self.is_nullable() {
            Ok(())
        } else {
            f.write_str("!")
        }
    }
}

/// Field of an object, interface or input type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDef {
    pub name: Arc<str>,
    pub type_ref: TypeRef,
    pub arguments: Vec<ArgumentDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgumentDef {
    pub name: Arc<str>,
    pub type_ref: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectTypeDef {
    pub name: Arc<str>,
    pub fields: Vec<FieldDef>,
    pub implements: Vec<Arc<str>>,
    /// Whether this object is the schema's subscription root
    pub is_subscription: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceTypeDef {
    pub name: Arc<str>,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnionTypeDef {
    pub name: Arc<str>,
    pub members: Vec<Arc<str>>,
}

/// Input object. Fields never carry arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputTypeDef {
    pub name: Arc<str>,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumTypeDef {
    pub name: Arc<str>,
    pub values: Vec<Arc<str>>,
}

/// Names of the root operation types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RootTypes {
    pub query: Option<Arc<str>>,
    pub mutation: Option<Arc<str>>,
    pub subscription: Option<Arc<str>>,
}

impl RootTypes {
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        [&self.query, &self.mutation, &self.subscription]
            .into_iter()
            .flatten()
            .any(|root| root.as_ref() == name)
    }
}

pub(crate) fn extract_root_types(schema: &Schema) -> RootTypes {
    let root = |name: Option<&apollo_compiler::schema::ComponentName>| -> Option<Arc<str>> {
        name.map(|n| Arc::from(n.name.as_str()))
    };
    let definition = &schema.schema_definition;
    RootTypes {
        query: root(definition.query.as_ref()),
        mutation: root(definition.mutation.as_ref()),
        subscription: root(definition.subscription.as_ref()),
    }
}

pub(crate) fn extract_object_type(
    schema: &Schema,
    obj: &apollo_compiler::schema::ObjectType,
    roots: &RootTypes,
) -> Result<ObjectTypeDef> {
    let name: Arc<str> = Arc::from(obj.name.as_str());

    let fields = obj
        .fields
        .values()
        .map(|field| extract_field(schema, &name, field))
        .collect::<Result<Vec<_>>>()?;

    let implements = obj
        .implements_interfaces
        .iter()
        .map(|iface| Arc::from(iface.name.as_str()))
        .collect();

    let is_subscription = roots.subscription.as_deref() == Some(name.as_ref());

    Ok(ObjectTypeDef {
        name,
        fields,
        implements,
        is_subscription,
    })
}

pub(crate) fn extract_interface_type(
    schema: &Schema,
    iface: &apollo_compiler::schema::InterfaceType,
) -> Result<InterfaceTypeDef> {
    let name: Arc<str> = Arc::from(iface.name.as_str());

    let fields = iface
        .fields
        .values()
        .map(|field| extract_field(schema, &name, field))
        .collect::<Result<Vec<_>>>()?;

    Ok(InterfaceTypeDef { name, fields })
}

pub(crate) fn extract_union_type(union_def: &apollo_compiler::schema::UnionType) -> UnionTypeDef {
    UnionTypeDef {
        name: Arc::from(union_def.name.as_str()),
        members: union_def
            .members
            .iter()
            .map(|member| Arc::from(member.name.as_str()))
            .collect(),
    }
}

pub(crate) fn extract_enum_type(enum_def: &apollo_compiler::schema::EnumType) -> EnumTypeDef {
    EnumTypeDef {
        name: Arc::from(enum_def.name.as_str()),
        values: enum_def
            .values
            .values()
            .map(|v| Arc::from(v.value.as_str()))
            .collect(),
    }
}

pub(crate) fn extract_input_object_type(
    schema: &Schema,
    input: &apollo_compiler::schema::InputObjectType,
) -> Result<InputTypeDef> {
    let name: Arc<str> = Arc::from(input.name.as_str());

    let fields = input
        .fields
        .values()
        .map(|field| {
            Ok(FieldDef {
                name: Arc::from(field.name.as_str()),
                type_ref: extract_type_ref(schema, &field.ty, &name)?,
                arguments: Vec::new(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(InputTypeDef { name, fields })
}

fn extract_field(
    schema: &Schema,
    owner: &str,
    field: &ast::FieldDefinition,
) -> Result<FieldDef> {
    let referenced_by = format!("{owner}.{}", field.name);

    let arguments = field
        .arguments
        .iter()
        .map(|arg| {
            Ok(ArgumentDef {
                name: Arc::from(arg.name.as_str()),
                type_ref: extract_type_ref(schema, &arg.ty, &referenced_by)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(FieldDef {
        name: Arc::from(field.name.as_str()),
        type_ref: extract_type_ref(schema, &field.ty, &referenced_by)?,
        arguments,
    })
}

fn extract_type_ref(schema: &Schema, ty: &ast::Type, referenced_by: &str) -> Result<TypeRef> {
    Ok(match ty {
        ast::Type::Named(name) => {
            TypeRef::Named(extract_named(schema, name, referenced_by)?).nullable()
        }
        ast::Type::NonNullNamed(name) => {
            TypeRef::Named(extract_named(schema, name, referenced_by)?)
        }
        ast::Type::List(inner) => extract_type_ref(schema, inner, referenced_by)?
            .list()
            .nullable(),
        ast::Type::NonNullList(inner) => extract_type_ref(schema, inner, referenced_by)?.list(),
    })
}

fn extract_named(
    schema: &Schema,
    name: &ast::NamedType,
    referenced_by: &str,
) -> Result<NamedType> {
    let tagged = Arc::from(name.as_str());
    match schema.types.get(name) {
        Some(ExtendedType::Scalar(_)) => Ok(NamedType::Scalar(tagged)),
        Some(ExtendedType::Enum(_)) => Ok(NamedType::Enum(tagged)),
        Some(ExtendedType::Object(_)) => Ok(NamedType::Object(tagged)),
        Some(ExtendedType::Interface(_)) => Ok(NamedType::Interface(tagged)),
        Some(ExtendedType::Union(_)) => Ok(NamedType::Union(tagged)),
        Some(ExtendedType::InputObject(_)) => Ok(NamedType::Input(tagged)),
        None => Err(GraphError::UnknownType {
            name: name.to_string(),
            referenced_by: referenced_by.to_string(),
        }),
    }
}
