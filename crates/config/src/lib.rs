//! Configuration for GraphQL resolver type generation.
//!
//! Projects are described by a `.graphqlrc` file (YAML or JSON). Besides the
//! standard `schema` key, each project carries its generation settings under
//! `extensions.resolvers`.

mod config;
mod error;
mod loader;
mod validation;

pub use config::{
    GraphQLConfig, ProjectConfig, ResolversConfig, SchemaConfig, DEFAULT_PROJECT,
};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str, resolve_config};
pub use validation::{binding_warnings, BindingWarning};
