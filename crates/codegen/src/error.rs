use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodegenError>;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("input type `{name}` used by `{owner}` has no definition in the schema graph")]
    MissingInput { name: String, owner: String },

    #[error("generated name `{name}` is declared twice in {scope}; rename one of the schema elements it comes from")]
    NameCollision { scope: String, name: String },
}
