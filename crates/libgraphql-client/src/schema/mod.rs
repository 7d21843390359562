mod schema_types;
mod schema_validator;
mod sdl_schema;
mod sdl_schema_validator;

pub use schema_types::FieldTypeShape;
pub use schema_types::SchemaTypes;
pub use schema_validator::SchemaValidationMessage;
pub use schema_validator::SchemaValidator;
pub use sdl_schema::SchemaBuildError;
pub use sdl_schema::SchemaTypeKind;
pub use sdl_schema::SdlSchema;

#[cfg(test)]
pub(crate) mod tests;
