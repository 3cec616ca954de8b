pub mod gemini;
pub mod schema;
pub mod validation;
pub mod validator;

pub use schema::{apply_doc_comments, ResponseSchema, SchemaHandle};
pub use validator::ValidationMode;
