use std::any::{type_name, TypeId};

use serde_json::Value;

use crate::{
    error::{ContractError, Result},
    schemas::{ResponseSchema, SchemaHandle},
};

/// Deserialize `payload` into `T`, reporting the JSON path of the first
/// mismatch.
pub fn deserialize_structured_response<T>(payload: &Value, schema: &SchemaHandle) -> Result<T>
where
    T: ResponseSchema,
{
    if schema.type_id() != TypeId::of::<T>() {
        return Err(ContractError::Config(format!(
            "schema `{}` does not describe `{}`",
            schema.schema_name(),
            type_name::<T>(),
        )));
    }

    serde_path_to_error::deserialize(payload).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        ContractError::MalformedResponse(format!(
            "`{}` at {}: {}",
            schema.schema_name(),
            location,
            err.inner()
        ))
    })
}
