use schemars::schema::{RootSchema, Schema};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{any::TypeId, sync::Arc};

/// Cached JSON schema handle associated with a response type.
#[derive(Clone, Debug)]
pub struct SchemaHandle {
    schema_name: &'static str,
    type_name: &'static str,
    type_id: TypeId,
    schema_json: Arc<Value>,
}

impl SchemaHandle {
    pub fn from_root_schema<T: 'static>(
        schema_name: &'static str,
        type_name: &'static str,
        root: RootSchema,
    ) -> Self {
        // A derived RootSchema is plain data; serializing it cannot fail.
        let schema_json = serde_json::to_value(root).unwrap_or(Value::Null);

        Self {
            schema_name,
            type_name,
            type_id: TypeId::of::<T>(),
            schema_json: Arc::new(schema_json),
        }
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn schema_json(&self) -> &Value {
        self.schema_json.as_ref()
    }
}

/// A type the backend is asked to produce as JSON. Implemented by
/// `#[response_schema]`.
pub trait ResponseSchema: DeserializeOwned + Send + Sync + 'static {
    fn schema() -> &'static SchemaHandle;
}

/// Fold doc comments captured by `#[response_schema]` into the root schema.
/// Metadata `schemars` already derived is left alone.
pub fn apply_doc_comments(
    root: &mut RootSchema,
    title: &'static str,
    description: Option<&'static str>,
    field_docs: &[(&'static str, &'static str)],
) {
    let metadata = root.schema.metadata();
    metadata.title.get_or_insert_with(|| title.to_string());
    if let Some(description) = description {
        metadata
            .description
            .get_or_insert_with(|| description.to_string());
    }

    let Some(object) = root.schema.object.as_mut() else {
        return;
    };
    for (field, doc) in field_docs {
        if let Some(Schema::Object(property)) = object.properties.get_mut(*field) {
            property
                .metadata()
                .description
                .get_or_insert_with(|| (*doc).to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItineraryResponse;

    #[test]
    fn handle_is_cached_and_titled() {
        let first = ItineraryResponse::schema();
        let second = ItineraryResponse::schema();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.schema_name(), "ItineraryResponse");
        assert_eq!(first.type_name(), "ItineraryResponse");
        assert_eq!(first.schema_json()["title"], "ItineraryResponse");
    }

    #[test]
    fn field_docs_land_on_camel_case_properties() {
        let schema = ItineraryResponse::schema().schema_json();
        let description = schema["properties"]["packingItems"]["description"]
            .as_str()
            .unwrap();
        assert!(description.contains("Three items"));
    }
}
