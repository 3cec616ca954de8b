mod response_schema;
mod schema_extraction;

use proc_macro::TokenStream;

/// Marks a response type as the target of a structured model response.
///
/// Generates a `travel_buddy::schema::ResponseSchema` impl whose handle caches
/// the `schemars` JSON Schema of the struct, with the struct and field doc
/// comments folded into the schema metadata.
///
/// ```ignore
/// #[derive(Deserialize, JsonSchema)]
/// #[response_schema(name = "DaySummary")]
/// /// One day of a trip.
/// struct DaySummary {
///     /// 1-based day number
///     day: u32,
/// }
/// ```
#[proc_macro_attribute]
pub fn response_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    response_schema::response_schema(attr, item)
}
