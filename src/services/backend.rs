use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::Result,
    services::{gemini_client::GenerateRequest, gemini_types::GenerateResponse},
};

/// Something that turns a [`GenerateRequest`] into model output.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;
}

#[async_trait]
impl<T: GenerationBackend + ?Sized> GenerationBackend for Arc<T> {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        (**self).generate(request).await
    }
}
