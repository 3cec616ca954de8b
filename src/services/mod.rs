pub mod backend;
pub mod credentials;
pub mod gemini_client;
pub mod gemini_types;
pub mod prompt;
pub mod response_handler;

pub use backend::GenerationBackend;
pub use credentials::{CredentialResolver, CredentialSource, KeyBridge, ManualKeyStore};
pub use gemini_client::{BackendTool, GeminiClient, GenerateRequest};
pub use gemini_types::{GenerateResponse, GroundingChunk, GroundingMetadata, WebSource};
