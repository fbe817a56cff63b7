pub mod credential_store;
pub mod localizer;

pub use credential_store::{CredentialStore, StoreError};
pub use localizer::{GeminiClient, GenerationBackend, LocalizerService};
