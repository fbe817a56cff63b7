//! Localizer Service Module
//!
//! Turns Chinese e-commerce copy into Vietnamese through Gemini.
//!
//! # Architecture
//! ```text
//! generate(request, user_key)
//!     │
//!     ├─ blank input? ──────────────► ""
//!     ├─ CredentialResolver ────────► MissingCredential
//!     ├─ compose(scenario, ...) ────► (instruction, prompt)
//!     └─ GenerationBackend ─────────► text | InvalidCredential | RateLimited | Unknown
//!            │
//!            └─ GeminiClient (generateContent)
//! ```

mod client;
mod credential;
mod models;
mod prompt;
mod scenarios;
mod service;

pub use client::{GeminiClient, GenerationBackend};
pub use credential::{CredentialResolver, DEPLOYMENT_KEY_ENV, resolve_credential};
pub use models::*;
pub use prompt::{ComposedPrompt, compose};
pub use scenarios::system_instruction;
pub use service::LocalizerService;
