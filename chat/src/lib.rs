//! # Nexus Chat
//!
//! This crate wires the partitioned knowledge base into a chat completion
//! provider.
//!
//! ## Features
//!
//! - **Completion Capability**: An injectable `Completer` trait
//! - **Gemini Provider**: `generateContent` with system instructions
//! - **Persona Prompt**: A system template with a `{context}` slot
//! - **Assistant Glue**: One retrieval pass and one completion per question
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Assistant                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  KnowledgeBase ──► context ──► PersonaPrompt ──► Completer      │
//! │        │                            │                │          │
//! │        ▼                            ▼                ▼          │
//! │  RetrievedContext            system prompt     response text    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod assistant;
pub mod completer;
pub mod error;
pub mod message;
pub mod prompt;

pub use assistant::Assistant;
pub use completer::{Completer, GeminiCompleter};
pub use error::{ChatError, Result};
pub use message::{ChatMessage, CompletionRequest, Role};
pub use prompt::PersonaPrompt;
