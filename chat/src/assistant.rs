//! Assistant glue between retrieval and completion.

use std::sync::Arc;

use tracing::debug;

use nexus_retrieval::KnowledgeBase;

use crate::completer::Completer;
use crate::error::Result;
use crate::message::{ChatMessage, CompletionRequest};
use crate::prompt::PersonaPrompt;

/// Answers questions by retrieving partition context and issuing one
/// completion call per question.
///
/// The assistant keeps no conversation state; the caller owns the history
/// and passes a snapshot with every question.
pub struct Assistant {
    /// The cached retrieval resource.
    base: Arc<KnowledgeBase>,

    /// Injected completion provider.
    completer: Arc<dyn Completer>,

    /// System-instruction template.
    prompt: PersonaPrompt,
}

impl Assistant {
    /// Create an assistant with the default persona.
    pub fn new(base: Arc<KnowledgeBase>, completer: Arc<dyn Completer>) -> Self {
        Self {
            base,
            completer,
            prompt: PersonaPrompt::default(),
        }
    }

    /// Replace the persona prompt.
    pub fn with_prompt(mut self, prompt: PersonaPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    /// The underlying knowledge base.
    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.base
    }

    /// Answer a question against one partition's knowledge.
    ///
    /// Retrieval failures and completion failures both propagate; a
    /// partition with no data still produces an answer, with the no-data
    /// sentinel as the knowledge section.
    pub async fn answer(
        &self,
        partition: &str,
        question: &str,
        history: &[ChatMessage],
    ) -> Result<String> {
        let context = self.base.context_for(partition, question).await?;
        debug!(
            "Answering against partition {partition} with {} characters of context",
            context.len()
        );

        let request = CompletionRequest::new(self.prompt.render(&context), question)
            .with_history(history.to_vec());

        self.completer.complete(request).await
    }
}
