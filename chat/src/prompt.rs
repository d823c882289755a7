//! System-instruction template for the assistant persona.

use serde::{Deserialize, Serialize};

/// Placeholder replaced with the retrieved context string.
const CONTEXT_SLOT: &str = "{context}";

/// Default analyst persona for the Nexus assistant.
const NEXUS_PERSONA: &str = "\
You are 'Nexus', a League of Legends data analyst and Challenger-tier player.

Guidelines:
1. Answer only from the [knowledge] section below.
2. Remember the flow of the conversation and respond in context.
3. Speak like an analyst, mixing in gamer terms (nerf, buff, OP) naturally.
4. Numeric changes (damage, cooldowns) matter most, so quote them exactly.
5. If the answer is not in the knowledge, say so honestly instead of guessing.
6. End every answer with a one-line practical tip.
7. Address the user as 'Summoner'.

[knowledge]
{context}";

/// A system-instruction template with a `{context}` slot.
///
/// Rendering substitutes the retrieved context string, including the
/// no-data sentinel, so the model is always told exactly what knowledge
/// it was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaPrompt {
    template: String,
}

impl PersonaPrompt {
    /// Create a prompt from a template containing a `{context}` slot.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The raw template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Substitute the retrieved context into the template.
    pub fn render(&self, context: &str) -> String {
        self.template.replace(CONTEXT_SLOT, context)
    }
}

impl Default for PersonaPrompt {
    fn default() -> Self {
        Self::new(NEXUS_PERSONA)
    }
}
