//! Augmented prompt assembly and answer formatting.

use std::collections::BTreeSet;
use std::fmt::Write;
use std::sync::Arc;

use quaero_llm::GenerationProvider;
use quaero_memory::SearchHit;

/// Fixed reply used whenever the generation service cannot be reached.
pub const APOLOGY: &str = "Sorry, a communication error occurred while generating the answer.";

/// Visible separator between retrieved context blocks.
const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Builds the instruction-tagged prompt, invokes the generation
/// service, and appends a deduplicated source citation footer.
pub struct AnswerComposer<G> {
    provider: Arc<G>,
    system_prompt: String,
}

impl<G: GenerationProvider> AnswerComposer<G> {
    #[must_use]
    pub fn new(provider: Arc<G>, system_prompt: impl Into<String>) -> Self {
        Self {
            provider,
            system_prompt: system_prompt.into(),
        }
    }

    /// Compose the final answer for a question with retrieved context.
    ///
    /// Never fails: a generation error degrades to the fixed apology.
    /// The citation footer is always appended.
    pub async fn compose(&self, question: &str, hits: &[SearchHit]) -> String {
        let prompt = self.build_prompt(question, hits);

        let reply = match self.provider.generate(&prompt).await {
            Ok(text) => text.trim().to_owned(),
            Err(e) => {
                tracing::error!("generation failed: {e}");
                APOLOGY.to_owned()
            }
        };

        format!("{reply}{}", citation_footer(hits))
    }

    fn build_prompt(&self, question: &str, hits: &[SearchHit]) -> String {
        let context = hits
            .iter()
            .map(|hit| hit.text.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);

        format!(
            "<s>[INST] <<SYS>>\n{}\n<</SYS>>\n\nCONTEXT:\n{context}\n\nQUESTION:\n{question}\n\nAnswer concisely. [/INST]",
            self.system_prompt
        )
    }
}

/// Footer listing every distinct source, lexicographically sorted.
fn citation_footer(hits: &[SearchHit]) -> String {
    let sources: BTreeSet<&str> = hits.iter().map(|hit| hit.source.as_str()).collect();
    let mut footer = String::from("\n\n**Sources:**");
    for source in sources {
        let _ = write!(footer, "\n- {source}");
    }
    footer
}
