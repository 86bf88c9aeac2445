//! Answer Resolution Pipeline
//!
//! Tiered resolver for the `/duda` command. Strict order, first success wins:
//! exact keyword match, substring keyword match, generation raced against a
//! timer, canned fallback. The chosen text is clamped to the platform's
//! message limit before the candidate is produced; a candidate is never
//! retried or mutated afterwards.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, warn};

use crate::ai::AnswerGenerator;
use crate::catalog::Catalog;

/// How long the generation tier may run before the fallback wins the race.
pub const GENERATION_TIMEOUT: Duration = Duration::from_millis(2300);

/// Platform maximum message length, in characters.
pub const MAX_ANSWER_CHARS: usize = 2000;

const MAX_COMPLETION_TOKENS: u32 = 400;

const SYSTEM_PROMPT: &str = "Eres el asistente de una comunidad hispanohablante de estudiantes \
                             de programación. Responde la duda en español, en tono cercano y en \
                             pocos párrafos. Si la pregunta no trata de programación o del curso, \
                             dilo amablemente.";

/// Shown when no tier produced an answer in time.
pub const FALLBACK_ANSWER: &str = "No tengo una buena respuesta a la mano. 🙏 Deja tu duda en el \
                                   canal #dudas y una persona mentora te ayudará en cuanto pueda.";

/// Which tier produced the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    /// Keyword equals the normalized question.
    Exact,
    /// Keyword appears inside the normalized question.
    Pattern,
    /// AI completion finished before the timer.
    Generated,
    /// Timer fired first, or the completion failed.
    Fallback,
}

/// The pipeline's single output, immutable once produced.
#[derive(Debug, Clone)]
pub struct AnswerCandidate {
    pub text: String,
    pub source: AnswerSource,
}

impl AnswerCandidate {
    fn produce(text: &str, source: AnswerSource) -> Self {
        Self {
            text: truncate_with_ellipsis(text, MAX_ANSWER_CHARS),
            source,
        }
    }
}

/// Resolve `question` to exactly one [`AnswerCandidate`].
pub async fn resolve(
    question: &str,
    catalog: &Catalog,
    generator: Arc<dyn AnswerGenerator>,
) -> AnswerCandidate {
    let normalized = question.trim().to_lowercase();

    if let Some(hit) = catalog.answers.iter().find(|a| a.keyword == normalized) {
        return AnswerCandidate::produce(hit.answer, AnswerSource::Exact);
    }

    if let Some(hit) = catalog
        .answers
        .iter()
        .find(|a| normalized.contains(a.keyword))
    {
        return AnswerCandidate::produce(hit.answer, AnswerSource::Pattern);
    }

    race_generation(question.trim(), generator).await
}

/// Race the completion against the timer; whichever finishes first decides.
///
/// The completion runs in its own task. When the timer wins, the join handle
/// is dropped but the task is NOT cancelled: it runs to completion and its
/// late result is discarded. A cancellable completion handle is a known
/// improvement, not implemented here.
async fn race_generation(question: &str, generator: Arc<dyn AnswerGenerator>) -> AnswerCandidate {
    let prompt = question.to_owned();
    let generation =
        tokio::spawn(
            async move { generator.complete(&prompt, SYSTEM_PROMPT, MAX_COMPLETION_TOKENS).await },
        );

    tokio::select! {
        outcome = generation => match outcome {
            Ok(Ok(text)) => AnswerCandidate::produce(&text, AnswerSource::Generated),
            Ok(Err(e)) => {
                warn!(error = %e, "Completion failed, using fallback");
                AnswerCandidate::produce(FALLBACK_ANSWER, AnswerSource::Fallback)
            }
            Err(e) => {
                error!("Completion task panicked: {}", e);
                AnswerCandidate::produce(FALLBACK_ANSWER, AnswerSource::Fallback)
            }
        },
        () = tokio::time::sleep(GENERATION_TIMEOUT) => {
            AnswerCandidate::produce(FALLBACK_ANSWER, AnswerSource::Fallback)
        }
    }
}

/// Clamp `text` to `max_chars` characters, ending with an ellipsis when cut.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut clamped: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    clamped.push('…');
    clamped
}
