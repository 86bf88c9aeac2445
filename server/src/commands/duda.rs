//! Free-Text Questions (`/duda`)
//!
//! Thin wrapper over the answer resolution pipeline; the pipeline owns
//! normalization, tier order, the generation race, and length clamping.

use super::CommandOutput;
use crate::answers;
use crate::api::AppState;
use crate::interactions::types::InteractionResponse;

/// Typed arguments for `/duda`.
pub struct DudaArgs {
    pub pregunta: String,
}

pub async fn run(state: &AppState, args: DudaArgs) -> CommandOutput {
    let candidate = answers::resolve(&args.pregunta, &state.catalog, state.ai.clone()).await;
    CommandOutput::reply(InteractionResponse::message(candidate.text))
}
