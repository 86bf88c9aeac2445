//! Interaction Dispatch
//!
//! Routes authenticated interactions: the handshake gets an immediate
//! acknowledgement, commands go through spec validation and the per-command
//! handlers, and every handler runs under the platform's response deadline.

use std::time::Duration;

use tracing::{debug, error, warn};

use super::types::{Interaction, InteractionResponse, InteractionType};
use crate::api::AppState;
use crate::commands::{self, CommandContext, Parsed};
use crate::tasks::{self, BackgroundTask};

/// Response budget. Above the answer pipeline's race bound so `/duda`
/// resolves synchronously, below the platform's ~3 s deadline.
const RESPONSE_DEADLINE: Duration = Duration::from_millis(2800);

/// Returned for commands not in the spec table. Deliberately bland: routing
/// internals are not surfaced to invokers.
const GENERIC_ACK: &str = "Recibido. 👍";

/// Shown when a handler dies instead of producing a response.
const HANDLER_CRASHED: &str = "Algo salió mal de nuestro lado. Inténtalo otra vez en un momento.";

/// Dispatch an authenticated interaction to a response.
pub async fn dispatch(state: &AppState, interaction: Interaction) -> InteractionResponse {
    match interaction.kind {
        // Fastest path in the system: nothing else is consulted.
        InteractionType::Ping => InteractionResponse::pong(),
        InteractionType::ApplicationCommand => dispatch_command(state, interaction).await,
    }
}

async fn dispatch_command(state: &AppState, interaction: Interaction) -> InteractionResponse {
    let Some(data) = interaction.data.clone() else {
        warn!("Command interaction without data");
        return InteractionResponse::ephemeral(GENERIC_ACK);
    };

    let ctx = CommandContext {
        invoker: interaction.invoker(),
        guild_id: interaction.guild_id.clone(),
    };

    let command = match commands::parse(&data) {
        Parsed::Command(command) => command,
        Parsed::Unknown => {
            debug!(name = %data.name, "Unknown command");
            return InteractionResponse::ephemeral(GENERIC_ACK);
        }
        Parsed::Invalid(usage) => return InteractionResponse::ephemeral(usage),
    };

    // Run the handler under the response deadline. If it cannot finish in
    // time we acknowledge with a deferred response and deliver the content
    // through a follow-up message once the handler completes.
    let handler_state = state.clone();
    let handler_ctx = ctx.clone();
    let mut handler = tokio::spawn(async move {
        commands::run(&handler_state, &handler_ctx, command).await
    });

    tokio::select! {
        finished = &mut handler => match finished {
            Ok(output) => {
                for task in output.tasks {
                    tasks::spawn_detached(task);
                }
                output.response
            }
            Err(e) => {
                error!(command = %data.name, "Command handler panicked: {}", e);
                InteractionResponse::ephemeral(HANDLER_CRASHED)
            }
        },
        () = tokio::time::sleep(RESPONSE_DEADLINE) => {
            defer(state, &interaction, &data.name, handler);
            InteractionResponse::deferred()
        }
    }
}

/// Hand a still-running handler off to the background: await it there and
/// deliver its content via a follow-up message, then dispatch its own tasks.
fn defer(
    state: &AppState,
    interaction: &Interaction,
    command_name: &str,
    handler: tokio::task::JoinHandle<commands::CommandOutput>,
) {
    warn!(command = %command_name, "Handler exceeded the response deadline, deferring");

    let platform = state.platform.clone();
    let application_id = state.config.application_id.clone();
    let token = interaction.token.clone();
    let invoker_id = interaction.invoker().id;

    tasks::spawn_detached(BackgroundTask::new(
        "deferred-followup",
        &invoker_id,
        async move {
            let output = handler
                .await
                .map_err(|e| anyhow::anyhow!("deferred handler panicked: {e}"))?;

            let content = output.response.content().unwrap_or(GENERIC_ACK).to_owned();
            platform
                .create_followup_message(&application_id, &token, &content)
                .await?;

            for task in output.tasks {
                tasks::spawn_detached(task);
            }
            Ok(())
        },
    ));
}
