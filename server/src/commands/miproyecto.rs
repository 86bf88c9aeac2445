//! Project Threads (`/miproyecto`)
//!
//! Creates a thread for the invoker's course project. Thread creation is
//! synchronous: the thread reference is part of the user-visible answer, so
//! there is nothing to defer.

use tracing::error;

use super::{CommandContext, CommandOutput};
use crate::api::AppState;
use crate::interactions::types::InteractionResponse;

const CREATION_FAILED: &str = "No pude crear el hilo de tu proyecto. 😔 Inténtalo de nuevo en \
                               unos minutos.";

/// Typed arguments for `/miproyecto`.
pub struct MiProyectoArgs {
    pub nombre: String,
    pub descripcion: Option<String>,
}

pub async fn run(state: &AppState, ctx: &CommandContext, args: MiProyectoArgs) -> CommandOutput {
    let nombre = args.nombre.trim();
    let starter = args.descripcion.map_or_else(
        || {
            format!(
                "Proyecto de {}: **{nombre}**. ¡Cuéntanos de qué trata!",
                ctx.invoker.display_name
            )
        },
        |descripcion| {
            format!(
                "Proyecto de {}: **{nombre}**\n{descripcion}",
                ctx.invoker.display_name
            )
        },
    );

    match state
        .platform
        .create_thread(
            &state.config.projects_channel_id,
            &format!("🛠️ {nombre}"),
            &starter,
        )
        .await
    {
        Ok(thread) => CommandOutput::reply(InteractionResponse::message(format!(
            "Tu proyecto ya tiene hilo: <#{}>. ¡Éxitos, {}! 🚀",
            thread.id, ctx.invoker.display_name
        ))),
        Err(e) => {
            error!(invoker = %ctx.invoker.id, error = %e, "Thread creation failed");
            CommandOutput::reply(InteractionResponse::ephemeral(CREATION_FAILED))
        }
    }
}
