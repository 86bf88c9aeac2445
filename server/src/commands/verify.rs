//! Membership Verification (`/verify`)
//!
//! Checks the invoker's email against the two cohort rosters and, on
//! success, grants the student role and records the membership link. The
//! user-visible success message never waits on either write: both run as
//! detached background tasks, independently and without coordinating their
//! outcomes (a known consistency gap, preserved from the original design).

use tracing::warn;

use super::{CommandContext, CommandOutput};
use crate::api::AppState;
use crate::interactions::types::InteractionResponse;
use crate::tasks::BackgroundTask;

/// Roster of the introductory cohort, keyed by enrollment email.
const COHORT_BASICO: &str = "alumnos:basico";

/// Roster of the advanced cohort.
const COHORT_AVANZADO: &str = "alumnos:avanzado";

/// Emails already linked to an account.
const CLAIMED_EMAILS: &str = "verify:emails";

const ALREADY_VERIFIED: &str = "Ya estás verificado. ✅ Si necesitas cambiar tu correo, \
                                escribe a soporte.";
const EMAIL_TAKEN: &str = "Ese correo ya fue usado por otra cuenta. Si es tuyo, escribe a \
                           soporte y lo revisamos.";
const NOT_REGISTERED: &str = "No encontré ese correo en ninguna edición del curso. 😕 Revisa que \
                              sea el mismo con el que te inscribiste; si el problema sigue, \
                              escribe a soporte.";
const VERIFIED_OK: &str = "¡Listo! ✅ Verificamos tu inscripción; en unos segundos tendrás el rol \
                           de estudiante y acceso a todos los canales.";

/// Typed arguments for `/verify`.
pub struct VerifyArgs {
    pub email: String,
}

fn link_key(user_id: &str) -> String {
    format!("verify:link:{user_id}")
}

pub async fn run(state: &AppState, ctx: &CommandContext, args: VerifyArgs) -> CommandOutput {
    let email = args.email.trim().to_lowercase();
    let user_id = ctx.invoker.id.clone();

    // Idempotency: an account links at most one email.
    match state.kv.get(&link_key(&user_id)).await {
        Ok(Some(_)) => {
            return CommandOutput::reply(InteractionResponse::ephemeral(ALREADY_VERIFIED));
        }
        Ok(None) => {}
        Err(e) => {
            // A failed pre-check must not lock a student out; the claimed-set
            // guard below still prevents double-linking an email.
            warn!(user_id = %user_id, error = %e, "Verified-link pre-check failed");
        }
    }

    // The three store predicates are independent; check them in parallel.
    let (claimed, basico, avanzado) = tokio::join!(
        state.kv.sismember(CLAIMED_EMAILS, &email),
        state.kv.sismember(COHORT_BASICO, &email),
        state.kv.sismember(COHORT_AVANZADO, &email),
    );

    // Security-relevant checks fail conservatively: a store error is never
    // "authorized by default".
    let claimed = claimed.unwrap_or_else(|e| {
        warn!(user_id = %user_id, error = %e, "Claimed-email check failed");
        true
    });
    let basico = basico.unwrap_or_else(|e| {
        warn!(user_id = %user_id, error = %e, "Cohort roster check failed");
        false
    });
    let avanzado = avanzado.unwrap_or_else(|e| {
        warn!(user_id = %user_id, error = %e, "Cohort roster check failed");
        false
    });

    if !basico && !avanzado {
        return CommandOutput::reply(InteractionResponse::ephemeral(NOT_REGISTERED));
    }
    if claimed {
        return CommandOutput::reply(InteractionResponse::ephemeral(EMAIL_TAKEN));
    }

    // Success is reported immediately. The role grant and the link record run
    // detached and uncoordinated; if either fails it is logged, never retried,
    // and the message above has already been sent.
    let guild_id = ctx
        .guild_id
        .clone()
        .unwrap_or_else(|| state.config.guild_id.clone());
    let role_id = state.config.verified_role_id.clone();
    let platform = state.platform.clone();
    let role_user = user_id.clone();
    let assign_role = BackgroundTask::new("assign-role", &user_id, async move {
        platform.assign_role(&guild_id, &role_user, &role_id).await
    });

    let kv = state.kv.clone();
    let link_user = user_id.clone();
    let link_email = email.clone();
    let store_link = BackgroundTask::new("store-membership-link", &user_id, async move {
        // Both writes are idempotent upserts; last-write-wins is safe.
        kv.set(&link_key(&link_user), &link_email).await?;
        kv.sadd(CLAIMED_EMAILS, &link_email).await
    });

    CommandOutput {
        response: InteractionResponse::ephemeral(VERIFIED_OK),
        tasks: vec![assign_role, store_link],
    }
}
