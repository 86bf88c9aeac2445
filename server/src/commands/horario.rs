//! Session Schedule (`/horario`)
//!
//! Answers from the static, ascending session list: the next upcoming
//! session by default, the full calendar with `todas:true`.

use chrono::{DateTime, Datelike, Timelike, Utc};

use super::CommandOutput;
use crate::api::AppState;
use crate::catalog::Session;
use crate::interactions::types::InteractionResponse;

const COURSE_FINISHED: &str = "Ya no quedan sesiones en vivo esta edición. 🎉 Las grabaciones \
                               están en la plataforma y el calendario de la próxima edición se \
                               anunciará en #anuncios.";

/// Typed arguments for `/horario`.
pub struct HorarioArgs {
    pub todas: bool,
}

pub fn run(state: &AppState, args: &HorarioArgs) -> CommandOutput {
    CommandOutput::reply(respond(state, args, Utc::now()))
}

/// Separated from `run` so tests can pin the clock.
fn respond(state: &AppState, args: &HorarioArgs, now: DateTime<Utc>) -> InteractionResponse {
    let sessions = &state.catalog.sessions;

    if args.todas {
        let lines: Vec<String> = sessions
            .iter()
            .map(|s| {
                let marker = if s.starts_at <= now { "✔️" } else { "•" };
                format!("{marker} {} — {}", format_session_date(s), s.title)
            })
            .collect();
        return InteractionResponse::ephemeral(format!(
            "📅 Calendario de la edición:\n{}",
            lines.join("\n")
        ));
    }

    // The list is ascending, so the first future entry is the next session.
    match sessions.iter().find(|s| s.starts_at > now) {
        Some(next) => InteractionResponse::ephemeral(format!(
            "🗓️ Próxima sesión: **{}**, {}.",
            next.title,
            format_session_date(next)
        )),
        None => InteractionResponse::ephemeral(COURSE_FINISHED),
    }
}

/// "lun 7 sep · 19:00 (CDMX)". Sessions are stored in UTC and shown in the
/// community's timezone (UTC-6).
fn format_session_date(session: &Session) -> String {
    let local = session.starts_at - chrono::Duration::hours(6);
    let weekday = match local.weekday() {
        chrono::Weekday::Mon => "lun",
        chrono::Weekday::Tue => "mar",
        chrono::Weekday::Wed => "mié",
        chrono::Weekday::Thu => "jue",
        chrono::Weekday::Fri => "vie",
        chrono::Weekday::Sat => "sáb",
        chrono::Weekday::Sun => "dom",
    };
    let month = match local.month() {
        1 => "ene",
        2 => "feb",
        3 => "mar",
        4 => "abr",
        5 => "may",
        6 => "jun",
        7 => "jul",
        8 => "ago",
        9 => "sep",
        10 => "oct",
        11 => "nov",
        _ => "dic",
    };
    format!(
        "{weekday} {} {month} · {:02}:{:02} (CDMX)",
        local.day(),
        local.hour(),
        local.minute()
    )
}
