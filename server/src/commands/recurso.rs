//! Curated Resources (`/recurso`)
//!
//! Stateless lookup against the catalog's resource table.

use super::CommandOutput;
use crate::api::AppState;
use crate::interactions::types::InteractionResponse;

/// Typed arguments for `/recurso`.
pub struct RecursoArgs {
    pub tema: Option<String>,
}

pub fn run(state: &AppState, args: &RecursoArgs) -> CommandOutput {
    let resources = &state.catalog.resources;

    let Some(tema) = args.tema.as_deref() else {
        return CommandOutput::reply(InteractionResponse::ephemeral(format!(
            "Temas disponibles: {}. Pide uno con `/recurso tema:<tema>`.",
            topic_list(state)
        )));
    };

    let tema = tema.trim().to_lowercase();
    match resources.iter().find(|r| r.tema == tema) {
        Some(resource) => CommandOutput::reply(InteractionResponse::ephemeral(format!(
            "📚 **{}**\n{}",
            resource.title, resource.url
        ))),
        None => CommandOutput::reply(InteractionResponse::ephemeral(format!(
            "No tengo recursos de «{tema}». Temas disponibles: {}.",
            topic_list(state)
        ))),
    }
}

fn topic_list(state: &AppState) -> String {
    state
        .catalog
        .resources
        .iter()
        .map(|r| format!("`{}`", r.tema))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;

    #[test]
    fn without_tema_lists_the_topics() {
        let state = test_state();
        let output = run(&state, &RecursoArgs { tema: None });
        let content = output.response.content().expect("has content");
        assert!(content.contains("`git`"));
        assert!(content.contains("`python`"));
    }

    #[test]
    fn unknown_tema_reports_the_valid_ones() {
        let state = test_state();
        let output = run(
            &state,
            &RecursoArgs {
                tema: Some("cobol".into()),
            },
        );
        let content = output.response.content().expect("has content");
        assert!(content.contains("«cobol»"));
        assert!(content.contains("`git`"));
    }

    #[test]
    fn known_tema_returns_its_resource() {
        let state = test_state();
        let output = run(
            &state,
            &RecursoArgs {
                tema: Some("  Git ".into()),
            },
        );
        let content = output.response.content().expect("has content");
        assert!(content.contains("https://aula.dev/recursos/git"));
    }
}
