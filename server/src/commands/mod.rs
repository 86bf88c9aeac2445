//! Slash Commands
//!
//! The static command table, option validation, and per-command handlers.
//! Validation happens at the router boundary: a handler only ever sees a
//! strongly-typed argument struct, never the raw option bag.

pub mod duda;
pub mod horario;
pub mod miproyecto;
pub mod recurso;
pub mod verify;

use crate::api::AppState;
use crate::interactions::types::{InteractionData, InteractionResponse, Invoker};
use crate::tasks::BackgroundTask;

/// Option value kind, with its wire representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
    Boolean,
}

impl OptionKind {
    /// Platform wire type (3 = string, 4 = integer, 5 = boolean).
    #[must_use]
    pub const fn wire_type(self) -> u8 {
        match self {
            Self::String => 3,
            Self::Integer => 4,
            Self::Boolean => 5,
        }
    }
}

/// Static option descriptor.
pub struct OptionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub required: bool,
}

/// Static command descriptor: validation source and registration payload.
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub options: &'static [OptionSpec],
}

/// The supported commands. Lookup is by exact name; no prefix or fuzzy
/// matching.
pub const SPECS: &[CommandSpec] = &[
    CommandSpec {
        name: "verify",
        description: "Verifica tu inscripción y recibe el rol de estudiante",
        options: &[OptionSpec {
            name: "email",
            description: "El correo con el que te inscribiste",
            kind: OptionKind::String,
            required: true,
        }],
    },
    CommandSpec {
        name: "info",
        description: "Información sobre la comunidad y el bot",
        options: &[],
    },
    CommandSpec {
        name: "recurso",
        description: "Recursos recomendados por tema",
        options: &[OptionSpec {
            name: "tema",
            description: "Tema del recurso (por ejemplo: git, python)",
            kind: OptionKind::String,
            required: false,
        }],
    },
    CommandSpec {
        name: "horario",
        description: "Próxima sesión en vivo del curso",
        options: &[OptionSpec {
            name: "todas",
            description: "Mostrar el calendario completo",
            kind: OptionKind::Boolean,
            required: false,
        }],
    },
    CommandSpec {
        name: "miproyecto",
        description: "Crea un hilo para tu proyecto del curso",
        options: &[
            OptionSpec {
                name: "nombre",
                description: "Nombre del proyecto",
                kind: OptionKind::String,
                required: true,
            },
            OptionSpec {
                name: "descripcion",
                description: "De qué trata tu proyecto",
                kind: OptionKind::String,
                required: false,
            },
        ],
    },
    CommandSpec {
        name: "duda",
        description: "Pregunta lo que sea sobre el curso",
        options: &[OptionSpec {
            name: "pregunta",
            description: "Tu duda, con tus palabras",
            kind: OptionKind::String,
            required: true,
        }],
    },
];

const INFO_TEXT: &str = "Soy el bot de la comunidad de Aula. 🎓\n\
    • `/verify email:<correo>` — valida tu inscripción y te da el rol de estudiante.\n\
    • `/recurso tema:<tema>` — recursos recomendados por tema.\n\
    • `/horario` — la próxima sesión en vivo (`todas:true` para el calendario completo).\n\
    • `/miproyecto nombre:<nombre>` — abre un hilo para tu proyecto.\n\
    • `/duda pregunta:<texto>` — respondo dudas del curso.";

/// A parsed, validated command with typed arguments.
pub enum Command {
    Verify(verify::VerifyArgs),
    Info,
    Recurso(recurso::RecursoArgs),
    Horario(horario::HorarioArgs),
    MiProyecto(miproyecto::MiProyectoArgs),
    Duda(duda::DudaArgs),
}

/// Outcome of matching an interaction against the command table.
pub enum Parsed {
    /// Known command with valid options.
    Command(Command),
    /// Name not in the table; the router acknowledges generically.
    Unknown,
    /// Known command, unusable options; carries the usage-error text.
    Invalid(String),
}

/// Request-scoped context handed to every handler.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub invoker: Invoker,
    pub guild_id: Option<String>,
}

/// What a handler produces: the response plus detached side effects.
pub struct CommandOutput {
    pub response: InteractionResponse,
    pub tasks: Vec<BackgroundTask>,
}

impl CommandOutput {
    /// A response with no side effects.
    #[must_use]
    pub const fn reply(response: InteractionResponse) -> Self {
        Self {
            response,
            tasks: Vec::new(),
        }
    }
}

/// Match `data` against the command table and build typed arguments.
#[must_use]
pub fn parse(data: &InteractionData) -> Parsed {
    let Some(spec) = SPECS.iter().find(|s| s.name == data.name) else {
        return Parsed::Unknown;
    };

    // Required options must be present with the right value shape before the
    // handler runs.
    for opt in spec.options.iter().filter(|o| o.required) {
        let present = match opt.kind {
            OptionKind::String => str_option(data, opt.name).is_some(),
            OptionKind::Boolean => bool_option(data, opt.name).is_some(),
            OptionKind::Integer => int_option(data, opt.name).is_some(),
        };
        if !present {
            return Parsed::Invalid(usage_error(spec, opt.name));
        }
    }

    let command = match spec.name {
        "verify" => Command::Verify(verify::VerifyArgs {
            email: str_option(data, "email").unwrap_or_default(),
        }),
        "info" => Command::Info,
        "recurso" => Command::Recurso(recurso::RecursoArgs {
            tema: str_option(data, "tema"),
        }),
        "horario" => Command::Horario(horario::HorarioArgs {
            todas: bool_option(data, "todas").unwrap_or(false),
        }),
        "miproyecto" => Command::MiProyecto(miproyecto::MiProyectoArgs {
            nombre: str_option(data, "nombre").unwrap_or_default(),
            descripcion: str_option(data, "descripcion"),
        }),
        "duda" => Command::Duda(duda::DudaArgs {
            pregunta: str_option(data, "pregunta").unwrap_or_default(),
        }),
        _ => return Parsed::Unknown,
    };

    Parsed::Command(command)
}

/// Run a parsed command to its output.
pub async fn run(state: &AppState, ctx: &CommandContext, command: Command) -> CommandOutput {
    match command {
        Command::Verify(args) => verify::run(state, ctx, args).await,
        Command::Info => CommandOutput::reply(InteractionResponse::ephemeral(INFO_TEXT)),
        Command::Recurso(args) => recurso::run(state, &args),
        Command::Horario(args) => horario::run(state, &args),
        Command::MiProyecto(args) => miproyecto::run(state, ctx, args).await,
        Command::Duda(args) => duda::run(state, args).await,
    }
}

fn usage_error(spec: &CommandSpec, missing: &str) -> String {
    let usage: Vec<String> = spec
        .options
        .iter()
        .map(|o| {
            if o.required {
                format!("{}:<{}>", o.name, o.name)
            } else {
                format!("[{}:<{}>]", o.name, o.name)
            }
        })
        .collect();
    format!(
        "Falta la opción requerida `{missing}`. Uso: `/{} {}`",
        spec.name,
        usage.join(" ")
    )
}

fn str_option(data: &InteractionData, name: &str) -> Option<String> {
    data.options
        .iter()
        .find(|o| o.name == name)
        .and_then(|o| o.value.as_str())
        .map(str::to_owned)
}

fn bool_option(data: &InteractionData, name: &str) -> Option<bool> {
    data.options
        .iter()
        .find(|o| o.name == name)
        .and_then(|o| o.value.as_bool())
}

fn int_option(data: &InteractionData, name: &str) -> Option<i64> {
    data.options.iter().find(|o| o.name == name).and_then(|o| {
        if let crate::interactions::types::OptionValue::Int(i) = o.value {
            Some(i)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactions::types::{InteractionOption, OptionValue};

    fn data(name: &str, options: Vec<(&str, OptionValue)>) -> InteractionData {
        InteractionData {
            name: name.to_owned(),
            options: options
                .into_iter()
                .map(|(n, value)| InteractionOption {
                    name: n.to_owned(),
                    value,
                })
                .collect(),
        }
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        assert!(matches!(parse(&data("sudo", vec![])), Parsed::Unknown));
    }

    #[test]
    fn missing_required_option_yields_usage_error() {
        let parsed = parse(&data("duda", vec![]));
        let Parsed::Invalid(usage) = parsed else {
            panic!("expected usage error");
        };
        assert!(usage.contains("`pregunta`"));
        assert!(usage.contains("/duda"));
    }

    #[test]
    fn wrong_value_shape_counts_as_missing() {
        let parsed = parse(&data("duda", vec![("pregunta", OptionValue::Bool(true))]));
        assert!(matches!(parsed, Parsed::Invalid(_)));
    }

    #[test]
    fn optional_options_default() {
        let parsed = parse(&data("horario", vec![]));
        let Parsed::Command(Command::Horario(args)) = parsed else {
            panic!("expected horario");
        };
        assert!(!args.todas);

        let parsed = parse(&data("horario", vec![("todas", OptionValue::Bool(true))]));
        let Parsed::Command(Command::Horario(args)) = parsed else {
            panic!("expected horario");
        };
        assert!(args.todas);
    }

    #[test]
    fn typed_args_are_extracted() {
        let parsed = parse(&data(
            "miproyecto",
            vec![
                ("nombre", OptionValue::Str("ajedrez web".into())),
                ("descripcion", OptionValue::Str("tablero en JS".into())),
            ],
        ));
        let Parsed::Command(Command::MiProyecto(args)) = parsed else {
            panic!("expected miproyecto");
        };
        assert_eq!(args.nombre, "ajedrez web");
        assert_eq!(args.descripcion.as_deref(), Some("tablero en JS"));
    }

    #[test]
    fn every_spec_name_parses_to_a_command() {
        for spec in SPECS {
            let options = spec
                .options
                .iter()
                .filter(|o| o.required)
                .map(|o| {
                    let value = match o.kind {
                        OptionKind::String => OptionValue::Str("x".into()),
                        OptionKind::Integer => OptionValue::Int(1),
                        OptionKind::Boolean => OptionValue::Bool(true),
                    };
                    (o.name, value)
                })
                .collect();
            assert!(matches!(
                parse(&data(spec.name, options)),
                Parsed::Command(_)
            ));
        }
    }
}
