//! Knowledge Catalog
//!
//! Immutable tables loaded once at startup and shared read-only with the
//! router and the answer pipeline: keyword answers for `/duda`, resource
//! topics for `/recurso`, and the session schedule for `/horario`.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

/// A canned answer keyed by a keyword.
///
/// The list is ordered: the pipeline returns the first match, so more
/// specific keywords go before more general ones.
pub struct KeywordAnswer {
    pub keyword: &'static str,
    pub answer: &'static str,
}

/// A curated resource for a course topic.
pub struct Resource {
    pub tema: &'static str,
    pub title: &'static str,
    pub url: &'static str,
}

/// A scheduled live session.
pub struct Session {
    pub starts_at: DateTime<Utc>,
    pub title: &'static str,
}

/// Read-only knowledge shared across requests.
pub struct Catalog {
    pub answers: Vec<KeywordAnswer>,
    pub resources: Vec<Resource>,
    /// Ascending by `starts_at`.
    pub sessions: Vec<Session>,
}

impl Catalog {
    /// Build the built-in catalog for the current cohort.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            answers: keyword_answers(),
            resources: resources(),
            sessions: sessions(),
        }
    }
}

fn keyword_answers() -> Vec<KeywordAnswer> {
    vec![
        KeywordAnswer {
            keyword: "visual studio code",
            answer: "Usamos Visual Studio Code como editor del curso. Descárgalo desde \
                     <https://code.visualstudio.com> e instala la extensión «Spanish Language Pack» \
                     si prefieres la interfaz en español.",
        },
        KeywordAnswer {
            keyword: "vscode",
            answer: "Usamos Visual Studio Code como editor del curso. Descárgalo desde \
                     <https://code.visualstudio.com> e instala la extensión «Spanish Language Pack» \
                     si prefieres la interfaz en español.",
        },
        KeywordAnswer {
            keyword: "terminal",
            answer: "Para abrir la terminal: en Windows busca «PowerShell» en el menú de inicio, \
                     en macOS abre Spotlight (⌘ + espacio) y escribe «Terminal», y en Linux casi \
                     siempre funciona Ctrl+Alt+T. En la sesión 1 la usamos desde el minuto cero.",
        },
        KeywordAnswer {
            keyword: "git",
            answer: "Git se instala desde <https://git-scm.com/downloads>. Verifica la instalación \
                     con `git --version` en tu terminal. En la guía de recursos (`/recurso tema:git`) \
                     está el tutorial paso a paso que seguimos en clase.",
        },
        KeywordAnswer {
            keyword: "python",
            answer: "Instala Python 3 desde <https://www.python.org/downloads>. En Windows marca la \
                     casilla «Add python.exe to PATH» durante la instalación; compruébalo después con \
                     `python --version`.",
        },
        KeywordAnswer {
            keyword: "certificado",
            answer: "El certificado se genera automáticamente al completar todas las lecciones y el \
                     proyecto final. Lo encuentras en tu perfil de la plataforma, sección \
                     «Mis certificados».",
        },
        KeywordAnswer {
            keyword: "grabacion",
            answer: "Las grabaciones de cada sesión se publican en la plataforma (pestaña «Clases en \
                     vivo») dentro de las 24 horas siguientes.",
        },
        KeywordAnswer {
            keyword: "zoom",
            answer: "Las sesiones en vivo son por Zoom; el enlace llega por correo una hora antes y \
                     también se publica en #anuncios. Las grabaciones quedan en la plataforma.",
        },
    ]
}

fn resources() -> Vec<Resource> {
    vec![
        Resource {
            tema: "git",
            title: "Guía de Git y GitHub del curso",
            url: "https://aula.dev/recursos/git",
        },
        Resource {
            tema: "python",
            title: "Apuntes de Python desde cero",
            url: "https://aula.dev/recursos/python",
        },
        Resource {
            tema: "javascript",
            title: "Cuaderno de JavaScript moderno",
            url: "https://aula.dev/recursos/javascript",
        },
        Resource {
            tema: "html",
            title: "Plantillas y chuleta de HTML/CSS",
            url: "https://aula.dev/recursos/html",
        },
        Resource {
            tema: "vscode",
            title: "Configuración recomendada de VS Code",
            url: "https://aula.dev/recursos/vscode",
        },
        Resource {
            tema: "terminal",
            title: "Supervivencia en la terminal",
            url: "https://aula.dev/recursos/terminal",
        },
    ]
}

fn sessions() -> Vec<Session> {
    vec![
        session(2026, 9, 7, "Sesión 1 · Bienvenida y configuración del entorno"),
        session(2026, 9, 14, "Sesión 2 · Terminal, Git y tu primer repositorio"),
        session(2026, 9, 21, "Sesión 3 · Fundamentos de programación"),
        session(2026, 9, 28, "Sesión 4 · Estructuras de datos"),
        session(2026, 10, 5, "Sesión 5 · HTML y CSS"),
        session(2026, 10, 12, "Sesión 6 · JavaScript en el navegador"),
        session(2026, 10, 19, "Sesión 7 · APIs y consumo de datos"),
        session(2026, 10, 26, "Sesión 8 · Backend básico"),
        session(2026, 11, 9, "Sesión 9 · Despliegue"),
        session(2026, 11, 16, "Sesión 10 · Demo day de proyectos"),
    ]
}

/// Sessions start at 19:00 Ciudad de México (UTC-6, no DST since 2022).
fn session(year: i32, month: u32, day: u32, title: &'static str) -> Session {
    let cdmx = FixedOffset::west_opt(6 * 3600).expect("valid fixed offset");
    let local = NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid built-in session date")
        .and_hms_opt(19, 0, 0)
        .expect("valid built-in session time");
    let starts_at = cdmx
        .from_local_datetime(&local)
        .single()
        .expect("unambiguous session timestamp")
        .with_timezone(&Utc);
    Session { starts_at, title }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_are_ascending() {
        let catalog = Catalog::builtin();
        for pair in catalog.sessions.windows(2) {
            assert!(pair[0].starts_at < pair[1].starts_at);
        }
    }

    #[test]
    fn keyword_table_has_terminal_entry() {
        let catalog = Catalog::builtin();
        assert!(catalog.answers.iter().any(|a| a.keyword == "terminal"));
    }
}
