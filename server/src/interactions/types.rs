//! Interaction Wire Types
//!
//! Serde types for the platform's interaction payloads and responses.

use serde::{Deserialize, Serialize};

/// Bit 6 marks a response visible only to the invoking user.
pub const EPHEMERAL: u64 = 1 << 6;

/// Inbound interaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum InteractionType {
    /// Liveness handshake; must be acknowledged immediately.
    Ping,
    /// A slash-command invocation.
    ApplicationCommand,
}

impl TryFrom<u8> for InteractionType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Ping),
            2 => Ok(Self::ApplicationCommand),
            other => Err(format!("unsupported interaction type {other}")),
        }
    }
}

/// A command option value: string, integer, or boolean.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl OptionValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// A single named option as transmitted (order preserved).
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionOption {
    pub name: String,
    pub value: OptionValue,
}

/// Command payload of an interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<InteractionOption>,
}

/// Platform user.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
}

/// Guild-scoped member wrapper around a user.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildMember {
    pub user: User,
    #[serde(default)]
    pub nick: Option<String>,
}

/// An authenticated, parsed interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(default)]
    pub data: Option<InteractionData>,
    #[serde(default)]
    pub member: Option<GuildMember>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub guild_id: Option<String>,
    /// Continuation token for follow-up messages.
    #[serde(default)]
    pub token: String,
}

/// Who invoked the command, resolved from member or user.
#[derive(Debug, Clone)]
pub struct Invoker {
    pub id: String,
    pub display_name: String,
}

impl Interaction {
    /// Resolve the invoker. Guild invocations carry a `member`, DMs a `user`;
    /// an interaction with neither yields a placeholder identity.
    #[must_use]
    pub fn invoker(&self) -> Invoker {
        let user = self
            .member
            .as_ref()
            .map(|m| &m.user)
            .or(self.user.as_ref());

        user.map_or_else(
            || Invoker {
                id: String::new(),
                display_name: "desconocido".into(),
            },
            |u| {
                let nick = self.member.as_ref().and_then(|m| m.nick.clone());
                Invoker {
                    id: u.id.clone(),
                    display_name: nick
                        .or_else(|| u.global_name.clone())
                        .unwrap_or_else(|| u.username.clone()),
                }
            },
        )
    }
}

/// Outbound response kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum ResponseType {
    Pong,
    ChannelMessageWithSource,
    DeferredChannelMessageWithSource,
}

impl From<ResponseType> for u8 {
    fn from(kind: ResponseType) -> Self {
        match kind {
            ResponseType::Pong => 1,
            ResponseType::ChannelMessageWithSource => 4,
            ResponseType::DeferredChannelMessageWithSource => 5,
        }
    }
}

/// Message payload of a response.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseData {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

/// The synchronous reply to an interaction.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: ResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl InteractionResponse {
    /// Handshake acknowledgement.
    #[must_use]
    pub const fn pong() -> Self {
        Self {
            kind: ResponseType::Pong,
            data: None,
        }
    }

    /// Channel message visible to everyone.
    #[must_use]
    pub fn message(content: impl Into<String>) -> Self {
        Self {
            kind: ResponseType::ChannelMessageWithSource,
            data: Some(ResponseData {
                content: content.into(),
                flags: None,
            }),
        }
    }

    /// Channel message visible only to the invoker.
    #[must_use]
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: ResponseType::ChannelMessageWithSource,
            data: Some(ResponseData {
                content: content.into(),
                flags: Some(EPHEMERAL),
            }),
        }
    }

    /// Deferred acknowledgement; content follows via a follow-up message.
    #[must_use]
    pub const fn deferred() -> Self {
        Self {
            kind: ResponseType::DeferredChannelMessageWithSource,
            data: None,
        }
    }

    /// The message content, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_command_interaction() {
        let payload = serde_json::json!({
            "type": 2,
            "token": "tok",
            "guild_id": "g1",
            "member": { "user": { "id": "u1", "username": "ana" }, "nick": "Anita" },
            "data": {
                "name": "recurso",
                "options": [
                    { "name": "tema", "value": "git" }
                ]
            }
        });

        let interaction: Interaction = serde_json::from_value(payload).expect("valid payload");
        assert_eq!(interaction.kind, InteractionType::ApplicationCommand);
        let data = interaction.data.as_ref().expect("has data");
        assert_eq!(data.name, "recurso");
        assert_eq!(data.options[0].value.as_str(), Some("git"));

        let invoker = interaction.invoker();
        assert_eq!(invoker.id, "u1");
        assert_eq!(invoker.display_name, "Anita");
    }

    #[test]
    fn rejects_unknown_interaction_type() {
        let payload = serde_json::json!({ "type": 9, "token": "tok" });
        assert!(serde_json::from_value::<Interaction>(payload).is_err());
    }

    #[test]
    fn bool_options_deserialize_as_bool() {
        let payload = serde_json::json!({ "name": "todas", "value": true });
        let option: InteractionOption = serde_json::from_value(payload).expect("valid option");
        assert_eq!(option.value.as_bool(), Some(true));
    }

    #[test]
    fn response_wire_shape() {
        let pong = serde_json::to_value(InteractionResponse::pong()).expect("serializes");
        assert_eq!(pong, serde_json::json!({ "type": 1 }));

        let ephemeral =
            serde_json::to_value(InteractionResponse::ephemeral("hola")).expect("serializes");
        assert_eq!(
            ephemeral,
            serde_json::json!({ "type": 4, "data": { "content": "hola", "flags": 64 } })
        );

        let deferred = serde_json::to_value(InteractionResponse::deferred()).expect("serializes");
        assert_eq!(deferred, serde_json::json!({ "type": 5 }));
    }
}
