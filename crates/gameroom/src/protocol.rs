use super::error::RoomError;
use pit_blackjack::Action;
use pit_core::Chips;
use serde::Serialize;

/// A client's request against its room, parsed from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Bet(Chips),
    Play(Action),
    Start,
    Reset,
    Leave,
    State,
}

/// "bet 1500", "hit", "stand", "double", "start", "reset", "leave", "state"
impl TryFrom<&str> for Command {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut words = s.split_whitespace();
        match (words.next(), words.next()) {
            (Some("bet"), Some(amount)) => amount
                .parse::<Chips>()
                .map(Self::Bet)
                .map_err(|_| format!("bad amount: {}", amount)),
            (Some("start"), None) => Ok(Self::Start),
            (Some("reset"), None) => Ok(Self::Reset),
            (Some("leave"), None) => Ok(Self::Leave),
            (Some("state"), None) => Ok(Self::State),
            (Some(word), None) => Action::try_from(word)
                .map(Self::Play)
                .map_err(|_| format!("unrecognized command: {}", s)),
            _ => Err(format!("unrecognized command: {}", s)),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Bet(amount) => write!(f, "bet {}", amount),
            Self::Play(action) => write!(f, "{}", action.to_string().to_lowercase()),
            Self::Start => write!(f, "start"),
            Self::Reset => write!(f, "reset"),
            Self::Leave => write!(f, "leave"),
            Self::State => write!(f, "state"),
        }
    }
}

#[derive(Serialize)]
struct Success<T: Serialize> {
    status: &'static str,
    #[serde(flatten)]
    body: T,
}

#[derive(Serialize)]
struct Failure<'a> {
    status: &'static str,
    message: &'a str,
}

/// Wire envelope between the engine and its clients.
///
/// Every reply is a flat JSON object tagged `"status": "success"` or
/// `"status": "error"`; snapshots are flattened into the success envelope
/// so clients never unwrap a nested payload.
pub struct Protocol;

impl Protocol {
    /// Parses a client message into a [`Command`].
    pub fn decode(s: &str) -> Result<Command, RoomError> {
        Command::try_from(s).map_err(RoomError::InvalidAction)
    }
    /// Wraps a serializable payload in the success envelope.
    pub fn success<T: Serialize>(body: T) -> String {
        serde_json::to_string(&Success {
            status: "success",
            body,
        })
        .unwrap_or_else(|_| Self::failure("serialization failed"))
    }
    /// Renders a rejection as the error envelope.
    pub fn failure(message: &str) -> String {
        format!(
            r#"{{"status":"error","message":{}}}"#,
            serde_json::Value::from(message)
        )
    }
}
