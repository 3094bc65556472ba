use crate::error::{ClientError, Result};
use serde::Deserialize;

/// Frame sent to the simulator: `{"type": .., "content": ..}`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OutboundEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

/// Frame pushed by the simulator: `{"Type": .., "Content": ..}`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InboundEnvelope {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Content")]
    pub content: String,
}

impl InboundEnvelope {
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ClientError::decode("message envelope", e))
    }
}

/// Inbound frames, classified by their type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    Status(String),
    /// Carries the snapshot as JSON text, decoded separately.
    Update(String),
    Filename(String),
    Output(String),
    Error(String),
    Unrecognized { kind: String, content: String },
}

impl From<InboundEnvelope> for ServerMessage {
    fn from(envelope: InboundEnvelope) -> Self {
        let InboundEnvelope { kind, content } = envelope;
        match kind.as_str() {
            "status" => Self::Status(content),
            "update" => Self::Update(content),
            "filename" => Self::Filename(content),
            "output" => Self::Output(content),
            "error" => Self::Error(content),
            _ => Self::Unrecognized { kind, content },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn as_str(self) -> &'static str {
        match self {
            Toggle::On => "on",
            Toggle::Off => "off",
        }
    }
}

impl From<bool> for Toggle {
    fn from(enabled: bool) -> Self {
        if enabled {
            Toggle::On
        } else {
            Toggle::Off
        }
    }
}

/// The command vocabulary the simulator understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    Hello,
    Load { path: String },
    Start,
    Stop,
    Step,
    Reset,
    Trace(Toggle),
    SystemTrace(Toggle),
    /// Next byte of program input.
    Input(char),
}

impl ClientMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::Hello => "hello",
            ClientMessage::Load { .. } => "load",
            ClientMessage::Start => "start",
            ClientMessage::Stop => "stop",
            ClientMessage::Step => "step",
            ClientMessage::Reset => "reset",
            ClientMessage::Trace(_) => "trace",
            ClientMessage::SystemTrace(_) => "system-trace",
            ClientMessage::Input(_) => "input",
        }
    }

    pub fn payload(&self) -> Option<String> {
        match self {
            ClientMessage::Load { path } => Some(path.clone()),
            ClientMessage::Trace(t) | ClientMessage::SystemTrace(t) => Some(t.as_str().to_string()),
            ClientMessage::Input(c) => Some(c.to_string()),
            ClientMessage::Hello
            | ClientMessage::Start
            | ClientMessage::Stop
            | ClientMessage::Step
            | ClientMessage::Reset => None,
        }
    }

    pub fn encode(&self) -> String {
        encode(self.kind(), self.payload().as_deref())
    }
}

/// Builds the wire text for one command. A missing payload is sent as `""`.
pub fn encode(kind: &str, payload: Option<&str>) -> String {
    serde_json::json!({
        "type": kind,
        "content": payload.unwrap_or_default(),
    })
    .to_string()
}
