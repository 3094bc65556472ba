use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::lifecycle::{Controls, Lifecycle, SessionState, StatusEvent};
use crate::locator::{self, MemoryCursor};
use crate::protocol::{self, ClientMessage, InboundEnvelope, ServerMessage, Toggle};
use crate::snapshot::Snapshot;
use crate::transcript::Transcript;
use crate::views::SnapshotView;
use tracing::{debug, info, warn};

/// Raw text sink of the socket.
///
/// Implementations hand the frame over and return; nothing waits for the
/// simulator to acknowledge it.
pub trait Transport {
    fn send_text(&self, text: String) -> Result<()>;
}

/// Encodes commands onto a [`Transport`].
#[derive(Debug)]
pub struct CommandChannel<T> {
    transport: T,
}

impl<T: Transport> CommandChannel<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn send(&self, kind: &str, payload: Option<&str>) -> Result<()> {
        let text = protocol::encode(kind, payload);
        debug!(kind, "sending command");
        self.transport.send_text(text)
    }

    pub fn send_message(&self, message: &ClientMessage) -> Result<()> {
        self.send(message.kind(), message.payload().as_deref())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// What a dispatched message changed, for the UI to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Lifecycle {
        state: SessionState,
        controls: Controls,
    },
    Snapshot(Box<SnapshotView>),
    Filename(String),
    /// Text appended to the transcript.
    Output(String),
    /// Unknown type tag or status value. Nothing changed.
    Unrecognized { kind: String, content: String },
}

/// One connection to the simulator.
///
/// Created with the handshake already sent. Once closed it refuses every
/// further command and message.
#[derive(Debug)]
pub struct Session<T> {
    channel: CommandChannel<T>,
    lifecycle: Lifecycle,
    trace: bool,
    system_trace: bool,
    loading: bool,
    filename: Option<String>,
    transcript: Transcript,
    snapshot: Option<Snapshot>,
    closed: Option<String>,
    config: ClientConfig,
}

impl<T: Transport> Session<T> {
    pub fn open(transport: T, config: ClientConfig) -> Result<Self> {
        let session = Self {
            channel: CommandChannel::new(transport),
            lifecycle: Lifecycle::default(),
            trace: false,
            system_trace: false,
            loading: false,
            filename: None,
            transcript: Transcript::default(),
            snapshot: None,
            closed: None,
            config,
        };
        session.channel.send_message(&ClientMessage::Hello)?;
        info!("session opened");
        Ok(session)
    }

    fn ensure_open(&self) -> Result<()> {
        match &self.closed {
            Some(reason) => Err(ClientError::closed(reason.clone())),
            None => Ok(()),
        }
    }

    fn send(&mut self, message: ClientMessage) -> Result<()> {
        self.ensure_open()?;
        let sent = self.channel.send_message(&message);
        if let Err(ClientError::ChannelClosed { reason }) = &sent {
            warn!(%reason, "transport failed, closing session");
            self.closed = Some(reason.clone());
        }
        sent
    }

    pub fn load(&mut self, path: &str) -> Result<()> {
        self.send(ClientMessage::Load {
            path: path.to_string(),
        })?;
        self.filename = Some(path.to_string());
        self.loading = true;
        self.lifecycle.begin_load();
        Ok(())
    }

    pub fn start(&mut self) -> Result<()> {
        self.send(ClientMessage::Start)
    }

    pub fn stop(&mut self) -> Result<()> {
        self.send(ClientMessage::Stop)
    }

    pub fn step(&mut self) -> Result<()> {
        self.send(ClientMessage::Step)
    }

    pub fn reset(&mut self) -> Result<()> {
        self.send(ClientMessage::Reset)
    }

    /// Flips instruction tracing and returns the new setting.
    pub fn toggle_trace(&mut self) -> Result<bool> {
        let wanted = !self.trace;
        self.send(ClientMessage::Trace(Toggle::from(wanted)))?;
        self.trace = wanted;
        Ok(wanted)
    }

    pub fn toggle_system_trace(&mut self) -> Result<bool> {
        let wanted = !self.system_trace;
        self.send(ClientMessage::SystemTrace(Toggle::from(wanted)))?;
        self.system_trace = wanted;
        Ok(wanted)
    }

    pub fn input(&mut self, ch: char) -> Result<()> {
        self.send(ClientMessage::Input(ch))
    }

    /// Handles one inbound frame to completion.
    ///
    /// `error` frames come back as [`ClientError::Simulator`]; the session
    /// stays usable after every error except a closed channel.
    pub fn dispatch(&mut self, text: &str) -> Result<Event> {
        self.ensure_open()?;
        let envelope = InboundEnvelope::parse(text)?;
        debug!(kind = %envelope.kind, "dispatching");
        let message = ServerMessage::from(envelope);
        match message {
            ServerMessage::Status(content) => match StatusEvent::parse(&content) {
                Some(event) => {
                    self.loading = false;
                    let state = self.lifecycle.apply(event);
                    info!(%state, "simulator status");
                    Ok(Event::Lifecycle {
                        state,
                        controls: self.lifecycle.controls(),
                    })
                }
                None => Ok(unrecognized("status".to_string(), content)),
            },
            ServerMessage::Update(payload) => {
                let snapshot = Snapshot::decode(&payload)?;
                debug!(pc = snapshot.pc(), mode = %snapshot.mode, "snapshot");
                let view = SnapshotView::from(&snapshot);
                self.snapshot = Some(snapshot);
                Ok(Event::Snapshot(Box::new(view)))
            }
            ServerMessage::Filename(name) => {
                self.filename = Some(name.clone());
                Ok(Event::Filename(name))
            }
            ServerMessage::Output(content) => {
                Ok(Event::Output(self.transcript.append(&content).to_string()))
            }
            ServerMessage::Error(message) => {
                warn!(%message, "simulator error");
                Err(ClientError::Simulator(message))
            }
            ServerMessage::Unrecognized { kind, content } => Ok(unrecognized(kind, content)),
        }
    }

    /// Marks the session dead and returns the error to show the user.
    pub fn close(&mut self, reason: impl Into<String>) -> ClientError {
        let reason = reason.into();
        warn!(%reason, "session closed");
        self.closed = Some(reason.clone());
        ClientError::closed(reason)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_some()
    }

    /// Finds `input` in the memory of the latest snapshot.
    pub fn locate(&self, input: &str) -> Result<Option<MemoryCursor>> {
        match &self.snapshot {
            Some(snapshot) => locator::locate_within(input, snapshot.memory.len()),
            None => locator::locate(input),
        }
    }

    pub fn state(&self) -> SessionState {
        self.lifecycle.state()
    }

    pub fn controls(&self) -> Controls {
        self.lifecycle.controls()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace
    }

    pub fn system_trace_enabled(&self) -> bool {
        self.system_trace
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn channel(&self) -> &CommandChannel<T> {
        &self.channel
    }
}

fn unrecognized(kind: String, content: String) -> Event {
    warn!(%kind, %content, "ignoring unrecognized message");
    Event::Unrecognized { kind, content }
}
