use std::fmt;

bitflags::bitflags! {
    /// Set of enabled session controls.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Controls: u8 {
        const LOAD  = 0x01;
        const START = 0x02;
        const STOP  = 0x04;
        const STEP  = 0x08;
        const RESET = 0x10;
    }
}

impl Controls {
    /// Everything but `stop`; toggled together on most transitions.
    pub const EXECUTION: Controls = Controls::LOAD
        .union(Controls::START)
        .union(Controls::STEP)
        .union(Controls::RESET);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Ready,
    Loaded,
    Running,
    Finished,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Ready => "ready",
            SessionState::Loaded => "loaded",
            SessionState::Running => "running",
            SessionState::Finished => "finished",
        };
        f.write_str(label)
    }
}

/// Status values the simulator sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    Ready,
    Loaded,
    Running,
    Stopped,
    Finished,
}

impl StatusEvent {
    pub fn parse(content: &str) -> Option<Self> {
        match content {
            "ready" => Some(StatusEvent::Ready),
            "loaded" => Some(StatusEvent::Loaded),
            "running" => Some(StatusEvent::Running),
            "stopped" => Some(StatusEvent::Stopped),
            "finished" => Some(StatusEvent::Finished),
            _ => None,
        }
    }

    pub fn target(self) -> SessionState {
        match self {
            StatusEvent::Ready => SessionState::Ready,
            StatusEvent::Loaded => SessionState::Loaded,
            StatusEvent::Running => SessionState::Running,
            StatusEvent::Stopped | StatusEvent::Finished => SessionState::Finished,
        }
    }
}

/// Simulator lifecycle plus the controls it allows.
///
/// Each event only touches the controls it names; the rest keep their value.
/// `loaded` leaves `stop` alone, so a `running -> loaded` sequence keeps
/// `stop` enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    state: SessionState,
    controls: Controls,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            state: SessionState::Ready,
            controls: Controls::LOAD,
        }
    }
}

impl Lifecycle {
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn is_enabled(&self, control: Controls) -> bool {
        self.controls.contains(control)
    }

    pub fn apply(&mut self, event: StatusEvent) -> SessionState {
        match event {
            StatusEvent::Ready => self.controls.insert(Controls::LOAD),
            StatusEvent::Loaded => self.controls.insert(Controls::EXECUTION),
            StatusEvent::Running => {
                self.controls.remove(Controls::EXECUTION);
                self.controls.insert(Controls::STOP);
            }
            StatusEvent::Stopped | StatusEvent::Finished => {
                self.controls.insert(Controls::EXECUTION);
                self.controls.remove(Controls::STOP);
            }
        }
        self.state = event.target();
        self.state
    }

    /// Greys out `load` while a load request is in flight.
    pub(crate) fn begin_load(&mut self) {
        self.controls.remove(Controls::LOAD);
    }
}
