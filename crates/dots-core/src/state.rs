use std::fmt;
use std::str::FromStr;

/// Behavioral state shown by the indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum State {
    /// Placeholder before the first `set_state`; never re-entered.
    #[default]
    Unknown,
    Idle,
    Listening,
    UserSpeaking,
    Thinking,
    Replying,
    Incomprehension,
}

impl State {
    /// Every state a collaborator may request.
    pub const ALL: [State; 6] = [
        State::Idle,
        State::Listening,
        State::UserSpeaking,
        State::Thinking,
        State::Replying,
        State::Incomprehension,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            State::Unknown => "unknown",
            State::Idle => "idle",
            State::Listening => "listening",
            State::UserSpeaking => "user-speaking",
            State::Thinking => "thinking",
            State::Replying => "replying",
            State::Incomprehension => "incomprehension",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown state name: {0:?}")]
pub struct UnknownState(pub String);

impl FromStr for State {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "idle" => Ok(State::Idle),
            "listening" | "listen" => Ok(State::Listening),
            "user-speaking" | "user-speaks" | "speaking" => Ok(State::UserSpeaking),
            "thinking" | "think" => Ok(State::Thinking),
            "replying" | "reply" => Ok(State::Replying),
            "incomprehension" | "confused" => Ok(State::Incomprehension),
            _ => Err(UnknownState(s.to_string())),
        }
    }
}

/// Where the engine is within a state's entry protocol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No surface measured yet; a requested state waits for `init`.
    #[default]
    Uninitialized,
    /// Moving to the canonical pose the choreography starts from.
    Resetting,
    /// The state's own choreography is running.
    Active,
    /// The last driver finished and nothing is animating.
    Settled,
}
