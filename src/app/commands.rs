//! Inbound directives from the remote command source.
//!
//! These represent operator intent fetched over HTTP that the
//! [`interpreter`](crate::control::interpreter) applies to the
//! [`ControlState`](crate::control::state::ControlState).

use serde_json::Value;

/// Source tag that marks a directive as issued by a person at the UI.
pub const USER_SOURCE: &str = "user";

/// What a directive addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandTarget {
    /// Indicator enable/disable (`"on"` enables).
    Led,
    /// Auto-fan policy enable/disable (`"enable"` enables).
    AutoFan,
    /// Direct fan switch (`"on"` runs it).  Only honoured from the user.
    Fan,
    /// Anything this firmware does not understand yet.
    #[default]
    Unknown,
}

impl CommandTarget {
    pub fn from_wire(name: &str) -> Self {
        match name {
            "led" => Self::Led,
            "autoFan" => Self::AutoFan,
            "fan" => Self::Fan,
            _ => Self::Unknown,
        }
    }
}

/// One remote-issued directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlCommand {
    pub target: CommandTarget,
    pub action: String,
    pub source: Option<String>,
}

impl ControlCommand {
    pub fn new(target: CommandTarget, action: &str, source: Option<&str>) -> Self {
        Self {
            target,
            action: action.into(),
            source: source.map(Into::into),
        }
    }

    /// Build from one decoded directive.  A field that is missing, `null`
    /// or not a string reads as absent; a non-object reads as an empty
    /// directive for an unknown target.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_str);
        Self {
            target: field("target").map_or(CommandTarget::Unknown, CommandTarget::from_wire),
            action: field("action").unwrap_or_default().into(),
            source: field("source").map(Into::into),
        }
    }

    /// `true` if this directive came from a person rather than automation.
    pub fn is_from_user(&self) -> bool {
        self.source.as_deref() == Some(USER_SOURCE)
    }
}
