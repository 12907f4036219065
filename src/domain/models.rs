use serde::{Deserialize, Serialize};

/// A single ranged beacon as reported by the ranging collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeaconSighting {
    /// Bluetooth address or other stable identifier
    pub identifier: String,
    /// Estimated distance in metres
    pub distance: f64,
    /// Advertised device name
    #[serde(default)]
    pub name: String,
}

impl BeaconSighting {
    pub fn new(identifier: impl Into<String>, distance: f64, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            distance,
            name: name.into(),
        }
    }
}

/// Marker lifecycle notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerEvent {
    Added {
        identifier: String,
        label: String,
        position: f64,
    },
    Moved {
        identifier: String,
        position: f64,
    },
    Removed {
        identifier: String,
    },
}

impl MarkerEvent {
    pub fn identifier(&self) -> &str {
        match self {
            MarkerEvent::Added { identifier, .. }
            | MarkerEvent::Moved { identifier, .. }
            | MarkerEvent::Removed { identifier } => identifier,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    BeaconsRanged(Vec<BeaconSighting>),
    RangingStatus(RangingStatus),
    LogMessage(StatusMessage),
}

#[derive(Debug, Clone)]
pub enum RangingCommand {
    Start,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Radar,
    Beacons,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangingStatus {
    Idle,
    Ranging,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub severity: MessageSeverity,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>, severity: MessageSeverity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    Info,
    Success,
    Warning,
    Error,
}
