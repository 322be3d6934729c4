//! Topic shapes and addressing-mode classification.
//!
//! Topics follow three conventions:
//! - `fanout~<service>`: broadcast to every healthy instance of `<service>`
//! - `<service>.<node>`: already a point-to-point address (direct)
//! - `<service>`: cast to one healthy instance of `<service>`

use std::fmt;

use crate::error::{MatchmakerError, Result};

/// Prefix marking a broadcast topic.
pub const FANOUT_PREFIX: &str = "fanout~";

/// Delimiter between the fanout marker and the service name.
pub const FANOUT_DELIMITER: char = '~';

/// Separator between service and node in a fully qualified topic.
pub const TOPIC_SEPARATOR: char = '.';

/// Addressing mode a topic resolves under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// Broadcast to all healthy instances.
    Fanout,
    /// Pass-through; the topic already names its destination.
    Direct,
    /// Unicast to one randomly chosen healthy instance.
    Topic,
}

impl AddressingMode {
    /// Match priority. Fanout must precede Direct so that `fanout~a.b`
    /// is a broadcast, and Direct must precede Topic so that qualified
    /// addresses never trigger a registry lookup.
    pub const PRIORITY: [AddressingMode; 3] = [
        AddressingMode::Fanout,
        AddressingMode::Direct,
        AddressingMode::Topic,
    ];

    /// Whether a topic has the shape this mode accepts.
    pub fn matches(self, topic: &str) -> bool {
        match self {
            AddressingMode::Fanout => topic.starts_with(FANOUT_PREFIX),
            AddressingMode::Direct => topic.contains(TOPIC_SEPARATOR),
            AddressingMode::Topic => {
                !topic.is_empty()
                    && !topic.contains(TOPIC_SEPARATOR)
                    && !topic.contains(FANOUT_DELIMITER)
            }
        }
    }

    /// Classify a topic, first match in `PRIORITY` order.
    pub fn classify(topic: &str) -> Result<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|mode| mode.matches(topic))
            .ok_or_else(|| MatchmakerError::malformed(topic, "no addressing mode accepts it"))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AddressingMode::Fanout => "fanout",
            AddressingMode::Direct => "direct",
            AddressingMode::Topic => "topic",
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service name of a broadcast topic (`fanout~compute` -> `compute`).
pub fn fanout_service(topic: &str) -> Result<&str> {
    let service = topic
        .strip_prefix(FANOUT_PREFIX)
        .ok_or_else(|| MatchmakerError::malformed(topic, "missing 'fanout~' prefix"))?;
    if service.is_empty() {
        return Err(MatchmakerError::malformed(topic, "empty service name"));
    }
    Ok(service)
}

/// Discoverable service portion of a topic: everything before the first `.`.
pub fn service_name(topic: &str) -> &str {
    topic
        .split_once(TOPIC_SEPARATOR)
        .map_or(topic, |(service, _)| service)
}
