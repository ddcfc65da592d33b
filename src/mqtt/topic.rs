use core::fmt::Write;

use heapless::String;

use super::{Error, MessageClass};
use crate::constants::TOPIC_CAPACITY;

/// Buffer large enough for any node topic.
pub type TopicString = String<TOPIC_CAPACITY>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Status,
    Error,
    Info,
    Heartbeat,
    Command,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Status,
        Topic::Error,
        Topic::Info,
        Topic::Heartbeat,
        Topic::Command,
    ];

    pub const fn suffix(self) -> &'static str {
        match self {
            Topic::Status => "system/status",
            Topic::Error => "system/error",
            Topic::Info => "system/info",
            Topic::Heartbeat => "system/heartbeat",
            Topic::Command => "command/+",
        }
    }

    pub const fn class(self) -> MessageClass {
        match self {
            Topic::Status => MessageClass::Status,
            Topic::Error | Topic::Info | Topic::Heartbeat => MessageClass::System,
            Topic::Command => MessageClass::Command,
        }
    }

    /// The command topic is a subscription filter; all others are publish topics.
    pub const fn is_filter(self) -> bool {
        matches!(self, Topic::Command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topics {
    pub status: &'static str,
    pub error: &'static str,
    pub info: &'static str,
    pub heartbeat: &'static str,
    pub command: &'static str,
}

impl Topics {
    pub const fn get(&self, topic: Topic) -> &'static str {
        match topic {
            Topic::Status => self.status,
            Topic::Error => self.error,
            Topic::Info => self.info,
            Topic::Heartbeat => self.heartbeat,
            Topic::Command => self.command,
        }
    }

    /// Extracts `<name>` from an incoming `<prefix>/<client-id>/command/<name>`.
    pub fn command_name<'t>(&self, topic: &'t str) -> Option<&'t str> {
        if !matches(self.command, topic) {
            return None;
        }
        topic.rsplit('/').next().filter(|name| !name.is_empty())
    }
}

pub(crate) const fn topic_len(prefix: &str, client_id: &str, suffix: &str) -> usize {
    prefix.len() + 1 + client_id.len() + 1 + suffix.len()
}

/// Joins `prefix`, `client_id` and `suffix` with `/`.
pub fn build<const N: usize>(
    prefix: &str,
    client_id: &str,
    suffix: &str,
) -> Result<String<N>, Error> {
    let mut topic: String<N> = String::new();
    write!(topic, "{}/{}/{}", prefix, client_id, suffix).map_err(|_| Error::TopicTooLong)?;
    Ok(topic)
}

/// MQTT topic filter matching with `+` (one level) and `#` (remaining levels).
pub fn matches(filter: &str, topic: &str) -> bool {
    // Filters starting with a wildcard never match `$`-topics
    if topic.starts_with('$') && (filter.starts_with('+') || filter.starts_with('#')) {
        return false;
    }

    let mut filter_levels = filter.split('/');
    let mut topic_levels = topic.split('/');

    loop {
        match (filter_levels.next(), topic_levels.next()) {
            (Some("#"), _) => return filter_levels.next().is_none(),
            (Some("+"), Some(_)) => {}
            (Some(f), Some(t)) if f == t => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kitchen(topic: Topic) -> TopicString {
        build("sensor-hub", "kitchen-node", topic.suffix()).unwrap()
    }

    #[test]
    fn builds_kitchen_node_topics() {
        assert_eq!(kitchen(Topic::Status), "sensor-hub/kitchen-node/system/status");
        assert_eq!(kitchen(Topic::Error), "sensor-hub/kitchen-node/system/error");
        assert_eq!(kitchen(Topic::Info), "sensor-hub/kitchen-node/system/info");
        assert_eq!(kitchen(Topic::Heartbeat), "sensor-hub/kitchen-node/system/heartbeat");
        assert_eq!(kitchen(Topic::Command), "sensor-hub/kitchen-node/command/+");
    }

    #[test]
    fn build_reports_overflow() {
        let topic: Result<String<16>, _> = build("sensor-hub", "kitchen-node", "system/status");
        assert_eq!(topic, Err(Error::TopicTooLong));
    }

    #[test]
    fn topic_len_matches_build() {
        for topic in Topic::ALL {
            assert_eq!(
                topic_len("sensor-hub", "kitchen-node", topic.suffix()),
                kitchen(topic).len()
            );
        }
    }

    #[test]
    fn only_command_is_a_filter() {
        for topic in Topic::ALL {
            assert_eq!(topic.is_filter(), topic == Topic::Command);
            assert_eq!(topic.is_filter(), topic.class() == MessageClass::Command);
        }
    }

    #[test]
    fn only_status_topic_has_status_class() {
        assert_eq!(Topic::Status.class(), MessageClass::Status);
        assert_eq!(Topic::Error.class(), MessageClass::System);
        assert_eq!(Topic::Info.class(), MessageClass::System);
        assert_eq!(Topic::Heartbeat.class(), MessageClass::System);
    }

    #[test]
    fn filter_matching() {
        assert!(matches("sensor-hub/kitchen-node/command/+", "sensor-hub/kitchen-node/command/reboot"));
        assert!(!matches("sensor-hub/kitchen-node/command/+", "sensor-hub/kitchen-node/command/a/b"));
        assert!(!matches("sensor-hub/kitchen-node/command/+", "sensor-hub/kitchen-node/command"));
        assert!(matches("sensor-hub/#", "sensor-hub/kitchen-node/system/status"));
        assert!(matches("sensor-hub/#", "sensor-hub"));
        assert!(matches("+/+/system/status", "sensor-hub/kitchen-node/system/status"));
        assert!(!matches("sensor-hub/+/system/status", "sensor-hub/kitchen-node/system/error"));
        assert!(!matches("#", "$SYS/broker/uptime"));
        assert!(matches("$SYS/#", "$SYS/broker/uptime"));
    }

    #[test]
    fn command_name_from_incoming_topic() {
        let topics = Topics {
            status: "sensor-hub/kitchen-node/system/status",
            error: "sensor-hub/kitchen-node/system/error",
            info: "sensor-hub/kitchen-node/system/info",
            heartbeat: "sensor-hub/kitchen-node/system/heartbeat",
            command: "sensor-hub/kitchen-node/command/+",
        };

        assert_eq!(topics.command_name("sensor-hub/kitchen-node/command/reboot"), Some("reboot"));
        assert_eq!(topics.command_name("sensor-hub/kitchen-node/command/"), None);
        assert_eq!(topics.command_name("sensor-hub/garage-node/command/reboot"), None);
        assert_eq!(topics.get(Topic::Heartbeat), "sensor-hub/kitchen-node/system/heartbeat");
    }
}
