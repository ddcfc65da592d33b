use core::ffi::CStr;
use core::fmt;

use embassy_time::Duration;
use heapless::Vec;

use crate::constants::{
    MQTT_CLIENT_ID_MAX_LEN, MQTT_DEFAULT_PORT, MQTT_DEFAULT_TLS_PORT, MQTT_PUBLISH_OVERHEAD,
    TLS_BUFFER_MAX,
};
use crate::cstr;
use crate::util::{contains_any, starts_or_ends_with};

pub mod topic;

pub use topic::{Topic, TopicString, Topics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    EmptyHost,
    InvalidPort,
    InvalidQos(u8),
    EmptyClientId,
    ClientIdTooLong,
    InvalidClientId,
    InvalidPrefix,
    PasswordWithoutUsername,
    IncompleteClientIdentity,
    BufferTooSmall,
    TopicTooLong,
}

impl Error {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Error::EmptyHost => "mqtt broker host is empty",
            Error::InvalidPort => "mqtt broker port must be between 1 and 65535",
            Error::InvalidQos(_) => "mqtt QoS level must be 0, 1 or 2",
            Error::EmptyClientId => "mqtt client id is empty",
            Error::ClientIdTooLong => "mqtt client id is longer than 23 bytes",
            Error::InvalidClientId => "mqtt client id must be a single topic level",
            Error::InvalidPrefix => "mqtt topic prefix is empty or contains wildcards",
            Error::PasswordWithoutUsername => "mqtt password set without a username",
            Error::IncompleteClientIdentity => "mqtt client certificate and key must both be set",
            Error::BufferTooSmall => "mqtt buffer cannot hold the longest topic",
            Error::TopicTooLong => "mqtt topic does not fit the topic buffer",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidQos(level) => write!(f, "{} (got {})", self.as_str(), level),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// MQTT delivery guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum QoS {
    AtMostOnce = 0,
    AtLeastOnce = 1,
    ExactlyOnce = 2,
}

impl QoS {
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(QoS::AtMostOnce),
            1 => Some(QoS::AtLeastOnce),
            2 => Some(QoS::ExactlyOnce),
            _ => None,
        }
    }

    pub const fn level(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for QoS {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        QoS::from_level(level).ok_or(Error::InvalidQos(level))
    }
}

/// Kind of traffic a publish belongs to; each kind has its own QoS and retain policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageClass {
    Data,
    Status,
    // error, info and heartbeat: status QoS, never retained
    System,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QosPolicy {
    pub data: QoS,
    pub status: QoS,
    pub command: QoS,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetainPolicy {
    pub status: bool,
    pub data: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishPolicy {
    pub qos: QoS,
    pub retain: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlsConfig {
    // PEM CA certificate used to verify the broker (optional)
    pub ca_cert: Option<&'static str>,

    // PEM client certificate for mutual TLS (optional)
    pub client_cert: Option<&'static str>,

    // PEM private key matching `client_cert` (optional)
    pub client_key: Option<&'static str>,
}

impl TlsConfig {
    pub const fn has_client_identity(&self) -> bool {
        self.client_cert.is_some() && self.client_key.is_some()
    }

    /// NUL-terminated copy of the CA certificate, as mbedtls expects it.
    pub fn ca_cert_c_str(&self) -> Option<Result<Vec<u8, TLS_BUFFER_MAX>, cstr::Error>> {
        self.ca_cert.map(cstr::build_trimmed_c_str_vec)
    }

    /// Client certificate written NUL-terminated into `buffer`.
    pub fn client_cert_c_str<'buf>(
        &self,
        buffer: &'buf mut [u8],
    ) -> Option<Result<&'buf CStr, cstr::Error>> {
        self.client_cert
            .map(|pem| cstr::write_trimmed_c_str(pem, buffer))
    }

    /// Client private key written NUL-terminated into `buffer`.
    pub fn client_key_c_str<'buf>(
        &self,
        buffer: &'buf mut [u8],
    ) -> Option<Result<&'buf CStr, cstr::Error>> {
        self.client_key
            .map(|pem| cstr::write_trimmed_c_str(pem, buffer))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MqttConfig {
    // MQTT broker hostname or IP address
    pub broker_host: &'static str,

    // MQTT port (usually 1883 or 8883 for TLS)
    pub broker_port: u16,

    // MQTT username for authentication (optional)
    pub username: Option<&'static str>,

    // MQTT password for authentication (optional, requires a username)
    pub password: Option<&'static str>,

    // Unique client id for this node, also the second topic level
    pub client_id: &'static str,

    // Keepalive interval in seconds
    pub keepalive_secs: u16,

    // Delay before reconnecting in milliseconds
    pub reconnect_delay_ms: u64,

    // Base topic prefix
    pub topic_prefix: &'static str,

    pub qos: QosPolicy,

    // Maximum message size in bytes
    pub buffer_size: usize,

    pub retain: RetainPolicy,

    // Present when SSL is enabled
    pub tls: Option<TlsConfig>,
}

impl MqttConfig {
    pub fn keepalive(&self) -> Duration {
        Duration::from_secs(self.keepalive_secs.into())
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    pub const fn is_secure(&self) -> bool {
        self.tls.is_some()
    }

    /// True when the port is the usual one for the chosen transport (1883 plain, 8883 TLS).
    pub const fn uses_standard_port(&self) -> bool {
        if self.is_secure() {
            self.broker_port == MQTT_DEFAULT_TLS_PORT
        } else {
            self.broker_port == MQTT_DEFAULT_PORT
        }
    }

    pub const fn publish_policy(&self, class: MessageClass) -> PublishPolicy {
        match class {
            MessageClass::Data => PublishPolicy {
                qos: self.qos.data,
                retain: self.retain.data,
            },
            MessageClass::Status => PublishPolicy {
                qos: self.qos.status,
                retain: self.retain.status,
            },
            MessageClass::System => PublishPolicy {
                qos: self.qos.status,
                retain: false,
            },
            MessageClass::Command => PublishPolicy {
                qos: self.qos.command,
                retain: false,
            },
        }
    }

    /// Length of the longest topic derived from the prefix and client id.
    pub const fn longest_topic_len(&self) -> usize {
        let mut longest = 0;
        let mut i = 0;
        while i < Topic::ALL.len() {
            let len = topic::topic_len(self.topic_prefix, self.client_id, Topic::ALL[i].suffix());
            if len > longest {
                longest = len;
            }
            i += 1;
        }
        longest
    }

    pub const fn validate(&self) -> Result<(), Error> {
        if self.broker_host.is_empty() {
            return Err(Error::EmptyHost);
        }
        if self.broker_port == 0 {
            return Err(Error::InvalidPort);
        }

        if self.client_id.is_empty() {
            return Err(Error::EmptyClientId);
        }
        if self.client_id.len() > MQTT_CLIENT_ID_MAX_LEN {
            return Err(Error::ClientIdTooLong);
        }
        if contains_any(self.client_id, b"/+#\0") {
            return Err(Error::InvalidClientId);
        }

        if self.topic_prefix.is_empty()
            || contains_any(self.topic_prefix, b"+#\0")
            || starts_or_ends_with(self.topic_prefix, b'/')
        {
            return Err(Error::InvalidPrefix);
        }

        if self.password.is_some() && self.username.is_none() {
            return Err(Error::PasswordWithoutUsername);
        }

        if let Some(tls) = &self.tls {
            if tls.client_cert.is_some() != tls.client_key.is_some() {
                return Err(Error::IncompleteClientIdentity);
            }
        }

        if self.buffer_size < self.longest_topic_len() + MQTT_PUBLISH_OVERHEAD {
            return Err(Error::BufferTooSmall);
        }

        Ok(())
    }

    pub fn log_summary(&self) {
        log::info!(
            "MQTT broker {}:{} as {:?} (tls: {})",
            self.broker_host,
            self.broker_port,
            self.client_id,
            self.is_secure()
        );
        if !self.uses_standard_port() {
            log::warn!(
                "MQTT port {} is unusual for a {} connection",
                self.broker_port,
                if self.is_secure() { "TLS" } else { "plain TCP" }
            );
        }
        log::info!(
            "MQTT auth: user={:?} password={}",
            self.username,
            if self.password.is_some() { "<redacted>" } else { "<none>" }
        );
        log::debug!(
            "MQTT keepalive {}s, reconnect delay {}ms, buffer {} bytes",
            self.keepalive_secs,
            self.reconnect_delay_ms,
            self.buffer_size
        );
        log::debug!(
            "MQTT QoS data={} status={} command={}, retain status={} data={}",
            self.qos.data.level(),
            self.qos.status.level(),
            self.qos.command.level(),
            self.retain.status,
            self.retain.data
        );
    }
}
