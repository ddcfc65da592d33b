use core::fmt;

use crate::mqtt::{self, MqttConfig, QoS, QosPolicy, RetainPolicy, Topics};
use crate::wifi::{self, TxPower, WifiConfig};

pub struct Config {
    // Broker connection, topics and publish policy
    pub mqtt: MqttConfig,

    // Access point credentials and radio settings
    pub wifi: WifiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Mqtt(mqtt::Error),
    Wifi(wifi::Error),
}

impl Error {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Error::Mqtt(e) => e.as_str(),
            Error::Wifi(e) => e.as_str(),
        }
    }
}

impl From<mqtt::Error> for Error {
    fn from(e: mqtt::Error) -> Self {
        Error::Mqtt(e)
    }
}

impl From<wifi::Error> for Error {
    fn from(e: wifi::Error) -> Self {
        Error::Wifi(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Mqtt(e) => write!(f, "invalid mqtt config: {}", e),
            Error::Wifi(e) => write!(f, "invalid wifi config: {}", e),
        }
    }
}

impl Config {
    pub const fn validate(&self) -> Result<(), Error> {
        if let Err(e) = self.mqtt.validate() {
            return Err(Error::Mqtt(e));
        }
        if let Err(e) = self.wifi.validate() {
            return Err(Error::Wifi(e));
        }
        Ok(())
    }

    pub fn log_summary(&self) {
        log::info!("Sensor hub config v{}", crate::constants::VERSION);
        self.wifi.log_summary();
        self.mqtt.log_summary();
    }
}

// config values are generated at compile time
include!(concat!(env!("OUT_DIR"), "/config.rs"));

macro_rules! node_topic {
    ($suffix:literal) => {
        concat!(mqtt_topic_prefix!(), "/", mqtt_client_id!(), "/", $suffix)
    };
}

pub const TOPICS: Topics = Topics {
    status: node_topic!("system/status"),
    error: node_topic!("system/error"),
    info: node_topic!("system/info"),
    heartbeat: node_topic!("system/heartbeat"),
    command: node_topic!("command/+"),
};

// Reject an invalid cfg.toml at compile time
const _: () = match CONFIG.validate() {
    Ok(()) => (),
    Err(e) => panic!("{}", e.as_str()),
};
