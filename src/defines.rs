// Header-style names, all projections of CONFIG and TOPICS
use crate::config::{CONFIG, TOPICS};
use crate::wifi::TxPower;

// MQTT broker
pub const MQTT_BROKER_HOST: &str = CONFIG.mqtt.broker_host;
pub const MQTT_BROKER_PORT: u16 = CONFIG.mqtt.broker_port;

// MQTT authentication (optional)
pub const MQTT_USERNAME: Option<&str> = CONFIG.mqtt.username;
pub const MQTT_PASSWORD: Option<&str> = CONFIG.mqtt.password;

// MQTT client
pub const MQTT_CLIENT_ID: &str = CONFIG.mqtt.client_id;
/// Seconds
pub const MQTT_KEEPALIVE: u16 = CONFIG.mqtt.keepalive_secs;
/// Milliseconds
pub const MQTT_RECONNECT_DELAY: u64 = CONFIG.mqtt.reconnect_delay_ms;

pub const MQTT_TOPIC_PREFIX: &str = CONFIG.mqtt.topic_prefix;

// QoS levels
pub const MQTT_QOS_DATA: u8 = CONFIG.mqtt.qos.data.level();
pub const MQTT_QOS_STATUS: u8 = CONFIG.mqtt.qos.status.level();
pub const MQTT_QOS_COMMAND: u8 = CONFIG.mqtt.qos.command.level();

// Message settings
pub const MQTT_BUFFER_SIZE: usize = CONFIG.mqtt.buffer_size;
pub const MQTT_RETAIN_STATUS: bool = CONFIG.mqtt.retain.status;
pub const MQTT_RETAIN_DATA: bool = CONFIG.mqtt.retain.data;

// Topics
pub const MQTT_TOPIC_STATUS: &str = TOPICS.status;
pub const MQTT_TOPIC_ERROR: &str = TOPICS.error;
pub const MQTT_TOPIC_INFO: &str = TOPICS.info;
pub const MQTT_TOPIC_HEARTBEAT: &str = TOPICS.heartbeat;
pub const MQTT_TOPIC_COMMAND: &str = TOPICS.command;

// SSL/TLS
pub const MQTT_USE_SSL: bool = CONFIG.mqtt.is_secure();
pub const MQTT_CA_CERT: Option<&str> = match CONFIG.mqtt.tls {
    Some(tls) => tls.ca_cert,
    None => None,
};

// WiFi credentials
pub const WIFI_SSID: &str = CONFIG.wifi.ssid;
pub const WIFI_PASSWORD: &str = CONFIG.wifi.password;

// WiFi connection settings
/// Milliseconds
pub const WIFI_RETRY_DELAY: u64 = CONFIG.wifi.retry_delay_ms;
pub const WIFI_MAX_RETRIES: u8 = CONFIG.wifi.max_retries;
/// Milliseconds
pub const WIFI_TIMEOUT: u64 = CONFIG.wifi.timeout_ms;

pub const WIFI_TX_POWER: TxPower = CONFIG.wifi.tx_power;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mqtt::QoS;
    use pretty_assertions::assert_eq;

    #[test]
    fn qos_defines_are_valid_levels() {
        for level in [MQTT_QOS_DATA, MQTT_QOS_STATUS, MQTT_QOS_COMMAND] {
            assert!(QoS::from_level(level).is_some());
        }
    }

    #[test]
    fn topic_defines_follow_prefix_and_client_id() {
        let base_len = MQTT_TOPIC_PREFIX.len() + 1 + MQTT_CLIENT_ID.len();
        assert_eq!(&MQTT_TOPIC_STATUS[..base_len + 1], &MQTT_TOPIC_COMMAND[..base_len + 1]);
        assert!(MQTT_TOPIC_STATUS.starts_with(MQTT_TOPIC_PREFIX));
        assert_eq!(&MQTT_TOPIC_STATUS[base_len..], "/system/status");
        assert_eq!(&MQTT_TOPIC_ERROR[base_len..], "/system/error");
        assert_eq!(&MQTT_TOPIC_INFO[base_len..], "/system/info");
        assert_eq!(&MQTT_TOPIC_HEARTBEAT[base_len..], "/system/heartbeat");
        assert_eq!(&MQTT_TOPIC_COMMAND[base_len..], "/command/+");
    }

    #[test]
    fn ssl_define_tracks_tls_table() {
        assert_eq!(MQTT_USE_SSL, CONFIG.mqtt.tls.is_some());
        if !MQTT_USE_SSL {
            assert_eq!(MQTT_CA_CERT, None);
        }
    }

    #[test]
    fn wifi_defines_mirror_config() {
        assert_eq!(WIFI_TX_POWER, CONFIG.wifi.tx_power);
        assert!(WIFI_MAX_RETRIES >= 1);
        assert!(WIFI_TIMEOUT > 0);
        assert!(!WIFI_SSID.is_empty());
        assert_eq!(WIFI_PASSWORD.is_empty(), CONFIG.wifi.is_open());
        assert!(MQTT_BROKER_PORT > 0);
        assert_eq!(MQTT_BROKER_HOST, CONFIG.mqtt.broker_host);
        assert!(!(MQTT_USERNAME.is_none() && MQTT_PASSWORD.is_some()));
    }
}
