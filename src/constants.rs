/// Current crate version, embedded in the node's info message
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum size for a NUL-terminated PEM blob handed to the TLS stack
pub const TLS_BUFFER_MAX: usize = 4096;

/// Capacity of the `heapless::String` used for runtime topic building
pub const TOPIC_CAPACITY: usize = 128;

/// Longest client id every MQTT 3.1.1 broker must accept
pub const MQTT_CLIENT_ID_MAX_LEN: usize = 23;

/// PUBLISH framing around the topic: fixed header (up to 5), topic length (2), packet id (2)
pub const MQTT_PUBLISH_OVERHEAD: usize = 5 + 2 + 2;

/// Standard MQTT port without TLS
pub const MQTT_DEFAULT_PORT: u16 = 1883;
/// Standard MQTT port with TLS
pub const MQTT_DEFAULT_TLS_PORT: u16 = 8883;

/// 802.11 limits the SSID to 32 octets
pub const WIFI_SSID_MAX_LEN: usize = 32;
/// WPA2 passphrase bounds (64 is the raw hex PSK form)
pub const WIFI_PSK_MIN_LEN: usize = 8;
pub const WIFI_PSK_MAX_LEN: usize = 64;
