use std::error::Error;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    pub mqtt: RawMqtt,
    pub wifi: RawWifi,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawMqtt {
    pub broker_host: String,
    #[serde(default = "default_broker_port")]
    pub broker_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_id: String,
    #[serde(default = "default_keepalive")]
    pub keepalive_secs: u16,
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_ms: u64,
    pub topic_prefix: String,
    #[serde(default)]
    pub qos: RawQos,
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    #[serde(default)]
    pub retain: RawRetain,
    pub tls: Option<RawTls>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RawQos {
    pub data: u8,
    pub status: u8,
    pub command: u8,
}

impl Default for RawQos {
    fn default() -> Self {
        Self {
            data: 0,
            status: 1,
            command: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RawRetain {
    pub status: bool,
    pub data: bool,
}

impl Default for RawRetain {
    fn default() -> Self {
        Self {
            status: true,
            data: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTls {
    #[serde(default = "default_use_ssl")]
    pub use_ssl: bool,
    pub ca_cert: Option<String>,
    pub client_cert: Option<String>,
    pub client_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawWifi {
    pub ssid: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_wifi_retry_delay")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_wifi_max_retries")]
    pub max_retries: u8,
    #[serde(default = "default_wifi_timeout")]
    pub timeout_ms: u64,
    #[serde(default = "default_tx_power")]
    pub tx_power: String,
}

fn default_broker_port() -> u16 {
    1883
}

fn default_keepalive() -> u16 {
    60
}

fn default_reconnect_delay() -> u64 {
    5000
}

fn default_buffer_size() -> usize {
    512
}

fn default_use_ssl() -> bool {
    true
}

fn default_wifi_retry_delay() -> u64 {
    500
}

fn default_wifi_max_retries() -> u8 {
    10
}

fn default_wifi_timeout() -> u64 {
    30000
}

fn default_tx_power() -> String {
    "WIFI_POWER_19_5dBm".into()
}

/// Generated `config.rs` source plus `cargo:warning` lines for the build script.
pub struct Generated {
    pub code: String,
    pub warnings: Vec<String>,
}

impl RawConfig {
    pub fn parse(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let raw: RawConfig = toml::from_str(toml_str)?;
        raw.check()?;
        Ok(raw)
    }

    // Shape errors the typed config cannot express
    fn check(&self) -> Result<(), Box<dyn Error>> {
        if self.mqtt.broker_port == 0 {
            return Err("mqtt.broker_port must be between 1 and 65535".into());
        }

        for (field, level) in [
            ("data", self.mqtt.qos.data),
            ("status", self.mqtt.qos.status),
            ("command", self.mqtt.qos.command),
        ] {
            if level > 2 {
                return Err(format!("mqtt.qos.{field} must be 0, 1 or 2 (got {level})").into());
            }
        }

        if let Some(tls) = &self.mqtt.tls {
            let has_material =
                tls.ca_cert.is_some() || tls.client_cert.is_some() || tls.client_key.is_some();
            if !tls.use_ssl && has_material {
                return Err("mqtt.tls has certificates but use_ssl = false; remove them or enable use_ssl".into());
            }
        }

        Ok(())
    }

    pub fn is_secure(&self) -> bool {
        self.mqtt.tls.as_ref().is_some_and(|tls| tls.use_ssl)
    }

    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.is_secure() && self.mqtt.broker_port == 1883 {
            warnings.push(
                "mqtt.tls is enabled but broker_port is 1883 (TLS brokers usually listen on 8883)".into(),
            );
        }
        if !self.is_secure() && self.mqtt.broker_port == 8883 {
            warnings.push("mqtt.broker_port is 8883 but mqtt.tls is not enabled".into());
        }
        warnings
    }

    fn qos_expr(level: u8) -> String {
        format!("match QoS::from_level({level}) {{ Some(qos) => qos, None => panic!(\"invalid QoS level\") }}")
    }

    fn tls_expr(&self) -> String {
        match &self.mqtt.tls {
            Some(tls) if tls.use_ssl => format!(
                "Some(crate::mqtt::TlsConfig {{ ca_cert: {:?}, client_cert: {:?}, client_key: {:?} }})",
                tls.ca_cert, tls.client_cert, tls.client_key
            ),
            _ => "None".into(),
        }
    }

    pub fn generate(&self) -> Generated {
        let code = format!(
            r#"
        macro_rules! mqtt_topic_prefix {{
            () => {{
                {prefix:?}
            }};
        }}

        macro_rules! mqtt_client_id {{
            () => {{
                {client_id:?}
            }};
        }}

        pub const CONFIG: Config = Config {{
            mqtt: MqttConfig {{
                broker_host: {host:?},
                broker_port: {port},
                username: {user:?},
                password: {pass:?},
                client_id: mqtt_client_id!(),
                keepalive_secs: {keepalive},
                reconnect_delay_ms: {reconnect},
                topic_prefix: mqtt_topic_prefix!(),
                qos: QosPolicy {{
                    data: {qos_data},
                    status: {qos_status},
                    command: {qos_command},
                }},
                buffer_size: {buffer},
                retain: RetainPolicy {{
                    status: {retain_status},
                    data: {retain_data},
                }},
                tls: {tls},
            }},
            wifi: WifiConfig {{
                ssid: {ssid:?},
                password: {psk:?},
                retry_delay_ms: {retry_delay},
                max_retries: {max_retries},
                timeout_ms: {timeout},
                tx_power: match TxPower::from_name({tx_power:?}) {{
                    Some(power) => power,
                    None => panic!("unknown wifi.tx_power"),
                }},
            }},
        }};
    "#,
            prefix = self.mqtt.topic_prefix,
            client_id = self.mqtt.client_id,
            host = self.mqtt.broker_host,
            port = self.mqtt.broker_port,
            user = self.mqtt.username,
            pass = self.mqtt.password,
            keepalive = self.mqtt.keepalive_secs,
            reconnect = self.mqtt.reconnect_delay_ms,
            qos_data = Self::qos_expr(self.mqtt.qos.data),
            qos_status = Self::qos_expr(self.mqtt.qos.status),
            qos_command = Self::qos_expr(self.mqtt.qos.command),
            buffer = self.mqtt.buffer_size,
            retain_status = self.mqtt.retain.status,
            retain_data = self.mqtt.retain.data,
            tls = self.tls_expr(),
            ssid = self.wifi.ssid,
            psk = self.wifi.password,
            retry_delay = self.wifi.retry_delay_ms,
            max_retries = self.wifi.max_retries,
            timeout = self.wifi.timeout_ms,
            tx_power = self.wifi.tx_power,
        );

        Generated {
            code,
            warnings: self.warnings(),
        }
    }
}
