use core::fmt;

use embassy_time::Duration;

use crate::constants::{WIFI_PSK_MAX_LEN, WIFI_PSK_MIN_LEN, WIFI_SSID_MAX_LEN};
use crate::util::str_eq;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    EmptySsid,
    SsidTooLong,
    InvalidPasswordLength,
    NoRetries,
    ZeroTimeout,
    UnknownTxPower,
}

impl Error {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Error::EmptySsid => "wifi ssid is empty",
            Error::SsidTooLong => "wifi ssid is longer than 32 bytes",
            Error::InvalidPasswordLength => "wifi password must be empty or 8 to 64 bytes",
            Error::NoRetries => "wifi max_retries must be at least 1",
            Error::ZeroTimeout => "wifi timeout must be greater than zero",
            Error::UnknownTxPower => "unknown wifi tx power level",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Radio transmit power levels supported by the ESP32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxPower {
    Dbm19_5,
    Dbm19,
    Dbm18_5,
    Dbm17,
    Dbm15,
    Dbm13,
    Dbm11,
    Dbm8_5,
    Dbm7,
    Dbm5,
    Dbm2,
    DbmMinus1,
}

impl TxPower {
    /// Strongest first.
    pub const ALL: [TxPower; 12] = [
        TxPower::Dbm19_5,
        TxPower::Dbm19,
        TxPower::Dbm18_5,
        TxPower::Dbm17,
        TxPower::Dbm15,
        TxPower::Dbm13,
        TxPower::Dbm11,
        TxPower::Dbm8_5,
        TxPower::Dbm7,
        TxPower::Dbm5,
        TxPower::Dbm2,
        TxPower::DbmMinus1,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            TxPower::Dbm19_5 => "WIFI_POWER_19_5dBm",
            TxPower::Dbm19 => "WIFI_POWER_19dBm",
            TxPower::Dbm18_5 => "WIFI_POWER_18_5dBm",
            TxPower::Dbm17 => "WIFI_POWER_17dBm",
            TxPower::Dbm15 => "WIFI_POWER_15dBm",
            TxPower::Dbm13 => "WIFI_POWER_13dBm",
            TxPower::Dbm11 => "WIFI_POWER_11dBm",
            TxPower::Dbm8_5 => "WIFI_POWER_8_5dBm",
            TxPower::Dbm7 => "WIFI_POWER_7dBm",
            TxPower::Dbm5 => "WIFI_POWER_5dBm",
            TxPower::Dbm2 => "WIFI_POWER_2dBm",
            TxPower::DbmMinus1 => "WIFI_POWER_MINUS_1dBm",
        }
    }

    pub const fn from_name(name: &str) -> Option<Self> {
        let mut i = 0;
        while i < Self::ALL.len() {
            if str_eq(Self::ALL[i].name(), name) {
                return Some(Self::ALL[i]);
            }
            i += 1;
        }
        None
    }

    /// Value for `esp_wifi_set_max_tx_power`, in units of 0.25 dBm.
    pub const fn quarter_dbm(self) -> i8 {
        match self {
            TxPower::Dbm19_5 => 78,
            TxPower::Dbm19 => 76,
            TxPower::Dbm18_5 => 74,
            TxPower::Dbm17 => 68,
            TxPower::Dbm15 => 60,
            TxPower::Dbm13 => 52,
            TxPower::Dbm11 => 44,
            TxPower::Dbm8_5 => 34,
            TxPower::Dbm7 => 28,
            TxPower::Dbm5 => 20,
            TxPower::Dbm2 => 8,
            TxPower::DbmMinus1 => -4,
        }
    }
}

impl core::str::FromStr for TxPower {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TxPower::from_name(s).ok_or(Error::UnknownTxPower)
    }
}

impl fmt::Display for TxPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WifiConfig {
    // Wi-Fi SSID to connect to
    pub ssid: &'static str,

    // Wi-Fi pre-shared key (password), empty for open networks
    pub password: &'static str,

    // Delay between connection attempts in milliseconds
    pub retry_delay_ms: u64,

    // Maximum number of connection attempts
    pub max_retries: u8,

    // Connection timeout in milliseconds
    pub timeout_ms: u64,

    pub tx_power: TxPower,
}

impl WifiConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// `attempt` counts the attempts already made.
    pub const fn should_retry(&self, attempt: u8) -> bool {
        attempt < self.max_retries
    }

    pub const fn is_open(&self) -> bool {
        self.password.is_empty()
    }

    pub const fn validate(&self) -> Result<(), Error> {
        if self.ssid.is_empty() {
            return Err(Error::EmptySsid);
        }
        if self.ssid.len() > WIFI_SSID_MAX_LEN {
            return Err(Error::SsidTooLong);
        }
        if !self.password.is_empty()
            && (self.password.len() < WIFI_PSK_MIN_LEN || self.password.len() > WIFI_PSK_MAX_LEN)
        {
            return Err(Error::InvalidPasswordLength);
        }
        if self.max_retries == 0 {
            return Err(Error::NoRetries);
        }
        if self.timeout_ms == 0 {
            return Err(Error::ZeroTimeout);
        }
        Ok(())
    }

    pub fn log_summary(&self) {
        log::info!(
            "WiFi SSID {:?} ({}), tx power {}",
            self.ssid,
            if self.is_open() { "open" } else { "psk <redacted>" },
            self.tx_power
        );
        log::debug!(
            "WiFi retry every {}ms up to {} times, timeout {}ms",
            self.retry_delay_ms,
            self.max_retries,
            self.timeout_ms
        );
    }
}
