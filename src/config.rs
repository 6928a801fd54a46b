//! Driver configuration. Grounded on
//! `atlink`'s environment-variable device-path lookup plus the cooldown and
//! buffer-capacity constants scattered through `Orchestrator.h`/`RxWindow.h`
//! in the original; collected here into one `Default`-able struct the way
//! the other example repos centralize their runtime config.

use std::env;
use std::time::Duration;

const DEFAULT_DEVICE_PATH: &str = "/dev/ttyUSB0";
const DEVICE_PATH_ENV_VAR: &str = "MODEMLINK_DEVICE";

/// Cooldown duration, RX/TX capacities, and device path resolution for one
/// `Transport` instance.
///
/// RX/TX capacities are runtime fields rather than const generics on
/// `DriverConfig` itself: `Transport::start_with_config` takes them as a
/// plain `usize`/array size at the call site, so a single `DriverConfig`
/// can be shared across call sites with different window sizes without
/// becoming generic itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub cooldown: Duration,
    pub rx_capacity: usize,
    pub tx_capacity: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_millis(20),
            rx_capacity: 512,
            tx_capacity: 512,
        }
    }
}

impl DriverConfig {
    /// Resolve the serial device path from `MODEMLINK_DEVICE`, falling back
    /// to `/dev/ttyUSB0` when the variable is unset.
    pub fn device_path() -> String {
        env::var(DEVICE_PATH_ENV_VAR).unwrap_or_else(|_| DEFAULT_DEVICE_PATH.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_implementation_constants() {
        let config = DriverConfig::default();
        assert_eq!(config.cooldown, Duration::from_millis(20));
        assert_eq!(config.rx_capacity, 512);
        assert_eq!(config.tx_capacity, 512);
    }

    #[test]
    fn device_path_falls_back_when_env_var_unset() {
        env::remove_var(DEVICE_PATH_ENV_VAR);
        assert_eq!(DriverConfig::device_path(), DEFAULT_DEVICE_PATH);
    }

    #[test]
    fn device_path_honors_env_var() {
        env::set_var(DEVICE_PATH_ENV_VAR, "/dev/ttyACM3");
        assert_eq!(DriverConfig::device_path(), "/dev/ttyACM3");
        env::remove_var(DEVICE_PATH_ENV_VAR);
    }
}
