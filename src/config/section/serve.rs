//! `[serve]` section: where `watch` and `serve` listen.
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"
//! port = 3000
//! reload_port = 35729
//! ```
//!
//! Both ports move upward when taken, so they are starting points rather
//! than exact addresses.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// `0.0.0.0` exposes the preview on the LAN.
    pub interface: IpAddr,
    pub port: u16,
    /// Live reload WebSocket.
    pub reload_port: u16,
}

impl ServeConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.port == 0 {
            diag.error("serve.port", "must not be 0");
        }
        if self.reload_port == 0 {
            diag.error("serve.reload_port", "must not be 0");
        }
        if self.port == self.reload_port {
            diag.error_with_hint(
                "serve.reload_port",
                format!("collides with serve.port ({})", self.port),
                "the default reload port is 35729",
            );
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 3000,
            reload_port: 35729,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_serve_config() {
        let config = test_parse_config(
            "[serve]\ninterface = \"0.0.0.0\"\nport = 8080\nreload_port = 9000",
        );

        assert_eq!(
            config.serve.interface,
            IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0))
        );
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.serve.reload_port, 9000);
    }

    #[test]
    fn test_serve_config_defaults() {
        let config = test_parse_config("");

        assert_eq!(
            config.serve.interface,
            IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
        );
        assert_eq!(config.serve.port, 3000);
        assert_eq!(config.serve.reload_port, 35729);
    }

    #[test]
    fn test_serve_config_ipv6() {
        let config = test_parse_config("[serve]\ninterface = \"::1\"");
        assert_eq!(
            config.serve.interface,
            IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
        );
    }

    #[test]
    fn test_serve_port_collision() {
        let config = test_parse_config("[serve]\nport = 4000\nreload_port = 4000");
        let mut diag = ConfigDiagnostics::new();
        config.serve.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_serve_config_partial_override() {
        let config = test_parse_config("[serve]\nport = 4000");
        assert_eq!(config.serve.port, 4000);
        assert_eq!(config.serve.reload_port, 35729);
    }
}
