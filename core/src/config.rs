pub const DEFAULT_SOCKET_PATH: &str = "/ws";
pub const DEFAULT_GREETING: &str = "ARMSim console";

const SOCKET_PATH_VAR: &str = "ARMSIM_SOCKET_PATH";
const GREETING_VAR: &str = "ARMSIM_GREETING";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Socket path on the page's own host.
    pub socket_path: String,
    /// First line of the output terminal.
    pub greeting: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            socket_path: DEFAULT_SOCKET_PATH.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads overrides through `lookup`, keeping defaults for anything unset or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let mut socket_path = read(SOCKET_PATH_VAR, DEFAULT_SOCKET_PATH);
        if !socket_path.starts_with('/') {
            socket_path.insert(0, '/');
        }
        Self {
            socket_path,
            greeting: read(GREETING_VAR, DEFAULT_GREETING),
        }
    }

    /// WebSocket URL for a page served from `host` over `page_protocol` (`"http:"`/`"https:"`).
    pub fn endpoint(&self, page_protocol: &str, host: &str) -> String {
        let scheme = if page_protocol == "https:" { "wss" } else { "ws" };
        format!("{scheme}://{host}{}", self.socket_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(ClientConfig::from_lookup(|_| None), ClientConfig::default());
    }

    #[test]
    fn overrides_and_normalises_path() {
        let config = ClientConfig::from_lookup(|name| match name {
            "ARMSIM_SOCKET_PATH" => Some("sim/socket".into()),
            "ARMSIM_GREETING" => Some("  ".into()),
            _ => None,
        });
        assert_eq!(config.socket_path, "/sim/socket");
        assert_eq!(config.greeting, DEFAULT_GREETING);
    }

    #[test]
    fn endpoint_follows_page_origin() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint("http:", "localhost:4567"), "ws://localhost:4567/ws");
        assert_eq!(config.endpoint("https:", "sim.example.org"), "wss://sim.example.org/ws");
    }
}
