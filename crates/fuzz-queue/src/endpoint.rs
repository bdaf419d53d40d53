//! Queue endpoint parsing.

/// Default Redis host when the endpoint omits one.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default Redis port when the endpoint omits one.
pub const DEFAULT_PORT: u16 = 6379;

/// Where queue mode keeps its list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEndpoint {
    /// In-process list; only visible to this process.
    Memory,
    /// Redis server.
    Redis { host: String, port: u16 },
}

impl std::fmt::Display for QueueEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueEndpoint::Memory => write!(f, "memory"),
            QueueEndpoint::Redis { host, port } => write!(f, "{host}:{port}"),
        }
    }
}

impl std::str::FromStr for QueueEndpoint {
    type Err = String;

    /// Parse `memory`, or `[redis://]host[:port]` with missing parts defaulted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("memory") {
            return Ok(QueueEndpoint::Memory);
        }

        let addr = s.strip_prefix("redis://").unwrap_or(s);
        let (host, port) = match addr.split_once(':') {
            Some((host, port)) => (host, port),
            None => (addr, ""),
        };
        let host = if host.is_empty() { DEFAULT_HOST } else { host };
        let port = if port.is_empty() {
            DEFAULT_PORT
        } else {
            port.parse()
                .map_err(|_| format!("Invalid queue port in endpoint: {s}"))?
        };

        Ok(QueueEndpoint::Redis {
            host: host.to_string(),
            port,
        })
    }
}
