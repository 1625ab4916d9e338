use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// A proxy endpoint used for every fetch of one run, for both `http` and `https` targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub host: String,
    pub port: String,
    pub user: Option<String>,
    pub pass: Option<String>,
}

impl ProxyConfig {
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            user: None,
            pass: None,
        }
    }

    pub fn with_credentials(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.pass = Some(pass.into());
        self
    }

    /// `http://[user:pass@]host:port`. Credentials appear only when both are set.
    pub fn proxy_url(&self) -> String {
        match (non_empty(&self.user), non_empty(&self.pass)) {
            (Some(user), Some(pass)) => {
                format!("http://{}:{}@{}:{}", user, pass, self.host, self.port)
            }
            _ => format!("http://{}:{}", self.host, self.port),
        }
    }
}

impl fmt::Display for ProxyConfig {
    // Never print credentials.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Proxy port as sent by clients: `"3128"`, `3128` or `3128.0`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(serde_json::Number),
    Text(String),
}

impl PortValue {
    /// Zero, negative and fractional numbers yield no port.
    fn into_port(self) -> Option<String> {
        match self {
            PortValue::Number(n) => {
                let port = n.as_u64().or_else(|| {
                    n.as_f64()
                        .filter(|f| f.is_finite() && f.fract() == 0.0 && *f >= 0.0)
                        .map(|f| f as u64)
                });
                match port {
                    Some(port) if port > 0 => Some(port.to_string()),
                    _ => {
                        warn!("Ignoring unusable proxy port {}", n);
                        None
                    }
                }
            }
            PortValue::Text(s) => {
                let s = s.trim().to_string();
                (!s.is_empty()).then_some(s)
            }
        }
    }
}

/// The `proxy` object of a crawl request, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProxyRequest {
    pub ip: Option<String>,
    pub port: Option<PortValue>,
    pub user: Option<String>,
    pub pass: Option<String>,
}

impl ProxyRequest {
    /// A usable proxy needs both an address and a port; otherwise the run goes direct.
    pub fn into_config(self) -> Option<ProxyConfig> {
        let host = self.ip.map(|ip| ip.trim().to_string()).filter(|ip| !ip.is_empty())?;
        let port = self.port.and_then(PortValue::into_port)?;

        Some(ProxyConfig {
            host,
            port,
            user: self.user,
            pass: self.pass,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
