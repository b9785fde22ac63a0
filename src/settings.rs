use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::adapter::Retention;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    pub server: Server,
    pub adapter: Adapter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Adapter {
    /// Which roles a reconciliation returns: "targeted" (default) or "all"
    #[serde(default)]
    pub retention: Retention,
    /// JSON permission catalog supplied by the embedding environment.
    /// When unset the built-in catalog is used.
    pub catalog_path: Option<PathBuf>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8090,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("server.host", Server::default().host)
            .into_diagnostic()?
            .set_default("server.port", Server::default().port)
            .into_diagnostic()?
            .set_default("adapter.retention", "targeted")
            .into_diagnostic()?;

        // Optional file
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment overrides: POLICY_ROLES__ADAPTER__RETENTION=all, etc.
        builder =
            builder.add_source(config::Environment::with_prefix("POLICY_ROLES").separator("__"));

        let cfg = builder.build().into_diagnostic()?;
        let mut s: Settings = cfg.try_deserialize().into_diagnostic()?;

        if let Some(catalog) = &s.adapter.catalog_path {
            if catalog.is_relative() {
                s.adapter.catalog_path = Some(std::env::current_dir().into_diagnostic()?.join(catalog));
            }
        }

        Ok(s)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
