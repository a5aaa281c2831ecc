// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Repository alias table.
//!
//! File references name their repository by alias only. Connection details
//! are resolved here from configuration into a [`RepositoryLocation`].
//!
//! ```yaml
//! repositories:
//!   - alias: archive
//!     protocol: ssh
//!     host: files.example.org
//!     fingerprint: "SHA256:..."
//!     credential: archive-key
//!   - alias: web
//!     protocol: http
//!     base_url: https://data.example.org/files/
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::consts::DEFAULT_SSH_PORT;
use crate::errors::ValidationError;
use crate::traits::RepositoryAliases;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryProtocol {
    Ssh,
    Http,
}

impl fmt::Display for RepositoryProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryProtocol::Ssh => f.write_str("ssh"),
            RepositoryProtocol::Http => f.write_str("http"),
        }
    }
}

/// Resolved connection details of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RepositoryLocation {
    Ssh {
        host: String,
        port: u16,
        fingerprint: String,
        /// Credential name, never the secret.
        credential: String,
    },
    Http {
        base_url: String,
    },
}

impl RepositoryLocation {
    pub fn protocol(&self) -> RepositoryProtocol {
        match self {
            RepositoryLocation::Ssh { .. } => RepositoryProtocol::Ssh,
            RepositoryLocation::Http { .. } => RepositoryProtocol::Http,
        }
    }
}

impl fmt::Display for RepositoryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryLocation::Ssh { host, port, .. } => write!(f, "ssh://{}:{}", host, port),
            RepositoryLocation::Http { base_url } => f.write_str(base_url),
        }
    }
}

fn default_ssh_port() -> u16 {
    DEFAULT_SSH_PORT
}

/// Connection parameters of one remote file repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryConfig {
    pub alias: String,
    pub protocol: RepositoryProtocol,
    pub host: Option<String>,
    #[serde(default = "default_ssh_port")]
    pub port: u16,
    pub fingerprint: Option<String>,
    /// Name of the credential to use; never the secret itself.
    pub credential: Option<String>,
    pub base_url: Option<String>,
}

impl RepositoryConfig {
    pub fn ssh(alias: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            protocol: RepositoryProtocol::Ssh,
            host: Some(host.into()),
            port: DEFAULT_SSH_PORT,
            fingerprint: None,
            credential: None,
            base_url: None,
        }
    }

    pub fn http(alias: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            protocol: RepositoryProtocol::Http,
            host: None,
            port: DEFAULT_SSH_PORT,
            fingerprint: None,
            credential: None,
            base_url: Some(base_url.into()),
        }
    }

    /// Fields the protocol needs that are missing or blank.
    pub fn validate(&self) -> Vec<ValidationError> {
        let blank = |value: &Option<String>| value.as_deref().map_or(true, |v| v.trim().is_empty());
        let mut errors = Vec::new();

        if self.alias.trim().is_empty() {
            errors.push(ValidationError::IncompleteRepository {
                alias: self.alias.clone(),
                field: "alias",
            });
        }

        match self.protocol {
            RepositoryProtocol::Ssh => {
                if blank(&self.host) {
                    errors.push(self.incomplete("host"));
                }
                if blank(&self.fingerprint) {
                    errors.push(self.incomplete("fingerprint"));
                }
                if blank(&self.credential) {
                    errors.push(self.incomplete("credential"));
                }
                if self.port == 0 {
                    errors.push(self.incomplete("port"));
                }
            }
            RepositoryProtocol::Http => {
                let scheme_ok = self
                    .base_url
                    .as_deref()
                    .map_or(false, |url| url.starts_with("http://") || url.starts_with("https://"));
                if !scheme_ok {
                    errors.push(self.incomplete("base_url"));
                }
            }
        }

        errors
    }

    /// Connection details for this repository's protocol. Fails with the
    /// first problem [`RepositoryConfig::validate`] reports.
    pub fn location(&self) -> Result<RepositoryLocation, ValidationError> {
        if let Some(error) = self.validate().into_iter().next() {
            return Err(error);
        }
        let required = |value: &Option<String>, field| value.clone().ok_or_else(|| self.incomplete(field));

        Ok(match self.protocol {
            RepositoryProtocol::Ssh => RepositoryLocation::Ssh {
                host: required(&self.host, "host")?,
                port: self.port,
                fingerprint: required(&self.fingerprint, "fingerprint")?,
                credential: required(&self.credential, "credential")?,
            },
            RepositoryProtocol::Http => RepositoryLocation::Http {
                base_url: required(&self.base_url, "base_url")?,
            },
        })
    }

    fn incomplete(&self, field: &'static str) -> ValidationError {
        ValidationError::IncompleteRepository {
            alias: self.alias.clone(),
            field,
        }
    }
}

/// Configuration-backed [`RepositoryAliases`].
#[derive(Debug, Clone, Default)]
pub struct RepositoryTable {
    repositories: IndexMap<String, RepositoryConfig>,
}

impl RepositoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries with an existing alias replace earlier ones.
    pub fn from_configs<I: IntoIterator<Item = RepositoryConfig>>(configs: I) -> Self {
        let mut table = Self::new();
        for config in configs {
            table.insert(config);
        }
        table
    }

    pub fn insert(&mut self, config: RepositoryConfig) -> Option<RepositoryConfig> {
        self.repositories.insert(config.alias.clone(), config)
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.repositories.keys().map(String::as_str)
    }
}

impl RepositoryAliases for RepositoryTable {
    fn lookup(&self, alias: &str) -> Option<RepositoryConfig> {
        self.repositories.get(alias).cloned()
    }
}
