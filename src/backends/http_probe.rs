// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Existence probe for HTTP repositories.
//!
//! Issues a `HEAD` request for `base_url + path`. SSH repositories are checked
//! by an external transport and report [`ProbeError::Unsupported`] here.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::config::RepositoryLocation;
use crate::errors::ProbeError;
use crate::traits::{FileProbe, ProbeOutcome};

pub struct HttpFileProbe {
    client: Client,
    timeout: Duration,
}

impl HttpFileProbe {
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .user_agent(concat!("rdf-intake/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::Transport(e.to_string()))?;
        Ok(Self { client, timeout })
    }

    pub fn url_for(base_url: &str, path: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn map_error(&self, error: reqwest::Error) -> ProbeError {
        if error.is_timeout() {
            ProbeError::Timeout(self.timeout)
        } else {
            ProbeError::Transport(error.to_string())
        }
    }
}

fn outcome_for(status: StatusCode) -> Result<ProbeOutcome, ProbeError> {
    match status {
        s if s.is_success() => Ok(ProbeOutcome::Exists),
        StatusCode::NOT_FOUND | StatusCode::GONE => Ok(ProbeOutcome::Missing),
        other => Err(ProbeError::Transport(format!("unexpected status {}", other))),
    }
}

#[async_trait]
impl FileProbe for HttpFileProbe {
    async fn probe(&self, location: &RepositoryLocation, path: &str) -> Result<ProbeOutcome, ProbeError> {
        let base_url = match location {
            RepositoryLocation::Http { base_url } => base_url,
            other => return Err(ProbeError::Unsupported(other.protocol().to_string())),
        };

        let response = self
            .client
            .head(Self::url_for(base_url, path))
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        outcome_for(response.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_single_slash() {
        struct TestCase {
            base: &'static str,
            path: &'static str,
            expected: &'static str,
        }

        let cases = vec![
            TestCase { base: "https://data.ex/files/", path: "/run1.csv", expected: "https://data.ex/files/run1.csv" },
            TestCase { base: "https://data.ex/files", path: "run1.csv", expected: "https://data.ex/files/run1.csv" },
            TestCase { base: "https://data.ex/", path: "a/b.txt", expected: "https://data.ex/a/b.txt" },
        ];

        for case in cases {
            assert_eq!(HttpFileProbe::url_for(case.base, case.path), case.expected);
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(outcome_for(StatusCode::OK), Ok(ProbeOutcome::Exists));
        assert_eq!(outcome_for(StatusCode::NO_CONTENT), Ok(ProbeOutcome::Exists));
        assert_eq!(outcome_for(StatusCode::NOT_FOUND), Ok(ProbeOutcome::Missing));
        assert_eq!(outcome_for(StatusCode::GONE), Ok(ProbeOutcome::Missing));
        assert!(matches!(outcome_for(StatusCode::FORBIDDEN), Err(ProbeError::Transport(_))));
    }

    #[tokio::test]
    async fn test_ssh_repositories_are_unsupported() {
        let probe = HttpFileProbe::new(Duration::from_secs(1)).unwrap();
        let location = RepositoryLocation::Ssh {
            host: "files.example.org".to_string(),
            port: 22,
            fingerprint: "SHA256:abc".to_string(),
            credential: "archive-key".to_string(),
        };
        assert_eq!(
            probe.probe(&location, "/data/run1.csv").await,
            Err(ProbeError::Unsupported("ssh".to_string()))
        );
    }
}
