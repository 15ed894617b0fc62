//! DevTools (CDP) tab source for Chromium-family browsers
//!
//! Drives a browser started with `--remote-debugging-port` through the
//! `/json` HTTP endpoints. Those endpoints expose no window geometry and no
//! pin state, so this source treats the whole browser as one current window,
//! reports enumeration position as the tab index, and always reports
//! `pinned: false`. Placement and pinning requests on create are accepted
//! but cannot be forwarded.

use crate::traits::TabSource;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tab_roulette_core::{CreateTabSpec, TabId, TabInfo, TabSourceError, WindowScope};

/// Default Chromium remote debugging port
pub const DEFAULT_DEBUG_PORT: u16 = 9222;

const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// CDP target information returned by the browser
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CdpTarget {
    pub id: String,
    #[serde(rename = "type")]
    pub target_type: String,
    pub title: String,
    pub url: String,
}

/// CDP browser version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdpVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Protocol-Version")]
    pub protocol_version: String,
    #[serde(rename = "User-Agent")]
    pub user_agent: String,
}

/// Tab source backed by the DevTools HTTP endpoints
pub struct CdpTabSource {
    debug_port: u16,
    client: reqwest::Client,
}

impl CdpTabSource {
    pub fn new() -> Result<Self, TabSourceError> {
        Self::with_port(DEFAULT_DEBUG_PORT)
    }

    pub fn with_port(port: u16) -> Result<Self, TabSourceError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| TabSourceError::Internal {
                details: e.to_string(),
            })?;

        Ok(Self {
            debug_port: port,
            client,
        })
    }

    /// Check that a browser is listening and report what it is
    pub async fn probe(&self) -> Result<CdpVersion, TabSourceError> {
        let url = format!("http://localhost:{}/json/version", self.debug_port);

        let response = self.client.get(&url).send().await.map_err(|e| {
            TabSourceError::Unreachable {
                details: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(TabSourceError::InvalidResponse {
                details: format!("/json/version returned {}", response.status()),
            });
        }

        response
            .json()
            .await
            .map_err(|e| TabSourceError::InvalidResponse {
                details: e.to_string(),
            })
    }

    /// Fetch all CDP targets (tabs, extensions, workers)
    async fn fetch_targets(&self) -> Result<Vec<CdpTarget>, TabSourceError> {
        let url = format!("http://localhost:{}/json/list", self.debug_port);

        let response = self.client.get(&url).send().await.map_err(|e| {
            TabSourceError::Unreachable {
                details: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(TabSourceError::InvalidResponse {
                details: format!("/json/list returned {}", response.status()),
            });
        }

        response
            .json()
            .await
            .map_err(|e| TabSourceError::InvalidResponse {
                details: e.to_string(),
            })
    }
}

#[async_trait]
impl TabSource for CdpTabSource {
    async fn list_tabs(&self, _scope: WindowScope) -> Result<Vec<TabInfo>, TabSourceError> {
        let targets = self.fetch_targets().await?;

        // Only page targets are tabs; extensions and workers also show up
        // in /json/list. The endpoint carries no pin state.
        let tabs: Vec<TabInfo> = targets
            .into_iter()
            .filter(|t| t.target_type == "page")
            .enumerate()
            .map(|(index, t)| TabInfo {
                id: TabId(t.id),
                title: t.title,
                url: t.url,
                index,
                pinned: false,
            })
            .collect();

        tracing::debug!("Enumerated {} page targets over CDP", tabs.len());
        Ok(tabs)
    }

    async fn remove_tab(&self, id: &TabId) -> Result<(), TabSourceError> {
        tracing::info!("Closing tab over CDP: {}", id);

        let url = format!("http://localhost:{}/json/close/{}", self.debug_port, id.0);

        let response = self.client.get(&url).send().await.map_err(|e| {
            TabSourceError::Unreachable {
                details: e.to_string(),
            }
        })?;

        if response.status().as_u16() == 404 {
            return Err(TabSourceError::TabNotFound { id: id.clone() });
        }

        if !response.status().is_success() {
            return Err(TabSourceError::Rejected {
                details: format!("/json/close returned {}", response.status()),
            });
        }

        Ok(())
    }

    async fn create_tab(&self, spec: CreateTabSpec) -> Result<TabInfo, TabSourceError> {
        tracing::info!("Creating tab over CDP: {}", spec.url);

        let encoded_url = urlencoding::encode(&spec.url);
        let api_url = format!(
            "http://localhost:{}/json/new?{}",
            self.debug_port, encoded_url
        );

        // /json/new requires PUT since Chrome 111
        let response = self.client.put(&api_url).send().await.map_err(|e| {
            TabSourceError::Unreachable {
                details: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(TabSourceError::Rejected {
                details: format!("/json/new returned {}", response.status()),
            });
        }

        let target: CdpTarget =
            response
                .json()
                .await
                .map_err(|e| TabSourceError::InvalidResponse {
                    details: e.to_string(),
                })?;

        let id = TabId(target.id);

        if spec.active {
            // Focus is best effort; a created-but-unfocused tab is still a
            // successful creation.
            let activate_url = format!(
                "http://localhost:{}/json/activate/{}",
                self.debug_port, id.0
            );
            match self.client.get(&activate_url).send().await {
                Ok(r) if r.status().is_success() => {}
                Ok(r) => tracing::warn!("Tab activation returned {}", r.status()),
                Err(e) => tracing::warn!("Tab activation failed: {}", e),
            }
        }

        // The endpoint reports no placement, so locate the new target in a
        // fresh enumeration to return the index the browser actually used.
        let tabs = self.list_tabs(WindowScope::Current).await?;
        let index = tabs.iter().position(|t| t.id == id).unwrap_or(0);

        Ok(TabInfo {
            id,
            title: target.title,
            url: target.url,
            index,
            pinned: false,
        })
    }
}
