//! Launcher configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

use webterm_access::PermissionSet;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the host API
    pub api_base: Url,
    /// Token sent as `X-Token` to the host API
    pub api_token: Option<String>,
    /// Address the launcher server listens on
    pub bind_addr: SocketAddr,
    /// Timeout for the host tree request
    pub fetch_timeout_secs: u64,
    /// Document title of the launcher page
    pub page_title: String,
    /// Message shown by the browser before leaving the page
    pub leave_prompt: String,
    /// Grants for requests without a known `X-Token`
    pub default_permissions: PermissionSet,
    /// Grants by `X-Token` value
    pub token_grants: BTreeMap<String, PermissionSet>,
    /// Views not touched for this long are dropped
    pub view_idle_timeout_secs: u64,
}

impl Config {
    /// Load from the process environment, after reading `.env` if present.
    ///
    /// | Variable                     | Field                 |
    /// | `WEBTERM_API_BASE`           | `api_base`            |
    /// | `WEBTERM_API_TOKEN`          | `api_token`           |
    /// | `WEBTERM_BIND`               | `bind_addr`           |
    /// | `WEBTERM_FETCH_TIMEOUT_SECS` | `fetch_timeout_secs`  |
    /// | `WEBTERM_PAGE_TITLE`         | `page_title`          |
    /// | `WEBTERM_PERMISSIONS`        | comma separated codes |
    /// | `WEBTERM_SUPERUSER`          | `true`/`1` grants all |
    /// | `WEBTERM_TOKEN_GRANTS`       | `tok=a|b;tok2=*`      |
    /// | `WEBTERM_VIEW_IDLE_SECS`     | `view_idle_timeout_secs` |
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(base) = var("WEBTERM_API_BASE") {
            config.api_base = Url::parse(&base)
                .map_err(|e| CoreError::Config(format!("WEBTERM_API_BASE: {e}")))?;
        }

        config.api_token = var("WEBTERM_API_TOKEN");

        if let Some(bind) = var("WEBTERM_BIND") {
            config.bind_addr = bind
                .parse()
                .map_err(|e| CoreError::Config(format!("WEBTERM_BIND: {e}")))?;
        }

        if let Some(secs) = var("WEBTERM_FETCH_TIMEOUT_SECS") {
            config.fetch_timeout_secs = secs
                .parse()
                .map_err(|e| CoreError::Config(format!("WEBTERM_FETCH_TIMEOUT_SECS: {e}")))?;
        }

        if let Some(title) = var("WEBTERM_PAGE_TITLE") {
            config.page_title = title;
        }

        if let Some(codes) = var("WEBTERM_PERMISSIONS") {
            config.default_permissions = PermissionSet::new(
                codes
                    .split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty()),
            );
        }

        if let Some(flag) = var("WEBTERM_SUPERUSER") {
            config.default_permissions.is_supper =
                matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        if let Some(grants) = var("WEBTERM_TOKEN_GRANTS") {
            config.token_grants = parse_token_grants(&grants)?;
        }

        if let Some(secs) = var("WEBTERM_VIEW_IDLE_SECS") {
            config.view_idle_timeout_secs = secs
                .parse()
                .map_err(|e| CoreError::Config(format!("WEBTERM_VIEW_IDLE_SECS: {e}")))?;
        }

        Ok(config)
    }

    /// Grants for a request carrying `token`. Unknown or missing tokens get
    /// the defaults.
    pub fn permissions_for(&self, token: Option<&str>) -> PermissionSet {
        token
            .and_then(|token| self.token_grants.get(token))
            .unwrap_or(&self.default_permissions)
            .clone()
    }

    pub fn view_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.view_idle_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: Url::parse("http://127.0.0.1:8000/").expect("static URL is valid"),
            api_token: None,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3100)),
            fetch_timeout_secs: 10,
            page_title: "webterm - web terminal".to_string(),
            leave_prompt: "Leave this page? Open terminal sessions will be closed.".to_string(),
            default_permissions: PermissionSet::default(),
            token_grants: BTreeMap::new(),
            view_idle_timeout_secs: 1800,
        }
    }
}

/// Parse `token=code|code;token2=*`. `*` grants everything.
fn parse_token_grants(raw: &str) -> Result<BTreeMap<String, PermissionSet>> {
    let mut grants = BTreeMap::new();

    for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (token, codes) = entry.split_once('=').ok_or_else(|| {
            CoreError::Config(format!("WEBTERM_TOKEN_GRANTS: missing '=' in {entry:?}"))
        })?;
        let token = token.trim();
        if token.is_empty() {
            return Err(CoreError::Config(
                "WEBTERM_TOKEN_GRANTS: empty token".to_string(),
            ));
        }

        let codes = codes.trim();
        let permissions = if codes == "*" {
            PermissionSet::superuser()
        } else {
            PermissionSet::new(codes.split('|').map(str::trim).filter(|c| !c.is_empty()))
        };
        grants.insert(token.to_string(), permissions);
    }

    Ok(grants)
}
