//! Per-invocation request context
//!
//! Everything a remote call needs (host, session, pod, the associated
//! environment) lives in a [`RequestContext`] that is built once from the
//! settings file plus overrides and handed to each API function.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::core::error::{Error, Result};
use crate::core::settings::{
    normalize_version, AssociatedEnv, Settings, DEFAULT_API_VERSION, DEFAULT_HOST,
    DEFAULT_TIMEOUT_SECS,
};

/// Values that take precedence over the settings file (env vars and flags)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub api_version: Option<String>,
    pub session_token: Option<String>,
    pub env_alias: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub host: String,
    pub api_version: String,
    pub session_token: Option<String>,
    pub users_id: Option<String>,
    pub pod: Option<String>,
    pub timeout: Duration,
    env_alias: Option<String>,
    environments: BTreeMap<String, AssociatedEnv>,
}

impl RequestContext {
    /// Merge settings and overrides (overrides win)
    pub fn resolve(settings: &Settings, overrides: &Overrides) -> Self {
        let host = overrides
            .host
            .clone()
            .or_else(|| settings.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let api_version = overrides
            .api_version
            .as_deref()
            .or(settings.api_version.as_deref())
            .map(normalize_version)
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        let mut ctx = Self {
            host: host.trim_end_matches('/').to_string(),
            api_version,
            session_token: overrides
                .session_token
                .clone()
                .or_else(|| settings.session_token.clone()),
            users_id: settings.users_id.clone(),
            pod: settings.pod.clone(),
            timeout: Duration::from_secs(settings.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            env_alias: overrides
                .env_alias
                .clone()
                .or_else(|| settings.default_env.clone()),
            environments: settings.environments.clone(),
        };

        // Prefer the pod of the associated environment when there is one
        let env_pod = ctx
            .require_association()
            .ok()
            .and_then(|env| env.pod.clone());
        if env_pod.is_some() {
            ctx.pod = env_pod;
        }
        ctx
    }

    /// Full URL for an API path such as `/orgs/roles`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.host, self.api_version, path)
    }

    /// The environment this invocation operates on
    ///
    /// Resolution order: `--env`/`PAAS_ENV`, then `default_env`, then the
    /// single association if exactly one exists.
    pub fn require_association(&self) -> Result<&AssociatedEnv> {
        if let Some(alias) = &self.env_alias {
            return self.environments.get(alias).ok_or_else(|| {
                Error::NotFound(format!(
                    "No environment with an alias of \"{}\" could be found. \
                     Run \"paas associated\" to list your associated environments.",
                    alias
                ))
            });
        }

        let mut envs = self.environments.values();
        match (envs.next(), envs.next()) {
            (Some(env), None) => Ok(env),
            (None, _) => Err(Error::Authorization(
                "No environment has been associated. Run \"paas associate\" first.".to_string(),
            )),
            (Some(_), Some(_)) => Err(Error::Authorization(
                "Several environments are associated and none is the default. \
                 Pass --env <ALIAS> or run \"paas config set default_env <ALIAS>\"."
                    .to_string(),
            )),
        }
    }
}
