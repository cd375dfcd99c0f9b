//! Shared helper functions for CLI commands
//!
//! Every remote command follows the same preamble: load settings, build a
//! request context, open a transport and make sure the session is valid.
//! [`Invocation`] bundles those steps.

use console::Term;
use dialoguer::{Input, Password};
use miette::Result;
use serde::Serialize;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::auth::{self, Credentials};
use crate::core::{Error, HttpTransport, RequestContext, Settings};

/// Everything a remote command needs for one run
pub struct Invocation {
    pub settings: Settings,
    pub ctx: RequestContext,
    pub transport: HttpTransport,
}

impl Invocation {
    /// Load settings and build the context without touching the network
    pub fn load(global: &GlobalOpts) -> Result<Self> {
        let settings = load_settings(global)?;
        let ctx = RequestContext::resolve(&settings, &global.overrides());
        let transport = HttpTransport::new(ctx.timeout)?;
        Ok(Self {
            settings,
            ctx,
            transport,
        })
    }

    /// Load and sign in
    pub fn signed_in(global: &GlobalOpts) -> Result<Self> {
        let mut inv = Self::load(global)?;
        auth::signin(&inv.transport, &mut inv.ctx, &mut inv.settings, prompt_credentials)?;
        Ok(inv)
    }
}

pub fn load_settings(global: &GlobalOpts) -> Result<Settings> {
    let path = Settings::resolve_path(global.settings.as_deref())?;
    Ok(Settings::load(&path)?)
}

/// Credentials from `PAAS_USERNAME`/`PAAS_PASSWORD`, or prompted on a terminal
pub fn prompt_credentials() -> crate::core::Result<Credentials> {
    let username = std::env::var("PAAS_USERNAME").ok();
    let password = std::env::var("PAAS_PASSWORD").ok();
    if let (Some(username), Some(password)) = (&username, &password) {
        return Ok(Credentials {
            username: username.clone(),
            password: password.clone(),
        });
    }

    if !Term::stderr().is_term() {
        return Err(Error::Authentication(
            "no valid session and no terminal to prompt for credentials \
             (set PAAS_USERNAME and PAAS_PASSWORD)"
                .to_string(),
        ));
    }

    let prompt_err = |e: dialoguer::Error| Error::Authentication(e.to_string());
    let username = match username {
        Some(u) => u,
        None => Input::<String>::new()
            .with_prompt("Username or email")
            .interact_text()
            .map_err(prompt_err)?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(prompt_err)?;
    Ok(Credentials { username, password })
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(Error::from)?;
    println!("{}", json);
    Ok(())
}

/// True when output should be machine-readable JSON
pub fn wants_json(global: &GlobalOpts) -> bool {
    global.format == OutputFormat::Json
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
