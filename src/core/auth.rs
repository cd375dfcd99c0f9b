//! Session handshake: verify an existing token or sign in with credentials

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::context::RequestContext;
use crate::core::error::{Error, Result};
use crate::core::settings::Settings;
use crate::core::transport::{self, Transport};

/// Username/email and password used to open a new session
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
struct SigninRequest<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SigninResponse {
    session_token: String,
    users_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponse {
    #[serde(default)]
    users_id: Option<String>,
}

/// Ensure `ctx` carries a valid session
///
/// A token that verifies is kept as-is. Otherwise `credentials` is called,
/// a new session is opened, and the token is written to `settings`.
pub fn signin<F>(
    transport: &dyn Transport,
    ctx: &mut RequestContext,
    settings: &mut Settings,
    credentials: F,
) -> Result<()>
where
    F: FnOnce() -> Result<Credentials>,
{
    if ctx.session_token.is_some() {
        match transport::get::<Option<VerifyResponse>>(transport, ctx, "/auth/verify") {
            Ok(verified) => {
                if let Some(users_id) = verified.and_then(|v| v.users_id) {
                    ctx.users_id = Some(users_id);
                }
                debug!("existing session verified");
                return Ok(());
            }
            Err(Error::Authentication(reason)) => {
                debug!(%reason, "session rejected, signing in again");
                ctx.session_token = None;
            }
            Err(err) => return Err(err),
        }
    }

    let creds = credentials()?;
    let body = SigninRequest {
        identifier: &creds.username,
        password: &creds.password,
    };
    let session: SigninResponse = transport::post(transport, ctx, "/auth/signin", &body)?;

    ctx.session_token = Some(session.session_token.clone());
    ctx.users_id = Some(session.users_id.clone());
    settings.session_token = Some(session.session_token);
    settings.users_id = Some(session.users_id);
    settings.save()
}

/// End the remote session (best effort) and forget the local token
pub fn signout(
    transport: &dyn Transport,
    ctx: &RequestContext,
    settings: &mut Settings,
) -> Result<()> {
    if ctx.session_token.is_some() {
        if let Err(err) = transport::delete(transport, ctx, "/auth/signout") {
            warn!(error = %err, "remote sign out failed, clearing local session anyway");
        }
    }
    settings.clear_session();
    settings.save()
}
