//! Organization invitations

use serde::Serialize;

use crate::core::context::RequestContext;
use crate::core::error::{Error, Result};
use crate::core::models::{AcceptedInvite, Invite, Role};
use crate::core::transport::{self, Transport};

/// Roles an invite can grant from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InviteRole {
    #[default]
    Member,
    Admin,
}

impl InviteRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            InviteRole::Member => "member",
            InviteRole::Admin => "admin",
        }
    }
}

impl std::fmt::Display for InviteRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendInvite<'a> {
    email: &'a str,
    role: i64,
    link_template: String,
}

/// Exchange an invite code for membership; returns the organization id
pub fn accept(transport: &dyn Transport, ctx: &RequestContext, code: &str) -> Result<String> {
    let accepted: AcceptedInvite = transport::post(
        transport,
        ctx,
        &format!("/orgs/accept-invite/{}", code),
        &serde_json::json!({}),
    )?;
    Ok(accepted.org_id)
}

/// Pending invites for the associated organization
pub fn list(transport: &dyn Transport, ctx: &RequestContext) -> Result<Vec<Invite>> {
    let env = ctx.require_association()?;
    let invites: Option<Vec<Invite>> =
        transport::get(transport, ctx, &format!("/orgs/{}/invites", env.org_id))?;
    Ok(invites.unwrap_or_default())
}

pub fn list_roles(transport: &dyn Transport, ctx: &RequestContext) -> Result<Vec<Role>> {
    let roles: Option<Vec<Role>> = transport::get(transport, ctx, "/orgs/roles")?;
    Ok(roles.unwrap_or_default())
}

/// Delete a pending invite; accepted or unknown invites are `NotFound`
pub fn rm(transport: &dyn Transport, ctx: &RequestContext, invite_id: &str) -> Result<()> {
    let env = ctx.require_association()?;
    transport::delete(
        transport,
        ctx,
        &format!("/orgs/{}/invites/{}", env.org_id, invite_id),
    )
}

/// Invite `email` with the remote role id `role_id`
pub fn send(
    transport: &dyn Transport,
    ctx: &RequestContext,
    email: &str,
    role_id: i64,
) -> Result<()> {
    let env = ctx.require_association()?;
    let body = SendInvite {
        email,
        role: role_id,
        link_template: format!("{}/accept-invite?code={{inviteCode}}", ctx.host),
    };
    let _: Option<serde_json::Value> =
        transport::post(transport, ctx, &format!("/orgs/{}/invites", env.org_id), &body)?;
    Ok(())
}

/// Remote id of a CLI role, matched by name case-insensitively
pub fn role_id(roles: &[Role], role: InviteRole) -> Result<i64> {
    roles
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(role.as_str()))
        .map(|r| r.id)
        .ok_or_else(|| Error::NotFound(format!("The API does not offer a \"{}\" role", role)))
}

/// Display name of a remote role id
pub fn role_name(roles: &[Role], id: i64) -> String {
    roles
        .iter()
        .find(|r| r.id == id)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{associated_context, unassociated_context, MockTransport};
    use crate::core::transport::Method;

    const ROLES: &str = r#"[{"id": 1, "name": "Admin"}, {"id": 2, "name": "Member"}]"#;

    fn roles() -> Vec<Role> {
        serde_json::from_str(ROLES).unwrap()
    }

    #[test]
    fn test_accept_returns_org() {
        let transport = MockTransport::new().on(
            Method::Post,
            "/orgs/accept-invite/abc-123",
            200,
            r#"{"orgID": "org-42"}"#,
        );
        assert_eq!(
            accept(&transport, &unassociated_context(), "abc-123").unwrap(),
            "org-42"
        );
    }

    #[test]
    fn test_accept_bad_code() {
        let transport = MockTransport::new().on(
            Method::Post,
            "/orgs/accept-invite/nope",
            404,
            r#"{"title": "Not Found", "description": "invite code not found"}"#,
        );
        let err = accept(&transport, &unassociated_context(), "nope").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_list_uses_org() {
        let transport = MockTransport::new().on(
            Method::Get,
            "/orgs/org-1/invites",
            200,
            r#"[{"id": "inv-1", "email": "a@example.com", "role": 2, "orgID": "org-1"}]"#,
        );
        let invites = list(&transport, &associated_context()).unwrap();
        assert_eq!(invites.len(), 1);
        assert_eq!(invites[0].email, "a@example.com");
    }

    #[test]
    fn test_list_without_association() {
        let transport = MockTransport::new();
        let err = list(&transport, &unassociated_context()).unwrap_err();
        assert!(matches!(err, Error::Authorization(_)));
    }

    #[test]
    fn test_rm_accepted_invite_is_not_found() {
        let transport =
            MockTransport::new().on(Method::Delete, "/orgs/org-1/invites/inv-9", 404, "");
        let err = rm(&transport, &associated_context(), "inv-9").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_send_posts_role_id() {
        let transport = MockTransport::new().on(Method::Post, "/orgs/org-1/invites", 201, "");
        send(&transport, &associated_context(), "new@example.com", 1).unwrap();

        let sent = transport.requests();
        let body: serde_json::Value =
            serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["email"], "new@example.com");
        assert_eq!(body["role"], 1);
        assert!(body["linkTemplate"]
            .as_str()
            .unwrap()
            .ends_with("/accept-invite?code={inviteCode}"));
    }

    #[test]
    fn test_send_malformed_email_is_validation_error() {
        let transport = MockTransport::new().on(
            Method::Post,
            "/orgs/org-1/invites",
            400,
            r#"{"errors": [{"message": "invalid email"}]}"#,
        );
        let err = send(&transport, &associated_context(), "not-an-email", 2).unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m == "invalid email"));
    }

    #[test]
    fn test_role_lookup() {
        let roles = roles();
        assert_eq!(role_id(&roles, InviteRole::Admin).unwrap(), 1);
        assert_eq!(role_id(&roles, InviteRole::Member).unwrap(), 2);
        assert!(role_id(&roles[..1], InviteRole::Member).is_err());
        assert_eq!(role_name(&roles, 2), "Member");
        assert_eq!(role_name(&roles, 7), "7");
    }
}
