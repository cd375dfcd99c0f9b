//! Payloads exchanged with the control-plane API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An environment visible to the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pod: Option<String>,
    #[serde(rename = "organizationId")]
    pub organization_id: String,
}

/// A deployed service inside an environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub name: String,
    /// Total number of workers the service may run
    #[serde(default)]
    pub worker_scale: i64,
}

/// Declared worker scale per target for one service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workers {
    #[serde(default)]
    pub workers: BTreeMap<String, i64>,
    #[serde(default)]
    pub worker_scale: i64,
}

/// A job submitted to a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "type")]
    pub job_type: String,
}

impl Job {
    pub fn is_running(&self) -> bool {
        self.status == "running"
    }
}

/// A pending organization invitation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invite {
    pub id: String,
    pub email: String,
    /// Remote role id, see [`Role`]
    pub role: i64,
    #[serde(default, rename = "orgID")]
    pub org_id: String,
    #[serde(default, rename = "senderName")]
    pub sender_name: String,
    #[serde(default)]
    pub consumed: bool,
    #[serde(default)]
    pub revoked: bool,
}

/// An organization role as known by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

/// Response to accepting an invite
#[derive(Debug, Clone, Deserialize)]
pub struct AcceptedInvite {
    #[serde(rename = "orgID")]
    pub org_id: String,
}
