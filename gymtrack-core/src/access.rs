//! Access rules for program data.
//!
//! Every request layer asks [`authorize`] instead of comparing role strings
//! itself. Global administrators bypass program roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Role of a member inside one program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramRole {
    Owner,
    Coach,
    Member,
}

impl ProgramRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramRole::Owner => "owner",
            ProgramRole::Coach => "coach",
            ProgramRole::Member => "member",
        }
    }
}

impl FromStr for ProgramRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "owner" => Ok(ProgramRole::Owner),
            "coach" => Ok(ProgramRole::Coach),
            "member" => Ok(ProgramRole::Member),
            other => Err(Error::Validation(format!("unknown program role: {}", other))),
        }
    }
}

impl fmt::Display for ProgramRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something an actor wants to do in a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Program-wide dashboards and timelines
    ViewDashboard,
    /// Streaks and logs of a specific member
    ViewMemberStats,
    /// Write a log entry for a specific member
    LogActivity,
    /// Edit program dates, enroll or remove members
    ManageProgram,
}

/// The authenticated member making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub member_id: String,
    pub is_admin: bool,
}

/// Check whether `actor` may use `capability` in a program.
///
/// `role` is the actor's role in that program (`None` when not enrolled).
/// `subject` is the member whose data is touched, for member-scoped
/// capabilities.
pub fn authorize(
    actor: &Actor,
    role: Option<ProgramRole>,
    capability: Capability,
    subject: Option<&str>,
) -> Result<()> {
    if actor.is_admin {
        return Ok(());
    }

    let allowed = match (role, capability) {
        (None, _) => false,
        (Some(ProgramRole::Owner), _) => true,
        (Some(ProgramRole::Coach), Capability::ManageProgram) => false,
        (Some(ProgramRole::Coach), _) => true,
        (Some(ProgramRole::Member), Capability::ViewDashboard) => true,
        (Some(ProgramRole::Member), Capability::ManageProgram) => false,
        (Some(ProgramRole::Member), Capability::ViewMemberStats | Capability::LogActivity) => {
            subject.map_or(true, |s| s == actor.member_id)
        }
    };

    if allowed {
        Ok(())
    } else {
        tracing::debug!(
            member_id = %actor.member_id,
            role = ?role,
            capability = ?capability,
            "Access denied"
        );
        Err(Error::Forbidden(format!(
            "{:?} not permitted for member {}",
            capability, actor.member_id
        )))
    }
}
