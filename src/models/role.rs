//! On-call roles.
//!
//! Every slot is covered twice: once by a normal responder (first line)
//! and once by an escalation responder (second line). An employee may sit
//! in either pool or in both.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An on-call role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// First-line responder.
    Normal,
    /// Second-line responder, paged when the normal responder needs help.
    Escalation,
}

impl Role {
    /// Both roles, in declaration order.
    pub const ALL: [Role; 2] = [Role::Normal, Role::Escalation];

    /// Lowercase name used in variable names and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Normal => "normal",
            Role::Escalation => "escalation",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
