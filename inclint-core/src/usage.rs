//! Usage tracking for dependencies.
//!
//! The usage of a dependency only ever grows:
//!
//! ```text
//!            PublicAndPrivate
//!              ▲          ▲
//!           Public      Private
//!              ▲          ▲
//!               ╲        ╱
//!                  None
//! ```

use std::fmt;

use serde::Serialize;

use crate::error::{InclintError, InclintResult};

/// How a dependency has been used by the target under inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageStatus {
    /// No header of the dependency is included
    #[default]
    None,
    /// Included from public (interface) files only
    Public,
    /// Included from private (implementation) files only
    Private,
    /// Included from both
    PublicAndPrivate,
}

impl UsageStatus {
    pub fn is_used(self) -> bool {
        self != UsageStatus::None
    }

    /// Least upper bound of two states.
    pub fn join(self, other: UsageStatus) -> UsageStatus {
        match (self, other) {
            (UsageStatus::None, x) | (x, UsageStatus::None) => x,
            (a, b) if a == b => a,
            _ => UsageStatus::PublicAndPrivate,
        }
    }
}

impl fmt::Display for UsageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "unused"),
            Self::Public => write!(f, "public"),
            Self::Private => write!(f, "private"),
            Self::PublicAndPrivate => write!(f, "public and private"),
        }
    }
}

/// Mutable usage record of a single dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependencyUsage {
    status: UsageStatus,
}

impl DependencyUsage {
    /// Records a usage.
    ///
    /// Usage only escalates, requesting a reset to [`UsageStatus::None`] is an
    /// invalid argument.
    pub fn update(&mut self, usage: UsageStatus) -> InclintResult<()> {
        if usage == UsageStatus::None {
            return Err(InclintError::invalid_argument(
                "resetting the usage to 'None' is not supported",
            ));
        }
        self.status = self.status.join(usage);
        Ok(())
    }

    pub fn status(&self) -> UsageStatus {
        self.status
    }

    pub fn is_used(&self) -> bool {
        self.status.is_used()
    }
}
