//! Records of members skipped by best-effort operations.
//!
//! Partitioning and empty-space calculation never fail the caller; they drop
//! what they cannot process. [`Diagnostics`] lists what was dropped and why,
//! so "nothing to compute" can be told apart from "partially failed".

use std::fmt::{self, Display};

use crate::errors::GeometryError;

/// Why a member was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipKind {
    /// The feature carried no geometry.
    MissingGeometry,
    /// The geometry kind is not accepted by the operation.
    InvalidGeometry,
    /// A planar boolean operation failed.
    OperationFailed,
    /// A request exceeded a configured limit and was clamped.
    LimitExceeded,
}

/// One skipped input member.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedMember {
    /// Position of the member in its input (strip index or field index);
    /// `None` when the skip concerns the farm itself.
    pub index: Option<usize>,
    pub kind: SkipKind,
    pub reason: String,
}

impl Display for SkippedMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "member {} skipped ({:?}): {}", index, self.kind, self.reason),
            None => write!(f, "farm skipped ({:?}): {}", self.kind, self.reason),
        }
    }
}

/// Skips collected while running one operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    skipped: Vec<SkippedMember>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a member dropped because of `error`.
    pub fn record(&mut self, index: Option<usize>, error: &GeometryError) {
        let kind = match error {
            GeometryError::OperationFailed(_) => SkipKind::OperationFailed,
            _ => SkipKind::InvalidGeometry,
        };
        self.skipped.push(SkippedMember {
            index,
            kind,
            reason: error.to_string(),
        });
    }

    /// Records a member dropped because it had no geometry.
    pub fn record_missing(&mut self, index: Option<usize>) {
        self.skipped.push(SkippedMember {
            index,
            kind: SkipKind::MissingGeometry,
            reason: "feature has no geometry".to_string(),
        });
    }

    /// Records a request for `requested` members clamped to `limit`.
    pub fn record_limit(&mut self, requested: usize, limit: usize) {
        self.skipped.push(SkippedMember {
            index: None,
            kind: SkipKind::LimitExceeded,
            reason: format!("requested {} members, limited to {}", requested, limit),
        });
    }

    /// True when nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn skipped(&self) -> &[SkippedMember] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }
}
