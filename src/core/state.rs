//! Mount state of a dot field
//!
//! Shared by the web host and the CLI driver.

use std::fmt;

/// Why a mounted field is doing nothing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisableReason {
    /// The user asked the OS for reduced motion
    ReducedMotion,
    /// No 2D drawing context was available
    NoSurface,
    /// The canvas has no container to size against
    NoContainer,
}

impl fmt::Display for DisableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DisableReason::ReducedMotion => "reduced motion",
            DisableReason::NoSurface => "no drawing surface",
            DisableReason::NoContainer => "no container",
        })
    }
}

/// Field lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldState {
    Running,
    Disabled(DisableReason),
    Unmounted,
}

impl FieldState {
    pub fn is_running(&self) -> bool {
        matches!(self, FieldState::Running)
    }
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldState::Running => f.write_str("running"),
            FieldState::Disabled(reason) => write!(f, "disabled ({reason})"),
            FieldState::Unmounted => f.write_str("unmounted"),
        }
    }
}
