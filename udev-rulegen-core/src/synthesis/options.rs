//! Rendering options: access-control mode and target group.

use log::warn;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Group that owns the device nodes in [`AccessMode::RestrictedGroup`] when none is configured
pub const DEFAULT_GROUP: &str = "plugdev";

/// How rendered rules grant access to the matched hidraw nodes
///
/// Names other than `restricted-group`/`headless` and `session-access`/`desktop`
/// fall back to [`AccessMode::RestrictedGroup`], both from strings and through serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum AccessMode {
    /// Headless machines: members of a fixed group get read/write access
    RestrictedGroup,
    /// Desktop machines: the logged-in seat user gets access through `uaccess`
    SessionAccess,
}

impl AccessMode {
    /// Look up a mode by name, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "restricted-group" | "headless" => Self::RestrictedGroup,
            "session-access" | "desktop" => Self::SessionAccess,
            _ => {
                warn!(
                    "Unknown access mode '{}', using {}",
                    name,
                    Self::RestrictedGroup
                );
                Self::RestrictedGroup
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RestrictedGroup => "restricted-group",
            Self::SessionAccess => "session-access",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for AccessMode {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Options for [`super::render_rules`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOptions {
    pub mode: AccessMode,
    /// Owning group, only used in [`AccessMode::RestrictedGroup`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

impl GeneratorOptions {
    pub fn new(mode: AccessMode) -> Self {
        Self {
            mode,
            group_name: None,
        }
    }

    pub fn with_group(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = Some(group_name.into());
        self
    }

    /// Configured group used as given, or [`DEFAULT_GROUP`] when unset or empty.
    pub fn effective_group(&self) -> &str {
        self.group_name
            .as_deref()
            .filter(|group| !group.is_empty())
            .unwrap_or(DEFAULT_GROUP)
    }
}
