//! Error types for the conversions the core exposes to callers.
//!
//! Extraction and rendering never fail: unrecognized lines are skipped and
//! unset or unknown options are defaulted. Errors only arise when a caller
//! turns free text (command-line device and vendor ids) into typed inputs.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UdevRulegenError {
    #[error("invalid hexadecimal id '{0}': expected 1 to 4 hex digits")]
    InvalidHexId(String),
    #[error("invalid device '{0}': expected VENDOR:PRODUCT, e.g. 0fd9:0060")]
    InvalidDeviceSpec(String),
}

pub type UdevRulegenResult<T> = Result<T, UdevRulegenError>;
