//! Udev rule file parsing (pure Rust)
//!
//! Parsing is deliberately permissive: rule files mix device rules with
//! unrelated directives, so anything that does not carry an `idVendor`
//! match is skipped rather than rejected.

pub mod merge;
pub mod patterns;

use log::debug;

pub use merge::{fold_signals, MergeOutcome, RuleSignal};
pub use patterns::{parse_device_spec, parse_hex_id, scan_line, scan_signals};

use crate::types::RuleSet;

/// Extract the merged per-vendor rules from rule file text.
pub fn parse_rules(text: &str) -> RuleSet {
    let signals = scan_signals(text);
    debug!("Found {} vendor rule lines", signals.len());
    fold_signals(RuleSet::new(), signals)
}
