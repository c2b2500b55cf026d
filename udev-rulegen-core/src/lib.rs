//! This crate provides the core logic for udev-rulegen:
//! - Extracting hidraw vendor/product rules from udev rule files
//! - Merging and deduplicating rules per vendor
//! - Rendering canonical udev rule files
//!
//! It performs no I/O; callers supply rule text and persist the output.

mod builder;
mod error;
mod parsing;
mod synthesis;
mod types;

// Re-exports for a small, focused public API
pub use builder::RuleBuilder;
pub use error::{UdevRulegenError, UdevRulegenResult};
pub use parsing::{
    fold_signals, parse_device_spec, parse_hex_id, parse_rules, scan_line, scan_signals,
    MergeOutcome, RuleSignal,
};
pub use synthesis::{
    render_rules, AccessMode, GeneratorOptions, DEFAULT_GROUP, INPUT_SUBSYSTEM_RULE,
};
pub use types::{DeviceRule, ProductSelection, RuleSet};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_then_render_sample() {
        let text = r#"KERNEL=="hidraw*", ATTRS{idVendor}=="0fd9", ATTRS{idProduct}=="0063", MODE:="666", TAG+="uaccess"
KERNEL=="hidraw*", ATTRS{idVendor}=="0fd9", ATTRS{idProduct}=="0060", MODE:="666", TAG+="uaccess""#;
        let rules = parse_rules(text);
        let output = render_rules(
            rules.as_slice(),
            &GeneratorOptions::new(AccessMode::RestrictedGroup),
        );
        assert_eq!(
            output,
            concat!(
                "SUBSYSTEM==\"input\", GROUP=\"input\", MODE=\"0660\"\n",
                "\n",
                "KERNEL==\"hidraw*\", ATTRS{idVendor}==\"0fd9\", ATTRS{idProduct}==\"0060\", MODE:=\"660\", GROUP=\"plugdev\"\n",
                "KERNEL==\"hidraw*\", ATTRS{idVendor}==\"0fd9\", ATTRS{idProduct}==\"0063\", MODE:=\"660\", GROUP=\"plugdev\"\n",
            )
        );
    }
}
