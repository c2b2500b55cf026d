//! Line scanning: pulls `ATTRS{idVendor}` / `ATTRS{idProduct}` values out of rule text.

use log::trace;
use regex::Regex;
use std::sync::OnceLock;

use super::merge::RuleSignal;
use crate::error::{UdevRulegenError, UdevRulegenResult};

fn vendor_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)ATTRS\{idVendor\}=="([0-9a-f]{4})""#).expect("vendor pattern is valid")
    })
}

fn product_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)ATTRS\{idProduct\}=="([0-9a-f]{4})""#)
            .expect("product pattern is valid")
    })
}

fn capture_id(pattern: &Regex, line: &str) -> Option<u16> {
    let hex = pattern.captures(line)?.get(1)?.as_str();
    u16::from_str_radix(hex, 16).ok()
}

/// Blank lines and `#` comments carry no rule.
fn is_ignorable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Scan a single line. Lines without a vendor match yield nothing.
pub fn scan_line(line: &str) -> Option<RuleSignal> {
    if is_ignorable(line) {
        return None;
    }

    let Some(vendor_id) = capture_id(vendor_pattern(), line) else {
        trace!("Skipping line without idVendor match: {}", line.trim());
        return None;
    };

    Some(RuleSignal {
        vendor_id,
        product_id: capture_id(product_pattern(), line),
    })
}

/// Scan every line of `text`, in order.
pub fn scan_signals(text: &str) -> Vec<RuleSignal> {
    text.lines().filter_map(scan_line).collect()
}

/// Parse a 16-bit id written as 1 to 4 hex digits, with an optional `0x` prefix.
pub fn parse_hex_id(value: &str) -> UdevRulegenResult<u16> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() || digits.len() > 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(UdevRulegenError::InvalidHexId(value.to_string()));
    }

    u16::from_str_radix(digits, 16).map_err(|_| UdevRulegenError::InvalidHexId(value.to_string()))
}

/// Parse a `VENDOR:PRODUCT` pair such as `0fd9:0060`.
pub fn parse_device_spec(value: &str) -> UdevRulegenResult<(u16, u16)> {
    let (vendor, product) = value
        .split_once(':')
        .ok_or_else(|| UdevRulegenError::InvalidDeviceSpec(value.to_string()))?;

    let vendor_id =
        parse_hex_id(vendor).map_err(|_| UdevRulegenError::InvalidDeviceSpec(value.to_string()))?;
    let product_id = parse_hex_id(product)
        .map_err(|_| UdevRulegenError::InvalidDeviceSpec(value.to_string()))?;

    Ok((vendor_id, product_id))
}
