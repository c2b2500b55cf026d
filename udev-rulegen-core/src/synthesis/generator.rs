//! Deterministic rule file generation for hidraw device access

use super::options::{AccessMode, GeneratorOptions};
use crate::types::DeviceRule;

/// Leading rule that opens the input subsystem to the `input` group
pub const INPUT_SUBSYSTEM_RULE: &str = r#"SUBSYSTEM=="input", GROUP="input", MODE="0660""#;

/// Render `rules` as udev rule file text.
///
/// Rules are emitted in the given order. Specific products are emitted in
/// ascending order, one line each; a wildcard rule becomes a single line
/// without a product match.
pub fn render_rules(rules: &[DeviceRule], options: &GeneratorOptions) -> String {
    let mut output = String::new();
    output.push_str(INPUT_SUBSYSTEM_RULE);
    output.push_str("\n\n");

    let access = access_clause(options);
    for rule in rules {
        match rule.products.sorted_ids() {
            None => push_rule_line(&mut output, rule.vendor_id, None, &access),
            Some(product_ids) => {
                for product_id in product_ids {
                    push_rule_line(&mut output, rule.vendor_id, Some(product_id), &access);
                }
            }
        }
    }

    output
}

fn access_clause(options: &GeneratorOptions) -> String {
    match options.mode {
        AccessMode::SessionAccess => r#"MODE:="660", TAG+="uaccess""#.to_string(),
        AccessMode::RestrictedGroup => {
            format!(r#"MODE:="660", GROUP="{}""#, options.effective_group())
        }
    }
}

fn push_rule_line(output: &mut String, vendor_id: u16, product_id: Option<u16>, access: &str) {
    output.push_str(&format!(
        r#"KERNEL=="hidraw*", ATTRS{{idVendor}}=="{:04x}""#,
        vendor_id
    ));
    if let Some(product_id) = product_id {
        output.push_str(&format!(r#", ATTRS{{idProduct}}=="{:04x}""#, product_id));
    }
    output.push_str(", ");
    output.push_str(access);
    output.push('\n');
}
