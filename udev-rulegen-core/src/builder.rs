//! Incremental rule builder
//!
//! [`RuleBuilder`] holds a [`RuleSet`] across several inputs: rule files are
//! folded in with [`RuleBuilder::ingest`] and individual devices can be added
//! or widened directly. It applies the same merge rule as
//! [`crate::parse_rules`], with one extra operation,
//! [`RuleBuilder::add_vendor_wildcard`], which overwrites unconditionally.

use log::{debug, info};

use crate::parsing::{scan_signals, MergeOutcome, RuleSignal};
use crate::synthesis::{render_rules, GeneratorOptions};
use crate::types::{DeviceRule, RuleSet};

/// Mutable collection of device rules, built up from several sources.
#[derive(Debug, Clone, Default)]
pub struct RuleBuilder {
    rules: RuleSet,
}

impl RuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow a single vendor/product pair.
    ///
    /// Has no effect if the vendor is already wildcarded.
    pub fn add_device(&mut self, vendor_id: u16, product_id: u16) {
        let outcome = self
            .rules
            .apply_signal(RuleSignal::device(vendor_id, product_id));
        debug!(
            "add_device {:04x}:{:04x} -> {:?}",
            vendor_id, product_id, outcome
        );
    }

    /// Allow every product of `vendor_id`, replacing any specific products recorded so far.
    pub fn add_vendor_wildcard(&mut self, vendor_id: u16) {
        let outcome = self.rules.force_wildcard(vendor_id);
        debug!("add_vendor_wildcard {:04x} -> {:?}", vendor_id, outcome);
    }

    /// Merge a complete record, e.g. one loaded from a JSON dump.
    pub fn add_rule(&mut self, rule: DeviceRule) {
        self.rules.merge_rule(rule);
    }

    /// Fold the rules found in `text` into the builder.
    ///
    /// Returns the number of lines that carried a vendor match.
    pub fn ingest(&mut self, text: &str) -> usize {
        let signals = scan_signals(text);
        let matched = signals.len();
        let mut created = 0;
        for signal in signals {
            if self.rules.apply_signal(signal) == MergeOutcome::Created {
                created += 1;
            }
        }
        info!(
            "Ingested {} matching lines ({} new vendors, {} total)",
            matched,
            created,
            self.rules.len()
        );
        matched
    }

    /// Snapshot of the current rules in first-vendor-seen order
    pub fn rules(&self) -> Vec<DeviceRule> {
        self.rules.as_slice().to_vec()
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rules
    }

    pub fn into_rule_set(self) -> RuleSet {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render the current rules as a udev rule file.
    pub fn render(&self, options: &GeneratorOptions) -> String {
        render_rules(self.rules.as_slice(), options)
    }
}

impl Extend<DeviceRule> for RuleBuilder {
    fn extend<I: IntoIterator<Item = DeviceRule>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}
