//! The merge rule shared by extraction and the incremental builder.
//!
//! A vendor's record only ever moves from "specific products" towards
//! "any product". Once wildcarded it stays wildcarded.

use log::debug;

use crate::types::{DeviceRule, ProductSelection, RuleSet};

/// What a single rule line says about one vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleSignal {
    pub vendor_id: u16,
    /// `None` when the line matches every product of the vendor
    pub product_id: Option<u16>,
}

impl RuleSignal {
    pub fn device(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id: Some(product_id),
        }
    }

    pub fn vendor(vendor_id: u16) -> Self {
        Self {
            vendor_id,
            product_id: None,
        }
    }
}

/// Effect of merging one signal into a [`RuleSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First sighting of the vendor
    Created,
    /// A new product id joined an existing specific record
    ProductAdded,
    /// A specific record became a wildcard
    Widened,
    /// Nothing changed (duplicate product, or the vendor was already wildcarded)
    Unchanged,
}

impl RuleSet {
    /// Merge one line-level signal.
    pub(crate) fn apply_signal(&mut self, signal: RuleSignal) -> MergeOutcome {
        let RuleSignal {
            vendor_id,
            product_id,
        } = signal;

        let Some(existing) = self.get_mut(vendor_id) else {
            let products = match product_id {
                Some(id) => ProductSelection::Specific(vec![id]),
                None => ProductSelection::Any,
            };
            self.push_new(DeviceRule {
                vendor_id,
                products,
            });
            return MergeOutcome::Created;
        };

        if existing.is_wildcard() {
            return MergeOutcome::Unchanged;
        }

        match product_id {
            None => {
                debug!(
                    "Vendor {:04x} matched without a product id, widening to all products",
                    vendor_id
                );
                existing.products = ProductSelection::Any;
                MergeOutcome::Widened
            }
            Some(id) if existing.products.insert(id) => MergeOutcome::ProductAdded,
            Some(_) => MergeOutcome::Unchanged,
        }
    }

    /// Overwrite the vendor's record with a wildcard, creating it if needed.
    pub(crate) fn force_wildcard(&mut self, vendor_id: u16) -> MergeOutcome {
        match self.get_mut(vendor_id) {
            Some(existing) if existing.is_wildcard() => MergeOutcome::Unchanged,
            Some(existing) => {
                existing.products = ProductSelection::Any;
                MergeOutcome::Widened
            }
            None => {
                self.push_new(DeviceRule::wildcard(vendor_id));
                MergeOutcome::Created
            }
        }
    }

    /// Merge a complete record, e.g. one loaded from JSON.
    ///
    /// Equivalent to feeding one signal per product (or one vendor-only signal
    /// for a wildcard). A record with an empty product list is kept as an empty
    /// specific record when the vendor is new.
    pub(crate) fn merge_rule(&mut self, rule: DeviceRule) {
        match rule.products {
            ProductSelection::Any => {
                self.apply_signal(RuleSignal::vendor(rule.vendor_id));
            }
            ProductSelection::Specific(ids) => {
                if ids.is_empty() && self.get(rule.vendor_id).is_none() {
                    self.push_new(DeviceRule {
                        vendor_id: rule.vendor_id,
                        products: ProductSelection::Specific(Vec::new()),
                    });
                }
                for id in ids {
                    self.apply_signal(RuleSignal::device(rule.vendor_id, id));
                }
            }
        }
    }
}

/// Fold a sequence of signals into `rules`.
pub fn fold_signals(rules: RuleSet, signals: impl IntoIterator<Item = RuleSignal>) -> RuleSet {
    signals.into_iter().fold(rules, |mut acc, signal| {
        acc.apply_signal(signal);
        acc
    })
}

impl FromIterator<DeviceRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = DeviceRule>>(iter: I) -> Self {
        let mut rules = RuleSet::new();
        rules.extend(iter);
        rules
    }
}

impl Extend<DeviceRule> for RuleSet {
    fn extend<I: IntoIterator<Item = DeviceRule>>(&mut self, iter: I) {
        for rule in iter {
            self.merge_rule(rule);
        }
    }
}
