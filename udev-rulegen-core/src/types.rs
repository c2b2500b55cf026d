//! Shared data model: one [`DeviceRule`] per vendor, collected in a [`RuleSet`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which products of a vendor a rule grants access to.
///
/// Serialized as a JSON array of product ids, or `null` for [`ProductSelection::Any`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Vec<u16>>", into = "Option<Vec<u16>>")]
pub enum ProductSelection {
    /// Only these products, in first-seen order, without duplicates
    Specific(Vec<u16>),
    /// Every product of the vendor
    Any,
}

impl ProductSelection {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Product ids in first-seen order, or `None` for a wildcard
    pub fn product_ids(&self) -> Option<&[u16]> {
        match self {
            Self::Specific(ids) => Some(ids),
            Self::Any => None,
        }
    }

    /// Product ids sorted ascending without duplicates, as they are emitted
    pub fn sorted_ids(&self) -> Option<Vec<u16>> {
        self.product_ids().map(|ids| {
            let mut sorted = ids.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            sorted
        })
    }

    /// Add a product id. Returns `true` if the selection changed.
    ///
    /// A wildcard already covers every product, so it is left untouched.
    pub(crate) fn insert(&mut self, product_id: u16) -> bool {
        match self {
            Self::Specific(ids) if !ids.contains(&product_id) => {
                ids.push(product_id);
                true
            }
            Self::Specific(_) | Self::Any => false,
        }
    }
}

impl From<Option<Vec<u16>>> for ProductSelection {
    fn from(value: Option<Vec<u16>>) -> Self {
        match value {
            None => Self::Any,
            Some(ids) => {
                let mut selection = Self::Specific(Vec::with_capacity(ids.len()));
                for id in ids {
                    selection.insert(id);
                }
                selection
            }
        }
    }
}

impl From<ProductSelection> for Option<Vec<u16>> {
    fn from(value: ProductSelection) -> Self {
        match value {
            ProductSelection::Specific(ids) => Some(ids),
            ProductSelection::Any => None,
        }
    }
}

/// Access rule for a single USB vendor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRule {
    /// USB vendor id (`idVendor`)
    #[serde(rename = "vendorId")]
    pub vendor_id: u16,
    /// Allowed product ids (`idProduct`), or all of them
    #[serde(rename = "productIds")]
    pub products: ProductSelection,
}

impl DeviceRule {
    /// Rule granting access to every product of `vendor_id`
    pub fn wildcard(vendor_id: u16) -> Self {
        Self {
            vendor_id,
            products: ProductSelection::Any,
        }
    }

    /// Rule granting access to the given products of `vendor_id`. Duplicates are dropped.
    pub fn with_products(vendor_id: u16, product_ids: impl IntoIterator<Item = u16>) -> Self {
        Self {
            vendor_id,
            products: ProductSelection::from(Some(product_ids.into_iter().collect::<Vec<_>>())),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.products.is_wildcard()
    }
}

/// Short human readable form: `0fd9: 0060, 0063` or `05f3: *`
impl fmt::Display for DeviceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:", self.vendor_id)?;
        match self.products.product_ids() {
            None => write!(f, " *"),
            Some(ids) => {
                for (i, id) in ids.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{}{:04x}", sep, id)?;
                }
                Ok(())
            }
        }
    }
}

/// Collection of rules keyed by vendor id, iterated in first-vendor-seen order.
///
/// Holds at most one rule per vendor. All insertions go through the merge rule in
/// [`crate::parsing::merge`], so that invariant cannot be broken from outside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<DeviceRule>,
    index: HashMap<u16, usize>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, vendor_id: u16) -> Option<&DeviceRule> {
        self.index.get(&vendor_id).map(|&i| &self.rules[i])
    }

    pub(crate) fn get_mut(&mut self, vendor_id: u16) -> Option<&mut DeviceRule> {
        self.index.get(&vendor_id).map(|&i| &mut self.rules[i])
    }

    /// Append a rule for a vendor that is not yet present.
    pub(crate) fn push_new(&mut self, rule: DeviceRule) {
        debug_assert!(!self.index.contains_key(&rule.vendor_id));
        self.index.insert(rule.vendor_id, self.rules.len());
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeviceRule> {
        self.rules.iter()
    }

    pub fn as_slice(&self) -> &[DeviceRule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<DeviceRule> {
        self.rules
    }

    /// Reorder rules by ascending vendor id.
    pub fn sorted_by_vendor(mut self) -> Self {
        self.rules.sort_by_key(|rule| rule.vendor_id);
        self.index = self
            .rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (rule.vendor_id, i))
            .collect();
        self
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a DeviceRule;
    type IntoIter = std::slice::Iter<'a, DeviceRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl IntoIterator for RuleSet {
    type Item = DeviceRule;
    type IntoIter = std::vec::IntoIter<DeviceRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}
