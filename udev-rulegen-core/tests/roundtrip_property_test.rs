//! Property tests for extraction and rendering

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use udev_rulegen_core::{
    parse_rules, render_rules, AccessMode, GeneratorOptions, RuleBuilder, RuleSet,
};

/// Vendor -> sorted product set (`None` = wildcard), ignoring order
type Normalized = BTreeMap<u16, Option<BTreeSet<u16>>>;

fn normalize(rules: &RuleSet) -> Normalized {
    rules
        .iter()
        .map(|rule| {
            let products = rule
                .products
                .product_ids()
                .map(|ids| ids.iter().copied().collect());
            (rule.vendor_id, products)
        })
        .collect()
}

#[derive(Debug, Clone)]
enum Line {
    Device {
        vendor_id: u16,
        product_id: Option<u16>,
        upper: bool,
        hidraw: bool,
    },
    Comment,
    Blank,
    Unrelated,
}

impl Line {
    fn render(&self) -> String {
        match self {
            Line::Device {
                vendor_id,
                product_id,
                upper,
                hidraw,
            } => {
                let hex = |id: u16| {
                    if *upper {
                        format!("{:04X}", id)
                    } else {
                        format!("{:04x}", id)
                    }
                };
                let prefix = if *hidraw {
                    r#"KERNEL=="hidraw*""#
                } else {
                    r#"SUBSYSTEM=="usb""#
                };
                let product = product_id
                    .map(|id| format!(r#", ATTRS{{idProduct}}=="{}""#, hex(id)))
                    .unwrap_or_default();
                format!(
                    r#"  {}, ATTRS{{idVendor}}=="{}"{}, MODE:="666", TAG+="uaccess""#,
                    prefix,
                    hex(*vendor_id),
                    product
                )
            }
            Line::Comment => r#"# ATTRS{idVendor}=="dead", ATTRS{idProduct}=="beef""#.to_string(),
            Line::Blank => "   ".to_string(),
            Line::Unrelated => r#"SUBSYSTEM=="input", GROUP="input", MODE="0666""#.to_string(),
        }
    }
}

// A small vendor pool so lines for the same vendor collide often.
fn line_strategy() -> impl Strategy<Value = Line> {
    prop_oneof![
        6 => (
            prop::sample::select(vec![0x0fd9u16, 0x05f3, 0x1edb, 0xffff, 0x0000]),
            prop::option::weighted(0.8, any::<u16>()),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(vendor_id, product_id, upper, hidraw)| Line::Device {
                vendor_id,
                product_id,
                upper,
                hidraw,
            }),
        1 => Just(Line::Comment),
        1 => Just(Line::Blank),
        1 => Just(Line::Unrelated),
    ]
}

fn to_text(lines: &[Line]) -> String {
    lines
        .iter()
        .map(Line::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Expected mapping computed directly from the generated lines
fn expected(lines: &[Line]) -> Normalized {
    let mut model: Normalized = BTreeMap::new();
    for line in lines {
        if let Line::Device {
            vendor_id,
            product_id,
            ..
        } = line
        {
            let entry = model
                .entry(*vendor_id)
                .or_insert_with(|| Some(BTreeSet::new()));
            match product_id {
                Some(id) => {
                    if let Some(set) = entry {
                        set.insert(*id);
                    }
                }
                None => *entry = None,
            }
        }
    }
    model
}

fn mode_strategy() -> impl Strategy<Value = GeneratorOptions> {
    prop_oneof![
        Just(GeneratorOptions::new(AccessMode::SessionAccess)),
        Just(GeneratorOptions::new(AccessMode::RestrictedGroup)),
        Just(GeneratorOptions::new(AccessMode::RestrictedGroup).with_group("companion")),
    ]
}

proptest! {
    #[test]
    fn parse_matches_reference_model(lines in prop::collection::vec(line_strategy(), 0..40)) {
        let rules = parse_rules(&to_text(&lines));
        prop_assert_eq!(normalize(&rules), expected(&lines));
    }

    #[test]
    fn render_then_parse_is_stable(
        lines in prop::collection::vec(line_strategy(), 0..40),
        options in mode_strategy(),
    ) {
        let first = parse_rules(&to_text(&lines));
        let rendered = render_rules(first.as_slice(), &options);
        let second = parse_rules(&rendered);

        prop_assert_eq!(normalize(&second), normalize(&first));

        let first_order: Vec<u16> = first.iter().map(|r| r.vendor_id).collect();
        let second_order: Vec<u16> = second.iter().map(|r| r.vendor_id).collect();
        prop_assert_eq!(second_order, first_order);
    }

    #[test]
    fn rendering_is_deterministic_and_newline_terminated(
        lines in prop::collection::vec(line_strategy(), 0..40),
        options in mode_strategy(),
    ) {
        let rules = parse_rules(&to_text(&lines));
        let output = render_rules(rules.as_slice(), &options);

        prop_assert_eq!(&output, &render_rules(rules.as_slice(), &options));
        prop_assert!(output.ends_with('\n'));
        prop_assert!(!output.ends_with("\n\n") || rules.is_empty());
    }

    #[test]
    fn incremental_ingest_matches_single_parse(
        lines in prop::collection::vec(line_strategy(), 0..40),
        split in any::<prop::sample::Index>(),
    ) {
        let at = if lines.is_empty() { 0 } else { split.index(lines.len() + 1) };
        let (head, tail) = lines.split_at(at);

        let mut builder = RuleBuilder::new();
        builder.ingest(&to_text(head));
        builder.ingest(&to_text(tail));

        prop_assert_eq!(builder.into_rule_set(), parse_rules(&to_text(&lines)));
    }
}
