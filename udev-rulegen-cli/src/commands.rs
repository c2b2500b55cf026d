//! Subcommand implementations

use std::fmt::Write as _;
use std::io::Write as _;

use anyhow::{Context, Result};
use log::{debug, info};
use udev_rulegen_core::{AccessMode, DeviceRule, GeneratorOptions, RuleBuilder, RuleSet};

use crate::cli::{GenerateArgs, InputArgs, ParseArgs, ParseFormat};
use crate::input::{read_all, InputSource};

/// Fold all inputs into one builder, in argument order.
fn load_rules(input: &InputArgs, from_json: bool) -> Result<RuleBuilder> {
    let sources = InputSource::from_args(&input.files);
    let mut builder = RuleBuilder::new();

    for (name, content) in read_all(&sources)? {
        if from_json {
            let records: Vec<DeviceRule> = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON rules from {}", name))?;
            debug!("Loaded {} records from {}", records.len(), name);
            builder.extend(records);
        } else {
            let matched = builder.ingest(&content);
            debug!("{}: {} matching lines", name, matched);
        }
    }

    Ok(builder)
}

fn finish(builder: RuleBuilder, sort: bool) -> RuleSet {
    let rules = builder.into_rule_set();
    if sort {
        rules.sorted_by_vendor()
    } else {
        rules
    }
}

/// Render rules for `parse`, one vendor per line or as JSON.
pub fn format_rules(rules: &RuleSet, format: ParseFormat) -> Result<String> {
    match format {
        ParseFormat::Json => {
            let mut json = serde_json::to_string_pretty(rules.as_slice())
                .context("Failed to serialize rules")?;
            json.push('\n');
            Ok(json)
        }
        ParseFormat::Text => {
            let mut out = String::new();
            for rule in rules {
                writeln!(out, "{}", rule).context("Failed to format rules")?;
            }
            Ok(out)
        }
    }
}

/// Write command output to stdout, reporting a closed pipe as an error.
pub fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .context("Failed to write to stdout")
}

pub fn run_parse(args: &ParseArgs) -> Result<String> {
    let builder = load_rules(&args.input, false)?;
    let rules = finish(builder, args.input.sort);
    info!("Found rules for {} vendors", rules.len());
    format_rules(&rules, args.format)
}

pub fn run_generate(args: &GenerateArgs) -> Result<()> {
    let mut builder = load_rules(&args.input, args.from_json)?;

    for &(vendor_id, product_id) in &args.devices {
        builder.add_device(vendor_id, product_id);
    }
    for &vendor_id in &args.vendors {
        builder.add_vendor_wildcard(vendor_id);
    }

    let rules = finish(builder, args.input.sort);
    let options = GeneratorOptions {
        mode: AccessMode::from_name(&args.mode),
        group_name: args.group.clone(),
    };
    info!(
        "Generating {} rules for {} vendors",
        options.mode,
        rules.len()
    );
    let output = udev_rulegen_core::render_rules(rules.as_slice(), &options);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write rule file: {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => write_stdout(&output)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rules_text() {
        let rules: RuleSet = vec![
            DeviceRule::with_products(0x0fd9, [0x0060, 0x0063]),
            DeviceRule::wildcard(0x05f3),
        ]
        .into_iter()
        .collect();

        let text = format_rules(&rules, ParseFormat::Text).expect("format");
        assert_eq!(text, "0fd9: 0060, 0063\n05f3: *\n");
    }

    #[test]
    fn test_format_rules_json_is_loadable() {
        let rules: RuleSet = vec![DeviceRule::wildcard(0x05f3)].into_iter().collect();

        let json = format_rules(&rules, ParseFormat::Json).expect("format");
        let back: Vec<DeviceRule> = serde_json::from_str(&json).expect("parse back");
        assert_eq!(back, vec![DeviceRule::wildcard(0x05f3)]);
    }
}
