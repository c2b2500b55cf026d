//! Command line definitions for `udev-rulegen`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use udev_rulegen_core::{parse_device_spec, parse_hex_id};

#[derive(Parser, Debug)]
#[command(
    name = "udev-rulegen",
    version,
    about = "Merge hidraw device rules from udev rule files and generate a canonical rule file",
    long_about = "Reads udev rule files, collects the USB vendor/product ids they grant access to, \
                  merges them per vendor and writes a canonical rule file for hidraw devices.\n\n\
                  Lines without an ATTRS{idVendor} match are ignored."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the merged per-vendor rules found in the inputs
    Parse(ParseArgs),

    /// Generate a canonical udev rule file from the inputs
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Rule files to read, in order. Reads stdin when none are given or for `-`.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Order rules by vendor id instead of first appearance
    #[arg(long)]
    pub sort: bool,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ParseFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ParseFormat {
    /// One line per vendor, e.g. `0fd9: 0060, 0063`
    Text,
    /// JSON array of `{"vendorId", "productIds"}` records
    Json,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Access mode: `session-access` (desktop, uaccess) or `restricted-group` (headless).
    /// Unknown names fall back to `restricted-group` with a warning.
    #[arg(long, env = "UDEV_RULEGEN_MODE", default_value = "session-access", value_name = "MODE")]
    pub mode: String,

    /// Group owning the devices in restricted-group mode [default: plugdev]
    #[arg(long, env = "UDEV_RULEGEN_GROUP", value_name = "GROUP")]
    pub group: Option<String>,

    /// Write the rule file here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Additionally allow a single device, as VENDOR:PRODUCT hex ids
    #[arg(long = "device", value_name = "VENDOR:PRODUCT", value_parser = parse_device_spec)]
    pub devices: Vec<(u16, u16)>,

    /// Additionally allow every product of a vendor, as a hex id
    #[arg(long = "vendor", value_name = "VENDOR", value_parser = parse_hex_id)]
    pub vendors: Vec<u16>,

    /// Treat inputs as JSON record arrays (as printed by `parse --format json`)
    #[arg(long)]
    pub from_json: bool,
}
