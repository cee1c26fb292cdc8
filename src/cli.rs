// CLI definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "foohid")]
#[command(author, version, about = "Client for the foohid virtual HID driver")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a virtual device with the driver
    #[command(visible_alias = "c")]
    Create {
        /// Device name (driver-wide identifier)
        name: String,

        /// Serial number string
        #[arg(long, default_value = "SN 123456")]
        serial: String,

        /// Vendor ID
        #[arg(long, default_value_t = 2)]
        vendor_id: u32,

        /// Product ID
        #[arg(long, default_value_t = 3)]
        product_id: u32,

        /// Built-in report descriptor to use
        #[arg(long, value_enum)]
        kind: Option<DeviceKind>,

        /// File holding a raw report descriptor
        #[arg(long, value_name = "FILE", conflicts_with = "kind")]
        descriptor_file: Option<PathBuf>,

        /// JSON device definition file (replaces all other flags)
        #[arg(
            long,
            value_name = "FILE",
            conflicts_with_all = ["kind", "descriptor_file"]
        )]
        definition: Option<PathBuf>,
    },

    /// Remove a virtual device
    #[command(visible_alias = "d")]
    Destroy {
        /// Device name
        name: String,
    },

    /// Feed one input report to a device
    #[command(visible_alias = "s")]
    Send {
        /// Device name
        name: String,

        /// Report bytes as hex (e.g. "00 05 fb")
        #[arg(long, conflicts_with = "file")]
        hex: Option<String>,

        /// File holding the raw report bytes
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// List devices registered with the driver
    #[command(visible_alias = "ls")]
    List,

    /// Register a mouse and stream movement reports until Ctrl-C
    DemoMouse {
        /// Device name for the demo mouse
        #[arg(long, default_value = "foohid demo mouse")]
        name: String,

        /// Step size per report
        #[arg(long, default_value_t = 4)]
        step: i8,

        /// Delay between reports in milliseconds
        #[arg(long, default_value_t = 20)]
        interval_ms: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DeviceKind {
    /// Three-button relative mouse
    Mouse,
    /// Boot-protocol keyboard
    Keyboard,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn create_accepts_kind() {
        let cli = Cli::parse_from(["foohid", "create", "m1", "--kind", "mouse"]);
        match cli.command {
            Commands::Create { name, kind, .. } => {
                assert_eq!(name, "m1");
                assert!(matches!(kind, Some(DeviceKind::Mouse)));
            }
            _ => panic!("expected create"),
        }
    }
}
