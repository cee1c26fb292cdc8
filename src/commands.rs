//! Subcommand handlers.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use tracing::debug;

use foohid_client::HidClient;
use foohid_device::{DeviceDefinition, MouseReport, ReportSender, VirtualMouse};

use crate::cli::DeviceKind;

pub type CommandResult = anyhow::Result<()>;

/// Register a device from a preset kind, a descriptor file, or a JSON
/// definition file.
#[allow(clippy::too_many_arguments)]
pub fn create(
    name: String,
    serial: String,
    vendor_id: u32,
    product_id: u32,
    kind: Option<DeviceKind>,
    descriptor_file: Option<PathBuf>,
    definition: Option<PathBuf>,
) -> CommandResult {
    let definition = match (definition, kind, descriptor_file) {
        (Some(path), _, _) => load_definition(&path)?,
        (None, Some(kind), None) => {
            let mut definition = match kind {
                DeviceKind::Mouse => DeviceDefinition::mouse(&name),
                DeviceKind::Keyboard => DeviceDefinition::keyboard(&name),
            };
            definition.serial = serial;
            definition.vendor_id = vendor_id;
            definition.product_id = product_id;
            definition
        }
        (None, None, Some(path)) => {
            let descriptor = fs::read(&path)
                .with_context(|| format!("reading descriptor from {}", path.display()))?;
            DeviceDefinition {
                name,
                serial,
                vendor_id,
                product_id,
                descriptor,
            }
        }
        _ => {
            bail!("one of --kind, --descriptor-file or --definition is required")
        }
    };

    let client = HidClient::new();
    client.create_device(
        &definition.name,
        &definition.descriptor,
        &definition.serial,
        definition.vendor_id,
        definition.product_id,
    )?;
    println!("Registered '{}'", definition.name);
    Ok(())
}

/// Remove a device by name.
pub fn destroy(name: &str) -> CommandResult {
    let client = HidClient::new();
    client.destroy_device(name)?;
    println!("Destroyed '{name}'");
    Ok(())
}

/// Send one report, from a hex string or a file.
pub fn send(name: &str, hex: Option<String>, file: Option<PathBuf>) -> CommandResult {
    let report = match (hex, file) {
        (Some(hex), None) => parse_hex(&hex)?,
        (None, Some(path)) => {
            fs::read(&path).with_context(|| format!("reading report from {}", path.display()))?
        }
        _ => bail!("exactly one of --hex or --file is required"),
    };

    let client = HidClient::new();
    client.send_report(name, &report)?;
    println!("Sent {} bytes to '{name}'", report.len());
    Ok(())
}

/// Print the registered device names.
pub fn list() -> CommandResult {
    let client = HidClient::new();
    let names = client.list_devices()?;
    if names.is_empty() {
        println!("No devices registered");
        return Ok(());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

/// Register a mouse and wiggle the pointer until Ctrl-C, then clean up.
pub fn demo_mouse(name: &str, step: i8, interval_ms: u64) -> CommandResult {
    let client = Arc::new(HidClient::new());
    let mouse = VirtualMouse::register(Arc::clone(&client), name)?;
    let sender = ReportSender::open(&client, mouse.device().name())?;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .context("installing Ctrl-C handler")?;
    }

    println!("Streaming reports for '{name}', Ctrl-C to stop");
    let mut dx = step;
    while running.load(Ordering::SeqCst) {
        sender.send_report(&MouseReport::movement(dx, 0))?;
        dx = dx.wrapping_neg();
        thread::sleep(Duration::from_millis(interval_ms));
    }

    sender.close();
    mouse.destroy()?;
    println!("Destroyed '{name}'");
    Ok(())
}

fn load_definition(path: &Path) -> anyhow::Result<DeviceDefinition> {
    let data =
        fs::read(path).with_context(|| format!("reading definition from {}", path.display()))?;
    let definition: DeviceDefinition = serde_json::from_slice(&data)
        .with_context(|| format!("parsing definition from {}", path.display()))?;
    debug!(
        name = %definition.name,
        descriptor_len = definition.descriptor.len(),
        "loaded device definition"
    );
    Ok(definition)
}

/// Parse "05 01", "0501" or "05,01" style hex into bytes.
fn parse_hex(input: &str) -> anyhow::Result<Vec<u8>> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if cleaned.is_empty() {
        bail!("empty report");
    }
    if cleaned.len() % 2 != 0 {
        bail!("odd number of hex digits in report");
    }
    (0..cleaned.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&cleaned[i..i + 2], 16)
                .with_context(|| format!("invalid hex byte '{}'", &cleaned[i..i + 2]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_accepts_common_separators() {
        assert_eq!(parse_hex("00 05 fb").unwrap(), vec![0x00, 0x05, 0xFB]);
        assert_eq!(parse_hex("0005FB").unwrap(), vec![0x00, 0x05, 0xFB]);
        assert_eq!(parse_hex("00,05,fb").unwrap(), vec![0x00, 0x05, 0xFB]);
    }

    #[test]
    fn hex_parsing_rejects_bad_input() {
        assert!(parse_hex("").is_err());
        assert!(parse_hex("0").is_err());
        assert!(parse_hex("zz").is_err());
    }
}
