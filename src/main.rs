//! foohid CLI
//!
//! Command-line surface over the driver client: register, destroy, feed and
//! enumerate virtual HID devices.

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("foohid=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create {
            name,
            serial,
            vendor_id,
            product_id,
            kind,
            descriptor_file,
            definition,
        } => commands::create(
            name,
            serial,
            vendor_id,
            product_id,
            kind,
            descriptor_file,
            definition,
        ),
        Commands::Destroy { name } => commands::destroy(&name),
        Commands::Send { name, hex, file } => commands::send(&name, hex, file),
        Commands::List => commands::list(),
        Commands::DemoMouse {
            name,
            step,
            interval_ms,
        } => commands::demo_mouse(&name, step, interval_ms),
    }
}
