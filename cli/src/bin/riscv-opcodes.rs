use anyhow::Result;
use clap::Parser;
use riscv_opcodes_cli::commands::RiscvOpcodes;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    RiscvOpcodes::parse().run()
}
