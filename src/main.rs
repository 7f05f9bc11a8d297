use anyhow::{Context, Result};
use log::info;

use banking::{init_bank, run_app, RegistryConfig};

fn main() -> Result<()> {
    env_logger::init();

    let json = std::env::args().skip(1).any(|arg| arg == "--json");
    let config = RegistryConfig::load().context("loading registry configuration")?;
    info!(
        "registry capacity {}, first account number {}",
        config.capacity, config.first_account_number
    );

    let bank = init_bank(config);
    run_app(bank, json)?;
    Ok(())
}
