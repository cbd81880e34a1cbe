use std::io::{self, Write};

use anyhow::Context;

use duel_console::console::{ConsoleConfig, SessionDriver};
use duel_console::logging::init_logging;
use duel_console::scenario::bootstrap;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = ConsoleConfig::default();
    let prepared = bootstrap(&config.scenario_path).with_context(|| {
        format!(
            "could not prepare the duel from {}",
            config.scenario_path.display()
        )
    })?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "------------------------------")?;
    for line in prepared.environment.registry.summary() {
        writeln!(stdout, "{line}")?;
    }

    let flow = prepared.into_flow();
    let mut driver = SessionDriver::new(flow, io::stdin().lock(), stdout, config);
    driver.run().context("console session failed")?;
    Ok(())
}
