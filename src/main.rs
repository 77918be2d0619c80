use std::process;

use log::info;

use info_wave::{EnergyReport, SimConfig};

fn try_main() -> info_wave::Result<()> {
    let config = SimConfig::from_env()?;
    let (sim, history) = info_wave::run_to_end(&config)?;

    let report = EnergyReport::from_history(&history, sim.initial_energy());
    if let Some(drift) = report.max_relative_drift {
        info!("max relative energy drift {:.3e}, range [{:?}, {:?}]",
              drift,
              report.min,
              report.max);
    }
    println!();
    println!("{}", report);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = try_main() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
