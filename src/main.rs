use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use log::{info, LevelFilter, Log, Metadata, Record};

use memsim::{
    hierarchy::{MemoryHierarchy, Simulation, Status},
    stats::level_name,
    trace::{parse_addresses, read_trace},
    Config,
};

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() -> Result<()> {
    let mut args = pico_args::Arguments::from_env();

    let mut verbosity = 0;
    while args.contains("-v") {
        verbosity += 1;
    }
    log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("{e}"))?;
    log::set_max_level(match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    });

    let config_str: Option<String> =
        if let Some(config_str) = args.opt_value_from_str::<_, String>("--config")? {
            Some(config_str)
        } else if let Some(config_path) = args.opt_value_from_str::<_, PathBuf>("-p")? {
            Some(
                fs::read_to_string(&config_path)
                    .with_context(|| format!("Could not read config {}", config_path.display()))?,
            )
        } else {
            None
        };
    let config = match config_str {
        Some(s) => Config::from_json(&s).context("Invalid config")?,
        None => Config::default(),
    };

    let inline: Option<String> = args.opt_value_from_str("-a")?;
    let trace_path: Option<PathBuf> = args.opt_value_from_str("-t")?;
    let stats_path: Option<PathBuf> = args.opt_value_from_str("--json")?;

    let mut text = String::new();
    if let Some(path) = &trace_path {
        let trace = read_trace(path)
            .with_context(|| format!("Could not read trace {}", path.display()))?;
        text += &trace;
        text.push(',');
    }
    if let Some(inline) = inline {
        text += &inline;
    }
    if text.is_empty() {
        bail!("Must provide addresses with -a <list> or -t <path>");
    }
    let addresses = parse_addresses(&text, config.address_size)?;

    let mut hierarchy = MemoryHierarchy::new(&config)?;
    let sim = hierarchy.simulate(&addresses);
    info!("Ran {} addresses", addresses.len());

    match stats_path {
        Some(path) => {
            let stats_file = fs::File::create(&path)
                .with_context(|| format!("Cannot open output file {}", path.display()))?;
            serde_json::to_writer_pretty(stats_file, &sim)?;
        }
        None => report(&sim, hierarchy.caches.len()),
    }
    Ok(())
}

fn report(sim: &Simulation, n_caches: usize) {
    println!("Performance Analysis");
    println!("Hit Rate: {:.2}%", sim.stats.hit_rate);
    println!("Miss Rate: {:.2}%", sim.stats.miss_rate);
    println!("Average Memory Access Time (AMAT): {:.2} ns", sim.stats.amat);
    println!();
    println!("Each level access");
    for level in &sim.stats.levels {
        println!(
            "{:<5} {:>7.2}% ({} / {})",
            level.name, level.hit_rate, level.hits, level.accesses
        );
    }
    println!();
    for res in &sim.results {
        let status = match res.status {
            Status::Hit => "hit",
            Status::HitRam => "hit(RAM)",
            Status::Miss => "miss",
        };
        println!(
            "Address {}: {} ({})",
            res.address,
            status,
            level_name(res.level, n_caches)
        );
    }
}
