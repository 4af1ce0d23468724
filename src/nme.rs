use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use nuclear_structure::{
    config::Config,
    integral::Multipole,
    NuclearStructureManager,
};

/// Compute single-particle beta-decay matrix elements and form factors.
#[derive(Parser, Debug)]
#[command(name = "nme")]
struct Args {
    /// TOML description of the transition.
    config: PathBuf,

    /// Print every multipole up to this rank.
    #[arg(long, default_value_t = 1)]
    max_rank: i32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();
    let args = Args::parse();

    let config = Config::load(&args.config)
        .with_context(|| format!("reading {}", args.config.display()))?;
    let manager = NuclearStructureManager::from_config(&config, None)
        .context("building one-body transitions")?;
    info!(
        transitions = manager.transitions().len(),
        mismatches = manager.spin_mismatches().len(),
        "initialized"
    );

    for obt in manager.transitions() {
        println!(
            "{:+} -> {:+}  (2Ki = {}, 2Kf = {})",
            obt.spsi.dO, obt.spsf.dO, obt.dKi, obt.dKf,
        );
    }

    let ops: Vec<Multipole>
        = (0..=args.max_rank)
        .flat_map(|K| {
            [true, false].into_iter()
                .flat_map(move |vector| {
                    (0..=1).flat_map(move |s| {
                        ((K - s).max(0)..=K + s)
                            .map(move |L| Multipole::new(vector, K, L, s))
                    })
                })
        })
        .collect();
    for op in ops {
        match manager.calculate_matrix_element(op.vector, op.K, op.L, op.s) {
            Ok(me) => println!("{op} = {me:.6e}"),
            Err(err) => println!("{op}: {err}"),
        }
    }

    match manager.weak_magnetism() {
        Ok(b) => println!("b/Ac = {b:.6}"),
        Err(err) => println!("b/Ac: {err}"),
    }
    match manager.induced_tensor() {
        Ok(d) => println!("d/Ac = {d:.6}"),
        Err(err) => println!("d/Ac: {err}"),
    }
    Ok(())
}
