//! Batch driver: runs the standard walk suite and prints a summary of the
//! produced tables.

use rwalk_sim::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("━━━ rwalk-sim: 1-d random walk suite ━━━");
    println!();

    let suite = [
        RunConfig::new(
            WalkerKind::Classical,
            TimeMode::Discrete,
            Topology::Line,
            0,
            50,
            100,
        ),
        RunConfig::new(
            WalkerKind::Quantum,
            TimeMode::Discrete,
            Topology::Line,
            0,
            80,
            100,
        ),
        RunConfig::new(
            WalkerKind::Classical,
            TimeMode::Continuous,
            Topology::Ring,
            0,
            60,
            100,
        ),
        RunConfig::new(
            WalkerKind::Quantum,
            TimeMode::Continuous,
            Topology::RandomRegular,
            0,
            60,
            100,
        ),
    ];

    let mut sink = MemorySink::new();
    for config in &suite {
        let output = run_into(config, &mut sink)?;
        let key = config.table_key(TableKind::Pdf);
        let final_mass: f64 = output.pdf.row(output.pdf.nrows() - 1).sum();
        print!(
            "  {:<22} {:>4} sites  {:>4} rows  final mass {:.6}",
            key,
            output.pdf.ncols(),
            output.pdf.nrows(),
            final_mass
        );
        match &output.std {
            Some(std) => println!("  final std {:.4}", std[std.len() - 1]),
            None => println!("  (no std: coordinates undefined)"),
        }
    }

    println!();
    println!("  {} pdf table(s) persisted", suite.len());
    Ok(())
}
