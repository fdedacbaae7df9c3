//! Binary for the Orrery simulation command line program.

use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::Context as _;
use clap::Parser as _;

use orrery::util::{Refmt as _, StatusText};
use orrery_cli::{DEFAULT_TICKS, logging, simulate, ticks_for_duration, write_output};

mod command_options;
use command_options::{OrreryArgs, parse_universe_source};

fn main() -> Result<(), anyhow::Error> {
    // Destructure as a check that we're using/skipping all the args
    let OrreryArgs {
        template,
        ticks,
        duration,
        output_file,
        format,
        logging: logging_args,
        parameters,
        input_file,
    } = OrreryArgs::parse();

    logging::install(&logging_args)?;

    let settings = parameters.build()?;
    let mut universe = parse_universe_source(input_file, template).create_universe(&settings)?;

    let ticks = match (ticks, duration) {
        (Some(ticks), _) => ticks,
        (None, Some(seconds)) => ticks_for_duration(universe.clock().schedule(), seconds),
        (None, None) => DEFAULT_TICKS,
    };

    log::info!("Simulating {ticks} ticks of {} scenes", universe.len());
    let report = simulate(&mut universe, ticks).context("simulation failed")?;
    log::info!("{}", report.refmt(&StatusText));

    match output_file {
        Some(path) => {
            let mut writer = BufWriter::new(
                File::create(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?,
            );
            write_output(format, &universe, &report, &mut writer)?;
            log::info!("Wrote {}", path.display());
        }
        None => write_output(format, &universe, &report, &mut io::stdout().lock())?,
    }

    Ok(())
}
