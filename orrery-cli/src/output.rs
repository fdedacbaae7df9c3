use std::io;

use anyhow::Context as _;

use orrery::universe::Universe;
use orrery::util::{Refmt as _, StatusText};

use crate::SimulationReport;

/// How [`write_output()`] presents its results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
#[non_exhaustive]
pub enum OutputFormat {
    /// The final state of the universe, in the save file format.
    Json,
    /// A human-readable listing of every body's final state, followed by step statistics.
    #[default]
    Status,
}

/// Writes the result of a simulation to `writer` in the chosen format.
///
/// Step timing is not included, so that output is deterministic; log it separately if
/// wanted.
pub fn write_output(
    format: OutputFormat,
    universe: &Universe,
    report: &SimulationReport,
    writer: &mut dyn io::Write,
) -> Result<(), anyhow::Error> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, universe)
                .context("failed to write universe")?;
            writeln!(writer)?;
        }
        OutputFormat::Status => {
            for (name, scene) in universe.iter() {
                writeln!(writer, "Scene {name:?}:")?;
                write!(writer, "{}", scene.refmt(&StatusText))?;
            }
            writeln!(writer, "{}", report.info.refmt(&StatusText))?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{UniverseTemplate, simulate};
    use orrery::scene::PhysicsParameters;
    use pretty_assertions::assert_eq;

    fn output_string(
        format: OutputFormat,
        universe: &Universe,
        report: &SimulationReport,
    ) -> String {
        let mut buffer = Vec::new();
        write_output(format, universe, report, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn status() {
        let mut universe = UniverseTemplate::CollisionPair.build(PhysicsParameters::ZERO_GRAVITY);
        let report = simulate(&mut universe, 1).unwrap();
        assert_eq!(
            output_string(OutputFormat::Status, &universe, &report),
            "Scene \"main\":\n\
            #0 \"left\": Position: (-0.250, +0.000, +0.000)  Velocity: (+0.000, +0.000, +0.000)\n\
            #1 \"right\": Position: (+1.750, +0.000, +0.000)  Velocity: (+0.000, +0.000, +0.000)\n\
            Ticks: 1\n\
            Scenes: 1 stepped, 0 skipped\n\
            Physics: 1 steps: 2 moved, 1 pairs tested in 1 passes, 1 contacts (0 degenerate)\n"
        );
    }

    #[test]
    fn json_reads_back() {
        let universe = UniverseTemplate::Rain.build(PhysicsParameters::DEFAULT);
        let text = output_string(
            OutputFormat::Json,
            &universe,
            &SimulationReport::default(),
        );
        assert!(text.ends_with("}\n"));
        let read_back: Universe = serde_json::from_str(&text).unwrap();
        assert_eq!(read_back, universe);
    }
}
