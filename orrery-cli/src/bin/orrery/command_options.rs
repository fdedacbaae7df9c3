//! Command line option parsing.

use std::path::PathBuf;
use std::str::FromStr as _;

use clap::Parser;
use clap::builder::{PossibleValue, PossibleValuesParser, TypedValueParser as _};
use strum::IntoEnumIterator as _;

use orrery_cli::logging::LoggingArgs;
use orrery_cli::{OutputFormat, ParametersArgs, UniverseSource, UniverseTemplate};

#[derive(Clone, Debug, Parser)]
#[command(name = "orrery", author, about, version)]
pub(crate) struct OrreryArgs {
    /// Which universe template to use.
    ///
    /// Mutually exclusive with specifying an input file.
    #[arg(
        long = "template",
        short = 't',
        default_value = "collision-pair",
        value_parser = PossibleValuesParser::new(
            UniverseTemplate::iter().map(|t| PossibleValue::new(<&'static str>::from(t))),
        ).try_map(|string| UniverseTemplate::from_str(&string)),
    )]
    pub(crate) template: UniverseTemplate,

    /// Number of ticks to simulate.
    ///
    /// If neither this nor --duration is given, 60 ticks are simulated.
    #[arg(long = "ticks", short = 'n', value_name = "N", conflicts_with = "duration")]
    pub(crate) ticks: Option<u64>,

    /// Length of simulated time to run for, rounded up to a whole number of ticks.
    #[arg(long = "duration", value_name = "SECONDS", value_parser = parse_duration)]
    pub(crate) duration: Option<f64>,

    /// File to write the result to, instead of standard output.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub(crate) output_file: Option<PathBuf>,

    /// Format of the result.
    #[arg(long = "format", short = 'f', value_enum, default_value_t)]
    pub(crate) format: OutputFormat,

    #[command(flatten)]
    pub(crate) logging: LoggingArgs,

    #[command(flatten)]
    pub(crate) parameters: ParametersArgs,

    /// Existing universe save file (JSON) to load. If not specified, a template will be
    /// used instead.
    #[arg(conflicts_with = "template", value_name = "FILE")]
    pub(crate) input_file: Option<PathBuf>,
}

fn parse_duration(arg: &str) -> Result<f64, String> {
    let seconds: f64 = arg.parse().map_err(|e| format!("{e}"))?;
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(seconds)
    } else {
        Err(String::from("must be a non-negative number of seconds"))
    }
}

/// Choose a [`UniverseSource`] given the relevant options.
pub(crate) fn parse_universe_source(
    input_file: Option<PathBuf>,
    template: UniverseTemplate,
) -> UniverseSource {
    match input_file {
        Some(path) => UniverseSource::File(path),
        None => UniverseSource::Template(template),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<OrreryArgs, clap::error::Error> {
        OrreryArgs::try_parse_from(std::iter::once("orrery").chain(args.iter().copied()))
    }

    #[test]
    fn verify_cli() {
        OrreryArgs::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let options = parse(&[]).unwrap();
        assert_eq!(options.template, UniverseTemplate::CollisionPair);
        assert_eq!(options.format, OutputFormat::Status);
        assert_eq!(options.ticks, None);
        assert_eq!(
            parse_universe_source(options.input_file, options.template),
            UniverseSource::Template(UniverseTemplate::CollisionPair)
        );
    }

    #[test]
    fn template_names() {
        assert_eq!(
            parse(&["--template", "rain"]).unwrap().template,
            UniverseTemplate::Rain
        );
        parse(&["--template", "nonexistent"]).unwrap_err();
    }

    #[test]
    fn input_file_conflicts_with_template() {
        let options = parse(&["saved.json"]).unwrap();
        assert_eq!(
            parse_universe_source(options.input_file, options.template),
            UniverseSource::File(PathBuf::from("saved.json"))
        );
        parse(&["--template", "pile", "saved.json"]).unwrap_err();
    }

    #[test]
    fn ticks_conflicts_with_duration() {
        assert_eq!(parse(&["--ticks", "5"]).unwrap().ticks, Some(5));
        assert_eq!(parse(&["--duration", "2.5"]).unwrap().duration, Some(2.5));
        parse(&["--ticks", "5", "--duration", "1"]).unwrap_err();
        parse(&["--duration", "-1"]).unwrap_err();
        parse(&["--duration", "inf"]).unwrap_err();
    }

    #[test]
    fn set_values() {
        let options = parse(&["--set", "enabled=false", "-S", "gravity=[0,0,0]"]).unwrap();
        assert_eq!(
            options.parameters.set,
            vec![
                ("enabled".to_owned(), serde_json::json!(false)),
                ("gravity".to_owned(), serde_json::json!([0, 0, 0])),
            ]
        );
        parse(&["--set", "enabled"]).unwrap_err();
    }
}
