//! Components of the `orrery` command-line program, which loads or generates an
//! [`orrery`] universe, simulates it for some number of ticks, and writes out the result.
//!
//! This library exists primarily so that the binary's pieces can be tested; it is not
//! intended for general use.

mod config_files;
pub use config_files::{ParameterSettings, ParametersArgs, load_config};
pub mod logging;
mod output;
pub use output::{OutputFormat, write_output};
mod simulate;
pub use simulate::{DEFAULT_TICKS, SimulationReport, simulate, ticks_for_duration};
mod template;
pub use template::UniverseTemplate;
mod universe_source;
pub use universe_source::UniverseSource;
