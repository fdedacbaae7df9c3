use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;
use directories_next::ProjectDirs;
use serde::{Serialize, de::DeserializeOwned};

use orrery::scene::PhysicsParameters;
use orrery::universe::Universe;

/// If this environment variable is set, [`load_config()`] fails instead of reading the
/// user's files.
const NO_CONFIG_FILES_VAR: &str = "ORRERY_DO_NOT_USE_CONFIG_FILES_IN_TESTS";

// -------------------------------------------------------------------------------------------------

/// Load the default [`PhysicsParameters`] from a platform-appropriate configuration directory,
/// creating the file with built-in defaults if it does not exist.
///
/// This does not respect command-line options. Use [`ParametersArgs`] for that.
pub fn load_config() -> Result<PhysicsParameters, anyhow::Error> {
    if std::env::var_os(NO_CONFIG_FILES_VAR).is_some() {
        anyhow::bail!(
            "tests should be hermetic and not touch user config files \
            (environment variable {NO_CONFIG_FILES_VAR} set, \
            but --no-config-files not passed)"
        );
    }

    let project_dirs = ProjectDirs::from("org", "Orrery", "orrery")
        .ok_or_else(|| anyhow::anyhow!("could not find configuration directory"))?;
    fs::create_dir_all(project_dirs.config_dir())?;

    Ok(read_or_create_default_json_file(
        "default physics parameters",
        &project_dirs.config_dir().join("defaults.json"),
        PhysicsParameters::default,
    ))
}

// -------------------------------------------------------------------------------------------------

/// [`clap::Args`] argument group struct for args that affect which physics parameters
/// scenes are simulated with.
#[derive(Clone, Debug, clap::Args)]
pub struct ParametersArgs {
    /// Ignore all configuration files, using only defaults and command-line options.
    #[arg(long = "no-config-files")]
    pub no_config_files: bool,

    #[expect(clippy::doc_markdown, reason = "will be displayed in --help")]
    /// Override a physics parameter of every scene, whether the scene comes from a
    /// template or an input file.
    ///
    /// The value is specified as a key-value pair where the key is an unquoted string, the
    /// separator is “=”, and the value is a JSON value (which, if a string, must be quoted);
    /// for example: --set gravity='[0, -1.62, 0]' --set degenerate_contacts='"Fail"'
    #[arg(long = "set", short = 'S', value_parser = parse_configure, value_name = "NAME=JSON")]
    pub set: Vec<(String, serde_json::Value)>,
}

impl ParametersArgs {
    /// Reads configuration files if permitted, and checks that the `--set` overrides
    /// are valid.
    pub fn build(self) -> Result<ParameterSettings, anyhow::Error> {
        let Self {
            no_config_files,
            set: overrides,
        } = self;

        let from_files = if no_config_files {
            PhysicsParameters::default()
        } else {
            load_config().context("Error loading configuration files")?
        };

        let mut settings = ParameterSettings {
            defaults: from_files,
            overrides,
        };
        settings.defaults = settings.apply_overrides(&from_files)?;
        Ok(settings)
    }
}

/// Physics parameter choices made by configuration files and command-line options.
///
/// Produced by [`ParametersArgs::build()`].
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSettings {
    /// Parameters for scenes newly created from templates.
    pub defaults: PhysicsParameters,
    /// Individual parameters replaced in every scene.
    overrides: Vec<(String, serde_json::Value)>,
}

impl ParameterSettings {
    /// Settings with the given defaults and no overrides.
    pub fn new(defaults: PhysicsParameters) -> Self {
        Self {
            defaults,
            overrides: Vec::new(),
        }
    }

    /// Replaces the overridden parameters in every scene of `universe`.
    pub fn apply_to(&self, universe: &mut Universe) -> Result<(), anyhow::Error> {
        if self.overrides.is_empty() {
            return Ok(());
        }
        for (name, scene) in universe.iter_mut() {
            let parameters = self
                .apply_overrides(scene.parameters())
                .with_context(|| format!("in scene {name:?}"))?;
            scene.set_parameters(parameters);
        }
        Ok(())
    }

    fn apply_overrides(
        &self,
        parameters: &PhysicsParameters,
    ) -> Result<PhysicsParameters, anyhow::Error> {
        if self.overrides.is_empty() {
            return Ok(*parameters);
        }
        let serde_json::Value::Object(mut fields) = serde_json::to_value(parameters)? else {
            anyhow::bail!("physics parameters did not serialize as a JSON object");
        };
        for (key, value) in &self.overrides {
            fields.insert(key.clone(), value.clone());
        }
        serde_json::from_value(serde_json::Value::Object(fields))
            .context("--set did not produce valid physics parameters")
    }
}

fn parse_configure(arg: &str) -> Result<(String, serde_json::Value), anyhow::Error> {
    let (key, value) = arg.split_once('=').ok_or_else(|| anyhow::anyhow!("missing '='"))?;
    let value = serde_json::from_str(value)?;
    Ok((key.to_owned(), value))
}

// -------------------------------------------------------------------------------------------------

fn read_or_create_default_json_file<V: DeserializeOwned + Serialize>(
    description: &str,
    path: &Path,
    default: fn() -> V,
) -> V {
    match File::open(path) {
        Ok(file) => match serde_json::from_reader(BufReader::new(file)) {
            Ok(value) => {
                log::trace!(
                    "Loaded {description} from {path}",
                    path = path.to_string_lossy()
                );
                value
            }
            Err(e) => {
                log::warn!(
                    "Syntax error in {description} loaded from {path}; \
                    using default values. Error: {e}",
                    path = path.to_string_lossy(),
                );
                default()
            }
        },
        Err(open_for_read_error) if open_for_read_error.kind() == std::io::ErrorKind::NotFound => {
            log::info!(
                "No {description} file found; creating {path}",
                path = path.to_string_lossy()
            );
            let value = default();
            let written = serde_json::to_string_pretty(&value)
                .map_err(anyhow::Error::from)
                .and_then(|json_text| Ok(fs::write(path, json_text.as_bytes())?));
            match written {
                Ok(()) => log::trace!(
                    "Wrote default {description} to {path}",
                    path = path.to_string_lossy()
                ),
                Err(write_error) => {
                    log::error!(
                        "Error while writing default {description} file {path}: {write_error}",
                        path = path.to_string_lossy(),
                    );
                }
            }
            value
        }
        Err(e) => {
            log::error!(
                "Error while reading {description} file {path}: {e}",
                path = path.to_string_lossy(),
            );
            default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery::physics::DegeneratePolicy;
    use orrery::scene::Scene;
    use pretty_assertions::assert_eq;

    fn args(set: &[&str]) -> ParametersArgs {
        ParametersArgs {
            no_config_files: true,
            set: set.iter().map(|arg| parse_configure(arg).unwrap()).collect(),
        }
    }

    #[test]
    fn parse_configure_splits_at_first_equals() {
        assert_eq!(
            parse_configure("degenerate_contacts=\"Fail\"").unwrap(),
            ("degenerate_contacts".to_owned(), serde_json::json!("Fail"))
        );
        parse_configure("no_separator").unwrap_err();
        parse_configure("enabled=not json").unwrap_err();
    }

    #[test]
    fn no_overrides() {
        let settings = args(&[]).build().unwrap();
        assert_eq!(settings, ParameterSettings::new(PhysicsParameters::default()));
    }

    #[test]
    fn overrides_apply_to_defaults_and_scenes() {
        let settings = args(&["gravity=[0, 0, 0]", "degenerate_contacts=\"Fail\""])
            .build()
            .unwrap();
        let mut expected = PhysicsParameters::ZERO_GRAVITY;
        expected.degenerate_contacts = DegeneratePolicy::Fail;
        assert_eq!(settings.defaults, expected);

        let mut disabled = PhysicsParameters::DEFAULT;
        disabled.enabled = false;
        let mut universe = Universe::new();
        universe.insert("a", Scene::new(disabled));
        settings.apply_to(&mut universe).unwrap();
        expected.enabled = false;
        assert_eq!(universe.get("a").unwrap().parameters(), &expected);
    }

    #[test]
    fn invalid_override() {
        let error = args(&["time_scale=-1"]).build().unwrap_err();
        assert_eq!(
            error.to_string(),
            "--set did not produce valid physics parameters"
        );
        args(&["no_such_parameter=1"]).build().unwrap_err();
    }
}
