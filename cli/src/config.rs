use serde::Deserialize;
use std::{
    env,
    error::Error,
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use cardreader_core::Machine;
use cardreader_input_evdev::EvdevMachine;
use cardreader_input_stdin::StdinMachine;
use log::info;

/// Environment variable holding the path of the card reader device
pub const INPUT_DEVICE_VAR: &str = "INPUT_DEVICE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("no input device given: set {} or `device` in the config file", INPUT_DEVICE_VAR)]
    NoDevice,
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    input_machine: InputMachineType,
}

impl Config {
    /// Creates an input machine from the config.
    /// Accepts an override to ignore config and use stdin, and one to always grab the device
    pub fn get_input_machine(
        &self,
        use_stdin: bool,
        force_grab: bool,
    ) -> Result<Box<dyn Machine>, Box<dyn Error>> {
        let input = if use_stdin {
            info!("Overriding config to read events from stdin");
            &InputMachineType::Stdin
        } else {
            &self.input_machine
        };
        info!("Input from: {:?}", input);
        match input {
            InputMachineType::Stdin => Ok(Box::new(StdinMachine::new()) as Box<dyn Machine>),
            InputMachineType::Evdev { device, grab } => {
                let path = resolve_device(device.as_deref(), env::var_os(INPUT_DEVICE_VAR))?;
                let machine = EvdevMachine::new(&path, *grab || force_grab)?;
                Ok(Box::new(machine) as Box<dyn Machine>)
            }
        }
    }
}

/// The device given by the environment wins over the one in the config
fn resolve_device(
    configured: Option<&Path>,
    from_env: Option<OsString>,
) -> Result<PathBuf, ConfigError> {
    match (from_env, configured) {
        (Some(path), _) if !path.is_empty() => Ok(PathBuf::from(path)),
        (_, Some(path)) => Ok(path.to_path_buf()),
        _ => Err(ConfigError::NoDevice),
    }
}

pub fn load(raw_str: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(raw_str)
}

/// Where the config is looked for when no path is given
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cardreader").join("config.toml"))
}

/// Reads the config at the path. Without a path, the default location is tried, and the default
/// config is used if there is no file there
pub fn read(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_path() {
            Some(p) if p.exists() => p,
            _ => {
                info!("No config file, using defaults");
                return Ok(Config::default());
            }
        },
    };

    info!("Loading config from {:?}", path);
    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    load(&raw).map_err(|source| ConfigError::Parse { path, source })
}

#[derive(Debug, PartialEq, Deserialize)]
enum InputMachineType {
    Stdin,
    Evdev {
        #[serde(default)]
        device: Option<PathBuf>,
        #[serde(default)]
        grab: bool,
    },
}

impl Default for InputMachineType {
    fn default() -> Self {
        Self::Evdev {
            device: None,
            grab: false,
        }
    }
}
