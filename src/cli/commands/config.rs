//! Config command implementation

use tracing::info;

use super::RunStatus;
use crate::cli::ConfigArgs;
use crate::config::DriftConfig;
use crate::error::{DriftError, Result};

pub fn run_config(args: ConfigArgs, quiet: bool) -> Result<RunStatus> {
    if let Some(path) = &args.validate {
        let config = DriftConfig::from_file(path)?;
        if !quiet {
            println!("Configuration valid: {}", path.display());
            println!();
            print!("{}", config.to_yaml()?);
        }
        return Ok(RunStatus::Clean);
    }

    let yaml = DriftConfig::default().to_yaml()?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &yaml)
                .map_err(|e| DriftError::io(format!("Failed to write {}", path.display()), e))?;
            info!(path = %path.display(), "Default configuration written");
        }
        None => print!("{yaml}"),
    }
    Ok(RunStatus::Clean)
}
