use std::path::Path;

use ampline_ieee738::ScenarioFile;
use anyhow::Context;
use tracing::info;

pub mod simulate;
pub mod steady;

/// Loads a scenario file, or the reference scenario when no path is given.
pub fn load_scenario(path: Option<&Path>) -> anyhow::Result<ScenarioFile> {
    match path {
        Some(path) => {
            let file = ScenarioFile::load(path)
                .with_context(|| format!("loading scenario {}", path.display()))?;
            info!(path = %path.display(), "loaded scenario");
            Ok(file)
        }
        None => {
            info!("no scenario file given, using the reference case");
            Ok(ScenarioFile::default())
        }
    }
}

pub fn print_default_config() -> anyhow::Result<()> {
    let text = ScenarioFile::default()
        .to_toml()
        .context("serializing the default scenario")?;
    print!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_uses_reference_case() {
        let file = load_scenario(None).unwrap();
        assert_eq!(file.scenario.fault_current_a, 20_000.0);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_scenario(Some(Path::new("/nonexistent/line.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/line.toml"));
    }
}
