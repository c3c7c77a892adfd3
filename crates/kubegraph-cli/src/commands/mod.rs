pub mod generate;
pub mod import;
pub mod roundtrip;
pub mod rules;

use std::path::Path;

use kubegraph_core::errors::{KgError, KgErrorKind};
use kubegraph_core::GenerateConfig;

/// Read a file, tagging failures with the I/O error code
pub(crate) fn read_file(path: &Path, op: &str) -> Result<String, KgError> {
    std::fs::read_to_string(path).map_err(|e| {
        KgError::new(KgErrorKind::Io)
            .with_op(op)
            .with_message(format!("{}: {}", path.display(), e))
    })
}

/// Load generation settings from `--config`, or the defaults without one
pub(crate) fn load_config(path: Option<&Path>) -> Result<GenerateConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let text = read_file(path, "load_config")?;
            Ok(GenerateConfig::from_toml_str(&text)?)
        }
        None => Ok(GenerateConfig::default()),
    }
}

/// Write to `output`, or stdout without one
pub(crate) fn emit(text: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            println!("✓ Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
