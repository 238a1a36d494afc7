pub mod analyze;
pub mod extract;
pub mod serve;

// Re-export command functions for convenience
pub use analyze::analyze;
pub use extract::extract;
pub use serve::serve;

use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Read an input file, or stdin when the path is `-` or absent
pub(crate) async fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        _ => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}
