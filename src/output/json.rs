//
//  tdx-cli
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! Serializes data to JSON for scripting and for saving API results to disk.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`write_json`] | Pretty-printed JSON to stdout |
//! | [`write_json_to`] | Pretty-printed JSON to any writer |
//! | [`write_data_as_json_file`] | Pretty-printed JSON to a file |

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Writes a value to stdout as pretty-printed JSON.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    write_json_to(&mut std::io::stdout().lock(), value)
}

/// Writes a value to `writer` as pretty-printed JSON followed by a newline.
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes a value to `file_name` as JSON with 2-space indentation.
///
/// The file is written as UTF-8 and replaced if it exists. Parent directories
/// are not created.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
///
/// # Example
///
/// ```rust,no_run
/// use serde_json::json;
/// use tdx_cli::output::write_data_as_json_file;
///
/// write_data_as_json_file(&json!({"a": 1, "b": "two"}), "outputDirectory/my-data.json")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn write_data_as_json_file<T, P>(data: &T, file_name: P) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = file_name.as_ref();
    let content = serde_json::to_string_pretty(data)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Wrote JSON to {}", path.display());
    Ok(())
}
