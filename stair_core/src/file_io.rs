//! # File I/O Module
//!
//! Writes build output to disk without leaving half-written files behind:
//! - **Atomic saves**: write to `.tmp`, sync, rename over the target
//! - **Model documents**: the built model together with its dimensions and policy
//!   it came from, stamped with a schema version and build time
//! - **Version validation**: refuse documents from an incompatible schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use stair_core::file_io::{save_document, load_document, ModelDocument};
//! use stair_core::geometry::build;
//! use stair_core::materials::TreadMaterial;
//! use stair_core::policy::GeometryPolicy;
//! use stair_core::staircase::StaircaseSpec;
//! use std::path::Path;
//!
//! let spec = StaircaseSpec::new(1000.0, 800.0, 200.0, TreadMaterial::Dpk);
//! let policy = GeometryPolicy::eco();
//! let model = build(&spec, &policy)?;
//!
//! let doc = ModelDocument::new(spec, policy, model);
//! save_document(&doc, Path::new("stair.json"))?;
//! let loaded = load_document(Path::new("stair.json"))?;
//! assert_eq!(loaded.model.step_count, 4);
//! # Ok::<(), stair_core::errors::StairError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{StairError, StairResult};
use crate::geometry::Model;
use crate::policy::GeometryPolicy;
use crate::staircase::StaircaseSpec;

/// Current model document schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

/// A built model with everything needed to rebuild it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub spec: StaircaseSpec,
    pub policy: GeometryPolicy,
    pub model: Model,
}

impl ModelDocument {
    pub fn new(spec: StaircaseSpec, policy: GeometryPolicy, model: Model) -> Self {
        ModelDocument {
            version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            spec,
            policy,
            model,
        }
    }
}

/// Write `bytes` to `path` through a temp file and rename.
///
/// A crash mid-write leaves at most a stray `.tmp` file, never a truncated
/// target.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> StairResult<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        StairError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        StairError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        StairError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        StairError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Save a model document as pretty JSON.
pub fn save_document(doc: &ModelDocument, path: &Path) -> StairResult<()> {
    let json = serde_json::to_string_pretty(doc)?;
    write_atomic(path, json.as_bytes())
}

/// Load a model document.
///
/// # Returns
///
/// * `Err(StairError::VersionMismatch)` - File version is incompatible
/// * `Err(StairError::SerializationError)` - Invalid JSON
/// * `Err(StairError::FileError)` - I/O error
pub fn load_document(path: &Path) -> StairResult<ModelDocument> {
    let mut file = File::open(path)
        .map_err(|e| StairError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| StairError::file_error("read", path.display().to_string(), e.to_string()))?;

    let doc: ModelDocument = serde_json::from_str(&contents).map_err(|e| StairError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&doc.version)?;
    Ok(doc)
}

/// Major must match; on 0.x a newer minor is rejected too.
fn validate_version(file_version: &str) -> StairResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || StairError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, rest @ ..], [current_major, current_rest @ ..]) => {
            if file_major != current_major {
                return Err(mismatch());
            }
            if *current_major == 0 {
                if let (Some(file_minor), Some(current_minor)) = (rest.first(), current_rest.first()) {
                    if file_minor > current_minor {
                        return Err(mismatch());
                    }
                }
            }
            Ok(())
        }
        _ => Err(mismatch()),
    }
}
