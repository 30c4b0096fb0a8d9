use anyhow::{Context, Result};
use fortune::Canvas;
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Sidecar describing how an edge file was produced.
#[derive(Debug, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub version: &'static str,
    pub canvas: [i64; 2],
    pub sites: usize,
    /// Seed of the random sites, if any were scattered.
    pub seed: Option<u64>,
    pub edges: usize,
    pub outputs: Vec<String>,
}

impl Provenance {
    pub fn new(canvas: Canvas, sites: usize, seed: Option<u64>, edges: usize, out: &Path) -> Self {
        Self {
            code_rev: code_rev(),
            version: fortune::VERSION,
            canvas: [canvas.width, canvas.height],
            sites,
            seed,
            edges,
            outputs: vec![out.to_string_lossy().into_owned()],
        }
    }
}

/// Write `<artifact stem>.provenance.json` next to the artifact.
pub fn write_sidecar(artifact: &Path, provenance: &Provenance) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }
    fs::write(&path, serde_json::to_vec_pretty(provenance)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("edges"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Code revision: `GIT_COMMIT` at build time, else at run time, else "unknown".
pub fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
