use std::{
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub run_id: String,
    pub command: String,
    pub version: String,
    pub timestamp: String,
    pub params: Vec<Param>,
    #[serde(default)]
    pub inputs: Vec<InputFile>,
    pub outputs: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InputFile {
    pub path: String,
    /// SHA-256 of the file contents; absent if it could not be read
    pub hash: Option<String>,
}

/// Write `run-<uuid>.json` next to the first output.
pub fn record_manifest(
    outputs: &[&Path],
    command: &str,
    params: &[(&str, String)],
    inputs: &[&Path],
) -> Result<PathBuf> {
    let run_id = Uuid::new_v4().to_string();
    let dir = outputs
        .first()
        .and_then(|output| output.parent())
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    fs::create_dir_all(&dir)?;

    let manifest = ManifestEntry {
        run_id: run_id.clone(),
        command: command.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
        params: params
            .iter()
            .map(|(k, v)| Param {
                name: k.to_string(),
                value: v.clone(),
            })
            .collect(),
        inputs: inputs
            .iter()
            .map(|path| InputFile {
                path: path.display().to_string(),
                hash: compute_sha256(path).ok(),
            })
            .collect(),
        outputs: outputs.iter().map(|p| p.display().to_string()).collect(),
    };
    let json = serde_json::to_string_pretty(&manifest)?;
    let path = dir.join(format!("run-{}.json", run_id));
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    println!("Recorded run manifest {}", path.display());
    Ok(path)
}

pub fn read_manifest(path: &Path) -> Result<ManifestEntry> {
    let json = fs::read_to_string(path)?;
    let manifest = serde_json::from_str(&json)?;
    Ok(manifest)
}

/// Compute SHA256 hash of a file
pub fn compute_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("opening {} for hashing", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buffer = [0; 8192];
    loop {
        let n = file
            .read(&mut buffer)
            .with_context(|| format!("reading {} for hashing", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn manifest_lands_beside_output_with_input_hash() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("raw.json");
        fs::write(&input, "abc").unwrap();
        let output = dir.path().join("out/merged.json");

        let path = record_manifest(
            &[&output],
            "process",
            &[("period", "2025-02".to_string())],
            &[&input],
        )
        .unwrap();

        assert_eq!(path.parent().unwrap(), dir.path().join("out"));
        let manifest = read_manifest(&path).unwrap();
        assert_eq!(manifest.command, "process");
        assert_eq!(manifest.params[0].value, "2025-02");
        assert_eq!(
            manifest.inputs[0].hash.as_deref(),
            Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn unreadable_input_has_no_hash() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("enriched.json");
        let missing = dir.path().join("missing.json");

        let path = record_manifest(&[&output], "enrich", &[], &[&missing]).unwrap();
        let manifest = read_manifest(&path).unwrap();
        assert!(manifest.inputs[0].hash.is_none());
    }
}
