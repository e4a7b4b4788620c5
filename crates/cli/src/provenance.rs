//! Provenance sidecars: which code revision and parameters produced an artifact.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::ffi::OsStr;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata used to generate a provenance sidecar.
pub struct Payload {
    pub params: Value,
    pub tag: Option<String>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self { params, tag: None }
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }
}

/// On-disk record written beside each artifact.
#[derive(Debug, Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    lib_version: &'static str,
    callsite: Callsite,
    tag: Option<&'a str>,
    params: &'a Value,
    outputs: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

/// Writes `<stem>.provenance.json` next to `artifact`: code revision, library
/// version, callsite, run tag, params and the artifact path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let caller = Location::caller();
    let artifact = artifact.as_ref();
    let target = provenance_path(artifact);
    match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?,
        _ => {}
    }

    let record = Sidecar {
        code_rev: current_git_rev(),
        lib_version: polyconvex::VERSION,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        tag: payload.tag.as_deref(),
        params: &payload.params,
        outputs: vec![artifact.display().to_string()],
    };
    fs::write(&target, serde_json::to_vec_pretty(&record)?)
        .with_context(|| format!("writing {}", target.display()))?;
    tracing::debug!(path = %target.display(), "provenance sidecar");
    Ok(target)
}

/// Provenance block printed by `report` when no sweep file is given.
pub fn summary(tag: Option<String>) -> Value {
    json!({
        "code_rev": current_git_rev(),
        "lib_version": polyconvex::VERSION,
        "tag": tag,
    })
}

/// `dir/name.ext` becomes `dir/name.provenance.json`.
fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact.file_stem().unwrap_or(OsStr::new("artifact"));
    let mut name = stem.to_os_string();
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// `GIT_COMMIT` when set and non-empty, else `git rev-parse HEAD`, else "unknown".
pub fn current_git_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .filter(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let rev = String::from_utf8(output.stdout).ok()?;
    Some(rev.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_rewrites_extension() {
        let base = Path::new("/tmp/output/sweep.csv");
        let derived = provenance_path(base);
        assert_eq!(derived, Path::new("/tmp/output/sweep.provenance.json"));
    }

    #[test]
    fn summary_carries_version_and_tag() {
        let block = summary(Some("nightly".into()));
        assert_eq!(block["lib_version"], polyconvex::VERSION);
        assert_eq!(block["tag"], "nightly");
        assert!(!current_git_rev().is_empty());
    }

    #[test]
    fn write_sidecar_records_params_and_tag() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("polygon.svg");
        fs::write(&artifact, "<svg/>").unwrap();
        let payload = Payload::new(json!({"workers": 4})).with_tag(Some("run-1".into()));
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.display().to_string());
        assert_eq!(parsed["lib_version"], polyconvex::VERSION);
        assert!(parsed["callsite"]["line"].as_u64().unwrap() > 0);
        assert_eq!(parsed["params"]["workers"], 4);
        assert_eq!(parsed["tag"], "run-1");
    }
}
