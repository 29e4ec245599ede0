use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::{MacError, MacResult};

/// Where the address to apply comes from. Exactly one per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacSource {
    Direct(String),
    Random(PathBuf),
}

impl MacSource {
    pub fn from_options(mac: Option<String>, random: Option<PathBuf>) -> MacResult<Self> {
        match (mac, random) {
            (Some(mac), None) => Ok(MacSource::Direct(mac)),
            (None, Some(path)) => Ok(MacSource::Random(path)),
            (Some(_), Some(_)) => Err(MacError::Configuration(
                "--mac and --random are mutually exclusive".into(),
            )),
            (None, None) => Err(MacError::Configuration(
                "one of --mac or --random is required".into(),
            )),
        }
    }
}

/// Resolve the candidate string for this run. The result is not validated.
pub fn select_candidate<R: Rng + ?Sized>(source: &MacSource, rng: &mut R) -> MacResult<String> {
    match source {
        MacSource::Direct(mac) => Ok(mac.trim().to_string()),
        MacSource::Random(path) => {
            let path = resolve_candidate_file(path)?;
            let candidates = read_candidates(&path)?;
            let candidate = choose_candidate(&candidates, rng)
                .ok_or_else(|| MacError::EmptyCandidates(path.clone()))?;
            info!(
                "picked {:?} out of {} candidates in {}",
                candidate,
                candidates.len(),
                path.display()
            );
            Ok(candidate)
        }
    }
}

/// Absolute path of an existing regular file.
pub fn resolve_candidate_file(path: &Path) -> MacResult<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| MacError::Configuration(e.to_string()))?
            .join(path)
    };
    if !path.exists() {
        return Err(MacError::FileNotFound(path));
    }
    if !path.is_file() {
        return Err(MacError::InvalidFile(path));
    }
    debug!("candidate file: {}", path.display());
    Ok(path)
}

/// One candidate per line. Blank lines are kept.
pub fn read_candidates(path: &Path) -> MacResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        MacError::Configuration(format!("error reading file {}: {}", path.display(), e))
    })?;
    Ok(content.lines().map(|it| it.to_string()).collect())
}

pub fn choose_candidate<R: Rng + ?Sized>(candidates: &[String], rng: &mut R) -> Option<String> {
    candidates.choose(rng).map(|it| it.trim().to_string())
}
