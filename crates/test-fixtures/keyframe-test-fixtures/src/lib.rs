use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    tracks: HashMap<String, TrackEntry>,
    #[serde(default)]
    configs: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct TrackEntry {
    keyframes: String,
    #[serde(default)]
    samples: Option<String>,
}

/// Expected sample of a track fixture: position/color at a query time.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedSample {
    pub time: f32,
    pub position: [f32; 3],
    #[serde(default)]
    pub color: Option<[f32; 4]>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod tracks {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.tracks.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Raw persisted keyframe list.
    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.tracks, "track", name)?;
        read_to_string(&entry.keyframes)
    }

    pub fn samples(name: &str) -> Result<Vec<ExpectedSample>> {
        let entry = lookup(&MANIFEST.tracks, "track", name)?;
        match &entry.samples {
            Some(rel) => super::load_json(rel),
            None => Ok(Vec::new()),
        }
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.tracks, "track", name)?;
        Ok(resolve_path(&entry.keyframes))
    }
}

pub mod configs {
    use super::*;

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        super::load_json(rel)
    }
}
