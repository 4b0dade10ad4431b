use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::session::SessionError;

#[derive(Embed)]
#[folder = "assets/sessions/"]
struct SessionAssets;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    #[serde(rename = "RandomShuffle", default)]
    pub random_shuffle: bool,
}

/// A chapter of typing sections as stored in a YAML session file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFile {
    pub title: String,
    #[serde(default)]
    pub options: SessionOptions,
    pub sections: Vec<String>,
}

/// Where a session file comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionSource {
    Bundled(String),
    File(PathBuf),
}

impl SessionSource {
    pub fn label(&self) -> String {
        match self {
            SessionSource::Bundled(name) => name.clone(),
            SessionSource::File(path) => path.display().to_string(),
        }
    }

    pub fn load(&self) -> Result<SessionFile, SessionError> {
        match self {
            SessionSource::Bundled(name) => SessionFile::load_bundled(name),
            SessionSource::File(path) => SessionFile::load(path),
        }
    }
}

impl SessionFile {
    pub fn from_yaml_str(content: &str) -> Result<Self, SessionError> {
        let file: SessionFile = serde_yaml::from_str(content)?;
        if file.sections.is_empty() {
            return Err(SessionError::EmptySession);
        }
        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let content = fs::read_to_string(path).map_err(|source| SessionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn load_bundled(name: &str) -> Result<Self, SessionError> {
        let file = SessionAssets::get(name).ok_or_else(|| SessionError::UnknownBundled(name.to_string()))?;
        let content = std::str::from_utf8(file.data.as_ref())
            .map_err(|_| SessionError::UnknownBundled(name.to_string()))?;
        Self::from_yaml_str(content)
    }

    pub fn bundled() -> Vec<String> {
        let mut names: Vec<String> = SessionAssets::iter()
            .filter(|name| is_session_file(Path::new(name.as_ref())))
            .map(|name| name.to_string())
            .collect();
        names.sort();
        names
    }

    /// Shuffle the sections when the file asks for it.
    pub fn shuffle_sections<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.options.random_shuffle {
            self.sections.shuffle(rng);
        }
    }
}

pub fn is_session_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}

/// Session files in `dir` and its direct sub-directories, sorted by path.
pub fn discover(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let Ok(entries) = fs::read_dir(dir) else {
        return found;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Ok(inner) = fs::read_dir(&path) {
                found.extend(
                    inner
                        .flatten()
                        .map(|e| e.path())
                        .filter(|p| p.is_file() && is_session_file(p)),
                );
            }
        } else if is_session_file(&path) {
            found.push(path);
        }
    }

    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const SAMPLE: &str = r#"
title: Moby Dick
options:
  RandomShuffle: false
sections:
  - "Call me Ishmael."
  - "Some years ago, never mind how long precisely"
"#;

    #[test]
    fn test_parse_session_file() {
        let file = SessionFile::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(file.title, "Moby Dick");
        assert!(!file.options.random_shuffle);
        assert_eq!(file.sections.len(), 2);
        assert_eq!(file.sections[0], "Call me Ishmael.");
    }

    #[test]
    fn test_options_default_when_missing() {
        let file = SessionFile::from_yaml_str("title: t\nsections: [a, b]\n").unwrap();
        assert_eq!(file.options, SessionOptions::default());
    }

    #[test]
    fn test_empty_sections_rejected() {
        let err = SessionFile::from_yaml_str("title: t\nsections: []\n").unwrap_err();
        assert!(matches!(err, SessionError::EmptySession));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = SessionFile::from_yaml_str("title: [unterminated").unwrap_err();
        assert!(matches!(err, SessionError::Parse(_)));
    }

    #[test]
    fn test_shuffle_only_when_requested() {
        let sections: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        let mut file = SessionFile {
            title: "t".to_string(),
            options: SessionOptions::default(),
            sections: sections.clone(),
        };
        let mut rng = SmallRng::seed_from_u64(7);
        file.shuffle_sections(&mut rng);
        assert_eq!(file.sections, sections);

        file.options.random_shuffle = true;
        file.shuffle_sections(&mut rng);
        assert_ne!(file.sections, sections);
        let mut sorted = file.sections.clone();
        sorted.sort_by_key(|s| s.parse::<u32>().unwrap());
        assert_eq!(sorted, sections);
    }

    #[test]
    fn test_load_from_path_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moby.yaml");
        fs::write(&path, SAMPLE).unwrap();
        assert_eq!(SessionFile::load(&path).unwrap().title, "Moby Dick");

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            SessionFile::load(&missing),
            Err(SessionError::Read { .. })
        ));
    }

    #[test]
    fn test_discover_finds_nested_session_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.yml"), SAMPLE).unwrap();
        fs::write(dir.path().join("notes.txt"), "nope").unwrap();
        fs::create_dir(dir.path().join("books")).unwrap();
        fs::write(dir.path().join("books").join("a.yaml"), SAMPLE).unwrap();

        let found = discover(dir.path());
        assert_eq!(
            found,
            vec![dir.path().join("b.yml"), dir.path().join("books").join("a.yaml")]
        );
    }

    #[test]
    fn test_discover_missing_dir_is_empty() {
        assert!(discover(Path::new("/definitely/not/here")).is_empty());
    }

    #[test]
    fn test_bundled_sessions_load() {
        let names = SessionFile::bundled();
        assert!(!names.is_empty());
        for name in names {
            let file = SessionFile::load_bundled(&name).unwrap();
            assert!(!file.sections.is_empty());
        }
        assert!(matches!(
            SessionFile::load_bundled("nope.yaml"),
            Err(SessionError::UnknownBundled(_))
        ));
    }
}
