//! Seed collection loaded into the store at startup

use std::fs;
use std::path::Path;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::note::NoteId;

/// First id handed out when no seed entry carries one
pub const FIRST_NOTE_ID: u64 = 1000;

/// A seed entry; `id` is optional and assigned by the store when missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedNote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NoteId>,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl SeedNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: Some(content.into()),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(NoteId::new(id));
        self
    }
}

const BUILTIN: &[(&str, &str)] = &[
    (
        "5 life lessons learned from cats",
        "Cats sleep when they are tired and eat when they are hungry. Nobody argues with them about it.",
    ),
    (
        "What the government doesn't want you to know about cats",
        "They have been running the postal service since the 1800s. Ask any mail carrier.",
    ),
    (
        "The most boring article about cats you'll ever read",
        "A cat sat on a mat. Later it moved to a different mat. That is the whole story.",
    ),
    (
        "7 things lady gaga has in common with cats",
        "Both wear unusual outfits, both demand attention, and both can hold a pose for hours.",
    ),
    (
        "The most incredible article about cats you'll ever read",
        "A cat once walked across a keyboard and shipped a working build to production.",
    ),
    (
        "10 ways cats can help you live to 100",
        "Purring lowers blood pressure, and chasing a cat around the house counts as cardio.",
    ),
    (
        "9 reasons you can blame the recession on cats",
        "Every box ever delivered was claimed by a cat and never returned to circulation.",
    ),
    (
        "10 ways marketers are making you addicted to cats",
        "Autoplay videos, limited edition cat calendars, and an endless supply of laser pointers.",
    ),
    (
        "11 ways investing in cats can make you a millionaire",
        "Buy low, sell never. Cats appreciate in value every time they knock something off a shelf.",
    ),
    (
        "Why you should forget everything you learned about cats",
        "Whatever you think you know, the cat already knows you think it.",
    ),
];

/// The built-in ten-note collection, ids `1000..=1009`
pub fn builtin_seed() -> Vec<SeedNote> {
    BUILTIN
        .iter()
        .zip(FIRST_NOTE_ID..)
        .map(|((title, content), id)| SeedNote::new(*title, *content).with_id(id))
        .collect()
}

/// Load a seed collection from a JSON array of `{id?, title, content?}` entries
pub fn load_seed_file<P: AsRef<Path>>(path: P) -> Result<Vec<SeedNote>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "load_seed_file: called");
    let content = fs::read_to_string(path).context(format!("Failed to read seed file {}", path.display()))?;
    let seed: Vec<SeedNote> =
        serde_json::from_str(&content).context(format!("Failed to parse seed file {}", path.display()))?;
    info!(count = seed.len(), path = %path.display(), "Loaded seed notes");
    Ok(seed)
}

/// Resolve the seed to use: the file when one is configured, otherwise the built-in set
pub fn resolve_seed(path: Option<&Path>) -> Result<Vec<SeedNote>> {
    match path {
        Some(path) => load_seed_file(path),
        None => {
            debug!("resolve_seed: using built-in seed");
            Ok(builtin_seed())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_seed_shape() {
        let seed = builtin_seed();
        assert_eq!(seed.len(), 10);
        assert_eq!(seed[0].id, Some(NoteId::new(1000)));
        assert_eq!(seed[9].id, Some(NoteId::new(1009)));
        let articles = seed.iter().filter(|s| s.title.contains("article")).count();
        assert_eq!(articles, 2);
    }

    #[test]
    fn test_load_seed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 5, "title": "first", "content": "a"}}, {{"title": "second"}}]"#
        )
        .unwrap();

        let seed = load_seed_file(file.path()).unwrap();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].id, Some(NoteId::new(5)));
        assert_eq!(seed[1].id, None);
        assert_eq!(seed[1].content, None);
    }

    #[test]
    fn test_load_seed_file_rejects_garbage() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(load_seed_file(file.path()).is_err());
    }

    #[test]
    fn test_resolve_seed_defaults_to_builtin() {
        let seed = resolve_seed(None).unwrap();
        assert_eq!(seed, builtin_seed());
    }
}
