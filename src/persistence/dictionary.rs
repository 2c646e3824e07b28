//! Dictionary directories: every `.txt` file is one word set

use std::fs;
use std::path::Path;

use super::PersistError;
use crate::words::{WordSet, is_typable};

/// Whitespace-separated words; untypable words are dropped
pub fn parse_word_list(content: &str) -> Vec<String> {
    content
        .split_whitespace()
        .filter(|w| is_typable(w))
        .map(str::to_string)
        .collect()
}

/// Load all word sets in `dir`, sorted by file name.
///
/// A missing directory is created and yields no sets. Empty or unreadable
/// files are skipped.
pub fn load_word_sets(dir: &Path) -> Result<Vec<WordSet>, PersistError> {
    if !dir.is_dir() {
        fs::create_dir_all(dir)?;
        log::info!("Created dictionary directory {}", dir.display());
        return Ok(Vec::new());
    }

    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut sets = Vec::new();
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Skipping word set {name}: {e}");
                continue;
            }
        };
        let total = content.split_whitespace().count();
        let words = parse_word_list(&content);
        if words.len() < total {
            log::warn!("Word set {name}: dropped {} untypable words", total - words.len());
        }
        if words.is_empty() {
            continue;
        }
        log::info!("Loaded word set {name} ({} words)", words.len());
        sets.push(WordSet::new(name, words));
    }
    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word_list() {
        let words = parse_word_list("cat  dog\nbird\tcafé\n\n");
        assert_eq!(words, vec!["cat", "dog", "bird"]);
    }

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_animals.txt"), "cat dog").unwrap();
        fs::write(dir.path().join("a_colors.txt"), "red\ngreen\nblue").unwrap();
        fs::write(dir.path().join("empty.txt"), "   ").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let sets = load_word_sets(dir.path()).unwrap();
        let names: Vec<_> = sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a_colors.txt", "b_animals.txt"]);
        assert_eq!(sets[0].words.len(), 3);
    }

    #[test]
    fn test_missing_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("dictionary");
        assert!(load_word_sets(&dict).unwrap().is_empty());
        assert!(dict.is_dir());
    }
}
