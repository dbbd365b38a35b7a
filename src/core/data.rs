//! RON file helpers shared by the enemy and level loaders.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::DataLoadError;

/// Read and deserialize a single RON file.
pub fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: display,
        details: e.to_string(),
    })
}

/// List the `.ron` files in a directory, sorted by name.
pub fn ron_files(dir: &Path) -> Result<Vec<PathBuf>, DataLoadError> {
    if !dir.is_dir() {
        return Err(DataLoadError::FileNotFound(dir.display().to_string()));
    }

    let entries = fs::read_dir(dir).map_err(|e| DataLoadError::ReadError {
        path: dir.display().to_string(),
        details: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Sample {
        name: String,
        count: u32,
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "skeleton-sentry-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn reads_ron_file() {
        let dir = scratch_dir("read");
        let path = dir.join("sample.ron");
        fs::write(&path, r#"(name: "bones", count: 3)"#).expect("write sample");

        let sample: Sample = read_ron(&path).expect("parse sample");
        assert_eq!(
            sample,
            Sample {
                name: "bones".into(),
                count: 3
            }
        );
    }

    #[test]
    fn reports_missing_and_malformed_files() {
        let dir = scratch_dir("errors");

        let missing = read_ron::<Sample>(&dir.join("nope.ron"));
        assert!(matches!(missing, Err(DataLoadError::FileNotFound(_))));

        let broken = dir.join("broken.ron");
        fs::write(&broken, "(name: ").expect("write broken");
        let parsed = read_ron::<Sample>(&broken);
        assert!(matches!(parsed, Err(DataLoadError::ParseError { .. })));
    }

    #[test]
    fn lists_only_ron_files_in_order() {
        let dir = scratch_dir("list");
        for name in ["b.ron", "a.ron", "notes.txt"] {
            fs::write(dir.join(name), "()").expect("write file");
        }

        let files = ron_files(&dir).expect("list dir");
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.ron", "b.ron"]);

        assert!(ron_files(&dir.join("missing")).is_err());
    }
}
