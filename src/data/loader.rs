use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

use super::model::{ChatDataset, ChatSession, Record};

/// Description column naming the chat file of each session. Removed from the
/// row before the remainder becomes the session's label map.
pub const FILE_NAME_COLUMN: &str = "file_name";

// ---------------------------------------------------------------------------
// Load options
// ---------------------------------------------------------------------------

/// Options for [`load_dataset`].
#[derive(Default)]
pub struct LoadOptions<'a> {
    /// Stop after this many sessions. The cap applies to rows that passed
    /// `row_filter`; chat files past the cap are never opened.
    pub max_sessions: Option<usize>,
    /// Keep only description rows satisfying the predicate. The predicate
    /// sees the raw row, `file_name` column included.
    pub row_filter: Option<&'a dyn Fn(&Record) -> bool>,
}

// ---------------------------------------------------------------------------
// Chat file loader
// ---------------------------------------------------------------------------

/// Load one chat file as a session carrying `labels`.
///
/// CSV layout: header row (at least `time_stamp`, `author_name`, `message`;
/// extra columns permitted), one row per chat line. The header is not
/// validated; columns are whatever the file declares.
pub fn load_session(path: &Path, labels: BTreeMap<String, String>) -> Result<ChatSession> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening chat file {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading chat CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("chat CSV row {row_no}"))?;
        records.push(Record::from_columns(headers.iter().cloned(), row.iter()));
    }

    log::debug!("loaded {} lines from {}", records.len(), path.display());
    Ok(ChatSession { records, labels })
}

// ---------------------------------------------------------------------------
// Description file loader
// ---------------------------------------------------------------------------

/// Load a dataset from a description file.
///
/// Each description row names a chat file in its `file_name` column and
/// carries arbitrary label columns. For every row passing the filter (in
/// file order, up to `max_sessions`) the chat file is resolved under
/// `chat_dir` and loaded; the remaining columns become the session labels.
pub fn load_dataset(
    description_path: &Path,
    chat_dir: &Path,
    options: LoadOptions<'_>,
) -> Result<ChatDataset> {
    let mut reader = csv::Reader::from_path(description_path)
        .with_context(|| format!("opening description file {}", description_path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading description CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut sessions = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("description row {row_no}"))?;
        let row = Record::from_columns(headers.iter().cloned(), row.iter());

        if let Some(filter) = options.row_filter {
            if !filter(&row) {
                continue;
            }
        }
        if let Some(cap) = options.max_sessions {
            if sessions.len() >= cap {
                break;
            }
        }

        let file_name = match row.get(FILE_NAME_COLUMN) {
            Some(name) => name.to_string(),
            None => bail!("description row {row_no}: missing '{FILE_NAME_COLUMN}' column"),
        };
        let labels: BTreeMap<String, String> = row
            .iter()
            .filter(|(k, _)| *k != FILE_NAME_COLUMN)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let session = load_session(&chat_dir.join(&file_name), labels)
            .with_context(|| format!("description row {row_no} ({file_name})"))?;
        sessions.push(session);
    }

    log::debug!(
        "loaded {} sessions from {}",
        sessions.len(),
        description_path.display()
    );
    Ok(ChatDataset { sessions })
}

// ---------------------------------------------------------------------------
// Description file discovery
// ---------------------------------------------------------------------------

/// Find files under `data_dir` whose name contains `marker`
/// (e.g. `"Description"`), sorted by path for deterministic pick order.
pub fn find_description_files(data_dir: &Path, marker: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(data_dir) {
        let entry = entry.with_context(|| format!("walking {}", data_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().contains(marker) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    log::debug!("found {} '{marker}' files under {}", files.len(), data_dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Writes a description file with 5 rows (3 BEL winners) and one chat
    /// file per row, returning (data_dir, description_path, chat_dir).
    fn sample_tree() -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let chat_dir = dir.path().join("chats");
        fs::create_dir(&chat_dir).unwrap();

        let winners = ["BEL", "ENG", "BEL", "FRA", "BEL"];
        let mut description = String::from("file_name,winner,country_1,country_2\n");
        for (i, winner) in winners.iter().enumerate() {
            let file_name = format!("chat_{i}.csv");
            description.push_str(&format!("{file_name},{winner},BEL,ENG\n"));
            fs::write(
                chat_dir.join(&file_name),
                format!("time_stamp,author_name,message\n0:0{i},user_{i},hello from {i}\n0:0{i},user_{i},bye\n"),
            )
            .unwrap();
        }
        let description_path = dir.path().join("Description_matches.csv");
        fs::write(&description_path, description).unwrap();
        (dir, description_path, chat_dir)
    }

    #[test]
    fn load_session_counts_data_rows() {
        let (_dir, _description, chat_dir) = sample_tree();
        let session = load_session(&chat_dir.join("chat_0.csv"), BTreeMap::new()).unwrap();
        assert_eq!(session.len(), 2);
        assert_eq!(session[0].get("author_name"), Some("user_0"));
        assert_eq!(session[1].get("message"), Some("bye"));
    }

    #[test]
    fn load_session_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = load_session(&dir.path().join("nope.csv"), BTreeMap::new()).unwrap_err();
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn load_dataset_builds_one_session_per_row() {
        let (_dir, description, chat_dir) = sample_tree();
        let dataset = load_dataset(&description, &chat_dir, LoadOptions::default()).unwrap();
        assert_eq!(dataset.len(), 5);
        // file_name is stripped from the labels.
        assert_eq!(dataset.sessions[0].label(FILE_NAME_COLUMN), None);
        assert_eq!(dataset.sessions[1].label("winner"), Some("ENG"));
    }

    #[test]
    fn cap_applies_to_filtered_rows_in_file_order() {
        let (_dir, description, chat_dir) = sample_tree();
        let is_bel = |row: &Record| row.get("winner") == Some("BEL");
        let options = LoadOptions {
            max_sessions: Some(2),
            row_filter: Some(&is_bel),
        };
        let dataset = load_dataset(&description, &chat_dir, options).unwrap();
        assert_eq!(dataset.len(), 2);
        // First two BEL rows are rows 0 and 2.
        assert_eq!(dataset.sessions[0][0].get("message"), Some("hello from 0"));
        assert_eq!(dataset.sessions[1][0].get("message"), Some("hello from 2"));
    }

    #[test]
    fn rows_past_the_cap_are_never_opened() {
        let (_dir, description, chat_dir) = sample_tree();
        // Break the chat files after the first two; the cap must stop
        // before they are touched.
        fs::remove_file(chat_dir.join("chat_2.csv")).unwrap();
        fs::remove_file(chat_dir.join("chat_3.csv")).unwrap();
        fs::remove_file(chat_dir.join("chat_4.csv")).unwrap();

        let options = LoadOptions {
            max_sessions: Some(2),
            ..Default::default()
        };
        let dataset = load_dataset(&description, &chat_dir, options).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn missing_file_name_column_is_a_construction_error() {
        let dir = TempDir::new().unwrap();
        let description = dir.path().join("Description_bad.csv");
        fs::write(&description, "winner,country_1\nBEL,BEL\n").unwrap();
        let err = load_dataset(&description, dir.path(), LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains(FILE_NAME_COLUMN));
    }

    #[test]
    fn discovery_matches_marker_sorted() {
        let (_dir, description, _chat_dir) = sample_tree();
        let data_dir = description.parent().unwrap();
        fs::write(data_dir.join("Description_extra.csv"), "file_name\n").unwrap();
        fs::write(data_dir.join("notes.txt"), "x").unwrap();

        let found = find_description_files(data_dir, "Description").unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Description_extra.csv", "Description_matches.csv"]);
    }
}
