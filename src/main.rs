use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};

use chatset::{LoadOptions, find_description_files, load_dataset};

/// Ad-hoc viewer: load the first description file under the data directory
/// and print up to 10 sessions.
///
/// Usage: `chatset [DATA_DIR] [CHAT_DIR]` (defaults: `data`, `data/chats`).
fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let data_dir = PathBuf::from(args.next().unwrap_or_else(|| "data".to_string()));
    let chat_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join("chats"));

    let description_files = find_description_files(&data_dir, "Description")?;
    let Some(description) = description_files.first() else {
        bail!("no description file found under {}", data_dir.display());
    };

    let dataset = load_dataset(
        description,
        &chat_dir,
        LoadOptions {
            max_sessions: Some(10),
            ..Default::default()
        },
    )?;

    for session in &dataset {
        println!("{session}");
    }
    Ok(())
}
