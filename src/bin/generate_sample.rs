//! Writes a small deterministic sample dataset under `data/`:
//! one description file plus one chat CSV per listed match, so
//! `cargo run` has something to load.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

struct Match {
    file_name: &'static str,
    winner: &'static str,
    main: &'static str,
    country_1: &'static str,
    country_2: &'static str,
    ranking_point_diff: &'static str,
    /// (time_stamp, author_name, message)
    lines: &'static [(&'static str, &'static str, &'static str)],
}

const MATCHES: &[Match] = &[
    Match {
        file_name: "bel_eng.csv",
        winner: "BEL",
        main: "BEL",
        country_1: "BEL",
        country_2: "ENG",
        ranking_point_diff: "248",
        lines: &[
            ("0:00", "NOL OTR", "Hey FIFA !"),
            ("0:12", "Marta K", "kickoff!!"),
            ("0:47", "Jules V", "belgium looking sharp"),
            ("1:03", "Sam P", "ENG ENG ENG"),
            ("1:58", "Marta K", "GOAL belgium"),
        ],
    },
    Match {
        file_name: "fra_cro.csv",
        winner: "FRA",
        main: "FRA",
        country_1: "FRA",
        country_2: "CRO",
        ranking_point_diff: "111",
        lines: &[
            ("0:02", "Leo D", "allez les bleus"),
            ("0:30", "Ivana M", "croatia will take this"),
            ("1:15", "Leo D", "what a save"),
        ],
    },
    Match {
        file_name: "bel_fra.csv",
        winner: "FRA",
        main: "BEL",
        country_1: "BEL",
        country_2: "FRA",
        ranking_point_diff: "52",
        lines: &[
            ("0:05", "NOL OTR", "semi final hype"),
            ("0:40", "Jules V", "tight game so far"),
            ("1:22", "Leo D", "umtiti !!!"),
            ("1:59", "Sam P", "gg both"),
        ],
    },
];

fn write_chat(path: &Path, lines: &[(&str, &str, &str)]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["time_stamp", "author_name", "message"])?;
    for (time_stamp, author_name, message) in lines {
        writer.write_record([*time_stamp, *author_name, *message])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let data_dir = Path::new("data");
    let chat_dir = data_dir.join("chats");
    fs::create_dir_all(&chat_dir).context("creating data/chats")?;

    let description_path = data_dir.join("Description_sample.csv");
    let mut writer = csv::Writer::from_path(&description_path)
        .with_context(|| format!("creating {}", description_path.display()))?;
    writer.write_record([
        "file_name",
        "winner",
        "main",
        "country_1",
        "country_2",
        "ranking_point_diff",
    ])?;

    for m in MATCHES {
        writer.write_record([
            m.file_name,
            m.winner,
            m.main,
            m.country_1,
            m.country_2,
            m.ranking_point_diff,
        ])?;
        write_chat(&chat_dir.join(m.file_name), m.lines)?;
    }
    writer.flush()?;

    println!(
        "Wrote {} and {} chat files under {}",
        description_path.display(),
        MATCHES.len(),
        chat_dir.display()
    );
    Ok(())
}
