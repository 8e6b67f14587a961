use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::process;

use serde::Serialize;

use duoyin_core::lexicon::{HttpLexicon, LexiconSource, ReadingTableDoc, Snapshot};
use duoyin_core::pinyin;
use duoyin_core::settings;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

fn init_settings(settings_file: Option<&str>) {
    if let Some(path) = settings_file {
        let content = die!(fs::read_to_string(path), "Error reading {path}: {}");
        die!(settings::init_custom(content), "Error in settings TOML: {}");
    }
}

/// Collect the base syllables a fetch should cover: the --bases list, the
/// --bases-file lines, or with neither given, every base the reading table
/// mentions.
fn wanted_bases(
    bases: Option<&str>,
    bases_file: Option<&str>,
    readings: &ReadingTableDoc,
) -> BTreeSet<String> {
    let mut wanted = BTreeSet::new();
    if let Some(list) = bases {
        wanted.extend(
            list.split(',')
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(String::from),
        );
    }
    if let Some(file) = bases_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        wanted.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(String::from),
        );
    }
    if wanted.is_empty() {
        for readings in readings.values() {
            for reading in readings {
                wanted.insert(pinyin::base_of(&reading.syllable).to_string());
            }
        }
    }
    wanted
}

pub fn fetch(
    bases: Option<&str>,
    bases_file: Option<&str>,
    settings_file: Option<&str>,
    output_file: &str,
) {
    init_settings(settings_file);
    let client = HttpLexicon::from_settings();

    eprintln!("Fetching reading table...");
    let readings = die!(client.reading_table(), "Error fetching reading table: {}");
    eprintln!("  {} logograms", readings.len());

    let wanted = wanted_bases(bases, bases_file, &readings);

    let mut snapshot = Snapshot::new();
    snapshot.readings = readings;

    eprintln!("Fetching {} shards...", wanted.len());
    let mut skipped = 0usize;
    for base in &wanted {
        match client.shard(base) {
            Ok(doc) => {
                snapshot.shards.insert(base.clone(), doc);
            }
            Err(e) => {
                eprintln!("  skipping {base}: {e}");
                skipped += 1;
            }
        }
    }

    die!(
        snapshot.save(Path::new(output_file)),
        "Error writing snapshot: {}"
    );

    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Wrote {output_file} ({:.1} KB, {} shards, {skipped} skipped)",
        file_size as f64 / 1024.0,
        snapshot.shards.len()
    );
}

#[derive(Debug, Serialize)]
struct InspectReport {
    file: String,
    file_size: u64,
    logograms: usize,
    readings: usize,
    shards: usize,
    shard_keys: usize,
    shard_members: usize,
}

pub fn inspect(file: &str, json: bool) {
    let snapshot = die!(Snapshot::open(Path::new(file)), "Error opening snapshot: {}");

    let file_size = fs::metadata(file).map(|m| m.len()).unwrap_or(0);
    let reading_count: usize = snapshot.readings.values().map(|v| v.len()).sum();
    let key_count: usize = snapshot.shards.values().map(|d| d.len()).sum();
    let member_count: usize = snapshot
        .shards
        .values()
        .flat_map(|d| d.values())
        .map(|m| m.len())
        .sum();

    if json {
        let report = InspectReport {
            file: file.to_string(),
            file_size,
            logograms: snapshot.readings.len(),
            readings: reading_count,
            shards: snapshot.shards.len(),
            shard_keys: key_count,
            shard_members: member_count,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("JSON serialization failed")
        );
        return;
    }

    println!("Snapshot:   {file}");
    println!("File size:  {:.1} KB", file_size as f64 / 1024.0);
    println!(
        "Logograms:  {} ({reading_count} readings)",
        snapshot.readings.len()
    );
    println!(
        "Shards:     {} ({key_count} keys, {member_count} members)",
        snapshot.shards.len()
    );

    let mut largest: Vec<(&String, usize, usize)> = snapshot
        .shards
        .iter()
        .map(|(base, doc)| {
            let members: usize = doc.values().map(|m| m.len()).sum();
            (base, doc.len(), members)
        })
        .collect();
    largest.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(b.0)));

    if !largest.is_empty() {
        let base_width = largest
            .iter()
            .take(5)
            .map(|(base, _, _)| base.len())
            .max()
            .unwrap_or(0);
        println!();
        println!("Largest shards:");
        for (base, keys, members) in largest.iter().take(5) {
            println!("  {base:<base_width$}  {keys} keys, {members} members");
        }
    }
}

/// Verify every tone-qualified shard entry against its bare entry. The bare
/// entry is the tone fallback; a member reachable through a tone key but
/// absent from the bare entry can never surface once the exact key misses.
pub fn check(file: &str) {
    let snapshot = die!(Snapshot::open(Path::new(file)), "Error opening snapshot: {}");

    let mut bases: Vec<&String> = snapshot.shards.keys().collect();
    bases.sort();

    let mut violations = 0usize;
    for base in bases {
        let doc = &snapshot.shards[base];
        let mut keys: Vec<&String> = doc.keys().collect();
        keys.sort();

        let Some(bare) = doc.get(base) else {
            let tone_keys = keys.iter().filter(|k| **k != base).count();
            if tone_keys > 0 {
                println!("  {base}: {tone_keys} tone keys without a bare entry");
                violations += 1;
            }
            continue;
        };

        for key in keys {
            if key == base {
                continue;
            }
            for member in &doc[key] {
                if !bare.contains(member) {
                    println!("  {base}: {key} member {member} not in bare entry");
                    violations += 1;
                }
            }
        }
    }

    if violations == 0 {
        println!("OK: {} shards consistent", snapshot.shards.len());
    } else {
        println!();
        println!("{violations} violations in {file}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duoyin_core::lexicon::Reading;

    fn sample_readings() -> ReadingTableDoc {
        let mut doc = ReadingTableDoc::new();
        doc.insert('好', vec![Reading::new("hao", Some(3), "hǎo")]);
        doc.insert(
            '重',
            vec![
                Reading::new("zhong", Some(4), "zhòng"),
                Reading::new("chong", Some(2), "chóng"),
            ],
        );
        doc.insert('中', vec![Reading::new("zhong", Some(1), "zhōng")]);
        doc
    }

    #[test]
    fn test_explicit_base_list_is_trimmed() {
        let wanted = wanted_bases(Some("hao, zhong ,,ma"), None, &sample_readings());
        let wanted: Vec<&str> = wanted.iter().map(String::as_str).collect();
        assert_eq!(wanted, ["hao", "ma", "zhong"]);
    }

    #[test]
    fn test_defaults_to_reading_table_bases() {
        let wanted = wanted_bases(None, None, &sample_readings());
        let wanted: Vec<&str> = wanted.iter().map(String::as_str).collect();
        assert_eq!(wanted, ["chong", "hao", "zhong"]);
    }

    #[test]
    fn test_explicit_list_suppresses_fallback() {
        let wanted = wanted_bases(Some("er"), None, &sample_readings());
        assert_eq!(wanted.len(), 1);
        assert!(wanted.contains("er"));
    }
}
