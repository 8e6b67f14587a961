use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use duoyin_core::engine::Engine;
use duoyin_core::lexicon::SnapshotLexicon;
use duoyin_core::pipeline::PipelineResponse;
use duoyin_core::settings::init_custom;
use duoyin_core::words::NullWordService;

#[derive(Parser)]
#[command(name = "duoyintool", about = "Duoyin resolution diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the pipeline over recognition candidates and show the resolution
    Resolve {
        /// Recognition candidates, best first
        #[arg(required = true)]
        candidates: Vec<String>,
        /// Language tag of the recognizer ("zh", "en", ...)
        #[arg(long, default_value = "zh")]
        lang: String,
        /// Resolve against an offline snapshot instead of the live hosts
        #[arg(long)]
        snapshot: Option<String>,
        /// Custom settings TOML file
        #[arg(long)]
        settings: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run resolution accuracy tests from a structured TOML corpus
    Accuracy {
        /// Path to the accuracy corpus TOML file
        corpus_file: String,
        /// Resolve against an offline snapshot instead of the live hosts
        #[arg(long)]
        snapshot: Option<String>,
        /// Custom settings TOML file
        #[arg(long)]
        settings: Option<String>,
        /// Filter by tag (only run cases with this tag)
        #[arg(long)]
        tag: Option<String>,
        /// Filter by language (only run cases with this lang)
        #[arg(long)]
        lang: Option<String>,
        /// Show passing cases too (default: only failures and skips)
        #[arg(long)]
        verbose: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

// --- Accuracy types ---

#[derive(Debug, Deserialize)]
struct AccuracyCorpus {
    cases: Vec<AccuracyCase>,
}

#[derive(Debug, Deserialize)]
struct AccuracyCase {
    candidates: Vec<String>,
    lang: String,
    #[serde(default)]
    tags: Vec<String>,
    // A wire mode name ("singleChar", "singlePinyin", "numberWord"), or
    // "none" to require no augmentation.
    #[serde(default)]
    expect_mode: Option<String>,
    #[serde(default)]
    expect_top: Option<String>,
    #[serde(default)]
    expect_homophones: Vec<String>,
    #[serde(default)]
    expect_tone_label: Option<String>,
    #[serde(default)]
    skip: bool,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    issue: Option<String>,
}

#[derive(Debug, Serialize)]
struct AccuracyResult {
    input: String,
    lang: String,
    status: AccuracyStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    problems: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issue: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum AccuracyStatus {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Serialize)]
struct AccuracySummary {
    total: usize,
    pass: usize,
    fail: usize,
    skip: usize,
    pass_rate: String,
}

#[derive(Debug, Serialize)]
struct AccuracyReport {
    results: Vec<AccuracyResult>,
    summary: AccuracySummary,
}

fn init_settings(settings_file: Option<&str>) {
    if let Some(path) = settings_file {
        let content = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Failed to read settings at {}: {}", path, e);
            process::exit(1);
        });
        init_custom(content).unwrap_or_else(|e| {
            eprintln!("Invalid settings TOML: {}", e);
            process::exit(1);
        });
    }
}

fn open_engine(snapshot: Option<&str>) -> Engine {
    match snapshot {
        Some(path) => {
            let lexicon = SnapshotLexicon::open(Path::new(path)).unwrap_or_else(|e| {
                eprintln!("Failed to open snapshot at {}: {}", path, e);
                process::exit(1);
            });
            // A snapshot carries no homophone words; the English path falls
            // back to derived digit and word forms only.
            Engine::new(Arc::new(lexicon), Arc::new(NullWordService))
        }
        None => Engine::from_settings(),
    }
}

fn display_width(s: &str) -> usize {
    use unicode_width::UnicodeWidthStr;
    UnicodeWidthStr::width(s)
}

/// Pad to `width` display columns; CJK characters occupy two.
fn pad(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w < width {
        format!("{}{}", s, " ".repeat(width - w))
    } else {
        s.to_string()
    }
}

fn format_text(response: &PipelineResponse) -> String {
    let mut out = String::new();
    out.push_str(&format!("candidates ({}):\n", response.candidates.len()));
    for (rank, candidate) in response.candidates.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", rank + 1, candidate));
    }
    match &response.augmentation {
        Some(r) => {
            out.push_str(&format!(
                "augmentation: {} \"{}\"\n",
                r.mode.as_str(),
                r.input
            ));
            if !r.bases.is_empty() {
                out.push_str(&format!("  bases:      {}\n", r.bases.join(", ")));
            }
            if let Some(label) = &r.tone_label {
                out.push_str(&format!("  tone label: {label}\n"));
            }
            if r.homophones.is_empty() {
                out.push_str("  homophones: (none)\n");
            } else {
                out.push_str(&format!("  homophones: {}\n", r.homophones.join(", ")));
            }
        }
        None => out.push_str("augmentation: (none)\n"),
    }
    out
}

/// Run one corpus case and collect every expectation it misses.
fn run_case(engine: &Engine, case: &AccuracyCase) -> Vec<String> {
    let response = engine.process(&case.candidates, &case.lang);
    let mut problems = Vec::new();

    if let Some(want) = case.expect_top.as_deref() {
        let got = response.candidates.first().map(String::as_str).unwrap_or("");
        if got != want {
            problems.push(format!("top: expected {want}, got {got}"));
        }
    }

    if let Some(want) = case.expect_mode.as_deref() {
        let got = response
            .augmentation
            .as_ref()
            .map(|a| a.mode.as_str())
            .unwrap_or("none");
        if got != want {
            problems.push(format!("mode: expected {want}, got {got}"));
        }
    }

    if !case.expect_homophones.is_empty() {
        let have: Vec<&str> = response
            .augmentation
            .as_ref()
            .map(|a| a.homophones.iter().map(String::as_str).collect())
            .unwrap_or_default();
        let missing: Vec<&str> = case
            .expect_homophones
            .iter()
            .map(String::as_str)
            .filter(|h| !have.contains(h))
            .collect();
        if !missing.is_empty() {
            problems.push(format!("missing homophones: {}", missing.join(", ")));
        }
    }

    if let Some(want) = case.expect_tone_label.as_deref() {
        let got = response
            .augmentation
            .as_ref()
            .and_then(|a| a.tone_label.as_deref())
            .unwrap_or("");
        if got != want {
            problems.push(format!("tone label: expected {want}, got {got}"));
        }
    }

    problems
}

fn main() {
    // No-op unless built with the `trace` feature.
    duoyin_core::trace_init::init_tracing(&std::env::temp_dir());

    let cli = Cli::parse();

    match cli.command {
        Command::Resolve {
            candidates,
            lang,
            snapshot,
            settings,
            json,
        } => {
            init_settings(settings.as_deref());
            let engine = open_engine(snapshot.as_deref());
            let response = engine.process(&candidates, &lang);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&response).expect("JSON serialization failed")
                );
            } else {
                print!("{}", format_text(&response));
            }
        }

        Command::Accuracy {
            corpus_file,
            snapshot,
            settings,
            tag,
            lang,
            verbose,
            json,
        } => {
            init_settings(settings.as_deref());

            let corpus_content = fs::read_to_string(&corpus_file).unwrap_or_else(|e| {
                eprintln!("Failed to read corpus file {}: {}", corpus_file, e);
                process::exit(1);
            });
            let corpus: AccuracyCorpus = toml::from_str(&corpus_content).unwrap_or_else(|e| {
                eprintln!("Failed to parse corpus TOML: {}", e);
                process::exit(1);
            });

            let cases: Vec<&AccuracyCase> = corpus
                .cases
                .iter()
                .filter(|c| {
                    if let Some(t) = &tag {
                        if !c.tags.contains(t) {
                            return false;
                        }
                    }
                    if let Some(l) = &lang {
                        if c.lang != *l {
                            return false;
                        }
                    }
                    true
                })
                .collect();

            if cases.is_empty() {
                eprintln!("No cases match the given filters");
                process::exit(1);
            }

            let engine = open_engine(snapshot.as_deref());

            let mut results: Vec<AccuracyResult> = Vec::new();
            for case in cases {
                let input = case.candidates.join(" / ");
                if case.skip {
                    results.push(AccuracyResult {
                        input,
                        lang: case.lang.clone(),
                        status: AccuracyStatus::Skip,
                        problems: Vec::new(),
                        note: case.note.clone(),
                        issue: case.issue.clone(),
                    });
                    continue;
                }

                let problems = run_case(&engine, case);
                let status = if problems.is_empty() {
                    AccuracyStatus::Pass
                } else {
                    AccuracyStatus::Fail
                };
                results.push(AccuracyResult {
                    input,
                    lang: case.lang.clone(),
                    status,
                    problems,
                    note: case.note.clone(),
                    issue: case.issue.clone(),
                });
            }

            let total = results.len();
            let pass = results
                .iter()
                .filter(|r| matches!(r.status, AccuracyStatus::Pass))
                .count();
            let fail = results
                .iter()
                .filter(|r| matches!(r.status, AccuracyStatus::Fail))
                .count();
            let skip = results
                .iter()
                .filter(|r| matches!(r.status, AccuracyStatus::Skip))
                .count();
            let tested = total - skip;
            let rate = if tested > 0 {
                pass as f64 / tested as f64 * 100.0
            } else {
                0.0
            };
            let summary = AccuracySummary {
                total,
                pass,
                fail,
                skip,
                pass_rate: format!("{:.1}%", rate),
            };

            if json {
                let report = AccuracyReport { results, summary };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).expect("JSON serialization failed")
                );
            } else {
                // Group by language
                let mut grouped: BTreeMap<&str, Vec<&AccuracyResult>> = BTreeMap::new();
                for r in &results {
                    grouped.entry(&r.lang).or_default().push(r);
                }

                for (group_lang, group) in &grouped {
                    println!("\n=== {} ({} cases) ===", group_lang, group.len());
                    let width = group
                        .iter()
                        .map(|r| display_width(&r.input))
                        .max()
                        .unwrap_or(0);
                    for r in group {
                        match r.status {
                            AccuracyStatus::Pass => {
                                if verbose {
                                    println!("  \u{2713} {}", r.input);
                                }
                            }
                            AccuracyStatus::Fail => {
                                println!(
                                    "  \u{2717} {}  {}",
                                    pad(&r.input, width),
                                    r.problems.join("; ")
                                );
                            }
                            AccuracyStatus::Skip => {
                                let reason = r
                                    .note
                                    .as_deref()
                                    .or(r.issue.as_deref())
                                    .unwrap_or("known failure");
                                println!("  - {} [skip: {}]", pad(&r.input, width), reason);
                            }
                        }
                    }
                }

                println!();
                println!("=== Summary ===");
                println!("  Total:     {}", summary.total);
                println!("  Pass:      {:>3}", summary.pass);
                println!("  Fail:      {:>3}", summary.fail);
                println!("  Skip:      {:>3}", summary.skip);
                println!(
                    "  Pass rate: {} ({}/{})",
                    summary.pass_rate, summary.pass, tested
                );
            }

            if fail > 0 {
                process::exit(1);
            }
        }
    }
}
