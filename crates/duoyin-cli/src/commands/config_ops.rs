use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", duoyin_core::settings::DEFAULT_SETTINGS_TOML);
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        duoyin_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: services.reference_url={}, services.words_url={}, pipeline.max_candidates={}",
        s.services.reference_url, s.services.words_url, s.pipeline.max_candidates
    );
}
