//! Target-language tags.
//!
//! Callers hand over BCP-47-style tags ("zh", "zh-CN", "en_US"); only the
//! primary subtag matters for routing, everything after the first separator
//! is ignored.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Chinese,
    English,
    Japanese,
    Korean,
    Other,
}

impl Language {
    /// Map a language tag to its family. Unknown and empty tags go to
    /// `Other`, which disables resolution but still runs normalization.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or("");
        match primary.to_ascii_lowercase().as_str() {
            "zh" | "cmn" => Self::Chinese,
            "en" => Self::English,
            "ja" => Self::Japanese,
            "ko" => Self::Korean,
            _ => Self::Other,
        }
    }

    /// Languages whose native script is logographic or syllabic CJK; these
    /// get the Latin-transliteration filter in the pipeline.
    pub fn is_logographic(self) -> bool {
        matches!(self, Self::Chinese | Self::Japanese | Self::Korean)
    }
}
