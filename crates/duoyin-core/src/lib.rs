pub mod engine;
pub mod language;
pub mod lexicon;
pub mod normalize;
pub(crate) mod numword;
pub mod pinyin;
pub mod pipeline;
pub mod resolver;
pub mod settings;
pub mod trace_init;
pub mod unicode;
pub mod words;

#[cfg(test)]
mod tests;
