mod pipeline;

use std::sync::Arc;

use crate::engine::Engine;
use crate::lexicon::{Reading, StaticLexicon};
use crate::words::{StaticWordService, WordService, WordServiceError};

/// Reference data shared by the behavioral tests.
///
/// 好 has one base with two tones, 重 is a true polyphone (zhong/chong), 儿
/// carries no tone data, and the "ma" shard deliberately lacks its bare-base
/// entry to exercise the union fallback.
pub(crate) fn test_lexicon() -> Arc<StaticLexicon> {
    Arc::new(
        StaticLexicon::new()
            .with_reading(
                '好',
                vec![
                    Reading::new("hao", Some(3), "hǎo"),
                    Reading::new("hao", Some(4), "hào"),
                ],
            )
            .with_reading(
                '重',
                vec![
                    Reading::new("zhong", Some(4), "zhòng"),
                    Reading::new("chong", Some(2), "chóng"),
                ],
            )
            .with_reading('中', vec![Reading::new("zhong", Some(1), "zhōng")])
            .with_reading('儿', vec![Reading::new("er", None, "er")])
            .with_reading('马', vec![Reading::new("ma", Some(3), "mǎ")])
            .with_shard(
                "hao",
                &[
                    ("hao", &["好", "号", "毫", "郝"]),
                    ("hao3", &["好", "郝"]),
                    ("hao4", &["号", "耗"]),
                ],
            )
            .with_shard(
                "zhong",
                &[
                    ("zhong", &["中", "重", "众"]),
                    ("zhong1", &["中", "忠"]),
                    ("zhong4", &["重", "众"]),
                ],
            )
            .with_shard("chong", &[("chong", &["重", "冲", "虫"])])
            .with_shard("er", &[("er", &["儿", "二", "耳"])])
            .with_shard(
                "ma",
                &[("ma1", &["妈"]), ("ma2", &["麻"]), ("ma3", &["马", "码"])],
            ),
    )
}

pub(crate) fn test_word_service() -> Arc<StaticWordService> {
    Arc::new(
        StaticWordService::new()
            .with("two", &["to", "too"])
            .with("four", &["for", "fore"])
            .with("eight", &["ate"]),
    )
}

pub(crate) fn test_engine() -> Engine {
    Engine::new(test_lexicon(), test_word_service())
}

/// Word service whose collaborator is down.
pub(crate) struct FailingWordService;

impl WordService for FailingWordService {
    fn homophones(&self, _word: &str) -> Result<Vec<String>, WordServiceError> {
        Err(WordServiceError::Http("connection refused".to_string()))
    }
}
