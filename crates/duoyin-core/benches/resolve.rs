use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use duoyin_core::engine::Engine;
use duoyin_core::lexicon::{Reading, StaticLexicon};
use duoyin_core::words::StaticWordService;

fn bench_engine() -> Engine {
    let lexicon = StaticLexicon::new()
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
        .with_shard(
            "hao",
            &[
                ("hao", &["好", "号", "毫", "郝", "豪", "壕", "嚎"]),
                ("hao3", &["好", "郝"]),
                ("hao4", &["号", "耗", "浩", "皓"]),
            ],
        )
        .with_shard(
            "zhong",
            &[
                ("zhong", &["中", "重", "众", "钟", "终", "忠", "种"]),
                ("zhong4", &["重", "众", "种"]),
            ],
        )
        .with_shard("chong", &[("chong", &["重", "冲", "虫", "充", "崇"])]);
    let words = StaticWordService::new()
        .with("two", &["to", "too"])
        .with("twenty-five", &[]);
    Engine::new(Arc::new(lexicon), Arc::new(words))
}

static INPUTS: &[(&str, &str, &str)] = &[
    ("single_char", "好。", "zh"),
    ("polyphone", "重", "zh"),
    ("pinyin", "hǎo", "zh"),
    ("number_word", "twenty-five", "en"),
];

fn bench_resolve(c: &mut Criterion) {
    let engine = bench_engine();
    let mut group = c.benchmark_group("pipeline/resolve");
    for &(label, candidate, lang) in INPUTS {
        let raw = vec![candidate.to_string()];
        group.bench_with_input(BenchmarkId::new(label, candidate.len()), &raw, |b, raw| {
            b.iter(|| engine.process(raw, lang));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
