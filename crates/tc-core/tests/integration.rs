//! Integration tests exercising the full pipeline:
//! text → tokenizer → engine → snapshots, across module boundaries.

use tc_core::{
    Config, Snapshot, TimeCloud, Tokenizer, TokenizerConfig, export_jsonl_line, parse_stopwords,
};

const ARTICLE: &str = "\
The river runs past the mill. The mill grinds grain for the town. \
Grain from the valley feeds the town through the winter. \
In spring the river floods and the mill stops.";

const STOPWORDS: &str = "the\nfor\nfrom\nand\nin\nthrough\n";

fn tokenizer() -> Tokenizer {
    Tokenizer::new(&TokenizerConfig::default(), parse_stopwords(STOPWORDS))
}

/// Test 1: Tokenize an article and stream it through a small window.
#[test]
fn article_through_window() {
    let tokens = tokenizer().tokenize(ARTICLE);
    assert_eq!(
        &tokens[..6],
        &["river", "runs", "past", "mill", "mill", "grinds"]
    );

    let mut cloud = TimeCloud::new(8, 3).unwrap();
    let snaps: Vec<Snapshot> = cloud.process(tokens.iter().cloned()).collect();

    assert_eq!(snaps.len(), tokens.len());
    let last = snaps.last().unwrap();
    assert_eq!(last.window_size, 8);
    assert_eq!(last.total_processed, tokens.len() as u64);
    assert_eq!(last.latest_token.as_deref(), Some("stops"));
    assert!(last.top.len() <= 3);
    assert_eq!(last.frequencies.values().sum::<usize>(), 8);
}

/// Test 2: A window larger than the stream counts everything exactly.
#[test]
fn window_larger_than_stream_counts_everything() {
    let tokens = tokenizer().tokenize(ARTICLE);
    let mut cloud = TimeCloud::new(10_000, 50).unwrap();
    let last = cloud.process(tokens.clone()).last().unwrap();

    assert_eq!(last.window_size, tokens.len());
    assert_eq!(last.count("mill"), 3);
    assert_eq!(last.count("river"), 2);
    assert_eq!(last.count("the"), 0, "stopwords never reach the engine");
    assert_eq!(last.top[0], ("mill".to_string(), 3));
}

/// Test 3: Batched and per-token modes agree at batch boundaries.
#[test]
fn batched_agrees_with_per_token_at_boundaries() {
    let tokens = tokenizer().tokenize(ARTICLE);

    let mut per_token = TimeCloud::new(6, 4).unwrap();
    let every: Vec<Snapshot> = per_token.process(tokens.clone()).collect();

    let mut batched = TimeCloud::new(6, 4).unwrap();
    let frames: Vec<Snapshot> = batched.process_batched(tokens.clone(), 5).unwrap().collect();

    assert_eq!(frames.len(), tokens.len().div_ceil(5));
    for frame in &frames {
        let idx = frame.total_processed as usize - 1;
        assert_eq!(frame, &every[idx]);
    }
    assert_eq!(frames.last(), every.last());
}

/// Test 4: Engine built from default config follows the reference limits.
#[test]
fn engine_from_default_config() {
    let cfg = Config::default();
    cfg.validate().unwrap();
    let mut cloud = TimeCloud::from_config(&cfg.engine).unwrap();

    for i in 0..600 {
        cloud.push(format!("w{}", i % 60));
    }
    let snap = cloud.snapshot();
    assert_eq!(snap.window_size, 500);
    assert_eq!(snap.top.len(), 50);
    assert_eq!(snap.total_processed, 600);
}

/// Test 5: Snapshots serialize to one JSON object per line and read back.
#[test]
fn snapshots_as_json_lines() {
    let mut cloud = TimeCloud::new(3, 5).unwrap();
    let lines: Vec<String> = cloud
        .process(["cat", "dog", "cat", "bird"])
        .map(|s| export_jsonl_line(&s).unwrap())
        .collect();

    assert_eq!(lines.len(), 4);
    let last: Snapshot = serde_json::from_str(&lines[3]).unwrap();
    assert_eq!(last, cloud.snapshot());
    assert_eq!(last.top[0].0, "cat");
}

/// Test 6: Stemming folds inflected forms before they reach the window.
#[test]
fn stemmed_article_through_window() {
    let config = TokenizerConfig {
        enable_stemming: true,
        ..TokenizerConfig::default()
    };
    let tokens = Tokenizer::new(&config, parse_stopwords(STOPWORDS)).tokenize(ARTICLE);
    assert_eq!(tokens.len(), tokenizer().tokenize(ARTICLE).len());

    let mut cloud = TimeCloud::new(10_000, 50).unwrap();
    let last = cloud.process(tokens).last().unwrap();

    assert_eq!(last.count("run"), 1);
    assert_eq!(last.count("runs"), 0);
    assert_eq!(last.count("flood"), 1);
    assert_eq!(last.latest_token.as_deref(), Some("stop"));
    assert_eq!(last.top[0], ("mill".to_string(), 3));
}
