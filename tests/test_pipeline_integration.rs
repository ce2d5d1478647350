// End-to-end pipeline tests over a temporary CSV record store
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zeitgeist::config::Config;
use zeitgeist::error::PipelineWarning;
use zeitgeist::pipeline::Pipeline;

const HEADER: &str = "index,text,timestamp,fav_count,ret_count,username,at_tag,id\n";

/// Posts forming two clearly separated word-usage camps plus opposing
/// sentiment, enough rows for both passes to be meaningful.
fn seed_topic(data_dir: &Path, topic: &str) {
    let camp_a = [
        "the new stadium is a wonderful win for the city",
        "wonderful win tonight the stadium was loud",
        "what a wonderful win great stadium atmosphere",
        "stadium win wonderful crowd great night",
    ];
    let camp_b = [
        "traffic around downtown is a horrible disaster",
        "horrible disaster of traffic downtown again",
        "downtown traffic horrible tonight disaster levels",
        "disaster traffic downtown horrible as always",
    ];
    let neutral = [
        "the council meets on thursday at noon",
        "schedule for thursday posted on the website",
        "doors open at seven according to the website",
        "the meeting agenda is posted online",
    ];

    let mut file = std::fs::File::create(data_dir.join(format!("{topic}.csv"))).unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    let mut index = 0usize;
    for group in [&camp_a[..], &camp_b[..], &neutral[..]] {
        for text in group {
            writeln!(file, "{index},{text},,{index},1,user{index},@user{index},").unwrap();
            index += 1;
        }
    }
}

fn test_config(dirs: &TempDir, seed: u64) -> Config {
    let mut config = Config::default();
    config.storage.data_dir = dirs.path().join("data");
    config.storage.cache_dir = dirs.path().join("cache");
    config.storage.use_distance_cache = false;
    config.sampling.sample_size = 64;
    config.sampling.seed = Some(seed);
    std::fs::create_dir_all(&config.storage.data_dir).unwrap();
    seed_topic(&config.storage.data_dir, "topic");
    config
}

#[test]
fn topical_pass_produces_ranked_representatives() {
    let dirs = TempDir::new().unwrap();
    let config = test_config(&dirs, 42);
    let mut pipeline = Pipeline::new(config).unwrap();

    let outcome = pipeline.run_topical("topic").unwrap();
    assert_eq!(outcome.representatives.len(), 3);
    for pair in outcome.representatives.windows(2) {
        assert!(pair[0].cardinality >= pair[1].cardinality);
    }
    for rep in &outcome.representatives {
        assert!(rep.cardinality >= 1);
        assert!((0.0..=1.0).contains(&rep.confidence));
        assert!(!rep.record.text.is_empty());
    }
}

#[test]
fn sentiment_pass_produces_six_slots() {
    let dirs = TempDir::new().unwrap();
    let config = test_config(&dirs, 42);
    let mut pipeline = Pipeline::new(config).unwrap();

    let outcome = pipeline.run_sentiment("topic").unwrap();
    assert_eq!(outcome.representatives.len(), 6);
    for rep in &outcome.representatives {
        assert!((0.0..=1.0).contains(&rep.confidence));
    }
}

#[test]
fn both_passes_share_one_sampled_corpus() {
    let dirs = TempDir::new().unwrap();
    let config = test_config(&dirs, 42);
    let mut pipeline = Pipeline::new(config).unwrap();

    pipeline.run_topical("topic").unwrap();
    let after_topical = pipeline.corpus().unwrap().clone();
    pipeline.run_sentiment("topic").unwrap();
    let after_sentiment = pipeline.corpus().unwrap().clone();
    assert_eq!(after_topical, after_sentiment);
}

#[test]
fn identical_seed_and_config_is_deterministic() {
    let dirs = TempDir::new().unwrap();
    let config = test_config(&dirs, 7);

    let mut first = Pipeline::new(config.clone()).unwrap();
    let mut second = Pipeline::new(config).unwrap();

    let topical_a = first.run_topical("topic").unwrap();
    let topical_b = second.run_topical("topic").unwrap();
    assert_eq!(topical_a.representatives, topical_b.representatives);

    let sentiment_a = first.run_sentiment("topic").unwrap();
    let sentiment_b = second.run_sentiment("topic").unwrap();
    assert_eq!(sentiment_a.representatives, sentiment_b.representatives);
}

#[test]
fn each_topic_gets_its_own_corpus() {
    let dirs = TempDir::new().unwrap();
    let config = test_config(&dirs, 42);
    let data_dir = config.storage.data_dir.clone();

    // A second topic with entirely different vocabulary.
    let mut file = std::fs::File::create(data_dir.join("trains.csv")).unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    let texts = [
        "the express train arrives on platform two",
        "train delays on the northern line again",
        "new train timetable starts next week",
        "the freight train blocked the crossing",
        "train fares going up in the spring",
        "quiet carriage on the morning train",
    ];
    for (i, text) in texts.iter().enumerate() {
        writeln!(file, "{i},{text},,,,,,").unwrap();
    }

    let mut pipeline = Pipeline::new(config).unwrap();
    pipeline.run_topical("topic").unwrap();
    let outcome = pipeline.run_topical("trains").unwrap();

    for rep in &outcome.representatives {
        assert!(
            rep.record.text.contains("train"),
            "representative from the wrong topic: {}",
            rep.record.text
        );
    }
}

#[test]
fn requesting_more_clusters_than_data_yields_warns() {
    let dirs = TempDir::new().unwrap();
    let mut config = test_config(&dirs, 42);
    // Two identical-text groups collapse under AutoK, so fewer clusters
    // exist than the five requested.
    let data_dir = config.storage.data_dir.clone();
    let mut file = std::fs::File::create(data_dir.join("twocamps.csv")).unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    for i in 0..5usize {
        writeln!(file, "{i},alpha alpha alpha,,,,,,").unwrap();
    }
    for i in 5..10usize {
        writeln!(file, "{i},omega omega omega,,,,,,").unwrap();
    }

    config.clustering.num_clusters = 5;
    config.clustering.auto_k = true;
    config.clustering.distance_threshold = 0.5;

    let mut pipeline = Pipeline::new(config).unwrap();
    let outcome = pipeline.run_topical("twocamps").unwrap();
    assert_eq!(outcome.representatives.len(), 2);
    assert!(outcome.warnings.contains(
        &PipelineWarning::FewerClustersThanRequested {
            requested: 5,
            available: 2
        }
    ));
}

#[test]
fn small_source_degrades_with_shortfall_warning() {
    let dirs = TempDir::new().unwrap();
    let mut config = test_config(&dirs, 42);
    config.sampling.sample_size = 500;

    let mut pipeline = Pipeline::new(config).unwrap();
    let outcome = pipeline.run_topical("topic").unwrap();
    assert!(outcome
        .warnings
        .iter()
        .any(|w| matches!(w, PipelineWarning::SampleShortfall { available: 12, .. })));
}

#[test]
fn mock_runs_are_reproducible() {
    let dirs = TempDir::new().unwrap();
    let mut config = test_config(&dirs, 123);
    config.mock.enabled = true;

    let mut first = Pipeline::new(config.clone()).unwrap();
    let mut second = Pipeline::new(config).unwrap();

    assert_eq!(
        first.run_topical("topic").unwrap().representatives,
        second.run_topical("topic").unwrap().representatives
    );
    assert_eq!(
        first.run_sentiment("topic").unwrap().representatives,
        second.run_sentiment("topic").unwrap().representatives
    );
}

#[test]
fn mock_sentiment_fills_six_slots_sorted_tail() {
    let dirs = TempDir::new().unwrap();
    let mut config = test_config(&dirs, 9);
    config.mock.enabled = true;

    let mut pipeline = Pipeline::new(config).unwrap();
    let outcome = pipeline.run_sentiment("topic").unwrap();
    assert_eq!(outcome.representatives.len(), 6);
    for pair in outcome.representatives[3..].windows(2) {
        assert!(pair[0].cardinality >= pair[1].cardinality);
    }
}
