// Integration tests for the on-disk distance-matrix cache
use std::io::Write;
use tempfile::TempDir;
use zeitgeist::config::Config;
use zeitgeist::pipeline::Pipeline;

const HEADER: &str = "index,text,timestamp,fav_count,ret_count,username,at_tag,id\n";

fn cached_config(dirs: &TempDir) -> Config {
    let mut config = Config::default();
    config.storage.data_dir = dirs.path().join("data");
    config.storage.cache_dir = dirs.path().join("cache");
    config.storage.use_distance_cache = true;
    config.sampling.sample_size = 32;
    config.sampling.seed = Some(17);
    std::fs::create_dir_all(&config.storage.data_dir).unwrap();

    let mut file =
        std::fs::File::create(config.storage.data_dir.join("topic.csv")).unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    let texts = [
        "love the new park it is wonderful",
        "wonderful park love the trees",
        "the bus schedule changed again",
        "bus schedule posted at the stop",
        "horrible queues at the station today",
        "station queues are a disaster",
    ];
    for (i, text) in texts.iter().enumerate() {
        writeln!(file, "{i},{text},,,,,,").unwrap();
    }
    config
}

#[test]
fn cache_entries_are_written_and_results_stay_identical() {
    let dirs = TempDir::new().unwrap();
    let config = cached_config(&dirs);

    let mut cold = Pipeline::new(config.clone()).unwrap();
    let cold_outcome = cold.run_topical("topic").unwrap();

    let entries: Vec<_> = std::fs::read_dir(dirs.path().join("cache"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("zst"))
        .collect();
    assert!(!entries.is_empty(), "expected a cache entry after the run");

    // A warm pipeline serving distances from the cache must produce the
    // same representatives.
    let mut warm = Pipeline::new(config).unwrap();
    let warm_outcome = warm.run_topical("topic").unwrap();
    assert_eq!(cold_outcome.representatives, warm_outcome.representatives);
}

#[test]
fn lexical_and_affective_passes_use_distinct_entries() {
    let dirs = TempDir::new().unwrap();
    let config = cached_config(&dirs);

    let mut pipeline = Pipeline::new(config).unwrap();
    pipeline.run_topical("topic").unwrap();
    pipeline.run_sentiment("topic").unwrap();

    let entries = std::fs::read_dir(dirs.path().join("cache"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("zst"))
        .count();
    assert_eq!(entries, 2);
}
