//! JSON index descriptions on disk.

use std::fs;

use crate::common::{description_json, ids, write_dictionary, CARS};
use ngram_suggest::config::{read_descriptions, read_descriptions_file};
use ngram_suggest::service::load_description;
use ngram_suggest::{open_index, write_index, ConfigError, MetricKind, SearchConfig};
use tempfile::TempDir;

#[test]
fn relative_paths_resolve_against_the_config_file() {
    let dir = TempDir::new().unwrap();
    write_dictionary(dir.path(), "cars.txt", &CARS);
    let config = dir.path().join("indexes.json");
    fs::write(
        &config,
        format!("[{}]", description_json("cars", "cars.txt", "cars.ngix")),
    )
    .unwrap();

    let descriptions = read_descriptions_file(&config).unwrap();
    assert_eq!(descriptions.len(), 1);
    assert_eq!(descriptions[0].source, dir.path().join("cars.txt"));
    assert_eq!(descriptions[0].output, Some(dir.path().join("cars.ngix")));
}

#[test]
fn description_builds_writes_and_reopens() {
    let dir = TempDir::new().unwrap();
    write_dictionary(dir.path(), "cars.txt", &CARS);
    let config = dir.path().join("indexes.json");
    fs::write(
        &config,
        format!("[{}]", description_json("cars", "cars.txt", "cars.ngix")),
    )
    .unwrap();

    let description = read_descriptions_file(&config).unwrap().remove(0);
    let built = load_description(&description).unwrap();
    let output = description.output.as_deref().unwrap();
    write_index(&built, output).unwrap();

    let opened = open_index(&description.config().unwrap(), output).unwrap();
    let search = SearchConfig::new("Toyota Corola", 3, MetricKind::Cosine, 0.6).unwrap();
    assert_eq!(ids(&opened.suggest(&search).unwrap())[0], 6);
}

#[test]
fn blank_dictionary_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    let entries = ["Lada Niva", "", "  ", "Lada Vesta"];
    write_dictionary(dir.path(), "cars.txt", &entries);
    let config = dir.path().join("indexes.json");
    fs::write(
        &config,
        format!("[{}]", description_json("lada", "cars.txt", "lada.ngix")),
    )
    .unwrap();

    let description = read_descriptions_file(&config).unwrap().remove(0);
    let index = load_description(&description).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.entry(1), Some("Lada Vesta"));
}

#[test]
fn invalid_descriptions_are_rejected_on_read() {
    let bad_ngram = r#"[{"name": "x", "ngramSize": 7, "source": "x.txt",
        "alphabet": ["english"], "pad": "$", "wrap": ["$", "$"]}]"#;
    assert!(matches!(
        read_descriptions(bad_ngram.as_bytes()),
        Err(ConfigError::NGramSize { size: 7, .. })
    ));

    let bad_pad = r#"[{"name": "x", "ngramSize": 3, "source": "x.txt",
        "alphabet": ["english"], "pad": "$$", "wrap": ["$", "$"]}]"#;
    assert!(matches!(
        read_descriptions(bad_pad.as_bytes()),
        Err(ConfigError::Pad(_))
    ));

    assert!(matches!(
        read_descriptions("not json".as_bytes()),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn missing_source_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("indexes.json");
    fs::write(
        &config,
        format!("[{}]", description_json("gone", "gone.txt", "gone.ngix")),
    )
    .unwrap();

    let description = read_descriptions_file(&config).unwrap().remove(0);
    assert!(load_description(&description).is_err());
}
