//! Reindexing a running service.

use std::fs;
use std::sync::Arc;
use std::thread;

use crate::common::{
    build_cars_index, build_index_of, description_json, ids, write_dictionary, CARS,
};
use ngram_suggest::config::read_descriptions_file;
use ngram_suggest::ranking::uniform;
use ngram_suggest::{Error, MetricKind, SearchConfig, SuggestService};
use tempfile::TempDir;

#[test]
fn reindex_publishes_and_reports_each_description() {
    let dir = TempDir::new().unwrap();
    write_dictionary(dir.path(), "cars.txt", &CARS);
    write_dictionary(dir.path(), "lada.txt", &["Lada Niva", "Lada Vesta"]);
    let config = dir.path().join("indexes.json");
    fs::write(
        &config,
        format!(
            "[{}, {}]",
            description_json("cars", "cars.txt", "cars.ngix"),
            description_json("lada", "lada.txt", "lada.ngix")
        ),
    )
    .unwrap();

    let service = SuggestService::new();
    let reports = service.reindex(&read_descriptions_file(&config).unwrap());
    let counts: Vec<(String, usize)> = reports
        .into_iter()
        .map(|report| (report.name, report.result.unwrap()))
        .collect();
    assert_eq!(
        counts,
        vec![("cars".to_string(), 8), ("lada".to_string(), 2)]
    );
    assert_eq!(service.names(), vec!["cars", "lada"]);

    let hits = service.autocomplete("lada", "Lada N", 5, &uniform).unwrap();
    assert_eq!(ids(&hits), vec![0]);
}

#[test]
fn failed_reindex_keeps_serving_the_old_index() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("indexes.json");
    fs::write(
        &config,
        format!("[{}]", description_json("cars", "missing.txt", "cars.ngix")),
    )
    .unwrap();

    let service = SuggestService::new();
    service.insert("cars", build_cars_index());

    let reports = service.reindex(&read_descriptions_file(&config).unwrap());
    assert_eq!(reports.len(), 1);
    assert!(reports[0].result.is_err());
    assert_eq!(service.get("cars").unwrap().len(), 8);
}

#[test]
fn removed_names_are_unknown() {
    let service = SuggestService::new();
    service.insert("cars", build_cars_index());
    assert!(service.remove("cars").is_some());

    let search = SearchConfig::new("Nissan", 3, MetricKind::Dice, 0.5).unwrap();
    assert!(matches!(
        service.suggest("cars", &search),
        Err(Error::UnknownDictionary(name)) if name == "cars"
    ));
}

#[test]
fn queries_during_swaps_see_a_whole_index() {
    let service = Arc::new(SuggestService::new());
    service.insert("cars", build_cars_index());
    let search = SearchConfig::new("Nissan ma", 8, MetricKind::Jaccard, 0.5).unwrap();

    thread::scope(|scope| {
        for _ in 0..4 {
            let service = Arc::clone(&service);
            let search = search.clone();
            scope.spawn(move || {
                for _ in 0..200 {
                    let results = service.suggest("cars", &search).unwrap();
                    // Either the full fixture or the Lada-only swap, never a mix
                    let found = ids(&results);
                    assert!(found == vec![2, 0] || found.is_empty(), "{:?}", found);
                }
            });
        }

        for round in 0..50 {
            if round % 2 == 0 {
                service.insert("cars", build_index_of(&["Lada Niva", "Lada Vesta"]));
            } else {
                service.insert("cars", build_cars_index());
            }
        }
    });
}
