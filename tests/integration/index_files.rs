//! Writing, inspecting and reopening index files.

use std::fs;

use crate::common::{build_cars_index, cars_config, config_with_ngram, ids};
use ngram_suggest::binary::{read_header, VERSION};
use ngram_suggest::ranking::uniform;
use ngram_suggest::{open_index, write_index, MetricKind, SearchConfig, StorageError};
use tempfile::TempDir;

#[test]
fn written_file_reopens_with_same_answers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cars.ngix");

    let built = build_cars_index();
    let written = write_index(&built, &path).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len() as usize, written);

    let opened = open_index(&cars_config(), &path).unwrap();
    let search = SearchConfig::new("Nissan ma", 2, MetricKind::Jaccard, 0.5).unwrap();
    assert_eq!(ids(&opened.suggest(&search).unwrap()), vec![2, 0]);
    assert_eq!(
        ids(&opened.autocomplete("Niss", 10, &uniform).unwrap()),
        vec![0, 1, 2, 3, 4]
    );
    assert_eq!(opened.searcher().pool().outstanding(), 0);
}

#[test]
fn header_describes_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cars.ngix");
    write_index(&build_cars_index(), &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    let header = read_header(&bytes).unwrap();
    assert_eq!(header.version, VERSION);
    assert_eq!(header.ngram_size, 3);
    assert_eq!(header.doc_count, 8);
    assert_eq!(
        header.term_count as usize,
        build_cars_index().inverted().num_terms()
    );
    assert_eq!(&bytes[..4], b"NGIX");
    assert_eq!(&bytes[bytes.len() - 4..], b"XIGN");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let result = open_index(&cars_config(), &dir.path().join("absent.ngix"));
    assert!(matches!(result, Err(StorageError::Io(_))));
}

#[test]
fn reopening_with_another_ngram_size_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cars.ngix");
    write_index(&build_cars_index(), &path).unwrap();

    let result = open_index(&config_with_ngram(2), &path);
    assert!(matches!(
        result,
        Err(StorageError::NGramSizeMismatch {
            found: 3,
            expected: 2,
        })
    ));
}

#[test]
fn truncated_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cars.ngix");
    write_index(&build_cars_index(), &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
    assert!(open_index(&cars_config(), &path).is_err());
}
