use mtgprice::{search, CardCatalog, Error};
use std::io::Write;
use tempfile::NamedTempFile;

mod common;

#[test]
fn load_from_file_success() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "{}", common::ALL_SETS_JSON).unwrap();

    let catalog = CardCatalog::load(tmp.path()).unwrap();
    assert_eq!(catalog.len(), 4);
    assert!(catalog.lookup("Aether Vial").is_some());
    assert!(catalog.lookup("Æther Vial").is_some());
}

#[test]
fn load_from_file_malformed_json() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "{{ not valid json").unwrap();

    match CardCatalog::load(tmp.path()) {
        Err(Error::DataFormat(_)) => {} // Expected
        other => panic!("Expected Error::DataFormat, got: {other:?}"),
    }
}

#[test]
fn search_over_loaded_catalog() {
    let catalog = common::sample_catalog();

    let names = |query: &str| -> Vec<String> {
        search(&catalog, query)
            .into_iter()
            .map(|c| c.name.clone())
            .collect()
    };

    assert_eq!(names("t:artifact"), vec!["Aether Vial", "Sol Ring"]);
    assert_eq!(names("c:m"), vec!["Azorius Charm"]);
    assert_eq!(names("c!m t:instant"), vec!["Lightning Bolt"]);
    assert_eq!(names("o:damage bolt"), vec!["Lightning Bolt"]);
    assert_eq!(names("!sol ring"), vec!["Sol Ring"]);
    assert_eq!(names("").len(), 4);
}
