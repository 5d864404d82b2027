//! Library-level tests for the table operations over the fixture files

use csvrel::aggregate::{mean, sum};
use csvrel::csv_handler::CsvHandler;
use csvrel::database::Database;
use csvrel::table::{field, number};

fn database() -> Database {
    let handler = CsvHandler::default();
    let mut db = Database::new();
    db.insert(handler.load_csv("tests/data/cities.csv").unwrap());
    db.insert(handler.load_csv("tests/data/countries.csv").unwrap());
    db
}

#[test]
fn test_join_cities_with_countries() {
    let db = database();
    let cities = db.search("cities").unwrap();
    let countries = db.search("countries").unwrap();

    let joined = cities.join(countries, "country").unwrap();

    assert_eq!(joined.name(), "cities_joins_countries");
    // Atlantis has no country row
    assert_eq!(joined.row_count(), cities.row_count() - 1);
    for row in joined.rows() {
        assert_eq!(row.len(), 8);
        assert!(row.contains_key("EU"));
        assert!(row.contains_key("temperature"));
        assert_ne!(row["city"], "Atlantis");
    }
}

#[test]
fn test_join_count_matches_pairs() {
    let db = database();
    let cities = db.search("cities").unwrap();
    let countries = db.search("countries").unwrap();

    let expected = cities
        .rows()
        .iter()
        .flat_map(|c| countries.rows().iter().map(move |k| (c, k)))
        .filter(|(c, k)| c["country"] == k["country"])
        .count();

    assert_eq!(cities.join(countries, "country").unwrap().row_count(), expected);
}

#[test]
fn test_filter_then_aggregate() {
    let db = database();
    let austria = db
        .search("cities")
        .unwrap()
        .filter(|r| Ok(field(r, "country")? == "Austria"))
        .unwrap();

    assert_eq!(austria.row_count(), 3);
    let total = austria.aggregate(sum, "temperature").unwrap();
    let avg = austria.aggregate(mean, "temperature").unwrap();
    assert!((total - (4.54 + 6.79 + 7.86)).abs() < 1e-9);
    assert!((avg - total / 3.0).abs() < 1e-9);
}

#[test]
fn test_chained_filters_on_join() {
    let db = database();
    let joined = db
        .search("cities")
        .unwrap()
        .join(db.search("countries").unwrap(), "country")
        .unwrap();

    let chained = joined
        .filter(|r| Ok(field(r, "EU")? == "no"))
        .unwrap()
        .filter(|r| Ok(number(r, "temperature")? < 5.0))
        .unwrap();
    let combined = joined
        .filter(|r| Ok(field(r, "EU")? == "no" && number(r, "temperature")? < 5.0))
        .unwrap();

    assert_eq!(chained.rows(), combined.rows());
    let names: Vec<&str> = chained.rows().iter().map(|r| r["city"].as_str()).collect();
    assert_eq!(names, vec!["Moscow", "Murmansk", "Oslo", "Tromso"]);
}

#[test]
fn test_select_only_requested_attributes() {
    let db = database();
    let selected = db.search("cities").unwrap().select(&["city", "latitude"]);

    assert_eq!(selected.len(), 22);
    for record in &selected {
        assert!(record.keys().all(|k| k == "city" || k == "latitude"));
    }
}
