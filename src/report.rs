//! Report module for csvrel
//!
//! The fixed questions csvrel answers about the `cities` and `countries`
//! tables. Each question is a small chain of table operations; `run` asks
//! all of them and collects the answers into a `Report`.
//!
//! Questions whose aggregate would run over zero rows answer `None` instead
//! of failing, so one empty selection doesn't sink the whole report.

use std::fmt;

use tracing::{debug, info};

use crate::aggregate::{max, mean, min};
use crate::config::AppConfig;
use crate::database::Database;
use crate::error::CsvrelResult;
use crate::table::{field, number, Record, Table};

/// Name of the table holding one row per city
pub const CITIES: &str = "cities";

/// Name of the table holding one row per country
pub const COUNTRIES: &str = "countries";

/// Field shared by both tables
pub const JOIN_KEY: &str = "country";

/// Highest and lowest latitude among one country's cities
#[derive(Debug, Clone, PartialEq)]
pub struct LatitudeRange {
    pub country: String,
    pub max: f64,
    pub min: f64,
}

/// Answers to every question, in the order they are printed
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub cities: Table,
    pub country: String,
    pub mean_temperature: Option<f64>,
    pub city_latitudes: Vec<Record>,
    pub cold_threshold: f64,
    pub cold_non_eu_cities: Vec<Record>,
    pub landlocked_eu_temperature: Option<(f64, f64)>,
    pub latitude_extremes: Vec<LatitudeRange>,
}

/// Cities joined with their country rows
fn cities_with_countries(db: &Database) -> CsvrelResult<Table> {
    let cities = db.get_table(CITIES)?;
    let countries = db.get_table(COUNTRIES)?;
    cities.join(countries, JOIN_KEY)
}

/// Mean temperature of the cities in `country`
///
/// `None` when the country has no cities.
pub fn mean_temperature(db: &Database, country: &str) -> CsvrelResult<Option<f64>> {
    let selected = db
        .get_table(CITIES)?
        .filter(|r| Ok(field(r, JOIN_KEY)? == country))?;

    debug!(country, cities = selected.row_count(), "mean temperature");

    if selected.is_empty() {
        return Ok(None);
    }
    selected.aggregate(mean, "temperature").map(Some)
}

/// Projection of the cities table onto `attributes`
pub fn city_projection(db: &Database, attributes: &[&str]) -> CsvrelResult<Vec<Record>> {
    Ok(db.get_table(CITIES)?.select(attributes))
}

/// Cities outside the EU colder than `threshold`
pub fn cold_non_eu_cities(db: &Database, threshold: f64) -> CsvrelResult<Vec<Record>> {
    let cold = cities_with_countries(db)?
        .filter(|r| Ok(field(r, "EU")? == "no"))?
        .filter(|r| Ok(number(r, "temperature")? < threshold))?;

    debug!(threshold, cities = cold.row_count(), "cold non-EU cities");

    Ok(cold.rows().to_vec())
}

/// `(max, min)` temperature of EU cities in countries without a coastline
///
/// `None` when there are no such cities.
pub fn landlocked_eu_temperature_range(db: &Database) -> CsvrelResult<Option<(f64, f64)>> {
    let landlocked = cities_with_countries(db)?
        .filter(|r| Ok(field(r, "EU")? == "yes"))?
        .filter(|r| Ok(field(r, "coastline")? == "no"))?;

    debug!(cities = landlocked.row_count(), "landlocked EU cities");

    if landlocked.is_empty() {
        return Ok(None);
    }
    let highest = landlocked.aggregate(max, "temperature")?;
    let lowest = landlocked.aggregate(min, "temperature")?;
    Ok(Some((highest, lowest)))
}

/// Latitude range of each country's cities, in countries-table order
///
/// Countries without any city are left out.
pub fn latitude_extremes(db: &Database) -> CsvrelResult<Vec<LatitudeRange>> {
    let combined = cities_with_countries(db)?;
    let names = db.get_table(COUNTRIES)?.select(&[JOIN_KEY]);

    let mut ranges = Vec::new();
    for name in &names {
        let country = field(name, JOIN_KEY)?;
        let cities = combined.filter(|r| Ok(field(r, JOIN_KEY)? == country))?;
        if cities.is_empty() {
            debug!(country, "no cities, skipping latitude range");
            continue;
        }
        ranges.push(LatitudeRange {
            country: country.to_string(),
            max: cities.aggregate(max, "latitude")?,
            min: cities.aggregate(min, "latitude")?,
        });
    }

    Ok(ranges)
}

/// Answer every question against `db`
pub fn run(db: &Database, config: &AppConfig) -> CsvrelResult<Report> {
    info!(tables = db.table_count(), "running report");

    Ok(Report {
        cities: db.get_table(CITIES)?.clone(),
        country: config.country().to_string(),
        mean_temperature: mean_temperature(db, config.country())?,
        city_latitudes: city_projection(db, &["city", "latitude"])?,
        cold_threshold: config.cold_threshold(),
        cold_non_eu_cities: cold_non_eu_cities(db, config.cold_threshold())?,
        landlocked_eu_temperature: landlocked_eu_temperature_range(db)?,
        latitude_extremes: latitude_extremes(db)?,
    })
}

fn write_record(f: &mut fmt::Formatter<'_>, record: &Record) -> fmt::Result {
    let fields: Vec<String> = record.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    writeln!(f, "  {}", fields.join(", "))
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.cities)?;
        writeln!(f)?;

        writeln!(f, "City latitudes:")?;
        for record in &self.city_latitudes {
            write_record(f, record)?;
        }
        writeln!(f)?;

        match self.mean_temperature {
            Some(avg) => writeln!(f, "Mean temperature in {}: {}", self.country, avg)?,
            None => writeln!(f, "Mean temperature in {}: no cities", self.country)?,
        }
        writeln!(f)?;

        writeln!(
            f,
            "Non-EU cities colder than {}: {}",
            self.cold_threshold,
            self.cold_non_eu_cities.len()
        )?;
        for record in &self.cold_non_eu_cities {
            write_record(f, record)?;
        }
        writeln!(f)?;

        match self.landlocked_eu_temperature {
            Some((highest, lowest)) => {
                writeln!(f, "Highest temperature in landlocked EU cities: {}", highest)?;
                writeln!(f, "Lowest temperature in landlocked EU cities: {}", lowest)?;
            }
            None => writeln!(f, "No landlocked EU cities")?,
        }

        for range in &self.latitude_extremes {
            writeln!(f)?;
            writeln!(f, "{} highest latitude: {}", range.country, range.max)?;
            writeln!(f, "{} lowest latitude: {}", range.country, range.min)?;
        }

        Ok(())
    }
}
