//! Raw station dataset.
//!
//! The source is the Buenos Aires open-data CSV of automated cash
//! withdrawal stations. Only the columns below are used; any others are
//! ignored.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::{Catalog, Coordinate, Network, Station, UsageCounters};

use super::error::DatasetError;

/// One row of the raw dataset, as published.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStationRecord {
    #[serde(rename = "long")]
    pub longitude: f64,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "banco")]
    pub bank: String,
    #[serde(rename = "red")]
    pub network: String,
    #[serde(rename = "localidad")]
    pub locality: String,
    #[serde(rename = "terminales")]
    pub terminals: u32,
    #[serde(rename = "calle")]
    pub street: String,
    #[serde(rename = "altura")]
    pub street_number: String,
}

/// Where catalogs are rebuilt from.
pub trait DatasetSource: Send + Sync {
    /// Read every record of the dataset.
    fn read(&self) -> Result<Vec<RawStationRecord>, DatasetError>;
}

/// A CSV dataset on local disk.
#[derive(Debug, Clone)]
pub struct CsvFileDataset {
    path: PathBuf,
}

impl CsvFileDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for CsvFileDataset {
    fn read(&self) -> Result<Vec<RawStationRecord>, DatasetError> {
        let file = File::open(&self.path).map_err(|source| DatasetError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_csv(file)
    }
}

/// Parse CSV records from any reader.
///
/// Rows that fail to deserialize (missing coordinates, non-numeric
/// terminal counts) are skipped. I/O and header errors abort the parse.
pub fn parse_csv(reader: impl Read) -> Result<Vec<RawStationRecord>, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in rdr.deserialize::<RawStationRecord>() {
        match row {
            Ok(record) => records.push(record),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                debug!(error = %e, "skipping malformed dataset row");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, kept = records.len(), "dataset contained malformed rows");
    }

    Ok(records)
}

/// Project raw records onto the stations of one network in one locality,
/// with all counters at zero.
///
/// Records whose network or coordinate fails validation, or that report no
/// terminals, are dropped. Fails if nothing is left.
pub fn build_catalog(
    records: Vec<RawStationRecord>,
    network: &Network,
    locality: &str,
) -> Result<Catalog, DatasetError> {
    let stations: Vec<Station> = records
        .into_iter()
        .filter(|r| r.locality == locality)
        .filter_map(|r| project(r, network))
        .collect();

    if stations.is_empty() {
        return Err(DatasetError::NoStations {
            network: network.clone(),
            locality: locality.to_string(),
        });
    }

    Ok(Catalog::new(network.clone(), locality, stations)?)
}

fn project(record: RawStationRecord, network: &Network) -> Option<Station> {
    let record_network = Network::parse_normalized(&record.network).ok()?;
    if &record_network != network {
        return None;
    }

    if record.terminals == 0 {
        debug!(bank = %record.bank, street = %record.street, "dropping station without terminals");
        return None;
    }

    let location = match Coordinate::new(record.latitude, record.longitude) {
        Ok(location) => location,
        Err(e) => {
            debug!(error = %e, bank = %record.bank, "dropping station with bad coordinate");
            return None;
        }
    };

    Some(Station {
        bank: record.bank,
        street: record.street,
        street_number: record.street_number,
        location,
        terminal_count: record.terminals,
        network: record_network,
        locality: record.locality,
        counters: UsageCounters::default(),
    })
}

/// Download the dataset to `path`, creating parent directories.
///
/// Returns the number of bytes written.
pub async fn download_dataset(url: &str, path: &Path) -> Result<u64, DatasetError> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let body = response.bytes().await?;

    let io_err = |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, &body).map_err(io_err)?;

    info!(url, path = %path.display(), bytes = body.len(), "downloaded station dataset");
    Ok(body.len() as u64)
}
