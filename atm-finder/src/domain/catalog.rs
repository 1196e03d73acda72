//! Per-network station catalogs.

use serde::{Deserialize, Serialize};

use super::{Network, Station, UsageCounters};

/// Error returned when a catalog would break its membership invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCatalog {
    #[error("station {index} belongs to network {found}, expected {expected}")]
    WrongNetwork {
        index: usize,
        expected: Network,
        found: Network,
    },

    #[error("station {index} is in locality {found:?}, expected {expected:?}")]
    WrongLocality {
        index: usize,
        expected: String,
        found: String,
    },
}

/// The ordered set of stations for one network, with their counters.
///
/// Every station shares the catalog's network and locality. Station order
/// is the insertion order of the source dataset and is significant: it
/// breaks ties when ranking by distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct Catalog {
    network: Network,
    locality: String,
    stations: Vec<Station>,
}

#[derive(Deserialize)]
struct RawCatalog {
    network: Network,
    locality: String,
    stations: Vec<Station>,
}

impl Catalog {
    /// Create a catalog, checking that every station matches.
    pub fn new(
        network: Network,
        locality: impl Into<String>,
        stations: Vec<Station>,
    ) -> Result<Self, InvalidCatalog> {
        let locality = locality.into();

        for (index, station) in stations.iter().enumerate() {
            if station.network != network {
                return Err(InvalidCatalog::WrongNetwork {
                    index,
                    expected: network,
                    found: station.network.clone(),
                });
            }
            if station.locality != locality {
                return Err(InvalidCatalog::WrongLocality {
                    index,
                    expected: locality,
                    found: station.locality.clone(),
                });
            }
        }

        Ok(Self {
            network,
            locality,
            stations,
        })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn locality(&self) -> &str {
        &self.locality
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn get(&self, index: usize) -> Option<&Station> {
        self.stations.get(index)
    }

    /// Mutable access to one station's counters. Nothing else is mutable.
    pub fn counters_mut(&mut self, index: usize) -> Option<&mut UsageCounters> {
        self.stations.get_mut(index).map(|s| &mut s.counters)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = InvalidCatalog;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        Catalog::new(raw.network, raw.locality, raw.stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    fn station(network: &str, locality: &str) -> Station {
        Station {
            bank: "Banco Galicia".to_string(),
            street: "Corrientes".to_string(),
            street_number: "1500".to_string(),
            location: Coordinate::new(-34.604, -58.387).unwrap(),
            terminal_count: 2,
            network: Network::parse(network).unwrap(),
            locality: locality.to_string(),
            counters: UsageCounters::default(),
        }
    }

    fn link() -> Network {
        Network::parse("LINK").unwrap()
    }

    #[test]
    fn accepts_matching_stations() {
        let catalog = Catalog::new(
            link(),
            "CABA",
            vec![station("LINK", "CABA"), station("LINK", "CABA")],
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.network(), &link());
        assert_eq!(catalog.locality(), "CABA");
    }

    #[test]
    fn rejects_foreign_network() {
        let err = Catalog::new(
            link(),
            "CABA",
            vec![station("LINK", "CABA"), station("BANELCO", "CABA")],
        )
        .unwrap_err();
        assert!(matches!(err, InvalidCatalog::WrongNetwork { index: 1, .. }));
    }

    #[test]
    fn rejects_foreign_locality() {
        let err = Catalog::new(link(), "CABA", vec![station("LINK", "La Plata")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "station 0 is in locality \"La Plata\", expected \"CABA\""
        );
    }

    #[test]
    fn counters_mut_only_touches_one_station() {
        let mut catalog = Catalog::new(
            link(),
            "CABA",
            vec![station("LINK", "CABA"), station("LINK", "CABA")],
        )
        .unwrap();

        catalog.counters_mut(1).unwrap().record_rank(0);

        assert_eq!(catalog.get(0).unwrap().counters.rank1_count(), 0);
        assert_eq!(catalog.get(1).unwrap().counters.rank1_count(), 1);
        assert!(catalog.counters_mut(2).is_none());
    }

    #[test]
    fn json_keeps_station_order() {
        let mut first = station("LINK", "CABA");
        first.bank = "First".to_string();
        let mut second = station("LINK", "CABA");
        second.bank = "Second".to_string();

        let catalog = Catalog::new(link(), "CABA", vec![first, second]).unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        let back: Catalog = serde_json::from_str(&json).unwrap();

        assert_eq!(back, catalog);
        assert_eq!(back.stations()[0].bank, "First");
    }

    #[test]
    fn json_with_foreign_station_is_rejected() {
        let json = serde_json::json!({
            "network": "LINK",
            "locality": "CABA",
            "stations": [{
                "bank": "Banco Galicia", "street": "Corrientes", "street_number": "1500",
                "location": {"latitude": -34.604, "longitude": -58.387},
                "terminal_count": 2, "network": "BANELCO", "locality": "Rosario"
            }]
        });

        let err = serde_json::from_value::<Catalog>(json).unwrap_err();
        assert!(err.to_string().contains("expected LINK"));
    }
}
