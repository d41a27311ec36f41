use crate::error::{AghError, Result};
use csv::ReaderBuilder;
use log::debug;
use serde::{Deserialize, Serialize};

/// Embedded list of Alaska communities with published temperature series.
pub static COMMUNITY_CSV: &str = include_str!("../../fixtures/communities.csv");

/// An Alaska community the dashboard can chart.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Community {
    /// Display name (e.g., "Delta Junction")
    pub name: String,
    /// Latitude in decimal degrees, when the community is in the embedded list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees, when the community is in the embedded list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Parse an optional coordinate column. An empty field is `None`.
fn parse_coordinate(field: Option<&str>, column: &str, name: &str) -> Result<Option<f64>> {
    let raw = field.unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|e| AghError::ValueParse(format!("{} {} '{}': {}", name, column, raw, e)))
}

impl Community {
    /// Name used in storage keys: the display name with every character
    /// outside `[A-Za-z0-9]` removed ("Delta Junction" -> "DeltaJunction").
    pub fn storage_name(&self) -> String {
        storage_name(&self.name)
    }

    /// Parse a CSV string of communities.
    ///
    /// Expected CSV columns: name, latitude, longitude
    pub fn parse_community_csv(csv_object: &str) -> Result<Vec<Community>> {
        let mut community_list: Vec<Community> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let name = record.get(0).unwrap_or("").trim().to_string();
            if name.is_empty() {
                continue;
            }
            let latitude = parse_coordinate(record.get(1), "latitude", &name)?;
            let longitude = parse_coordinate(record.get(2), "longitude", &name)?;
            community_list.push(Community {
                name,
                latitude,
                longitude,
            });
        }
        Ok(community_list)
    }

    /// All communities from the embedded list.
    pub fn get_community_vector() -> Result<Vec<Community>> {
        Community::parse_community_csv(COMMUNITY_CSV)
    }

    /// Look up a community in the embedded list by display or storage name,
    /// ignoring case.
    pub fn find(name: &str) -> Result<Community> {
        let wanted = storage_name(name).to_ascii_lowercase();
        Community::get_community_vector()?
            .into_iter()
            .find(|c| c.storage_name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| AghError::CommunityNotFound(name.to_string()))
    }

    /// The listed community matching `name`, or an unlisted one carrying
    /// just the given name. Whether its series exist is left to the loader.
    /// Fails only when `name` has no storage characters at all.
    pub fn resolve(name: &str) -> Result<Community> {
        if storage_name(name).is_empty() {
            return Err(AghError::CommunityNotFound(name.to_string()));
        }
        match Community::find(name) {
            Err(AghError::CommunityNotFound(_)) => {
                debug!("{} is not in the community list", name);
                Ok(Community {
                    name: name.trim().to_string(),
                    latitude: None,
                    longitude: None,
                })
            }
            found => found,
        }
    }
}

/// Strip every non-alphanumeric ASCII character from a community name.
pub fn storage_name(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

#[cfg(test)]
mod tests {
    use super::{storage_name, Community};
    use crate::error::AghError;

    #[test]
    fn test_parse_community_csv() {
        let csv_data = "\
name,latitude,longitude
Fairbanks,64.8378,-147.7164
Delta Junction,64.0378,-145.7322
Galena,,
";
        let communities = Community::parse_community_csv(csv_data).unwrap();
        assert_eq!(communities.len(), 3);
        assert_eq!(communities[0].name, "Fairbanks");
        assert!((communities[0].latitude.unwrap() - 64.8378).abs() < f64::EPSILON);
        assert_eq!(communities[1].storage_name(), "DeltaJunction");
        assert_eq!(communities[2].latitude, None);
    }

    #[test]
    fn test_parse_malformed_coordinate() {
        let csv_data = "name,latitude,longitude\nNome,64.5N,-165.4\n";
        let err = Community::parse_community_csv(csv_data).unwrap_err();
        assert!(matches!(err, AghError::ValueParse(_)));
        assert!(err.to_string().contains("Nome latitude '64.5N'"));
    }

    #[test]
    fn test_parse_empty_csv() {
        let communities = Community::parse_community_csv("name,latitude,longitude\n").unwrap();
        assert!(communities.is_empty());
    }

    #[test]
    fn test_embedded_list_parses() {
        let communities = Community::get_community_vector().unwrap();
        assert!(!communities.is_empty());
        assert!(communities.iter().all(|c| c.latitude.is_some()));
    }

    #[test]
    fn test_storage_name() {
        assert_eq!(storage_name("Fairbanks"), "Fairbanks");
        assert_eq!(storage_name("King Salmon"), "KingSalmon");
        assert_eq!(storage_name("Anchor Point (Kenai)"), "AnchorPointKenai");
    }

    #[test]
    fn test_find_embedded_community() {
        let fairbanks = Community::find("fairbanks").unwrap();
        assert_eq!(fairbanks.name, "Fairbanks");
        let delta = Community::find("DeltaJunction").unwrap();
        assert_eq!(delta.name, "Delta Junction");
        assert!(Community::find("Atlantis").is_err());
    }

    #[test]
    fn test_resolve_unlisted_community() {
        let listed = Community::resolve("delta junction").unwrap();
        assert_eq!(listed.name, "Delta Junction");
        assert!(listed.latitude.is_some());

        let galena = Community::resolve(" Galena ").unwrap();
        assert_eq!(galena.name, "Galena");
        assert_eq!(galena.latitude, None);
        assert_eq!(galena.storage_name(), "Galena");

        assert!(matches!(
            Community::resolve("--"),
            Err(AghError::CommunityNotFound(_))
        ));
    }
}
