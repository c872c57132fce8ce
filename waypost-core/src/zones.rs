// Seed hazard zones and the combined view shown on the map

use crate::data::SubmissionStore;
use crate::error::Result;
use crate::model::MapZone;

const SEED_ZONES: &str = include_str!("../data/zones.json");

/// Every bundled zone, all cities.
pub fn seed_zones() -> Result<Vec<MapZone>> {
    Ok(serde_json::from_str(SEED_ZONES)?)
}

pub fn seed_zones_for(city: &str) -> Result<Vec<MapZone>> {
    Ok(seed_zones()?
        .into_iter()
        .filter(|z| z.city.eq_ignore_ascii_case(city))
        .collect())
}

/// Cities that have at least one bundled zone, in first-seen order.
pub fn seed_cities() -> Result<Vec<String>> {
    let mut cities: Vec<String> = Vec::new();
    for zone in seed_zones()? {
        if !cities.iter().any(|c| c.eq_ignore_ascii_case(&zone.city)) {
            cities.push(zone.city);
        }
    }
    Ok(cities)
}

/// Bundled zones for `city` followed by approved community zones.
pub fn visible_zones(store: &impl SubmissionStore, city: &str) -> Result<Vec<MapZone>> {
    let mut zones = seed_zones_for(city)?;
    zones.extend(store.approved_zones(city)?);
    Ok(zones)
}
