//! Static reference tables for the Mexican e-commerce market.
//!
//! All tables are built once from the constants below into a
//! `ReferenceTables` value that the synthesizer borrows. Nothing here
//! is global or mutable after construction.

use crate::{
    error::{GenError, GenResult},
    types::DistanceTier,
};

pub const ORIGIN_STATE: &str = "Ciudad de México";
pub const DEFAULT_REGION: &str = "Centro";
pub const OWN_SITE_CHANNEL: &str = "Own Website";
pub const CREDIT_CARD: &str = "Credit Card";

const WEIGHT_TOLERANCE: f64 = 1e-9;

const STATES: [&str; 32] = [
    "Aguascalientes", "Baja California", "Baja California Sur",
    "Campeche", "Chiapas", "Chihuahua", "Coahuila", "Colima",
    "Ciudad de México", "Durango", "Guanajuato", "Guerrero",
    "Hidalgo", "Jalisco", "México", "Michoacán", "Morelos",
    "Nayarit", "Nuevo León", "Oaxaca", "Puebla", "Querétaro",
    "Quintana Roo", "San Luis Potosí", "Sinaloa", "Sonora",
    "Tabasco", "Tamaulipas", "Tlaxcala", "Veracruz", "Yucatán",
    "Zacatecas",
];

const REGIONS: [(&str, &[&str]); 5] = [
    ("Centro", &[
        "Ciudad de México", "México", "Puebla", "Morelos",
        "Tlaxcala", "Hidalgo", "Querétaro",
    ]),
    ("Norte", &[
        "Nuevo León", "Chihuahua", "Coahuila", "Sonora",
        "Tamaulipas", "Baja California", "Baja California Sur",
        "Durango", "Zacatecas",
    ]),
    ("Occidente", &[
        "Jalisco", "Michoacán", "Guanajuato", "Aguascalientes",
        "Colima", "Nayarit", "Sinaloa", "San Luis Potosí",
    ]),
    ("Sur", &["Guerrero", "Oaxaca", "Chiapas", "Veracruz", "Tabasco"]),
    ("Península", &["Yucatán", "Quintana Roo", "Campeche"]),
];

//                 name                 prob  base cost  speed
const CARRIERS: [(&str, f64, f64, f64); 7] = [
    ("Estafeta",          0.28, 120.0, 0.70),
    ("DHL",               0.22, 180.0, 0.90),
    ("FedEx",             0.18, 160.0, 0.80),
    ("Correos de México", 0.15,  80.0, 0.40),
    ("UPS",               0.10, 170.0, 0.85),
    ("Redpack",           0.05, 100.0, 0.60),
    ("Paquetexpress",     0.02,  90.0, 0.65),
];

//                      carrier         local regional national
const BASE_TRANSIT_DAYS: [(&str, u32, u32, u32); 7] = [
    ("Estafeta",          2, 4,  6),
    ("DHL",               1, 2,  3),
    ("FedEx",             2, 3,  4),
    ("Correos de México", 5, 8, 12),
    ("UPS",               1, 2,  4),
    ("Redpack",           3, 5,  7),
    ("Paquetexpress",     3, 5,  8),
];

const CATEGORIES: [(&str, f64, f64, f64); 7] = [
    ("Fashion & Accessories", 0.25, 150.0,  5_000.0),
    ("Electronics",           0.24, 500.0, 35_000.0),
    ("Home & Garden",         0.16, 200.0, 15_000.0),
    ("Health & Beauty",       0.12, 100.0,  3_000.0),
    ("Sports",                0.09, 300.0,  8_000.0),
    ("Books & Education",     0.08,  50.0,  2_000.0),
    ("Toys & Baby",           0.06, 200.0,  4_000.0),
];

const PAYMENT_METHODS: [(&str, f64); 5] = [
    ("Debit Card",    0.48),
    (CREDIT_CARD,     0.30),
    ("Cash (OXXO)",   0.15),
    ("PayPal",        0.05),
    ("Bank Transfer", 0.02),
];

const SALES_CHANNELS: [(&str, f64); 6] = [
    ("Mercado Libre",    0.35),
    ("Amazon México",    0.25),
    ("Liverpool",        0.10),
    ("Coppel",           0.08),
    ("Walmart",          0.07),
    (OWN_SITE_CHANNEL,   0.15),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitDays {
    pub local: u32,
    pub regional: u32,
    pub national: u32,
}

impl TransitDays {
    pub fn for_tier(&self, tier: DistanceTier) -> u32 {
        match tier {
            DistanceTier::Local    => self.local,
            DistanceTier::Regional => self.regional,
            DistanceTier::National => self.national,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CarrierProfile {
    pub name: &'static str,
    pub probability: f64,
    pub base_cost: f64,
    /// Relative speed, kept for analysts; transit times come from `transit`.
    pub speed_factor: f64,
    pub transit: TransitDays,
}

#[derive(Debug, Clone)]
pub struct CategoryProfile {
    pub name: &'static str,
    pub probability: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// Half-open kg range product weights are drawn from.
    pub weight_kg: (f64, f64),
}

#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub states: Vec<&'static str>,
    pub regions: Vec<(&'static str, Vec<&'static str>)>,
    pub carriers: Vec<CarrierProfile>,
    pub categories: Vec<CategoryProfile>,
    pub payment_methods: Vec<(&'static str, f64)>,
    pub sales_channels: Vec<(&'static str, f64)>,
}

impl ReferenceTables {
    /// Build and validate the Mexican market tables.
    pub fn mexico() -> GenResult<Self> {
        let carriers = CARRIERS
            .iter()
            .map(|&(name, probability, base_cost, speed_factor)| {
                let transit = BASE_TRANSIT_DAYS
                    .iter()
                    .find(|row| row.0 == name)
                    .map(|&(_, local, regional, national)| TransitDays { local, regional, national })
                    .ok_or_else(|| GenError::ReferenceData {
                        reason: format!("carrier '{name}' has no base transit row"),
                    })?;
                Ok(CarrierProfile { name, probability, base_cost, speed_factor, transit })
            })
            .collect::<GenResult<Vec<_>>>()?;

        let categories = CATEGORIES
            .iter()
            .map(|&(name, probability, min_price, max_price)| CategoryProfile {
                name,
                probability,
                min_price,
                max_price,
                weight_kg: weight_range_for(name),
            })
            .collect();

        let tables = Self {
            states: STATES.to_vec(),
            regions: REGIONS.iter().map(|(r, s)| (*r, s.to_vec())).collect(),
            carriers,
            categories,
            payment_methods: PAYMENT_METHODS.to_vec(),
            sales_channels: SALES_CHANNELS.to_vec(),
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Check weights sum to 1.0 and that regions partition the states.
    pub fn validate(&self) -> GenResult<()> {
        check_weights("carriers", self.carriers.iter().map(|c| c.probability))?;
        check_weights("categories", self.categories.iter().map(|c| c.probability))?;
        check_weights("payment_methods", self.payment_methods.iter().map(|p| p.1))?;
        check_weights("sales_channels", self.sales_channels.iter().map(|c| c.1))?;

        if self.regions.len() != 5 {
            return Err(GenError::ReferenceData {
                reason: format!("expected 5 regions, found {}", self.regions.len()),
            });
        }
        for state in &self.states {
            let memberships = self
                .regions
                .iter()
                .filter(|(_, members)| members.iter().any(|m| m == state))
                .count();
            if memberships != 1 {
                return Err(GenError::ReferenceData {
                    reason: format!("state '{state}' belongs to {memberships} regions"),
                });
            }
        }
        let listed: usize = self.regions.iter().map(|(_, m)| m.len()).sum();
        if listed != self.states.len() {
            return Err(GenError::ReferenceData {
                reason: format!("regions list {listed} states, state table has {}", self.states.len()),
            });
        }
        if !self.states.contains(&ORIGIN_STATE) {
            return Err(GenError::ReferenceData {
                reason: format!("origin state '{ORIGIN_STATE}' missing from state table"),
            });
        }
        Ok(())
    }

    pub fn region_of(&self, state: &str) -> Option<&'static str> {
        self.regions
            .iter()
            .find(|(_, members)| members.iter().any(|m| *m == state))
            .map(|(region, _)| *region)
    }

    /// Region lookup that never fails. Falling back means the state
    /// table and the region table disagree.
    pub fn region_or_default(&self, state: &str) -> &'static str {
        self.region_of(state).unwrap_or_else(|| {
            log::warn!("state '{state}' not in any region; using {DEFAULT_REGION}");
            DEFAULT_REGION
        })
    }

    pub fn carrier(&self, name: &str) -> Option<&CarrierProfile> {
        self.carriers.iter().find(|c| c.name == name)
    }

    pub fn category(&self, name: &str) -> Option<&CategoryProfile> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn carrier_weights(&self) -> Vec<(usize, f64)> {
        self.carriers.iter().enumerate().map(|(i, c)| (i, c.probability)).collect()
    }

    pub fn category_weights(&self) -> Vec<(usize, f64)> {
        self.categories.iter().enumerate().map(|(i, c)| (i, c.probability)).collect()
    }
}

fn weight_range_for(category: &str) -> (f64, f64) {
    match category {
        "Electronics"           => (0.5, 5.0),
        "Fashion & Accessories" => (0.1, 2.0),
        "Home & Garden"         => (1.0, 15.0),
        _                       => (0.2, 3.0),
    }
}

fn check_weights(table: &str, weights: impl Iterator<Item = f64>) -> GenResult<()> {
    let total: f64 = weights.sum();
    if (total - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(GenError::ReferenceData {
            reason: format!("{table} weights sum to {total}, expected 1.0"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mexico_tables_validate() {
        let tables = ReferenceTables::mexico().expect("tables valid");
        assert_eq!(tables.states.len(), 32);
        assert_eq!(tables.regions.len(), 5);
        assert_eq!(tables.carriers.len(), 7);
    }

    #[test]
    fn every_state_maps_to_its_region() {
        let tables = ReferenceTables::mexico().unwrap();
        assert_eq!(tables.region_of("Yucatán"), Some("Península"));
        assert_eq!(tables.region_of("Jalisco"), Some("Occidente"));
        assert_eq!(tables.region_of("Ciudad de México"), Some("Centro"));
        for state in &tables.states {
            assert!(tables.region_of(state).is_some(), "{state} has no region");
        }
    }

    #[test]
    fn unknown_state_falls_back_to_default_region() {
        let tables = ReferenceTables::mexico().unwrap();
        assert_eq!(tables.region_of("yucatán"), None);
        assert_eq!(tables.region_or_default("yucatán"), DEFAULT_REGION);
    }

    #[test]
    fn transit_lookup_by_tier() {
        let tables = ReferenceTables::mexico().unwrap();
        let correos = tables.carrier("Correos de México").unwrap();
        assert_eq!(correos.transit.for_tier(DistanceTier::National), 12);
        assert_eq!(tables.carrier("DHL").unwrap().transit.for_tier(DistanceTier::Local), 1);
    }

    #[test]
    fn bad_weights_rejected() {
        let mut tables = ReferenceTables::mexico().unwrap();
        tables.payment_methods[0].1 = 0.50;
        let err = tables.validate().unwrap_err();
        assert!(matches!(err, GenError::ReferenceData { .. }), "got {err}");
    }

    #[test]
    fn state_in_two_regions_rejected() {
        let mut tables = ReferenceTables::mexico().unwrap();
        tables.regions[3].1.push("Jalisco");
        assert!(tables.validate().is_err());
    }

    #[test]
    fn category_weight_ranges() {
        let tables = ReferenceTables::mexico().unwrap();
        assert_eq!(tables.category("Home & Garden").unwrap().weight_kg, (1.0, 15.0));
        assert_eq!(tables.category("Sports").unwrap().weight_kg, (0.2, 3.0));
    }
}
