use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{normalize_variant, Address, ParseEnumError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageCategory {
    Small,
    Medium,
    Large,
}

impl std::fmt::Display for PackageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.badge().label)
    }
}

impl std::str::FromStr for PackageCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "SMALL" => Ok(PackageCategory::Small),
            "MEDIUM" => Ok(PackageCategory::Medium),
            "LARGE" => Ok(PackageCategory::Large),
            _ => Err(ParseEnumError::new("package category", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipping {
    pub id: Option<String>,
    pub task_id: Option<String>,
    pub package_category: PackageCategory,
    pub pickup_address: Address,
    pub delivery_address: Address,
    /// Free-form package description (weight, dimensions, fragility...)
    pub package_details: Option<Value>,
    pub estimated_distance_in_meters: Option<f64>,
    pub estimated_duration_in_minutes: Option<f64>,
    pub calculated_price_in_cents: Option<i64>,
}

impl Shipping {
    /// "Paris → Lyon"
    pub fn route(&self) -> String {
        format!("{} → {}", self.pickup_address.main_text, self.delivery_address.main_text)
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.estimated_distance_in_meters.map(|m| m / 1000.0)
    }
}
