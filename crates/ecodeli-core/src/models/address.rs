use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Option<String>,
    pub main_text: String,
    pub secondary_text: Option<String>,
    pub full_address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub place_id: Option<String>,
    pub location_type: Option<String>,
}

impl Address {
    /// One-line form: the full address when known, else "main, secondary".
    pub fn display(&self) -> String {
        if let Some(full) = self.full_address.as_deref().filter(|s| !s.is_empty()) {
            return full.to_string();
        }
        match self.secondary_text.as_deref().filter(|s| !s.is_empty()) {
            Some(secondary) => format!("{}, {}", self.main_text, secondary),
            None => self.main_text.clone(),
        }
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lng?))
    }
}
