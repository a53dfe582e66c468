//! Label and colour mapping for status and category chips.
//!
//! Every screen that shows a status renders it from here, so the mapping
//! lives in exactly one exhaustive `match` per enum.

use serde::Serialize;

use crate::models::{ApplicationStatus, PackageCategory, TaskStatus};

/// An RGB colour, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Palette
pub const BLUE_BG: Rgb = Rgb::from_hex(0xE3F2FD);
pub const BLUE_FG: Rgb = Rgb::from_hex(0x1976D2);
pub const ORANGE_BG: Rgb = Rgb::from_hex(0xFFF3E0);
pub const ORANGE_FG: Rgb = Rgb::from_hex(0xF57C00);
pub const GREEN_BG: Rgb = Rgb::from_hex(0xE8F5E8);
pub const GREEN_FG: Rgb = Rgb::from_hex(0x2E7D32);
pub const RED_BG: Rgb = Rgb::from_hex(0xFFEBEE);
pub const RED_FG: Rgb = Rgb::from_hex(0xD32F2F);
pub const GREY_BG: Rgb = Rgb::from_hex(0xF5F5F5);
pub const GREY_FG: Rgb = Rgb::from_hex(0x757575);
pub const PURPLE_BG: Rgb = Rgb::from_hex(0xF3E5F5);
pub const PURPLE_FG: Rgb = Rgb::from_hex(0x7B1FA2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub background: Rgb,
    pub foreground: Rgb,
}

const fn badge(label: &'static str, background: Rgb, foreground: Rgb) -> Badge {
    Badge {
        label,
        background,
        foreground,
    }
}

impl TaskStatus {
    pub fn badge(&self) -> Badge {
        match self {
            TaskStatus::Published => badge("Disponible", BLUE_BG, BLUE_FG),
            TaskStatus::InProgress => badge("En cours", BLUE_BG, BLUE_FG),
            TaskStatus::Completed => badge("Complétée", ORANGE_BG, ORANGE_FG),
            TaskStatus::Done => badge("Terminée", GREEN_BG, GREEN_FG),
            TaskStatus::Cancelled => badge("Annulée", RED_BG, RED_FG),
            TaskStatus::Draft => badge("Brouillon", GREY_BG, GREY_FG),
        }
    }
}

impl ApplicationStatus {
    pub fn badge(&self) -> Badge {
        match self {
            ApplicationStatus::Pending => badge("En attente", ORANGE_BG, ORANGE_FG),
            ApplicationStatus::Accepted => badge("Acceptée", BLUE_BG, BLUE_FG),
            ApplicationStatus::Completed => badge("Complétée", PURPLE_BG, PURPLE_FG),
            ApplicationStatus::Validated => badge("Validée", GREEN_BG, GREEN_FG),
            ApplicationStatus::Rejected => badge("Refusée", RED_BG, RED_FG),
        }
    }
}

impl PackageCategory {
    pub fn badge(&self) -> Badge {
        match self {
            PackageCategory::Small => badge("Petit colis", GREEN_BG, GREEN_FG),
            PackageCategory::Medium => badge("Colis moyen", ORANGE_BG, ORANGE_FG),
            PackageCategory::Large => badge("Gros colis", RED_BG, RED_FG),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex() {
        assert_eq!(BLUE_FG, Rgb(0x19, 0x76, 0xD2));
        assert_eq!(BLUE_FG.to_string(), "#1976D2");
        assert_eq!(serde_json::to_value(GREY_BG).unwrap(), serde_json::json!("#F5F5F5"));
    }

    #[test]
    fn test_labels_drive_display() {
        assert_eq!(TaskStatus::InProgress.to_string(), "En cours");
        assert_eq!(ApplicationStatus::Rejected.to_string(), "Refusée");
        assert_eq!(PackageCategory::Medium.to_string(), "Colis moyen");
    }

    #[test]
    fn test_terminal_states_share_colours() {
        assert_eq!(TaskStatus::Done.badge().background, ApplicationStatus::Validated.badge().background);
        assert_eq!(TaskStatus::Cancelled.badge().foreground, ApplicationStatus::Rejected.badge().foreground);
    }
}
