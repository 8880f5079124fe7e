//! Dashboard configuration (singleton)

use serde::{Deserialize, Serialize};

/// Fixed key of the singleton config row
pub const DASHBOARD_CONFIG_ID: &str = "main";

/// Admin-editable welcome texts and transfer instructions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    pub welcome_title: String,
    pub welcome_subtitle: String,
    /// Free-text bank transfer / payment instructions
    pub transfer_info: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            welcome_title: "Bienvenido".to_string(),
            welcome_subtitle: "Experiencia Lounge".to_string(),
            transfer_info: "Configura tus datos en el Panel Admin".to_string(),
        }
    }
}

/// Stored row shape: `{ "id": "main", "config": { ... } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfigRecord {
    pub id: String,
    pub config: DashboardConfig,
}

impl DashboardConfigRecord {
    pub fn main(config: DashboardConfig) -> Self {
        Self {
            id: DASHBOARD_CONFIG_ID.to_string(),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"welcomeTitle": "Hola"}"#).unwrap();
        assert_eq!(config.welcome_title, "Hola");
        assert_eq!(config.transfer_info, DashboardConfig::default().transfer_info);
    }

    #[test]
    fn test_record_shape() {
        let record = serde_json::to_value(DashboardConfigRecord::main(DashboardConfig::default()))
            .unwrap();
        assert_eq!(record["id"], "main");
        assert_eq!(record["config"]["welcomeSubtitle"], "Experiencia Lounge");
    }
}
