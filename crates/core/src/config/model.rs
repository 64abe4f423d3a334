use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use pagesmith_compose::Section;

/// Lifecycle state of a page configuration. Transitions happen only through
/// explicit actions (publish, schedule, cancel-schedule, archive), never
/// inferred from timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigStatus {
    Draft,
    Scheduled,
    Published,
    Archived,
}

impl ConfigStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigStatus::Draft => "draft",
            ConfigStatus::Scheduled => "scheduled",
            ConfigStatus::Published => "published",
            ConfigStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ConfigStatus::Draft),
            "scheduled" => Some(ConfigStatus::Scheduled),
            "published" => Some(ConfigStatus::Published),
            "archived" => Some(ConfigStatus::Archived),
            _ => None,
        }
    }
}

/// SEO settings attached to a configuration, saved as one field group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoSettings {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

/// The top-level persisted document a page renders from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    pub id: Uuid,
    /// The page this configuration targets, e.g. `"home"`. At most one
    /// configuration is published and live per route at a time.
    pub route: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ConfigStatus,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub seo: SeoSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_variant: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_config_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_weight: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for the `configs` table. Sections and SEO settings are
/// stored as JSONB and decoded lazily so a row with unknown section types
/// still loads (the composer skips them at render time).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConfigRow {
    pub id: Uuid,
    pub route: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub sections: Value,
    pub seo: Value,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_variant: bool,
    pub original_config_id: Option<Uuid>,
    pub variant_weight: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigDecodeError {
    #[error("unknown config status: {0}")]
    UnknownStatus(String),
    #[error("malformed sections payload: {0}")]
    MalformedSections(#[source] serde_json::Error),
    #[error("malformed seo payload: {0}")]
    MalformedSeo(#[source] serde_json::Error),
}

impl TryFrom<ConfigRow> for PageConfig {
    type Error = ConfigDecodeError;

    fn try_from(row: ConfigRow) -> Result<Self, Self::Error> {
        let status = ConfigStatus::parse(&row.status)
            .ok_or_else(|| ConfigDecodeError::UnknownStatus(row.status.clone()))?;
        let sections: Vec<Section> =
            serde_json::from_value(row.sections).map_err(ConfigDecodeError::MalformedSections)?;
        let seo: SeoSettings =
            serde_json::from_value(row.seo).map_err(ConfigDecodeError::MalformedSeo)?;
        Ok(PageConfig {
            id: row.id,
            route: row.route,
            name: row.name,
            description: row.description,
            status,
            sections,
            seo,
            scheduled_at: row.scheduled_at,
            expires_at: row.expires_at,
            is_variant: row.is_variant,
            original_config_id: row.original_config_id,
            variant_weight: row.variant_weight.map(|w| w.max(0) as u32),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> ConfigRow {
        ConfigRow {
            id: Uuid::new_v4(),
            route: "home".into(),
            name: "Homepage".into(),
            description: None,
            status: "draft".into(),
            sections: json!([]),
            seo: json!({}),
            scheduled_at: None,
            expires_at: None,
            is_variant: false,
            original_config_id: None,
            variant_weight: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_decodes_into_config() {
        let mut r = row();
        r.sections = json!([{
            "id": "sec_1",
            "name": "Hero",
            "order": 0,
            "enabled": true,
            "type": "hero-banner"
        }]);
        let config = PageConfig::try_from(r).unwrap();
        assert_eq!(config.status, ConfigStatus::Draft);
        assert_eq!(config.sections.len(), 1);
        assert_eq!(config.sections[0].id, "sec_1");
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut r = row();
        r.status = "live".into();
        assert!(matches!(
            PageConfig::try_from(r),
            Err(ConfigDecodeError::UnknownStatus(_))
        ));
    }

    #[test]
    fn unknown_section_type_still_decodes() {
        let mut r = row();
        r.sections = json!([{
            "id": "sec_1",
            "name": "Old widget",
            "order": 0,
            "enabled": true,
            "type": "legacy-widget",
            "someField": 7
        }]);
        let config = PageConfig::try_from(r).unwrap();
        assert_eq!(config.sections.len(), 1);
        assert!(config.sections[0].content.kind().is_none());
    }

    #[test]
    fn status_round_trips() {
        for status in [
            ConfigStatus::Draft,
            ConfigStatus::Scheduled,
            ConfigStatus::Published,
            ConfigStatus::Archived,
        ] {
            assert_eq!(ConfigStatus::parse(status.as_str()), Some(status));
        }
    }
}
