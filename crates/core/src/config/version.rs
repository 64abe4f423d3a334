use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use pagesmith_compose::Section;

use super::model::{ConfigDecodeError, SeoSettings};

/// An immutable snapshot of a configuration, keyed `(config_id,
/// version_number)` and numbered sequentially from 1. Restoring copies the
/// snapshot fields back verbatim, section ids included, so external
/// references to a section survive a save/restore round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub config_id: Uuid,
    pub version_number: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub seo: SeoSettings,
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
}

/// Database row for the `config_versions` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VersionRow {
    pub config_id: Uuid,
    pub version_number: i32,
    pub name: String,
    pub description: Option<String>,
    pub seo: Value,
    pub sections: Value,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<VersionRow> for Version {
    type Error = ConfigDecodeError;

    fn try_from(row: VersionRow) -> Result<Self, Self::Error> {
        let sections: Vec<Section> =
            serde_json::from_value(row.sections).map_err(ConfigDecodeError::MalformedSections)?;
        let seo: SeoSettings =
            serde_json::from_value(row.seo).map_err(ConfigDecodeError::MalformedSeo)?;
        Ok(Version {
            config_id: row.config_id,
            version_number: row.version_number,
            name: row.name,
            description: row.description,
            seo,
            sections,
            created_at: row.created_at,
        })
    }
}

/// Newest-first list entry; the section payload stays in the database until
/// a restore asks for it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub version_number: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_round_trips_section_ids() {
        let row = VersionRow {
            config_id: Uuid::new_v4(),
            version_number: 3,
            name: "Homepage".into(),
            description: None,
            seo: json!({}),
            sections: json!([
                { "id": "sec_keep_me", "name": "Hero", "order": 0, "enabled": true, "type": "hero-banner" }
            ]),
            created_at: Utc::now(),
        };
        let version = Version::try_from(row).unwrap();
        assert_eq!(version.sections[0].id, "sec_keep_me");

        // Re-serialize the way a restore writes it back.
        let value = serde_json::to_value(&version.sections).unwrap();
        assert_eq!(value[0]["id"], "sec_keep_me");
    }
}
