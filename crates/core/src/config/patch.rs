use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pagesmith_compose::Section;

use super::model::{PageConfig, SeoSettings};

/// Partial update for a configuration. Absent fields stay unchanged, so
/// the section auto-save and the SEO panel save can race without clobbering
/// each other's field groups.
///
/// Scheduling fields can be set here, but clearing a schedule is a distinct
/// operation (`cancel schedule`), not a patch carrying nulls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.seo.is_none()
            && self.sections.is_none()
            && self.scheduled_at.is_none()
            && self.expires_at.is_none()
    }

    /// Apply this patch to an in-memory configuration, leaving absent
    /// fields untouched. `updated_at` moves to `now`.
    pub fn apply(self, config: &mut PageConfig, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            config.name = name;
        }
        if let Some(description) = self.description {
            config.description = Some(description);
        }
        if let Some(seo) = self.seo {
            config.seo = seo;
        }
        if let Some(sections) = self.sections {
            config.sections = sections;
        }
        if let Some(scheduled_at) = self.scheduled_at {
            config.scheduled_at = Some(scheduled_at);
        }
        if let Some(expires_at) = self.expires_at {
            config.expires_at = Some(expires_at);
        }
        config.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::ConfigStatus;
    use serde_json::json;
    use uuid::Uuid;

    fn config() -> PageConfig {
        PageConfig {
            id: Uuid::new_v4(),
            route: "home".into(),
            name: "Homepage".into(),
            description: Some("Main landing page".into()),
            status: ConfigStatus::Draft,
            sections: Vec::new(),
            seo: SeoSettings::default(),
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
    fn absent_fields_stay_unchanged() {
        let mut cfg = config();
        let patch = ConfigPatch {
            name: Some("Spring homepage".into()),
            ..Default::default()
        };
        patch.apply(&mut cfg, Utc::now());
        assert_eq!(cfg.name, "Spring homepage");
        assert_eq!(cfg.description.as_deref(), Some("Main landing page"));
        assert!(cfg.sections.is_empty());
    }

    #[test]
    fn sections_patch_replaces_the_whole_array() {
        let mut cfg = config();
        let sections: Vec<Section> = serde_json::from_value(json!([
            { "id": "a", "name": "A", "order": 0, "enabled": true, "type": "spacer" }
        ]))
        .unwrap();
        let patch = ConfigPatch {
            sections: Some(sections),
            ..Default::default()
        };
        patch.apply(&mut cfg, Utc::now());
        assert_eq!(cfg.sections.len(), 1);
        assert_eq!(cfg.sections[0].id, "a");
    }

    // The PATCH handler short-circuits on an empty patch, so an empty
    // request body must classify as empty and any present field must not.
    #[test]
    fn empty_patch_is_detected() {
        assert!(ConfigPatch::default().is_empty());
        let patch: ConfigPatch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.is_empty());
        let patch: ConfigPatch = serde_json::from_value(json!({ "name": "x" })).unwrap();
        assert!(!patch.is_empty());
        let patch: ConfigPatch = serde_json::from_value(json!({ "sections": [] })).unwrap();
        assert!(!patch.is_empty());
    }
}
