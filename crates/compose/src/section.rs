use serde::{Deserialize, Serialize};

use crate::content::SectionContent;
use crate::layout::SectionLayout;
use crate::visibility::VisibilityWindow;

/// One composable unit of a page configuration.
///
/// `id` is an opaque client-generated token; it carries no ordering
/// semantics. Render sequence is defined solely by `order`, which the
/// section builder keeps dense and zero-based after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,
    pub order: i32,
    pub enabled: bool,
    #[serde(flatten)]
    pub content: SectionContent,
    #[serde(default)]
    pub layout: SectionLayout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<VisibilityWindow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn section_deserializes_with_flattened_type_tag() {
        let section: Section = serde_json::from_value(json!({
            "id": "sec_1",
            "name": "Top hero",
            "order": 0,
            "enabled": true,
            "type": "hero-banner",
            "heading": "Hello"
        }))
        .unwrap();
        assert_eq!(section.id, "sec_1");
        assert!(matches!(section.content, SectionContent::HeroBanner(_)));
        assert_eq!(section.layout.padding.top, 48);
        assert!(section.visibility.is_none());
    }

    #[test]
    fn section_ids_survive_a_serialization_round_trip() {
        let section: Section = serde_json::from_value(json!({
            "id": "sec_stable",
            "name": "Spacer",
            "order": 3,
            "enabled": false,
            "type": "spacer"
        }))
        .unwrap();
        let value = serde_json::to_value(&section).unwrap();
        let back: Section = serde_json::from_value(value).unwrap();
        assert_eq!(back.id, "sec_stable");
        assert_eq!(back.order, 3);
    }
}
