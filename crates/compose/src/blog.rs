//! Value records consumed read-only by the blog post renderer. They are
//! authored in the post editor and are not independently addressable.

use serde::{Deserialize, Serialize};

/// One table-of-contents entry extracted from a post's headings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocItem {
    pub id: String,
    pub text: String,
    /// Heading level, 1-based (h2 => 2).
    pub level: u8,
    pub anchor: String,
}

/// A product promoted inline within a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedProduct {
    pub product_id: String,
    /// Paragraph index after which the product card is inserted.
    pub position: u32,
    pub display_type: ProductDisplayType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductDisplayType {
    #[default]
    Card,
    Inline,
    Banner,
}

/// A feature-by-feature comparison across a handful of products.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComparisonTable {
    pub product_ids: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComparisonRow {
    pub feature: String,
    /// One value per product, aligned with `product_ids` by position.
    pub values: Vec<String>,
}

impl ComparisonTable {
    /// Whether every row carries exactly one value per product. The editor
    /// can save ragged tables; the renderer pads or truncates as needed, so
    /// this is advisory rather than enforced.
    pub fn is_aligned(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.values.len() == self.product_ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn linked_product_defaults_display_type() {
        let lp: LinkedProduct =
            serde_json::from_value(json!({ "productId": "p1", "position": 2, "displayType": "inline" }))
                .unwrap();
        assert_eq!(lp.display_type, ProductDisplayType::Inline);
        assert!(lp.custom_message.is_none());
    }

    #[test]
    fn ragged_comparison_table_is_detected() {
        let table = ComparisonTable {
            product_ids: vec!["p1".into(), "p2".into()],
            rows: vec![ComparisonRow {
                feature: "Weight".into(),
                values: vec!["1kg".into()],
            }],
        };
        assert!(!table.is_aligned());
    }
}
