use serde::{Deserialize, Serialize};

/// How a section's container sizes itself within the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerMode {
    FullWidth,
    #[default]
    Contained,
    Split,
}

/// Per-edge padding in pixels. Top/bottom default to 48, left/right to 16;
/// each edge is independently overridable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 48,
            bottom: 48,
            left: 16,
            right: 16,
        }
    }
}

/// Shared layout parameters applied as a wrapping container around a
/// section's rendered content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionLayout {
    pub container: ContainerMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    pub columns: u32,
    pub gap: u32,
    pub padding: Padding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_class: Option<String>,
}

impl Default for SectionLayout {
    fn default() -> Self {
        Self {
            container: ContainerMode::Contained,
            background_color: None,
            background_image: None,
            columns: 1,
            gap: 24,
            padding: Padding::default(),
            custom_class: None,
        }
    }
}
