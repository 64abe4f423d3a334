//! Pure page-composition engine: section content model, visibility
//! evaluation, rendering, ordered composition, and A/B traffic weighting.
//!
//! This crate performs no I/O. Callers hand it a configuration's section
//! list and a clock reading; it hands back an ordered list of view-models.

pub mod blog;
pub mod composer;
pub mod content;
pub mod layout;
pub mod render;
pub mod section;
pub mod visibility;
pub mod weighting;

pub use composer::compose;
pub use content::{SectionContent, SectionKind};
pub use layout::{ContainerMode, Padding, SectionLayout};
pub use render::{render, RenderOutcome, RenderedUnit};
pub use section::Section;
pub use visibility::{is_visible, VisibilityWindow};
pub use weighting::{assign, Assignment, VariantWeight};
