pub mod model;
pub mod patch;
pub mod validate;
pub mod version;

pub use model::{ConfigDecodeError, ConfigRow, ConfigStatus, PageConfig, SeoSettings};
pub use patch::ConfigPatch;
pub use validate::{validate_config_fields, ValidationError};
pub use version::{Version, VersionRow, VersionSummary};
