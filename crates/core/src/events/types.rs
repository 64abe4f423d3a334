use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted after successful persistence actions, consumed by the
/// editor's SSE listeners (save indicators, version list refresh).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConfigEvent {
    Saved {
        config_id: Uuid,
        updated_at: DateTime<Utc>,
    },
    Scheduled {
        config_id: Uuid,
        scheduled_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    },
    ScheduleCleared {
        config_id: Uuid,
    },
    VersionCreated {
        config_id: Uuid,
        version_number: i32,
    },
    VersionRestored {
        config_id: Uuid,
        version_number: i32,
    },
    VariantCreated {
        config_id: Uuid,
        variant_id: Uuid,
        weight: u32,
    },
}

impl ConfigEvent {
    /// The configuration this event concerns, for per-config SSE filtering.
    pub fn config_id(&self) -> Uuid {
        match self {
            ConfigEvent::Saved { config_id, .. }
            | ConfigEvent::Scheduled { config_id, .. }
            | ConfigEvent::ScheduleCleared { config_id }
            | ConfigEvent::VersionCreated { config_id, .. }
            | ConfigEvent::VersionRestored { config_id, .. }
            | ConfigEvent::VariantCreated { config_id, .. } => *config_id,
        }
    }
}
