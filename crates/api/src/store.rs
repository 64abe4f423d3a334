//! PostgreSQL persistence for configurations, version snapshots, variants,
//! and uploaded assets.
//!
//! Partial updates are read-modify-write inside a transaction: the row is
//! locked, the patch applied to the decoded document, and every patchable
//! column written back. Unspecified patch fields therefore keep their
//! stored values, which is the contract concurrent field-group saves
//! (sections auto-save vs. SEO save) rely on.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use pagesmith_compose::weighting::VariantWeight;
use pagesmith_core::config::{
    ConfigPatch, ConfigRow, ConfigStatus, PageConfig, Version, VersionRow, VersionSummary,
};
use pagesmith_core::variant::validate_new_variant;

use crate::error::{ApiError, ApiResult};

const CONFIG_COLUMNS: &str = "id, route, name, description, status, sections, seo, \
     scheduled_at, expires_at, is_variant, original_config_id, variant_weight, \
     created_at, updated_at";

fn config_not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("configuration {id} not found"))
}

pub async fn create_config(
    pool: &PgPool,
    name: &str,
    route: &str,
    description: Option<&str>,
    now: DateTime<Utc>,
) -> ApiResult<PageConfig> {
    let row: ConfigRow = sqlx::query_as(&format!(
        "INSERT INTO configs \
         (id, route, name, description, status, sections, seo, is_variant, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, 'draft', '[]'::jsonb, '{{}}'::jsonb, false, $5, $5) \
         RETURNING {CONFIG_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(route)
    .bind(name)
    .bind(description)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(PageConfig::try_from(row)?)
}

pub async fn get_config(pool: &PgPool, id: Uuid) -> ApiResult<PageConfig> {
    let row: Option<ConfigRow> =
        sqlx::query_as(&format!("SELECT {CONFIG_COLUMNS} FROM configs WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    let row = row.ok_or_else(|| config_not_found(id))?;
    Ok(PageConfig::try_from(row)?)
}

pub async fn patch_config(
    pool: &PgPool,
    id: Uuid,
    patch: ConfigPatch,
    now: DateTime<Utc>,
) -> ApiResult<PageConfig> {
    let mut tx = pool.begin().await?;
    let row: Option<ConfigRow> = sqlx::query_as(&format!(
        "SELECT {CONFIG_COLUMNS} FROM configs WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;
    let row = row.ok_or_else(|| config_not_found(id))?;

    let mut config = PageConfig::try_from(row)?;
    patch.apply(&mut config, now);
    write_patchable_fields(&mut tx, &config).await?;
    tx.commit().await?;
    Ok(config)
}

async fn write_patchable_fields(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    config: &PageConfig,
) -> ApiResult<()> {
    sqlx::query(
        "UPDATE configs SET name = $2, description = $3, seo = $4, sections = $5, \
         scheduled_at = $6, expires_at = $7, updated_at = $8 WHERE id = $1",
    )
    .bind(config.id)
    .bind(&config.name)
    .bind(&config.description)
    .bind(serde_json::to_value(&config.seo).map_err(|e| ApiError::Internal(e.to_string()))?)
    .bind(serde_json::to_value(&config.sections).map_err(|e| ApiError::Internal(e.to_string()))?)
    .bind(config.scheduled_at)
    .bind(config.expires_at)
    .bind(config.updated_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn list_versions(pool: &PgPool, config_id: Uuid) -> ApiResult<Vec<VersionSummary>> {
    let versions: Vec<VersionSummary> = sqlx::query_as(
        "SELECT version_number, name, created_at FROM config_versions \
         WHERE config_id = $1 ORDER BY version_number DESC",
    )
    .bind(config_id)
    .fetch_all(pool)
    .await?;
    Ok(versions)
}

/// Snapshot the configuration's current state under the next sequential
/// version number.
pub async fn create_version(
    pool: &PgPool,
    config_id: Uuid,
    now: DateTime<Utc>,
) -> ApiResult<VersionSummary> {
    let mut tx = pool.begin().await?;
    let row: Option<ConfigRow> = sqlx::query_as(&format!(
        "SELECT {CONFIG_COLUMNS} FROM configs WHERE id = $1 FOR UPDATE"
    ))
    .bind(config_id)
    .fetch_optional(&mut *tx)
    .await?;
    let row = row.ok_or_else(|| config_not_found(config_id))?;

    let next: i32 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(version_number), 0) + 1 FROM config_versions WHERE config_id = $1",
    )
    .bind(config_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO config_versions \
         (config_id, version_number, name, description, seo, sections, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(config_id)
    .bind(next)
    .bind(&row.name)
    .bind(&row.description)
    .bind(&row.seo)
    .bind(&row.sections)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(VersionSummary {
        version_number: next,
        name: row.name,
        created_at: now,
    })
}

/// Replace the configuration's snapshot fields with a named version's,
/// all-or-nothing. Section ids come back verbatim from the snapshot.
pub async fn restore_version(
    pool: &PgPool,
    config_id: Uuid,
    version_number: i32,
    now: DateTime<Utc>,
) -> ApiResult<PageConfig> {
    let mut tx = pool.begin().await?;
    let snapshot: Option<VersionRow> = sqlx::query_as(
        "SELECT config_id, version_number, name, description, seo, sections, created_at \
         FROM config_versions WHERE config_id = $1 AND version_number = $2",
    )
    .bind(config_id)
    .bind(version_number)
    .fetch_optional(&mut *tx)
    .await?;
    let snapshot = snapshot.ok_or_else(|| {
        ApiError::NotFound(format!(
            "version {version_number} of configuration {config_id} not found"
        ))
    })?;
    // Validate the snapshot decodes before touching the live row.
    let version = Version::try_from(snapshot.clone())?;

    let updated: Option<ConfigRow> = sqlx::query_as(&format!(
        "UPDATE configs SET name = $2, description = $3, seo = $4, sections = $5, updated_at = $6 \
         WHERE id = $1 RETURNING {CONFIG_COLUMNS}"
    ))
    .bind(config_id)
    .bind(&snapshot.name)
    .bind(&snapshot.description)
    .bind(&snapshot.seo)
    .bind(&snapshot.sections)
    .bind(now)
    .fetch_optional(&mut *tx)
    .await?;
    let updated = updated.ok_or_else(|| config_not_found(config_id))?;
    tx.commit().await?;

    tracing::info!(
        config_id = %config_id,
        version_number = version.version_number,
        "restored configuration from version snapshot"
    );
    Ok(PageConfig::try_from(updated)?)
}

pub async fn list_variants(pool: &PgPool, config_id: Uuid) -> ApiResult<Vec<PageConfig>> {
    let rows: Vec<ConfigRow> = sqlx::query_as(&format!(
        "SELECT {CONFIG_COLUMNS} FROM configs \
         WHERE original_config_id = $1 AND is_variant ORDER BY created_at ASC"
    ))
    .bind(config_id)
    .fetch_all(pool)
    .await?;
    rows.into_iter()
        .map(|row| PageConfig::try_from(row).map_err(ApiError::from))
        .collect()
}

/// Copy-on-write clone of the original as a new variant, validated against
/// the remaining weight budget. The original row is locked so concurrent
/// creations cannot both pass the budget check.
pub async fn create_variant(
    pool: &PgPool,
    original_id: Uuid,
    name: &str,
    weight: u32,
    now: DateTime<Utc>,
) -> ApiResult<PageConfig> {
    let mut tx = pool.begin().await?;
    let original: Option<ConfigRow> = sqlx::query_as(&format!(
        "SELECT {CONFIG_COLUMNS} FROM configs WHERE id = $1 FOR UPDATE"
    ))
    .bind(original_id)
    .fetch_optional(&mut *tx)
    .await?;
    let original = original.ok_or_else(|| config_not_found(original_id))?;
    if original.is_variant {
        return Err(ApiError::BadRequest(
            "cannot create a variant of a variant".to_string(),
        ));
    }

    let existing: Vec<i32> = sqlx::query_scalar(
        "SELECT variant_weight FROM configs \
         WHERE original_config_id = $1 AND is_variant AND variant_weight IS NOT NULL",
    )
    .bind(original_id)
    .fetch_all(&mut *tx)
    .await?;
    let existing: Vec<u32> = existing.into_iter().map(|w| w.max(0) as u32).collect();
    validate_new_variant(&existing, weight)?;

    let row: ConfigRow = sqlx::query_as(&format!(
        "INSERT INTO configs \
         (id, route, name, description, status, sections, seo, is_variant, \
          original_config_id, variant_weight, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, 'draft', $5, $6, true, $7, $8, $9, $9) \
         RETURNING {CONFIG_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(&original.route)
    .bind(name)
    .bind(&original.description)
    .bind(&original.sections)
    .bind(&original.seo)
    .bind(original_id)
    .bind(weight as i32)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(PageConfig::try_from(row)?)
}

/// Variant weights in creation order, the order the assignment walk uses.
pub async fn variant_weights(pool: &PgPool, config_id: Uuid) -> ApiResult<Vec<VariantWeight>> {
    let rows: Vec<(Uuid, i32)> = sqlx::query_as(
        "SELECT id, variant_weight FROM configs \
         WHERE original_config_id = $1 AND is_variant AND variant_weight IS NOT NULL \
         ORDER BY created_at ASC",
    )
    .bind(config_id)
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(id, weight)| VariantWeight {
            id: id.to_string(),
            weight: weight.max(0) as u32,
        })
        .collect())
}

/// Schedule a configuration to go live. Any other live or scheduled
/// configuration for the same route is archived in the same transaction,
/// preserving the one-live-config-per-route invariant.
pub async fn set_schedule(
    pool: &PgPool,
    id: Uuid,
    scheduled_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> ApiResult<PageConfig> {
    let mut tx = pool.begin().await?;
    let row: Option<ConfigRow> = sqlx::query_as(&format!(
        "SELECT {CONFIG_COLUMNS} FROM configs WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;
    let row = row.ok_or_else(|| config_not_found(id))?;

    archive_other_live_configs(&mut tx, &row.route, id, now).await?;

    let updated: ConfigRow = sqlx::query_as(&format!(
        "UPDATE configs SET status = 'scheduled', scheduled_at = $2, expires_at = $3, \
         updated_at = $4 WHERE id = $1 RETURNING {CONFIG_COLUMNS}"
    ))
    .bind(id)
    .bind(scheduled_at)
    .bind(expires_at)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(PageConfig::try_from(updated)?)
}

/// Cancel a pending schedule. The configuration returns to draft.
pub async fn clear_schedule(pool: &PgPool, id: Uuid, now: DateTime<Utc>) -> ApiResult<PageConfig> {
    let mut tx = pool.begin().await?;
    let row: Option<ConfigRow> = sqlx::query_as(&format!(
        "SELECT {CONFIG_COLUMNS} FROM configs WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;
    let row = row.ok_or_else(|| config_not_found(id))?;
    if ConfigStatus::parse(&row.status) != Some(ConfigStatus::Scheduled) {
        return Err(ApiError::Conflict(format!(
            "configuration {id} is not scheduled"
        )));
    }

    let updated: ConfigRow = sqlx::query_as(&format!(
        "UPDATE configs SET status = 'draft', scheduled_at = NULL, expires_at = NULL, \
         updated_at = $2 WHERE id = $1 RETURNING {CONFIG_COLUMNS}"
    ))
    .bind(id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(PageConfig::try_from(updated)?)
}

/// Publish immediately, archiving whatever was live for the route.
pub async fn publish_config(pool: &PgPool, id: Uuid, now: DateTime<Utc>) -> ApiResult<PageConfig> {
    let mut tx = pool.begin().await?;
    let row: Option<ConfigRow> = sqlx::query_as(&format!(
        "SELECT {CONFIG_COLUMNS} FROM configs WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;
    let row = row.ok_or_else(|| config_not_found(id))?;

    archive_other_live_configs(&mut tx, &row.route, id, now).await?;

    let updated: ConfigRow = sqlx::query_as(&format!(
        "UPDATE configs SET status = 'published', scheduled_at = NULL, updated_at = $2 \
         WHERE id = $1 RETURNING {CONFIG_COLUMNS}"
    ))
    .bind(id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(PageConfig::try_from(updated)?)
}

async fn archive_other_live_configs(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    route: &str,
    keep: Uuid,
    now: DateTime<Utc>,
) -> ApiResult<()> {
    sqlx::query(
        "UPDATE configs SET status = 'archived', updated_at = $3 \
         WHERE route = $1 AND id <> $2 AND NOT is_variant \
         AND status IN ('published', 'scheduled')",
    )
    .bind(route)
    .bind(keep)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// The configuration currently live for a route: published, or scheduled
/// with its window open, and not yet expired.
pub async fn live_config_for_route(
    pool: &PgPool,
    route: &str,
    now: DateTime<Utc>,
) -> ApiResult<Option<PageConfig>> {
    let row: Option<ConfigRow> = sqlx::query_as(&format!(
        "SELECT {CONFIG_COLUMNS} FROM configs \
         WHERE route = $1 AND NOT is_variant \
         AND (status = 'published' OR (status = 'scheduled' AND scheduled_at <= $2)) \
         AND (expires_at IS NULL OR expires_at > $2) \
         ORDER BY updated_at DESC LIMIT 1"
    ))
    .bind(route)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    row.map(|r| PageConfig::try_from(r).map_err(ApiError::from))
        .transpose()
}

pub async fn insert_asset(
    pool: &PgPool,
    url: &str,
    content_type: &str,
    size_bytes: i64,
    now: DateTime<Utc>,
) -> ApiResult<()> {
    sqlx::query(
        "INSERT INTO assets (id, url, content_type, size_bytes, created_at) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(Uuid::new_v4())
    .bind(url)
    .bind(content_type)
    .bind(size_bytes)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}
