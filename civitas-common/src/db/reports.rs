//! Report storage
//!
//! Local report creation plus the guarded insert used by mesh sync.

use crate::sync::ExternalRecord;
use crate::Result;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashSet;

use super::models::{NewReport, Report};

/// Insert a locally filed report and return its new id
pub async fn create_report(
    pool: &SqlitePool,
    report: &NewReport,
    ai_summary: Option<&str>,
) -> Result<i64> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO reports (title, description, location, severity, status, user_id, ai_summary, created_at, updated_at)
        VALUES (?, ?, ?, ?, 'pending', ?, ?, ?, ?)
        "#,
    )
    .bind(&report.title)
    .bind(&report.description)
    .bind(&report.location)
    .bind(&report.severity)
    .bind(report.user_id)
    .bind(ai_summary)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(report_id = id, user_id = report.user_id, "Created report");

    Ok(id)
}

/// Fetch one report
pub async fn get_report(pool: &SqlitePool, id: i64) -> Result<Option<Report>> {
    let report = sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(report)
}

/// List reports, optionally restricted to one owner, newest first
pub async fn list_reports(pool: &SqlitePool, user_id: Option<i64>) -> Result<Vec<Report>> {
    let reports = match user_id {
        Some(user_id) => {
            sqlx::query_as::<_, Report>(
                "SELECT * FROM reports WHERE user_id = ? ORDER BY created_at DESC, id DESC",
            )
            .bind(user_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Report>("SELECT * FROM reports ORDER BY created_at DESC, id DESC")
                .fetch_all(pool)
                .await?
        }
    };

    Ok(reports)
}

/// Which of `ids` already exist locally
pub async fn existing_report_ids(pool: &SqlitePool, ids: &[i64]) -> Result<HashSet<i64>> {
    if ids.is_empty() {
        return Ok(HashSet::new());
    }

    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT id FROM reports WHERE id IN (");
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let found: Vec<i64> = query.build_query_scalar().fetch_all(pool).await?;

    Ok(found.into_iter().collect())
}

/// Insert peer records that are not yet present
///
/// Runs in one transaction with `INSERT OR IGNORE`, so an id inserted by a
/// concurrent batch is skipped rather than overwritten. Returns the number of
/// rows actually inserted.
pub async fn insert_synced_reports(pool: &SqlitePool, records: &[ExternalRecord]) -> Result<u64> {
    if records.is_empty() {
        return Ok(0);
    }

    let now = Utc::now().to_rfc3339();
    let mut tx = pool.begin().await?;
    let mut inserted = 0u64;

    for record in records {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO reports (id, title, description, location, severity, status, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.location)
        .bind(&record.severity)
        .bind(&record.status)
        .bind(record.user_id)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        inserted += result.rows_affected();
    }

    tx.commit().await?;

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    fn new_report(title: &str, user_id: i64) -> NewReport {
        NewReport {
            title: title.to_string(),
            description: "Water entering ground floor".to_string(),
            location: "Main St".to_string(),
            severity: "high".to_string(),
            user_id,
        }
    }

    fn external(id: i64, title: &str) -> ExternalRecord {
        ExternalRecord {
            id,
            title: title.to_string(),
            description: "peer report".to_string(),
            location: "Hill Rd".to_string(),
            severity: "low".to_string(),
            user_id: 9,
            status: "verified".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_report() {
        let pool = init_memory_database().await.unwrap();

        let id = create_report(&pool, &new_report("Flooding", 1), Some("Water entering."))
            .await
            .unwrap();
        let report = get_report(&pool, id).await.unwrap().unwrap();

        assert_eq!(report.title, "Flooding");
        assert_eq!(report.status, "pending");
        assert_eq!(report.ai_summary.as_deref(), Some("Water entering."));
    }

    #[tokio::test]
    async fn test_list_reports_filters_by_user() {
        let pool = init_memory_database().await.unwrap();
        create_report(&pool, &new_report("a", 1), None).await.unwrap();
        create_report(&pool, &new_report("b", 2), None).await.unwrap();
        create_report(&pool, &new_report("c", 1), None).await.unwrap();

        assert_eq!(list_reports(&pool, Some(1)).await.unwrap().len(), 2);
        assert_eq!(list_reports(&pool, None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_existing_report_ids() {
        let pool = init_memory_database().await.unwrap();
        insert_synced_reports(&pool, &[external(10, "x"), external(11, "y")])
            .await
            .unwrap();

        let found = existing_report_ids(&pool, &[10, 12]).await.unwrap();
        assert_eq!(found, [10].into_iter().collect());
        assert!(existing_report_ids(&pool, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_synced_never_overwrites() {
        let pool = init_memory_database().await.unwrap();
        insert_synced_reports(&pool, &[external(5, "original")]).await.unwrap();

        let inserted = insert_synced_reports(&pool, &[external(5, "replacement"), external(6, "new")])
            .await
            .unwrap();

        assert_eq!(inserted, 1);
        let kept = get_report(&pool, 5).await.unwrap().unwrap();
        assert_eq!(kept.title, "original");
        assert_eq!(kept.status, "verified");
    }
}
