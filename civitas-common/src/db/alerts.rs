//! Alert storage

use crate::{Error, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::BTreeMap;

use super::models::{Alert, NewAlert};

type AlertRow = (
    i64,
    String,
    String,
    String,
    String,
    i64,
    String,
    Option<String>,
    Option<String>,
);

const ALERT_COLUMNS: &str = "id, title, message, alert_type, severity, created_by, created_at, rewritten_message, translated_messages";

/// Insert an alert together with its rewritten and translated forms
pub async fn create_alert(
    pool: &SqlitePool,
    alert: &NewAlert,
    rewritten_message: Option<&str>,
    translated_messages: &BTreeMap<String, String>,
) -> Result<i64> {
    let translations = serde_json::to_string(translated_messages)
        .map_err(|e| Error::Internal(format!("Serialize translations failed: {}", e)))?;

    let result = sqlx::query(
        r#"
        INSERT INTO alerts (title, message, alert_type, severity, created_by, created_at, rewritten_message, translated_messages)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&alert.title)
    .bind(&alert.message)
    .bind(&alert.alert_type)
    .bind(&alert.severity)
    .bind(alert.created_by)
    .bind(Utc::now().to_rfc3339())
    .bind(rewritten_message)
    .bind(translations)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(alert_id = id, alert_type = %alert.alert_type, "Created alert");

    Ok(id)
}

/// Fetch one alert
pub async fn get_alert(pool: &SqlitePool, id: i64) -> Result<Option<Alert>> {
    let row: Option<AlertRow> = sqlx::query_as(&format!(
        "SELECT {} FROM alerts WHERE id = ?",
        ALERT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(alert_from_row).transpose()
}

/// Most recent alerts, newest first
pub async fn list_alerts(pool: &SqlitePool, limit: i64) -> Result<Vec<Alert>> {
    let rows: Vec<AlertRow> = sqlx::query_as(&format!(
        "SELECT {} FROM alerts ORDER BY created_at DESC, id DESC LIMIT ?",
        ALERT_COLUMNS
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(alert_from_row).collect()
}

fn alert_from_row(row: AlertRow) -> Result<Alert> {
    let translated_messages = match row.8 {
        Some(json) if !json.is_empty() => serde_json::from_str(&json)
            .map_err(|e| Error::Internal(format!("Invalid translations for alert {}: {}", row.0, e)))?,
        _ => BTreeMap::new(),
    };

    Ok(Alert {
        id: row.0,
        title: row.1,
        message: row.2,
        alert_type: row.3,
        severity: row.4,
        created_by: row.5,
        created_at: row.6,
        rewritten_message: row.7,
        translated_messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    fn new_alert(title: &str) -> NewAlert {
        NewAlert {
            title: title.to_string(),
            message: "Flood warning, need to evacuate".to_string(),
            alert_type: "evacuation".to_string(),
            severity: "critical".to_string(),
            created_by: 3,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_alert() {
        let pool = init_memory_database().await.unwrap();
        let translations: BTreeMap<String, String> =
            [("es".to_string(), "inundación".to_string())].into_iter().collect();

        let id = create_alert(&pool, &new_alert("River"), Some("Flood warning"), &translations)
            .await
            .unwrap();
        let alert = get_alert(&pool, id).await.unwrap().unwrap();

        assert_eq!(alert.title, "River");
        assert_eq!(alert.broadcast_message(), "Flood warning");
        assert_eq!(alert.translated_messages.get("es").map(String::as_str), Some("inundación"));
    }

    #[tokio::test]
    async fn test_broadcast_message_falls_back_to_original() {
        let pool = init_memory_database().await.unwrap();
        let id = create_alert(&pool, &new_alert("Plain"), None, &BTreeMap::new())
            .await
            .unwrap();
        let alert = get_alert(&pool, id).await.unwrap().unwrap();

        assert_eq!(alert.broadcast_message(), "Flood warning, need to evacuate");
    }

    #[tokio::test]
    async fn test_list_alerts_respects_limit() {
        let pool = init_memory_database().await.unwrap();
        for i in 0..5 {
            create_alert(&pool, &new_alert(&format!("a{}", i)), None, &BTreeMap::new())
                .await
                .unwrap();
        }

        assert_eq!(list_alerts(&pool, 3).await.unwrap().len(), 3);
        assert!(get_alert(&pool, 999).await.unwrap().is_none());
    }
}
