//! Mission storage

use crate::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use super::models::{Mission, NewMission};

/// Insert an active mission with its generated strategy and return its id
pub async fn create_mission(
    pool: &SqlitePool,
    mission: &NewMission,
    ai_strategy: Option<&str>,
) -> Result<i64> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO missions (title, description, location, priority, status, assigned_to, created_by, ai_strategy, created_at, updated_at)
        VALUES (?, ?, ?, ?, 'active', ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&mission.title)
    .bind(&mission.description)
    .bind(&mission.location)
    .bind(&mission.priority)
    .bind(mission.assigned_to)
    .bind(mission.created_by)
    .bind(ai_strategy)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(mission_id = id, priority = %mission.priority, "Created mission");

    Ok(id)
}

pub async fn get_mission(pool: &SqlitePool, id: i64) -> Result<Option<Mission>> {
    let mission = sqlx::query_as::<_, Mission>("SELECT * FROM missions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(mission)
}

/// List missions, optionally only those assigned to one user, newest first
pub async fn list_missions(pool: &SqlitePool, assigned_to: Option<i64>) -> Result<Vec<Mission>> {
    let missions = match assigned_to {
        Some(user_id) => {
            sqlx::query_as::<_, Mission>(
                "SELECT * FROM missions WHERE assigned_to = ? ORDER BY created_at DESC, id DESC",
            )
            .bind(user_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Mission>("SELECT * FROM missions ORDER BY created_at DESC, id DESC")
                .fetch_all(pool)
                .await?
        }
    };

    Ok(missions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    fn new_mission(title: &str, assigned_to: Option<i64>) -> NewMission {
        NewMission {
            title: title.to_string(),
            description: "Search collapsed building".to_string(),
            location: "5th St".to_string(),
            priority: "high".to_string(),
            assigned_to,
            created_by: 1,
            task_type: "rescue".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_mission() {
        let pool = init_memory_database().await.unwrap();

        let id = create_mission(&pool, &new_mission("Search", Some(4)), Some("PLAN"))
            .await
            .unwrap();
        let mission = get_mission(&pool, id).await.unwrap().unwrap();

        assert_eq!(mission.title, "Search");
        assert_eq!(mission.status, "active");
        assert_eq!(mission.assigned_to, Some(4));
        assert_eq!(mission.ai_strategy.as_deref(), Some("PLAN"));
        assert!(mission.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_list_missions_filters_by_assignee() {
        let pool = init_memory_database().await.unwrap();
        create_mission(&pool, &new_mission("a", Some(4)), None).await.unwrap();
        create_mission(&pool, &new_mission("b", None), None).await.unwrap();
        create_mission(&pool, &new_mission("c", Some(5)), None).await.unwrap();

        let assigned = list_missions(&pool, Some(4)).await.unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].title, "a");
        assert_eq!(list_missions(&pool, None).await.unwrap().len(), 3);
        assert!(get_mission(&pool, 999).await.unwrap().is_none());
    }
}
