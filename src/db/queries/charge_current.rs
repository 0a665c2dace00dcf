use crate::db::models::{ChargeCurrent, ChargeStatus};
use crate::db::sqlite::HubStorage;
use crate::error::HubError;
use chrono::Utc;

impl HubStorage {
    pub async fn insert_charge_current(
        &self,
        history_id: i64,
        percentage_start: f64,
    ) -> Result<ChargeCurrent, HubError> {
        let row = sqlx::query_as::<_, ChargeCurrent>(
            r#"INSERT INTO charge_current (
                   id_charge_history, percentage_start, percentage_current, updated_at
               ) VALUES (?, ?, ?, ?)
               RETURNING *"#,
        )
        .bind(history_id)
        .bind(percentage_start)
        .bind(percentage_start)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await?;
        Ok(row)
    }

    /// Live progress of the user's in-progress session, if any.
    pub async fn charge_current_for_user(
        &self,
        user_id: i64,
    ) -> Result<Option<ChargeCurrent>, HubError> {
        let row = sqlx::query_as::<_, ChargeCurrent>(
            r#"SELECT cc.* FROM charge_current cc
               JOIN charge_history ch ON ch.id = cc.id_charge_history
               WHERE ch.id_user_info = ? AND ch.status = ?
               ORDER BY cc.id DESC LIMIT 1"#,
        )
        .bind(user_id)
        .bind(ChargeStatus::InProgress)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn update_charge_current(
        &self,
        id: i64,
        percentage_current: f64,
    ) -> Result<Option<ChargeCurrent>, HubError> {
        let row = sqlx::query_as::<_, ChargeCurrent>(
            r#"UPDATE charge_current SET percentage_current = ?, updated_at = ?
               WHERE id = ?
               RETURNING *"#,
        )
        .bind(percentage_current)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }
}
