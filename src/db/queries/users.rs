use crate::db::models::{ChargeStatus, NewUser, User, UserUpdate};
use crate::db::sqlite::HubStorage;
use crate::error::HubError;
use chrono::Utc;

impl HubStorage {
    pub async fn insert_user(&self, user: &NewUser) -> Result<User, HubError> {
        let row = sqlx::query_as::<_, User>(
            r#"INSERT INTO user_info (email, first_name, last_name, phone, created_at)
               VALUES (?, ?, ?, ?, ?)
               RETURNING id, email, first_name, last_name, phone, created_at"#,
        )
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, HubError> {
        let row = sqlx::query_as::<_, User>(
            r#"SELECT id, email, first_name, last_name, phone, created_at
               FROM user_info WHERE email = ?"#,
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    /// Resolve a user's id, `NotFound` if no user has this email.
    pub async fn user_id_by_email(&self, email: &str) -> Result<i64, HubError> {
        let rec: Option<(i64,)> = sqlx::query_as("SELECT id FROM user_info WHERE email = ?")
            .bind(email)
            .fetch_optional(self.pool())
            .await?;
        rec.map(|r| r.0)
            .ok_or_else(|| HubError::not_found(format!("user '{email}' not found")))
    }

    pub async fn update_user(
        &self,
        email: &str,
        update: &UserUpdate,
    ) -> Result<Option<User>, HubError> {
        let row = sqlx::query_as::<_, User>(
            r#"UPDATE user_info SET first_name = ?, last_name = ?, phone = ?
               WHERE email = ?
               RETURNING id, email, first_name, last_name, phone, created_at"#,
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.phone)
        .bind(email)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    /// Returns whether a row was deleted. Favourites, vehicles and history
    /// cascade; chargers held by the user's in-progress session are released
    /// in the same transaction.
    pub async fn delete_user(&self, email: &str) -> Result<bool, HubError> {
        let mut tx = self.pool().begin().await?;

        sqlx::query(
            r#"UPDATE charger SET in_use = 0
               WHERE id IN (
                   SELECT ch.id_charger FROM charge_history ch
                   JOIN user_info u ON u.id = ch.id_user_info
                   WHERE u.email = ? AND ch.status = ?
               )"#,
        )
        .bind(email)
        .bind(ChargeStatus::InProgress)
        .execute(&mut *tx)
        .await?;

        let res = sqlx::query("DELETE FROM user_info WHERE email = ?")
            .bind(email)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(res.rows_affected() > 0)
    }
}
