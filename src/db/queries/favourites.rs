use crate::db::models::{Charger, FavouriteCharger};
use crate::db::sqlite::HubStorage;
use crate::error::HubError;

impl HubStorage {
    /// The (user, charger) pair is a composite key, so it is checked here
    /// rather than through a single-column `Lookup`.
    pub async fn favourite_exists(&self, user_id: i64, charger_id: i64) -> Result<bool, HubError> {
        let row = sqlx::query(
            "SELECT 1 FROM favourite_charger WHERE id_user_info = ? AND id_charger = ? LIMIT 1",
        )
        .bind(user_id)
        .bind(charger_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.is_some())
    }

    pub async fn insert_favourite(
        &self,
        user_id: i64,
        charger_id: i64,
    ) -> Result<FavouriteCharger, HubError> {
        let row = sqlx::query_as::<_, FavouriteCharger>(
            r#"INSERT INTO favourite_charger (id_user_info, id_charger) VALUES (?, ?)
               RETURNING id, id_user_info, id_charger"#,
        )
        .bind(user_id)
        .bind(charger_id)
        .fetch_one(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn list_favourite_chargers(&self, user_id: i64) -> Result<Vec<Charger>, HubError> {
        let rows = sqlx::query_as::<_, Charger>(
            r#"SELECT c.* FROM charger c
               JOIN favourite_charger f ON f.id_charger = c.id
               WHERE f.id_user_info = ?
               ORDER BY f.id"#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub async fn delete_favourite(&self, user_id: i64, charger_id: i64) -> Result<bool, HubError> {
        let res =
            sqlx::query("DELETE FROM favourite_charger WHERE id_user_info = ? AND id_charger = ?")
                .bind(user_id)
                .bind(charger_id)
                .execute(self.pool())
                .await?;
        Ok(res.rows_affected() > 0)
    }
}
