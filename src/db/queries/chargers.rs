use crate::db::models::{Charger, ChargerInput};
use crate::db::sqlite::HubStorage;
use crate::error::HubError;

impl HubStorage {
    pub async fn insert_charger(&self, charger: &ChargerInput) -> Result<Charger, HubError> {
        let row = sqlx::query_as::<_, Charger>(
            r#"INSERT INTO charger (
                   name, address, latitude, longitude, id_connector_type, rate_current
               ) VALUES (?, ?, ?, ?, ?, ?)
               RETURNING *"#,
        )
        .bind(&charger.name)
        .bind(&charger.address)
        .bind(charger.latitude)
        .bind(charger.longitude)
        .bind(charger.id_connector_type)
        .bind(charger.rate_current)
        .fetch_one(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn list_chargers(
        &self,
        id_connector_type: Option<i64>,
    ) -> Result<Vec<Charger>, HubError> {
        let rows = match id_connector_type {
            Some(connector) => {
                sqlx::query_as::<_, Charger>(
                    "SELECT * FROM charger WHERE id_connector_type = ? ORDER BY id",
                )
                .bind(connector)
                .fetch_all(self.pool())
                .await?
            }
            None => {
                sqlx::query_as::<_, Charger>("SELECT * FROM charger ORDER BY id")
                    .fetch_all(self.pool())
                    .await?
            }
        };
        Ok(rows)
    }

    pub async fn get_charger(&self, id: i64) -> Result<Charger, HubError> {
        let row = sqlx::query_as::<_, Charger>("SELECT * FROM charger WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool())
            .await?;
        Ok(row)
    }

    pub async fn update_charger(
        &self,
        id: i64,
        charger: &ChargerInput,
    ) -> Result<Option<Charger>, HubError> {
        let row = sqlx::query_as::<_, Charger>(
            r#"UPDATE charger SET
                   name = ?,
                   address = ?,
                   latitude = ?,
                   longitude = ?,
                   id_connector_type = ?,
                   rate_current = ?
               WHERE id = ?
               RETURNING *"#,
        )
        .bind(&charger.name)
        .bind(&charger.address)
        .bind(charger.latitude)
        .bind(charger.longitude)
        .bind(charger.id_connector_type)
        .bind(charger.rate_current)
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn delete_charger(&self, id: i64) -> Result<bool, HubError> {
        let res = sqlx::query("DELETE FROM charger WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
