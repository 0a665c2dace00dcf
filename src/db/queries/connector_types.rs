use crate::db::models::{ConnectorType, NewConnectorType};
use crate::db::sqlite::HubStorage;
use crate::error::HubError;

impl HubStorage {
    pub async fn insert_connector_type(
        &self,
        connector: &NewConnectorType,
    ) -> Result<ConnectorType, HubError> {
        let row = sqlx::query_as::<_, ConnectorType>(
            r#"INSERT INTO connector_type (name_connector, output_current, max_power_kw)
               VALUES (?, ?, ?)
               RETURNING id, name_connector, output_current, max_power_kw"#,
        )
        .bind(&connector.name_connector)
        .bind(connector.output_current)
        .bind(connector.max_power_kw)
        .fetch_one(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn list_connector_types(&self) -> Result<Vec<ConnectorType>, HubError> {
        let rows = sqlx::query_as::<_, ConnectorType>(
            "SELECT id, name_connector, output_current, max_power_kw FROM connector_type ORDER BY id",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub async fn get_connector_type(&self, id: i64) -> Result<ConnectorType, HubError> {
        let row = sqlx::query_as::<_, ConnectorType>(
            "SELECT id, name_connector, output_current, max_power_kw FROM connector_type WHERE id = ?",
        )
        .bind(id)
        .fetch_one(self.pool())
        .await?;
        Ok(row)
    }

    /// Fails with a foreign key violation while chargers or vehicles reference it.
    pub async fn delete_connector_type(&self, id: i64) -> Result<bool, HubError> {
        let res = sqlx::query("DELETE FROM connector_type WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
