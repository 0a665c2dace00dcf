use crate::db::models::{NewVehicle, Vehicle, VehicleUpdate};
use crate::db::sqlite::HubStorage;
use crate::error::HubError;

impl HubStorage {
    pub async fn insert_vehicle(
        &self,
        user_id: i64,
        vehicle: &NewVehicle,
    ) -> Result<Vehicle, HubError> {
        let row = sqlx::query_as::<_, Vehicle>(
            r#"INSERT INTO vehicle_info (
                   id_user_info, name, vehicle_sn, id_connector_type, battery_capacity_kwh
               ) VALUES (?, ?, ?, ?, ?)
               RETURNING *"#,
        )
        .bind(user_id)
        .bind(&vehicle.name)
        .bind(&vehicle.vehicle_sn)
        .bind(vehicle.id_connector_type)
        .bind(vehicle.battery_capacity_kwh)
        .fetch_one(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn list_vehicles(&self, user_id: i64) -> Result<Vec<Vehicle>, HubError> {
        let rows =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicle_info WHERE id_user_info = ? ORDER BY id")
                .bind(user_id)
                .fetch_all(self.pool())
                .await?;
        Ok(rows)
    }

    pub async fn get_vehicle(&self, id: i64) -> Result<Vehicle, HubError> {
        let row = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicle_info WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool())
            .await?;
        Ok(row)
    }

    pub async fn update_vehicle(
        &self,
        id: i64,
        update: &VehicleUpdate,
    ) -> Result<Option<Vehicle>, HubError> {
        let row = sqlx::query_as::<_, Vehicle>(
            r#"UPDATE vehicle_info SET
                   name = ?,
                   id_connector_type = ?,
                   battery_capacity_kwh = ?
               WHERE id = ?
               RETURNING *"#,
        )
        .bind(&update.name)
        .bind(update.id_connector_type)
        .bind(update.battery_capacity_kwh)
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn delete_vehicle(&self, id: i64) -> Result<bool, HubError> {
        let res = sqlx::query("DELETE FROM vehicle_info WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
