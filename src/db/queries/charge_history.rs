use crate::db::models::{ChargeHistory, ChargeHistoryDetail, ChargeHistoryJoinedRow, ChargeStatus};
use crate::db::sqlite::HubStorage;
use crate::error::HubError;
use chrono::{DateTime, Utc};

const DETAIL_SELECT: &str = r#"
    SELECT
        ch.id, ch.id_user_info, ch.id_charger, ch.id_vehicle_info,
        ch.time_start, ch.time_end,
        ch.total_energy_drawn, ch.amount_payable, ch.status,
        c.id AS charger_id,
        c.name AS charger_name,
        c.address AS charger_address,
        c.latitude AS charger_latitude,
        c.longitude AS charger_longitude,
        c.id_connector_type AS charger_id_connector_type,
        c.rate_current AS charger_rate_current,
        c.in_use AS charger_in_use,
        v.id AS vehicle_id,
        v.name AS vehicle_name,
        v.vehicle_sn AS vehicle_sn,
        v.battery_capacity_kwh AS vehicle_battery_capacity_kwh,
        ct.id AS connector_id,
        ct.name_connector AS connector_name,
        ct.output_current AS connector_output_current,
        ct.max_power_kw AS connector_max_power_kw
    FROM charge_history ch
    JOIN charger c ON c.id = ch.id_charger
    JOIN vehicle_info v ON v.id = ch.id_vehicle_info
    JOIN connector_type ct ON ct.id = v.id_connector_type
    WHERE ch.id_user_info = ?"#;

/// Price of a session, rounded to cents.
pub fn amount_payable(total_energy_drawn: f64, rate_current: f64) -> f64 {
    (total_energy_drawn * rate_current * 100.0).round() / 100.0
}

impl HubStorage {
    /// Open a session and claim the charger, in one transaction.
    ///
    /// The claim only succeeds while the charger is free. A second open
    /// session for the same user trips the partial unique index.
    pub async fn start_charge(
        &self,
        user_id: i64,
        charger_id: i64,
        vehicle_id: i64,
    ) -> Result<ChargeHistory, HubError> {
        let mut tx = self.pool().begin().await?;

        let claimed = sqlx::query("UPDATE charger SET in_use = 1 WHERE id = ? AND in_use = 0")
            .bind(charger_id)
            .execute(&mut *tx)
            .await?;
        if claimed.rows_affected() == 0 {
            return Err(HubError::conflict(format!(
                "charger {charger_id} is already in use"
            )));
        }

        let row = sqlx::query_as::<_, ChargeHistory>(
            r#"INSERT INTO charge_history (
                   id_user_info, id_charger, id_vehicle_info, time_start, status
               ) VALUES (?, ?, ?, ?, ?)
               RETURNING *"#,
        )
        .bind(user_id)
        .bind(charger_id)
        .bind(vehicle_id)
        .bind(Utc::now())
        .bind(ChargeStatus::InProgress)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => HubError::conflict(format!(
                "user {user_id} already has a charge in progress"
            )),
            other => HubError::Database(other),
        })?;

        tx.commit().await?;
        Ok(row)
    }

    pub async fn get_charge_history(&self, id: i64) -> Result<ChargeHistory, HubError> {
        let row = sqlx::query_as::<_, ChargeHistory>("SELECT * FROM charge_history WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool())
            .await?;
        Ok(row)
    }

    pub async fn in_progress_for_user(
        &self,
        user_id: i64,
    ) -> Result<Option<ChargeHistory>, HubError> {
        let row = sqlx::query_as::<_, ChargeHistory>(
            r#"SELECT * FROM charge_history
               WHERE id_user_info = ? AND status = ?
               ORDER BY id DESC LIMIT 1"#,
        )
        .bind(user_id)
        .bind(ChargeStatus::InProgress)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    /// A user's sessions, newest first, each joined with charger and vehicle.
    pub async fn list_charge_history(
        &self,
        user_id: i64,
        status: Option<ChargeStatus>,
    ) -> Result<Vec<ChargeHistoryDetail>, HubError> {
        let mut sql = String::from(DETAIL_SELECT);
        if status.is_some() {
            sql.push_str(" AND ch.status = ?");
        }
        sql.push_str(" ORDER BY ch.time_start DESC, ch.id DESC");

        let mut query = sqlx::query_as::<_, ChargeHistoryJoinedRow>(&sql).bind(user_id);
        if let Some(status) = status {
            query = query.bind(status);
        }
        let rows = query.fetch_all(self.pool()).await?;
        Ok(rows.into_iter().map(ChargeHistoryDetail::from).collect())
    }

    /// The user's open session joined like `list_charge_history`, if any.
    pub async fn in_progress_detail(
        &self,
        user_id: i64,
    ) -> Result<Option<ChargeHistoryDetail>, HubError> {
        let sql = format!("{DETAIL_SELECT} AND ch.status = ? ORDER BY ch.id DESC LIMIT 1");
        let row = sqlx::query_as::<_, ChargeHistoryJoinedRow>(&sql)
            .bind(user_id)
            .bind(ChargeStatus::InProgress)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.map(ChargeHistoryDetail::from))
    }

    /// Close a session: price it from the charger's rate, free the charger
    /// and drop the live progress row.
    pub async fn complete_charge(
        &self,
        id: i64,
        total_energy_drawn: f64,
        time_end: DateTime<Utc>,
    ) -> Result<ChargeHistory, HubError> {
        let mut tx = self.pool().begin().await?;

        let current = sqlx::query_as::<_, ChargeHistory>("SELECT * FROM charge_history WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| HubError::not_found(format!("charge_history with id {id} not found")))?;

        if current.status == ChargeStatus::Complete {
            return Err(HubError::conflict(format!(
                "charge_history with id {id} is already complete"
            )));
        }
        if time_end < current.time_start {
            return Err(HubError::bad_request("time_end is before time_start"));
        }

        let (rate_current,): (f64,) = sqlx::query_as("SELECT rate_current FROM charger WHERE id = ?")
            .bind(current.id_charger)
            .fetch_one(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, ChargeHistory>(
            r#"UPDATE charge_history SET
                   time_end = ?,
                   total_energy_drawn = ?,
                   amount_payable = ?,
                   status = ?
               WHERE id = ?
               RETURNING *"#,
        )
        .bind(time_end)
        .bind(total_energy_drawn)
        .bind(amount_payable(total_energy_drawn, rate_current))
        .bind(ChargeStatus::Complete)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE charger SET in_use = 0 WHERE id = ?")
            .bind(current.id_charger)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM charge_current WHERE id_charge_history = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::amount_payable;

    #[test]
    fn amount_is_rounded_to_cents() {
        assert_eq!(amount_payable(7.777, 1.0), 7.78);
        assert_eq!(amount_payable(10.0, 0.333), 3.33);
        assert_eq!(amount_payable(0.0, 0.45), 0.0);
        assert_eq!(amount_payable(40.0, 0.3), 12.0);
    }
}
