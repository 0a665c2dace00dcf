use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum OutputCurrent {
    Ac,
    Dc,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct ConnectorType {
    pub id: i64,
    pub name_connector: String,
    pub output_current: OutputCurrent,
    pub max_power_kw: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewConnectorType {
    pub name_connector: String,
    pub output_current: OutputCurrent,
    pub max_power_kw: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Charger {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub id_connector_type: i64,
    pub rate_current: f64,
    pub in_use: bool,
}

/// Writable charger fields; used for both create and full update.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargerInput {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub id_connector_type: i64,
    pub rate_current: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct FavouriteCharger {
    pub id: i64,
    pub id_user_info: i64,
    pub id_charger: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub id_user_info: i64,
    pub name: String,
    pub vehicle_sn: String,
    pub id_connector_type: i64,
    pub battery_capacity_kwh: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVehicle {
    pub name: String,
    pub vehicle_sn: String,
    pub id_connector_type: i64,
    pub battery_capacity_kwh: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleUpdate {
    pub name: String,
    pub id_connector_type: i64,
    pub battery_capacity_kwh: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ChargeStatus {
    InProgress,
    Complete,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct ChargeHistory {
    pub id: i64,
    pub id_user_info: i64,
    pub id_charger: i64,
    pub id_vehicle_info: i64,
    pub time_start: DateTime<Utc>,
    pub time_end: Option<DateTime<Utc>>,
    pub total_energy_drawn: f64,
    pub amount_payable: f64,
    pub status: ChargeStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct ChargeCurrent {
    pub id: i64,
    pub id_charge_history: i64,
    pub percentage_start: f64,
    pub percentage_current: f64,
    pub updated_at: DateTime<Utc>,
}

/// Vehicle with its connector expanded, as nested in history listings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VehicleDetail {
    pub id: i64,
    pub name: String,
    pub vehicle_sn: String,
    pub battery_capacity_kwh: f64,
    pub connector: ConnectorType,
}

/// History row joined with the charger and vehicle it refers to.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChargeHistoryDetail {
    pub id: i64,
    pub id_user_info: i64,
    pub id_charger: i64,
    pub id_vehicle_info: i64,
    pub time_start: DateTime<Utc>,
    pub time_end: Option<DateTime<Utc>>,
    pub total_energy_drawn: f64,
    pub amount_payable: f64,
    pub status: ChargeStatus,
    pub charger: Charger,
    pub vehicle: VehicleDetail,
}

/// Flat result of the history/charger/vehicle/connector join.
#[derive(Debug, FromRow)]
pub struct ChargeHistoryJoinedRow {
    pub id: i64,
    pub id_user_info: i64,
    pub id_charger: i64,
    pub id_vehicle_info: i64,
    pub time_start: DateTime<Utc>,
    pub time_end: Option<DateTime<Utc>>,
    pub total_energy_drawn: f64,
    pub amount_payable: f64,
    pub status: ChargeStatus,
    pub charger_id: i64,
    pub charger_name: String,
    pub charger_address: String,
    pub charger_latitude: f64,
    pub charger_longitude: f64,
    pub charger_id_connector_type: i64,
    pub charger_rate_current: f64,
    pub charger_in_use: bool,
    pub vehicle_id: i64,
    pub vehicle_name: String,
    pub vehicle_sn: String,
    pub vehicle_battery_capacity_kwh: f64,
    pub connector_id: i64,
    pub connector_name: String,
    pub connector_output_current: OutputCurrent,
    pub connector_max_power_kw: f64,
}

impl From<ChargeHistoryJoinedRow> for ChargeHistoryDetail {
    fn from(r: ChargeHistoryJoinedRow) -> Self {
        Self {
            id: r.id,
            id_user_info: r.id_user_info,
            id_charger: r.id_charger,
            id_vehicle_info: r.id_vehicle_info,
            time_start: r.time_start,
            time_end: r.time_end,
            total_energy_drawn: r.total_energy_drawn,
            amount_payable: r.amount_payable,
            status: r.status,
            charger: Charger {
                id: r.charger_id,
                name: r.charger_name,
                address: r.charger_address,
                latitude: r.charger_latitude,
                longitude: r.charger_longitude,
                id_connector_type: r.charger_id_connector_type,
                rate_current: r.charger_rate_current,
                in_use: r.charger_in_use,
            },
            vehicle: VehicleDetail {
                id: r.vehicle_id,
                name: r.vehicle_name,
                vehicle_sn: r.vehicle_sn,
                battery_capacity_kwh: r.vehicle_battery_capacity_kwh,
                connector: ConnectorType {
                    id: r.connector_id,
                    name_connector: r.connector_name,
                    output_current: r.connector_output_current,
                    max_power_kw: r.connector_max_power_kw,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_keys_serialize_in_declaration_order() {
        let user = User {
            id: 7,
            email: "a@b.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: None,
            created_at: DateTime::parse_from_rfc3339("2023-06-01T14:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.starts_with(r#"{"id":7,"email":"a@b.com","first_name":"Ada","last_name""#));

        // Value round-trip keeps insertion order too (serde_json preserve_order).
        let value = serde_json::to_value(&user).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["id", "email", "first_name", "last_name", "phone", "created_at"]
        );
    }

    #[test]
    fn enums_use_wire_names() {
        assert_eq!(
            serde_json::to_string(&ChargeStatus::InProgress).unwrap(),
            r#""in_progress""#
        );
        assert_eq!(serde_json::to_string(&OutputCurrent::Dc).unwrap(), r#""DC""#);
        assert!(serde_json::from_str::<OutputCurrent>(r#""XX""#).is_err());
    }
}
