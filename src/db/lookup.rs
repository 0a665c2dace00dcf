//! Closed set of single-column existence lookups.
//!
//! Table and column names are spliced into SQL text, so they may only come
//! from this enum. The value is always bound as a parameter.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    UserId(i64),
    UserEmail(&'a str),
    ConnectorTypeId(i64),
    ConnectorTypeName(&'a str),
    ChargerId(i64),
    VehicleId(i64),
    VehicleSn(&'a str),
    ChargeHistoryId(i64),
    ChargeCurrentForHistory(i64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookupValue<'a> {
    Int(i64),
    Text(&'a str),
}

impl<'a> Lookup<'a> {
    /// `(table, column)` this lookup filters on.
    pub fn target(&self) -> (&'static str, &'static str) {
        match self {
            Lookup::UserId(_) => ("user_info", "id"),
            Lookup::UserEmail(_) => ("user_info", "email"),
            Lookup::ConnectorTypeId(_) => ("connector_type", "id"),
            Lookup::ConnectorTypeName(_) => ("connector_type", "name_connector"),
            Lookup::ChargerId(_) => ("charger", "id"),
            Lookup::VehicleId(_) => ("vehicle_info", "id"),
            Lookup::VehicleSn(_) => ("vehicle_info", "vehicle_sn"),
            Lookup::ChargeHistoryId(_) => ("charge_history", "id"),
            Lookup::ChargeCurrentForHistory(_) => ("charge_current", "id_charge_history"),
        }
    }

    pub fn value(&self) -> LookupValue<'a> {
        match *self {
            Lookup::UserId(v)
            | Lookup::ConnectorTypeId(v)
            | Lookup::ChargerId(v)
            | Lookup::VehicleId(v)
            | Lookup::ChargeHistoryId(v)
            | Lookup::ChargeCurrentForHistory(v) => LookupValue::Int(v),
            Lookup::UserEmail(s) | Lookup::ConnectorTypeName(s) | Lookup::VehicleSn(s) => {
                LookupValue::Text(s)
            }
        }
    }

    pub fn select_sql(&self) -> String {
        let (table, column) = self.target();
        format!("SELECT 1 FROM {table} WHERE {column} = ? LIMIT 1")
    }
}

impl fmt::Display for Lookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (table, column) = self.target();
        match self.value() {
            LookupValue::Int(v) => write!(f, "{table} with {column} {v}"),
            LookupValue::Text(s) => write!(f, "{table} with {column} '{s}'"),
        }
    }
}
