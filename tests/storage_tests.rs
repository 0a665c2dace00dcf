mod common;

use chargehub::HubError;
use chargehub::bootstrap::{self, BootstrapOutcome, DatabaseState};
use chargehub::db::Lookup;
use chargehub::db::models::{ChargerInput, NewConnectorType, NewUser, NewVehicle, OutputCurrent};
use common::{TestHub, db_config, temp_dir};
use std::fs;

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        phone: None,
    }
}

#[tokio::test]
async fn exists_flips_after_insert() {
    let hub = TestHub::new("exists").await;

    assert!(!hub.storage.exists(Lookup::UserEmail("a@b.com")).await.unwrap());
    let user = hub.storage.insert_user(&new_user("a@b.com")).await.unwrap();
    assert!(hub.storage.exists(Lookup::UserEmail("a@b.com")).await.unwrap());
    assert!(hub.storage.exists(Lookup::UserId(user.id)).await.unwrap());
    assert!(!hub.storage.exists(Lookup::UserEmail("c@d.com")).await.unwrap());
}

#[tokio::test]
async fn exists_binds_value_instead_of_splicing_it() {
    let hub = TestHub::new("exists-inject").await;
    hub.storage.insert_user(&new_user("a@b.com")).await.unwrap();

    let hostile = Lookup::UserEmail("nobody' OR '1'='1");
    assert!(!hub.storage.exists(hostile).await.unwrap());
}

#[tokio::test]
async fn every_lookup_targets_a_real_column() {
    let hub = TestHub::new("lookups").await;
    let lookups = [
        Lookup::UserId(1),
        Lookup::UserEmail("x@y.z"),
        Lookup::ConnectorTypeId(1),
        Lookup::ConnectorTypeName("CCS2"),
        Lookup::ChargerId(1),
        Lookup::VehicleId(1),
        Lookup::VehicleSn("SN"),
        Lookup::ChargeHistoryId(1),
        Lookup::ChargeCurrentForHistory(1),
    ];
    for lookup in lookups {
        let found = hub
            .storage
            .exists(lookup)
            .await
            .unwrap_or_else(|e| panic!("{lookup}: {e}"));
        assert!(!found, "{lookup} should be absent in an empty database");
    }
}

#[tokio::test]
async fn ensure_helpers_map_to_not_found_and_conflict() {
    let hub = TestHub::new("ensure").await;
    hub.storage.insert_user(&new_user("a@b.com")).await.unwrap();

    let err = hub
        .storage
        .ensure_exists(Lookup::ChargerId(9))
        .await
        .unwrap_err();
    assert!(matches!(err, HubError::NotFound(_)));

    let err = hub
        .storage
        .ensure_absent(Lookup::UserEmail("a@b.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, HubError::Conflict(_)));
}

#[tokio::test]
async fn schema_can_be_applied_twice() {
    let hub = TestHub::new("schema-twice").await;
    bootstrap::apply_schema(&hub.storage, &hub.cfg.schema_path)
        .await
        .expect("first re-apply failed");
    bootstrap::apply_schema(&hub.storage, &hub.cfg.schema_path)
        .await
        .expect("second re-apply failed");
}

#[tokio::test]
async fn bootstrap_creates_then_reuses_database() {
    let dir = temp_dir("bootstrap");
    let cfg = db_config(&dir);
    assert_eq!(DatabaseState::detect(&cfg.path), DatabaseState::Uninitialized);

    let (storage, outcome) = bootstrap::ensure_database(&cfg).await.unwrap();
    assert_eq!(outcome, BootstrapOutcome::Created);
    assert!(cfg.path.exists());
    assert_eq!(DatabaseState::detect(&cfg.path), DatabaseState::Initialized);
    storage.insert_user(&new_user("keep@me.io")).await.unwrap();
    storage.close().await;

    let (storage, outcome) = bootstrap::ensure_database(&cfg).await.unwrap();
    assert_eq!(outcome, BootstrapOutcome::Existing);
    assert!(cfg.path.exists());
    assert!(storage.exists(Lookup::UserEmail("keep@me.io")).await.unwrap());
    storage.close().await;

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn missing_schema_file_is_a_startup_fault() {
    let dir = temp_dir("no-schema");
    let mut cfg = db_config(&dir);
    cfg.schema_path = dir.join("does_not_exist.sql");

    let err = bootstrap::ensure_database(&cfg).await.err().unwrap();
    assert!(matches!(err, HubError::SchemaRead { .. }), "{err}");
    assert!(!cfg.path.exists());

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn malformed_schema_leaves_no_database_behind() {
    let dir = temp_dir("bad-schema");
    let mut cfg = db_config(&dir);
    cfg.schema_path = dir.join("broken.sql");
    fs::write(
        &cfg.schema_path,
        "CREATE TABLE IF NOT EXISTS ok_table (id INTEGER);\nCREATE TABLE broken (",
    )
    .unwrap();

    let err = bootstrap::ensure_database(&cfg).await.err().unwrap();
    assert!(matches!(err, HubError::Database(_)), "{err}");
    assert!(!cfg.path.exists());
    assert_eq!(DatabaseState::detect(&cfg.path), DatabaseState::Uninitialized);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn close_is_idempotent_and_later_use_fails_cleanly() {
    let hub = TestHub::new("close").await;
    hub.storage.close().await;
    hub.storage.close().await;
    assert!(hub.storage.is_closed());

    let err = hub
        .storage
        .exists(Lookup::UserEmail("a@b.com"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, HubError::Database(sqlx::Error::PoolClosed)),
        "{err}"
    );
}

#[tokio::test]
async fn concurrent_exists_on_disjoint_tables() {
    let hub = TestHub::new("concurrent").await;
    hub.storage.insert_user(&new_user("a@b.com")).await.unwrap();
    hub.storage
        .insert_connector_type(&NewConnectorType {
            name_connector: "Type 2".to_string(),
            output_current: OutputCurrent::Ac,
            max_power_kw: 22.0,
        })
        .await
        .unwrap();

    let (user, connector, charger, vehicle) = tokio::join!(
        hub.storage.exists(Lookup::UserEmail("a@b.com")),
        hub.storage.exists(Lookup::ConnectorTypeName("Type 2")),
        hub.storage.exists(Lookup::ChargerId(1)),
        hub.storage.exists(Lookup::VehicleSn("SN-404")),
    );
    assert!(user.unwrap());
    assert!(connector.unwrap());
    assert!(!charger.unwrap());
    assert!(!vehicle.unwrap());

    let mut tasks = Vec::new();
    for i in 0..32 {
        let storage = hub.storage.clone();
        tasks.push(tokio::spawn(async move {
            if i % 2 == 0 {
                storage.exists(Lookup::UserEmail("a@b.com")).await
            } else {
                storage.exists(Lookup::ConnectorTypeName("Type 2")).await
            }
        }));
    }
    for task in tasks {
        assert!(task.await.expect("task panicked").unwrap());
    }
}

#[tokio::test]
async fn one_open_session_per_user_and_per_charger() {
    let hub = TestHub::new("open-session").await;
    let storage = &hub.storage;
    let first = storage.insert_user(&new_user("first@ev.io")).await.unwrap();
    let second = storage.insert_user(&new_user("second@ev.io")).await.unwrap();
    let connector = storage
        .insert_connector_type(&NewConnectorType {
            name_connector: "CHAdeMO".to_string(),
            output_current: OutputCurrent::Dc,
            max_power_kw: 50.0,
        })
        .await
        .unwrap();
    let mut chargers = Vec::new();
    for name in ["Bay 1", "Bay 2"] {
        let charger = storage
            .insert_charger(&ChargerInput {
                name: name.to_string(),
                address: "Depot Rd".to_string(),
                latitude: 0.0,
                longitude: 0.0,
                id_connector_type: connector.id,
                rate_current: 0.4,
            })
            .await
            .unwrap();
        chargers.push(charger.id);
    }
    let mut vehicles = Vec::new();
    for (user_id, sn) in [(first.id, "SN-1"), (second.id, "SN-2")] {
        let vehicle = storage
            .insert_vehicle(
                user_id,
                &NewVehicle {
                    name: "Leaf".to_string(),
                    vehicle_sn: sn.to_string(),
                    id_connector_type: connector.id,
                    battery_capacity_kwh: 40.0,
                },
            )
            .await
            .unwrap();
        vehicles.push(vehicle.id);
    }

    storage
        .start_charge(first.id, chargers[0], vehicles[0])
        .await
        .unwrap();

    let err = storage
        .start_charge(second.id, chargers[0], vehicles[1])
        .await
        .unwrap_err();
    assert!(matches!(err, HubError::Conflict(_)), "{err}");

    let err = storage
        .start_charge(first.id, chargers[1], vehicles[0])
        .await
        .unwrap_err();
    assert!(matches!(err, HubError::Conflict(_)), "{err}");
    assert!(!storage.get_charger(chargers[1]).await.unwrap().in_use);

    assert!(storage.delete_user("first@ev.io").await.unwrap());
    assert!(!storage.get_charger(chargers[0]).await.unwrap().in_use);

    let session = storage
        .start_charge(second.id, chargers[0], vehicles[1])
        .await
        .unwrap();
    assert_eq!(session.id_charger, chargers[0]);
}
