use crate::client::{Item, Label, Paper, Report};
use bson::doc;
use docstash::common::{DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SOCKET_TIMEOUT_MS};
use docstash::storable::{Packable, Storable, UnpackOptions};
use docstash_derive::{Packable, Storable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, PartialEq, Serialize, Deserialize, Packable, Storable)]
#[storage(
    key = "serial",
    database = "fleet",
    collection = "vehicles",
    host = "db1.internal",
    port = 27018,
    connect_timeout_ms = 2500,
    socket_timeout_ms = 5000,
    journal = true
)]
struct Vehicle {
    #[serde(rename = "serial")]
    serial_number: String,
    wheels: u8,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Packable, Storable)]
#[serde(rename_all = "camelCase")]
#[storage(key = "userName", database = "crm", collection = "users")]
struct User {
    user_name: String,
    display_name: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Packable)]
struct Point {
    x: f64,
    y: f64,
}

#[test]
fn test_derived_config_uses_defaults() {
    let config = Paper::storage_config().unwrap();
    assert_eq!(config.key_attr(), "doc_id");
    assert!(!config.journal());

    let identity = config.identity();
    assert_eq!(identity.host(), DEFAULT_HOST);
    assert_eq!(identity.port(), DEFAULT_PORT);
    assert_eq!(identity.database(), "library");
    assert_eq!(identity.collection(), "papers");
    assert_eq!(
        identity.connect_timeout(),
        Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS)
    );
    assert_eq!(
        identity.socket_timeout(),
        Duration::from_millis(DEFAULT_SOCKET_TIMEOUT_MS)
    );
}

#[test]
fn test_derived_config_with_every_setting() {
    let config = Vehicle::storage_config().unwrap();
    assert_eq!(config.key_attr(), "serial");
    assert!(config.journal());

    let identity = config.identity();
    assert_eq!(identity.host(), "db1.internal");
    assert_eq!(identity.port(), 27018);
    assert_eq!(identity.namespace(), "fleet.vehicles");
    assert_eq!(identity.connect_timeout(), Duration::from_millis(2500));
    assert_eq!(identity.socket_timeout(), Duration::from_millis(5000));
}

#[test]
fn test_derived_configs_of_other_types() {
    assert_eq!(Report::storage_config().unwrap().key_attr(), "meta.code");
    assert_eq!(Label::storage_config().unwrap().key_attr(), "_id");
    assert!(Item::storage_config().unwrap().journal());
    assert_eq!(User::storage_config().unwrap().key_attr(), "userName");
}

#[test]
fn test_derived_pack_honours_serde_attributes() {
    let vehicle = Vehicle {
        serial_number: "VX-1".to_string(),
        wheels: 4,
    };
    let record = vehicle.pack().unwrap();
    assert_eq!(record.get_str("serial").unwrap(), "VX-1");
    assert!(!record.contains_key("serial_number"));

    let user = User {
        user_name: "ann".to_string(),
        display_name: "Ann Lee".to_string(),
    };
    let record = user.pack().unwrap();
    assert_eq!(record, doc! { "userName": "ann", "displayName": "Ann Lee" });
}

#[test]
fn test_packable_without_storable() {
    let point = Point { x: 1.5, y: -2.0 };
    let record = point.pack().unwrap();
    assert_eq!(record, doc! { "x": 1.5, "y": -2.0 });

    let unpacked = Point::unpack(record, &UnpackOptions::default()).unwrap();
    assert_eq!(unpacked, point);
}

#[test]
fn test_derived_unpack_applies_injection() {
    let record = doc! { "x": 1.0 };
    let point = Point::unpack(record, &UnpackOptions::new().inject("y", 3.0)).unwrap();
    assert_eq!(point, Point { x: 1.0, y: 3.0 });
}
