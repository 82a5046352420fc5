//! Check that the change log and config can be persisted and restored
#![cfg(feature = "serde")]
use smallwm::{pure::geometry::Rect, Change, ClientSet, Config, Desktop, Layer, WmHints, Xid};

#[test]
fn change_log_survives_a_json_round_trip() {
    let mut cs = ClientSet::try_new(Config::default()).unwrap();
    let (a, b) = (Xid::from(1), Xid::from(2));
    cs.add_client(a, WmHints::default(), Rect::new(0, 0, 50, 50)).unwrap();
    cs.add_client(b, WmHints::default(), Rect::new(0, 0, 50, 50)).unwrap();
    cs.set_layer(&a, 8).unwrap();
    cs.iconify(&b).unwrap();
    cs.next_desktop().unwrap();

    let changes = cs.flush_changes();
    let json = serde_json::to_string(&changes).unwrap();
    let restored: Vec<Change<Xid>> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, changes);
}

#[test]
fn changes_have_a_readable_json_form() {
    let change = Change::ClientDesktop {
        client: Xid::from(7),
        desktop: Desktop::User(3),
    };

    let json = serde_json::to_value(change).unwrap();

    assert_eq!(
        json,
        serde_json::json!({ "ClientDesktop": { "client": 7, "desktop": { "User": 3 } } })
    );
}

#[test]
fn out_of_range_layers_are_rejected_on_deserialize() {
    let res: Result<Change<Xid>, _> =
        serde_json::from_str(r#"{ "Layer": { "client": 1, "layer": 12 } }"#);

    assert!(res.is_err());

    let ok: Change<Xid> = serde_json::from_str(r#"{ "Layer": { "client": 1, "layer": 9 } }"#).unwrap();

    assert_eq!(
        ok,
        Change::Layer {
            client: Xid::from(1),
            layer: Layer::MAX
        }
    );
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let config: Config = serde_json::from_str(r#"{ "initial_desktop": 2 }"#).unwrap();

    assert_eq!(config.desktops, 5);
    assert_eq!(config.initial_desktop, 2);
    assert!(ClientSet::try_new(config).is_ok());
}

#[test]
fn desktop_zero_is_rejected_on_deserialize() {
    let res: Result<Change<Xid>, _> = serde_json::from_str(
        r#"{ "ClientDesktop": { "client": 1, "desktop": { "User": 0 } } }"#,
    );

    assert!(res.is_err());

    let d: Desktop = serde_json::from_str(r#"{ "User": 4 }"#).unwrap();
    assert_eq!(d, Desktop::User(4));

    let d: Desktop = serde_json::from_str(r#""Icons""#).unwrap();
    assert_eq!(d, Desktop::Icons);
}
