use super::*;
use rustc_hash::FxHashMap;

#[test]
fn event_key_compares_by_text() {
    assert_eq!(EventKey::from("Login"), EventKey::new(String::from("Login")));
    assert_ne!(EventKey::from("Login"), EventKey::from("login"));
    assert!(EventKey::from("Launch") < EventKey::from("Login"));
}

#[test]
fn map_lookup_by_str_matches_owned_key() {
    let mut map = FxHashMap::default();
    map.insert(PanelId::from("LoginPanel"), 7);

    assert_eq!(map.get("LoginPanel"), Some(&7));
    assert!(map.get("Other").is_none());
}

#[test]
fn display_and_deref_expose_the_name() {
    let key = EventKey::from("Load");
    assert_eq!(key.to_string(), "Load");
    assert_eq!(&*key, "Load");
    assert_eq!(key.len(), 4);
}

#[test]
fn serializes_as_plain_string() {
    let id = PanelId::from("Settings");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"Settings\"");
    let back: PanelId = serde_json::from_str("\"Settings\"").unwrap();
    assert_eq!(back, id);
}
