use super::*;
use crate::services::settings::PanelOverride;

#[test]
fn descriptor_defaults_to_auto_close_windowed() {
    let desc = PanelDescriptor::new("LoginPanel", Layer::Popup);

    assert_eq!(desc.escape_policy(), EscapePolicy::AutoClose);
    assert!(!desc.is_full_screen());
    let spec = desc.node_spec();
    assert_eq!(spec.layer, Layer::Popup);
    assert_eq!(spec.panel.as_ref().map(|p| p.as_str()), Some("LoginPanel"));
}

#[test]
fn register_rejects_duplicates() {
    let mut catalog = PanelCatalog::new();
    catalog
        .register(PanelDescriptor::new("Main", Layer::Main))
        .unwrap();

    let err = catalog
        .register(PanelDescriptor::new("Main", Layer::Popup))
        .unwrap_err();

    assert_eq!(err, PanelError::DuplicatePanel(PanelId::from("Main")));
    assert_eq!(catalog.get("Main").unwrap().layer(), Layer::Main);
}

#[test]
fn unknown_panel_lookup_fails() {
    let catalog = PanelCatalog::new();
    assert_eq!(
        catalog.get("Nope").unwrap_err(),
        PanelError::UnknownPanel(PanelId::from("Nope"))
    );
    assert!(catalog.is_empty());
}

#[test]
fn apply_settings_overrides_static_data() {
    let mut catalog = PanelCatalog::new()
        .with(PanelDescriptor::new("Login", Layer::Popup))
        .unwrap()
        .with(PanelDescriptor::new("Shop", Layer::Main).escape(EscapePolicy::Hide))
        .unwrap();

    let settings = NavSettings {
        panels: vec![
            PanelOverride {
                id: PanelId::from("Login"),
                layer: Some(Layer::System),
                escape: None,
                full_screen: Some(true),
            },
            PanelOverride {
                id: PanelId::from("Ghost"),
                layer: Some(Layer::Main),
                escape: None,
                full_screen: None,
            },
        ],
        ..NavSettings::default()
    };
    catalog.apply_settings(&settings);

    let login = catalog.get("Login").unwrap();
    assert_eq!(login.layer(), Layer::System);
    assert_eq!(login.escape_policy(), EscapePolicy::AutoClose);
    assert!(login.is_full_screen());
    assert_eq!(catalog.get("Shop").unwrap().escape_policy(), EscapePolicy::Hide);
    assert!(!catalog.contains("Ghost"));
    assert_eq!(catalog.len(), 2);
}
