//! Registry construction driven by a configuration file.

mod common;

use notibus::test_utils::RecordingSink;
use notibus::{Config, Endpoint, Message, Registry};
use tracing_test::traced_test;

#[test]
fn test_config_file_shapes_the_registry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notibus.toml");
    std::fs::write(
        &path,
        r#"
[notifiers.chat]
enabled = false

[notifiers.log]
suppress = ["debug"]
"#,
    )
    .unwrap();
    let config = Config::load(path.to_str().unwrap()).unwrap();

    let log = RecordingSink::new("log");
    let chat = RecordingSink::new("chat");
    let registry = Registry::builder()
        .with(Endpoint::new(log.clone()))
        .with(Endpoint::new(chat.clone()))
        .configured(&config)
        .build()
        .unwrap();

    assert_eq!(registry.len(), 1);
    assert!(registry.get("chat").is_none());

    registry.to_all(Message::debug("verbose probe")).send();
    registry.to_all(Message::info("service up")).send();

    assert_eq!(log.texts(), vec!["service up"]);
    assert!(chat.texts().is_empty());
}

#[test]
#[traced_test]
fn test_config_for_an_unregistered_endpoint_warns() {
    let mut config = Config::default();
    config
        .notifiers
        .insert("mail".to_string(), Default::default());

    let registry = Registry::builder()
        .with(Endpoint::new(RecordingSink::new("log")))
        .configured(&config)
        .build()
        .unwrap();

    assert_eq!(registry.len(), 1);
    assert!(logs_contain("unregistered endpoint"));
}
