use phone_dash::lifecycle::{InventorySystem, StartupError};
use phone_dash::model::{ActionKind, Condition, PhoneCreate, PhoneId, Platform};
use phone_dash::settings::{Settings, StorageBackend};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("phone-dash-{}", uuid::Uuid::new_v4()))
}

fn json_settings(dir: &Path) -> Settings {
    let mut settings = Settings::load(None).expect("Failed to load settings");
    settings.storage.backend = StorageBackend::Json;
    settings.storage.data_dir = dir.to_path_buf();
    settings
}

#[tokio::test]
async fn test_restart_restores_phones_and_continues_ids() {
    let dir = temp_dir();
    let settings = json_settings(&dir);

    let system = InventorySystem::start(&settings).await.unwrap();
    let first = system
        .phones
        .create_phone(PhoneCreate::new(
            "iPhone 13",
            "Apple",
            Condition::Excellent,
            2,
            Decimal::new(45000, 2),
        ))
        .await
        .unwrap();
    system
        .phones
        .create_phone(PhoneCreate::new(
            "Galaxy S22",
            "Samsung",
            Condition::Good,
            1,
            Decimal::new(38000, 2),
        ))
        .await
        .unwrap();
    system
        .phones
        .list_on_platform(first.id, Platform::Z)
        .await
        .unwrap();
    system.shutdown().await.unwrap();

    assert!(dir.join("phones.json").exists());
    assert!(dir.join("logs.json").exists());

    let restarted = InventorySystem::start(&settings).await.unwrap();
    let restored = restarted.phones.get_phone(first.id).await.unwrap();
    assert_eq!(restored.model_name, "iPhone 13");
    assert!(restored.is_listed_on(Platform::Z));
    assert_eq!(restored.platform_prices, first.platform_prices);

    let third = restarted
        .phones
        .create_phone(PhoneCreate::new(
            "Pixel 7",
            "Google",
            Condition::Good,
            3,
            Decimal::new(30000, 2),
        ))
        .await
        .unwrap();
    assert_eq!(third.id, PhoneId(3));

    let newest = restarted.logs.recent(1).await.unwrap();
    assert_eq!(newest[0].id.0, 4);
    assert_eq!(newest[0].action, ActionKind::Create);

    restarted.shutdown().await.unwrap();
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_corrupt_store_fails_startup() {
    let dir = temp_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("phones.json"), "{ not a phone list").unwrap();

    let result = InventorySystem::start(&json_settings(&dir)).await;
    assert!(matches!(result, Err(StartupError::Hydration(_))));

    let _ = std::fs::remove_dir_all(&dir);
}
