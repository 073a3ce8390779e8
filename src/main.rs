use anyhow::Context;
use phone_dash::analytics::PhoneFilter;
use phone_dash::import;
use phone_dash::lifecycle::{setup_tracing, InventorySystem};
use phone_dash::model::Platform;
use phone_dash::settings::Settings;
use std::path::PathBuf;
use tracing::{info, warn};

const SAMPLE_INVENTORY: &str = "\
model_name,brand,condition,specifications,stock_quantity,base_price,tags
iPhone 12,Apple,Excellent,\"{\"\"storage\"\": \"\"128GB\"\", \"\"color\"\": \"\"Blue\"\"}\",4,320.00,ios;flagship
Galaxy S21,Samsung,Good,\"{\"\"storage\"\": \"\"256GB\"\"}\",2,280.00,android
Pixel 6,Google,Fair,{},0,150.00,android
Moto G Power,Motorola,Poor,not json,7,45.50,budget
Nokia 3310,Nokia,mint,{},1,20.00,
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(settings_path.as_deref()).context("loading settings")?;
    setup_tracing(&settings.logging.filter);

    let system = InventorySystem::start(&settings)
        .await
        .context("starting inventory system")?;

    let rows = import::parse_csv(SAMPLE_INVENTORY.as_bytes())?;
    let imported = system.phones.bulk_import(rows).await;
    info!(
        created = imported.created.len(),
        rejected = imported.rejected.len(),
        "Sample inventory imported"
    );
    for rejection in &imported.rejected {
        warn!(row = rejection.row, reason = %rejection.reason, "Row rejected");
    }

    let everything = PhoneFilter::default();
    for platform in Platform::ALL {
        let outcome = system.phones.bulk_list(&everything, platform).await?;
        info!(
            %platform,
            success = outcome.success,
            failed = outcome.failed,
            "Listed inventory"
        );
    }

    let repriced = system.phones.update_all_prices().await?;
    info!(repriced = repriced.repriced, changed = repriced.changed, "Prices updated");

    let stats = system.phones.analytics(&everything).await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    for entry in system.logs.recent(20).await? {
        println!(
            "{} {:<8} {:<20} {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.id.to_string(),
            entry.action.to_string(),
            entry.details
        );
    }

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    Ok(())
}
