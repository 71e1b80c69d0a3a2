use clap::Parser;
use feature_entitlements::utils::error::{EntitlementError, ErrorSeverity};
use feature_entitlements::utils::{logger, validation::Validate};
use feature_entitlements::{
    CliConfig, Command, DefaultValueStore, EntitlementStore, FeaturesService, Feature,
    JsonFileDefaults, PurchaseProvider, SimulatedStore, PRO_EDITION,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting entitlements CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        fail(&e);
    }
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    let defaults = match JsonFileDefaults::open(config.store_path()) {
        Ok(defaults) => Arc::new(defaults),
        Err(e) => fail(&e),
    };
    let provider = SimulatedStore::new(config.provider.clone(), defaults.clone());
    let service = FeaturesService::new(EntitlementStore::new(defaults.clone()), provider);

    let outcome = match cli.command {
        Command::Status => Ok(()),
        Command::Activate => {
            tracing::info!("🛒 Activating {}", PRO_EDITION);
            service.activate_pro().await
        }
        Command::Restore => {
            tracing::info!("♻️ Restoring previous purchases");
            service.restore_pro().await
        }
    };

    match outcome {
        Ok(()) => {
            if cli.command != Command::Status {
                println!("✅ Done");
            }
            print_status(&service, defaults.as_ref());
        }
        Err(e) => {
            print_status(&service, defaults.as_ref());
            fail(&e);
        }
    }

    Ok(())
}

fn print_status<P: PurchaseProvider>(service: &FeaturesService<P>, defaults: &JsonFileDefaults) {
    for feature in Feature::ALL {
        let mark = if service.is_feature_enabled(feature) {
            "✅"
        } else {
            "🔒"
        };
        println!("{} {}", mark, feature.display_name());
    }

    let reader: &dyn DefaultValueStore = defaults;
    if let Some(stamp) = reader.try_get::<String>(&SimulatedStore::purchased_at_key(PRO_EDITION)) {
        println!("📅 Purchased at {}", stamp);
    }
    println!("📁 Defaults: {}", defaults.path().display());
}

fn fail(e: &EntitlementError) -> ! {
    if e.severity() == ErrorSeverity::Low {
        tracing::info!("{} {}", e.status_marker(), e);
        println!("{} {}", e.status_marker(), e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::error!(
        "{} {} (Category: {:?}, Severity: {:?})",
        e.status_marker(),
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("{} {}", e.status_marker(), e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
