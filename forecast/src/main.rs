use anyhow::Result;
use forecast::model::{HorizonModelSet, default_features, project_closes};
use config::{Config, ConfigError, File, FileFormat};
use feature_pipeline::config::FeatureConfig;
use feature_pipeline::pipeline::derive;
use log::info;
use market_data::config::ProviderConfig;
use market_data::logger::init_logger;
use market_data::source::{HttpBarSource, sync_snapshot};
use market_data::store;
use market_data::validate::validate_bars;
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
struct ForecastConfig {
    symbol: String,
    snapshot: String,
    /// Pull new bars from the provider before deriving features.
    #[serde(default)]
    update_data: bool,
    #[serde(default = "default_lambda")]
    ridge_lambda: f64,
    /// Feature columns fed to the per-horizon models.
    #[serde(default = "default_features")]
    model_features: Vec<String>,
    #[serde(default)]
    features: FeatureConfig,
}

fn default_lambda() -> f64 {
    1.0
}

impl ForecastConfig {
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            .add_source(File::new(path, FileFormat::Toml))
            .build()?;

        cfg.try_deserialize()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let cfg = ForecastConfig::from_file("forecast.toml")?;
    let snapshot = Path::new(&cfg.snapshot);

    let bars = if cfg.update_data {
        let provider = ProviderConfig::from_file("provider.toml")?;
        let source = HttpBarSource::new(provider);
        sync_snapshot(snapshot, &source, &cfg.symbol).await?
    } else {
        store::load(snapshot)?
    };
    validate_bars(&bars)?;
    info!("data length: {}", bars.len());

    let table = derive(&store::to_dataframe(&bars)?, &cfg.features)?;

    let mut models = HorizonModelSet::new(
        cfg.model_features.clone(),
        cfg.features.predict_days,
        cfg.ridge_lambda,
    );
    models.train(&table)?;

    let changes = models.predict_next(&table)?;
    let last_close = bars[0].close;
    info!("last day close: {last_close}");
    for (day, (chg, close)) in changes
        .iter()
        .zip(project_closes(last_close, &changes))
        .enumerate()
    {
        info!(
            "day +{}: pct_chg {:+.3}%, projected close {:.3}",
            day + 1,
            chg,
            close
        );
    }

    Ok(())
}
