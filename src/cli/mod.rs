use crate::data::configuration::Configuration;
use crate::data::dbconnector::{SQLConnector, StoreConnection};
use crate::server;
use clap::Parser;
use log::{debug, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Port to listen on; overrides the configuration file.
    #[arg(short, long)]
    port: Option<u16>,
    /// Address to bind; overrides the configuration file.
    #[arg(long)]
    host: Option<String>,
    #[arg(short, long, default_value_t = String::from("configuration.toml"))]
    configuration_path: String,
}

impl Args {
    fn apply(&self, config: &mut Configuration) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    debug!("Configuration path: {}", args.configuration_path);

    let mut config = Configuration::load(&args.configuration_path)?;
    args.apply(&mut config);
    debug!("Loaded configuration: {config:?}");

    let mut db_connector = SQLConnector::new(&config.database.path);
    db_connector.connect().await?;
    db_connector.check().await?;
    if db_connector.is_initialized().await? {
        info!("Database is initialized");
    } else {
        info!("Database is not initialized, performing initialization");
        db_connector.initialize().await?;
    }

    server::run(&config, db_connector).await
}
