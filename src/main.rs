use clap::{Parser, ValueEnum};
use library_events_producer::{Config, Error, EventPublisher, KafkaSink, LibraryEvent, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "library-events-producer")]
#[command(about = "Publish library catalog change events to Kafka", long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[arg(short, long, value_name = "FILE", help = "Event JSON file, or '-' for stdin")]
    event: PathBuf,

    #[arg(short, long, value_enum, default_value = "async")]
    strategy: Strategy,

    #[arg(short, long, help = "Enable JSON output for logs")]
    json_logs: bool,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Strategy {
    /// Fire-and-forget with async completion logging
    Async,
    /// Block until the broker acknowledges, bounded by the configured timeout
    Sync,
    /// Fire-and-forget with the event-source provenance header
    Headers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.json_logs, args.verbose);

    info!("Starting library-events-producer");
    info!("Loading configuration from {:?}", args.config);

    let config = match Config::from_file(&args.config) {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(Error::Config(e));
        }
    };

    info!(
        kafka_brokers = ?config.kafka.brokers,
        kafka_topic = %config.kafka.topic,
        sync_timeout_ms = config.publisher.sync_timeout_ms,
        "Configuration summary"
    );

    let event = read_event(&args.event)?;
    event.validate()?;

    let sink = Arc::new(KafkaSink::new(&config.kafka.brokers, &config.kafka)?);
    let publisher = EventPublisher::new(sink, config.kafka.topic.clone());

    match args.strategy {
        Strategy::Async => {
            let handle = publisher.publish_async(&event)?;
            match handle.await {
                Ok(outcome) => debug!(?outcome, "Completion observed"),
                Err(e) => error!("Completion task failed: {}", e),
            }
        }
        Strategy::Sync => {
            let delivery = publisher.publish_sync(&event, config.sync_timeout()).await?;
            info!(
                partition = delivery.partition,
                offset = delivery.offset,
                "Broker acknowledged the event"
            );
        }
        Strategy::Headers => {
            let handle = publisher.publish_with_headers(&event)?;
            match handle.await {
                Ok(outcome) => debug!(?outcome, "Completion observed"),
                Err(e) => error!("Completion task failed: {}", e),
            }
        }
    }

    Ok(())
}

fn read_event(path: &PathBuf) -> Result<LibraryEvent> {
    let json = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(path)?
    };

    Ok(serde_json::from_str(&json)?)
}

fn init_logging(json: bool, verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("library_events_producer=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("library_events_producer=info,warn"))
    };

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
