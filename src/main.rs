use clap::{Arg, Command};
use log::LevelFilter;
use std::process;
use std::time::Duration;
use treno_watch::client::TrenitaliaClient;
use treno_watch::config::Config;
use treno_watch::job::TrainWatchJob;
use treno_watch::mailer::{HttpApiMailer, LogMailer, MailTransport};

#[tokio::main]
async fn main() {
    let matches = Command::new("treno-watch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Watches the Trenitalia search API and emails newly available trains")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("/etc/treno-watch.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Test configuration validity")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("test-mail")
                .long("test-mail")
                .value_name("ADDRESS")
                .help("Send a test email to the given address and exit")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("check-once")
                .long("check-once")
                .help("Run a single check cycle and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Log notifications instead of sending email")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches.get_one::<String>("config").unwrap();
    let config = match Config::from_file(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        test_config(&config);
        return;
    }

    let mailer: Box<dyn MailTransport> = if matches.get_flag("dry-run") {
        Box::new(LogMailer)
    } else {
        match HttpApiMailer::new(&config.mail) {
            Ok(mailer) => Box::new(mailer),
            Err(e) => {
                eprintln!("Error creating mail client: {e}");
                process::exit(1);
            }
        }
    };

    if let Some(address) = matches.get_one::<String>("test-mail") {
        match mailer
            .send(address, "Test Email", "This is a test email", None)
            .await
        {
            Ok(()) => println!("Test email sent to {address}"),
            Err(e) => {
                eprintln!("Failed to send test email: {e}");
                process::exit(1);
            }
        }
        return;
    }

    let source = match TrenitaliaClient::new(config.api_url.clone()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error creating API client: {e}");
            process::exit(1);
        }
    };

    let mut job = TrainWatchJob::new(source, mailer, config_path.clone());

    if matches.get_flag("check-once") {
        job.run_once().await;
    } else {
        log::info!(
            "Starting train watch (every {} seconds, config: {config_path})",
            config.check_interval_seconds
        );
        job.run_forever(Duration::from_secs(config.check_interval_seconds))
            .await;
    }
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration generated: {path}");
            println!("Edit the watch lists and mail settings before starting the daemon.");
        }
        Err(e) => {
            eprintln!("Error generating configuration: {e}");
            process::exit(1);
        }
    }
}

fn test_config(config: &Config) {
    println!("🔍 Testing configuration...");
    println!();

    let snapshot = config.snapshot();
    println!("API endpoint: {}", config.api_url);
    println!(
        "Route: {} -> {}",
        snapshot.route.departure_location_id, snapshot.route.arrival_location_id
    );
    println!("Dates to check: {}", snapshot.dates.len());
    println!("Train categories: {}", snapshot.categories.len());
    println!("Denominations: {}", snapshot.denominations.len());
    println!("Recipients: {}", snapshot.recipients.len());
    println!("Check interval: {}s", config.check_interval_seconds);

    if config.mail.api_url.is_empty() {
        println!("⚠️  No mail endpoint configured; only --dry-run will work");
    }

    if snapshot.is_complete() {
        println!("✅ Configuration is complete");
    } else {
        println!("❌ One of the watch lists is empty; the job would skip every cycle");
        process::exit(1);
    }
}
