use std::env;
use std::io;

use dotenv::dotenv;
use lab_exercises::{
    config::DemoConfig,
    demo::{self, Demo},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lab_exercises=info".into());

    // LAB_LOG_FORMAT=json for machine-readable output
    match env::var("LAB_LOG_FORMAT").as_deref() {
        Ok("json") => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
        _ => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

fn main() {
    dotenv().ok();
    init_tracing();

    let demos = match env::args().nth(1) {
        Some(name) => match name.parse::<Demo>() {
            Ok(demo) => vec![demo],
            Err(e) => {
                eprintln!("{}", e);
                eprintln!("usage: lab-exercises [file|matrix|queue]");
                std::process::exit(2);
            }
        },
        None => Demo::ALL.to_vec(),
    };

    let cfg = DemoConfig::from_env();
    tracing::debug!(?cfg, "loaded configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = demo::run_all(&demos, &cfg, &mut out) {
        tracing::error!("demo failed: {}", e);
        std::process::exit(1);
    }
}
