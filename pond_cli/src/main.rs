//! Command-line surface for the pond monitor: threshold edits, dashboard
//! links and a polling watch loop, over either real network adapters or the
//! simulated ones.

mod cli;
mod error_fmt;

use clap::Parser;
use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use eyre::WrapErr;
use pond_core::error::MonitorError;
use pond_core::{ChatCommand, Domains, ReadingPoller, SyncCoordinator};
use pond_net::{HttpDevice, SheetSource, SimulatedDevice, SimulatedSource};
use pond_traits::clock::MonotonicClock;
use pond_traits::{DeviceLink, SensorSource};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);
    let _ = color_eyre::install();

    if let Err(e) = run(&cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", error_fmt::format_error_json(&e));
        } else {
            eprintln!("{}", error_fmt::humanize(&e));
        }
        std::process::exit(error_fmt::exit_code_for_error(&e));
    }
}

fn run(cli: &Cli) -> eyre::Result<()> {
    let text = std::fs::read_to_string(&cli.config)
        .wrap_err_with(|| format!("read config file {}", cli.config.display()))?;
    let config = pond_config::load_toml(&text)
        .wrap_err_with(|| format!("parse config file {}", cli.config.display()))?;
    config.validate()?;

    init_tracing(cli, &config.logging);

    if !config.access.allowed_users.contains(&cli.user) {
        eyre::bail!("user {} is not authorized", cli.user);
    }

    let domains = Domains::from(&config.limits);

    if cli.sim {
        dispatch(cli, &config, SimulatedDevice, SimulatedSource::new(), domains)
    } else {
        let device = HttpDevice::new(
            config.device.endpoint.clone(),
            Duration::from_millis(config.device.push_timeout_ms),
        );
        let source = SheetSource::new(config.source.endpoint.clone());
        dispatch(cli, &config, device, source, domains)
    }
}

fn dispatch<D, S>(
    cli: &Cli,
    config: &pond_config::Config,
    device: D,
    mut source: S,
    domains: Domains,
) -> eyre::Result<()>
where
    D: DeviceLink,
    S: SensorSource + Send + 'static,
{
    let mut coordinator = SyncCoordinator::new(
        device,
        domains,
        config.miniapp.base_url.clone(),
        config.access.allowed_users.iter().copied(),
    );
    let fetch_timeout = Duration::from_millis(config.source.fetch_timeout_ms);

    match cli.cmd {
        Commands::Status => {
            let reading = source
                .fetch_latest(fetch_timeout)
                .map_err(|e| eyre::Report::new(MonitorError::Source(e.to_string())))?;
            emit(&coordinator.status_report(cli.user, &reading));
        }
        Commands::SetTemp { min, max } => {
            let reply = coordinator.on_chat_command(cli.user, ChatCommand::SetTemp { min, max })?;
            emit(&reply);
        }
        Commands::SetHumid { min, max } => {
            let reply =
                coordinator.on_chat_command(cli.user, ChatCommand::SetHumid { min, max })?;
            emit(&reply);
        }
        Commands::NotifOn => {
            let reply = coordinator.on_chat_command(cli.user, ChatCommand::NotifyOn)?;
            emit(&reply);
        }
        Commands::NotifOff => {
            let reply = coordinator.on_chat_command(cli.user, ChatCommand::NotifyOff)?;
            emit(&reply);
        }
        Commands::Settings => {
            let link = coordinator.on_session_start(cli.user)?;
            emit(&link);
        }
        Commands::Watch { interval } => {
            let secs = interval.unwrap_or(config.source.poll_secs);
            watch(cli, &mut coordinator, source, secs, fetch_timeout)?;
        }
    }
    Ok(())
}

/// Poll the source in the background and print a status line whenever a new
/// reading arrives, until ctrl-c.
fn watch<D, S>(
    cli: &Cli,
    coordinator: &mut SyncCoordinator<D>,
    source: S,
    interval_secs: u64,
    fetch_timeout: Duration,
) -> eyre::Result<()>
where
    D: DeviceLink,
    S: SensorSource + Send + 'static,
{
    let poller = ReadingPoller::spawn(
        source,
        Duration::from_secs(interval_secs),
        fetch_timeout,
        MonotonicClock::new(),
    );

    let stop = Arc::new(AtomicBool::new(false));
    let stop_handler = stop.clone();
    ctrlc::set_handler(move || stop_handler.store(true, Ordering::SeqCst))
        .wrap_err("install ctrl-c handler")?;

    tracing::info!(interval_secs, "watching pond readings");
    while !stop.load(Ordering::SeqCst) {
        if let Some(reading) = poller.latest() {
            emit(&coordinator.status_report(cli.user, &reading));
        }
        std::thread::sleep(Duration::from_millis(250));
    }
    Ok(())
}

fn emit(msg: &str) {
    if JSON_MODE.get().copied().unwrap_or(false) {
        println!("{}", serde_json::json!({ "message": msg }));
    } else {
        println!("{msg}");
    }
}

fn init_tracing(cli: &Cli, logging: &pond_config::Logging) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, Layer, fmt};

    let level = logging.level.as_deref().unwrap_or(&cli.log_level);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Console output goes to stderr so replies on stdout stay machine-readable.
    let console = if cli.json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    let registry = tracing_subscriber::registry().with(filter).with(console);

    if let Some(file) = &logging.file {
        let path = std::path::Path::new(file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        let name = path.file_name().map_or_else(
            || std::ffi::OsString::from("pond.log"),
            std::ffi::OsStr::to_os_string,
        );
        let appender = match logging.rotation.as_deref() {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            Some("hourly") => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        registry
            .with(fmt::layer().json().with_ansi(false).with_writer(writer))
            .init();
    } else {
        registry.init();
    }
}
