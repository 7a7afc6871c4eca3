use std::process;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};
use unshell::cli::{execute_command, output, CliError, Invocation};
use unshell::config::Settings;
use unshell::infrastructure::ServiceContainer;

fn main() {
    let invocation = Invocation::from_process();
    let cli = invocation.parse();

    setup_logging(cli.debug);

    let settings = match Settings::load(&invocation.env) {
        Ok(settings) => settings,
        Err(e) => fail(CliError::from(e)),
    };
    tracing::debug!("settings: {:?}", settings);

    let container = ServiceContainer::new(settings, invocation.env);
    if let Err(e) = execute_command(&cli, &container) {
        fail(e);
    }
}

fn fail(e: CliError) -> ! {
    output::error(&e);
    process::exit(e.exit_code());
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Only our own spans and events
    let crate_filter = filter_fn(|metadata| metadata.target().starts_with("unshell"));

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(crate_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
