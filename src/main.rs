use clap::Parser;
use std::process;
use tenhou_log_urls::config::DEFAULT_CONFIG_FILE;
use tenhou_log_urls::{
    logging, Cli, LogUrlsError, OutputFormatter, OutputMode, TenhouLogUrls, UserFriendlyError,
};

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbosity_level()) {
        eprintln!("Warning: {}", e);
    }

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match TenhouLogUrls::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    let paths = cli.resolve_directories(app.config());

    match app.collect(&paths, cli.dry_run) {
        Ok(report) => {
            app.output_formatter()
                .print_extraction_report(&report, app.config().output.preview_count);
            0
        }
        Err(e) => {
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

/// Early-return outcomes are reported but still exit 0.
fn exit_code_for(error: &LogUrlsError) -> i32 {
    match error {
        e if e.is_graceful() => 0,
        LogUrlsError::Config { .. } | LogUrlsError::InvalidPattern { .. } => 2,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

    match TenhouLogUrls::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  tenhou-log-urls --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &LogUrlsError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
