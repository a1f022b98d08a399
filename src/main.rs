//! transonic command-line entry point

use clap::Parser;
use std::process;
use transonic::{
    app::App,
    cli::Cli,
    error::{AppError, ErrorReporter},
    output::{FormattingOptions, MessagePainter},
};

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        eprintln!("This is a bug in transonic; please report it with the command you ran.");
        process::exit(AppError::internal("panic").exit_code());
    }));

    let cli = Cli::parse();
    let use_color = cli.use_colors();
    let painter = MessagePainter::new(FormattingOptions {
        enable_color: use_color,
    });

    if let Err(message) = cli.validate() {
        let error = AppError::validation(message);
        eprintln!("{}", painter.error(&error.to_string()));
        process::exit(error.exit_code());
    }

    let verbose = cli.verbose || cli.debug;

    if let Err(e) = App::new(cli).run().await {
        if verbose {
            ErrorReporter::new(use_color, true).report_error(&e);
        } else {
            eprintln!("{}", painter.error(&e.to_string()));
        }
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check TRANSONIC_* variables and your .env file");
            eprintln!("  - --count must be between 1 and {}", transonic::defaults::MAX_COUNT);
            eprintln!("  - --concurrency must be at least 1");
        }
        AppError::Format(_) => {
            eprintln!();
            eprintln!("Output help:");
            eprintln!("  - Valid modes: {}", transonic::OutputStyle::names());
            eprintln!("  - See --help-topic modes");
        }
        AppError::ProbeExecution(_) => {
            eprintln!();
            eprintln!("Probe troubleshooting:");
            eprintln!("  - Make sure ping is installed and on PATH");
            eprintln!("  - Point --ping-program at a compatible binary");
            eprintln!("  - Check that the program is executable by this user");
        }
        _ => {}
    }
}
