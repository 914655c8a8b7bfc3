use std::process;
use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use logroute_core::diagnostic::Diagnostic;
use logroute_core::exception::ExceptionFault;
use logroute_core::fault::Fault;
use logroute_core::level::{resolve_level, LogLevel};
use logroute_core::registry::{dispatch, registry};
use logroute_core::target::ConsoleTarget;
use logroute_core::{call_site, LogRequest};
use logroute_utils::{debug, init_logging, install, RoutingConfig};

/// Route log calls to named loggers with inferred levels.
#[derive(Parser, Debug)]
#[command(name = "logroute")]
#[command(version)]
#[command(about = "Route log calls to named loggers with inferred levels", long_about = None)]
struct Cli
{
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Emit one log call
    Emit(EmitArgs),
    /// Show the level table and what each level is inferred from
    Levels,
}

#[derive(clap::Args, Debug)]
struct EmitArgs
{
    /// Level to log at; `any` infers it from the other options
    #[arg(short, long, default_value = "any", value_parser = LogLevel::from_str)]
    level: LogLevel,
    /// Logger to route to (default: the application logger)
    #[arg(short = 'n', long)]
    logger: Option<String>,
    /// Module name recorded in the call site
    #[arg(short, long)]
    module: Option<String>,
    /// Attach a structured error with this domain
    #[arg(long)]
    error_domain: Option<String>,
    /// Code of the structured error
    #[arg(long, default_value_t = 0, requires = "error_domain")]
    error_code: i64,
    /// Error message; without a domain the error is attached as an opaque fault
    #[arg(long)]
    error_message: Option<String>,
    /// Context entry of the structured error, as key=value (repeatable)
    #[arg(long = "context", value_parser = parse_key_value, requires = "error_domain")]
    context: Vec<(String, String)>,
    /// Failure reason overlaid onto the error
    #[arg(long)]
    reason: Option<String>,
    /// Recovery suggestion overlaid onto the error
    #[arg(long)]
    suggestion: Option<String>,
    /// Attach an exception with this name
    #[arg(long)]
    exception: Option<String>,
    /// Reason of the exception
    #[arg(long, requires = "exception")]
    exception_reason: Option<String>,
    /// Where routed records are written
    #[arg(long, value_enum, default_value_t = Sink::Console)]
    sink: Sink,
    /// printf-style message format
    format: Option<String>,
    /// Arguments substituted into the format
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Sink
{
    /// Formatted text on stderr
    Console,
    /// Events on the `tracing` subscriber
    Tracing,
}

fn main()
{
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Emit(args) => run_emit(args),
        Commands::Levels => {
            print_levels();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run_emit(args: EmitArgs) -> Result<(), Box<dyn std::error::Error>>
{
    match args.sink {
        Sink::Tracing => {
            install()?;
        }
        Sink::Console => {
            // Internal diagnostics still go through tracing (reads RUST_LOG)
            init_logging()?;
            let console = ConsoleTarget::default().with_max_level(LogLevel::Any);
            registry().set_default_targets(vec![Arc::new(console)]);
            RoutingConfig::from_env()?.apply(registry());
        }
    }

    let mut here = call_site!();
    if let Some(module) = args.module {
        here = here.with_module(module);
    }

    let mut request = LogRequest::new(here).level(args.level).logger_name(args.logger.as_deref());

    if let Some(domain) = args.error_domain {
        let mut diagnostic = Diagnostic::new(domain, args.error_code, args.error_message.unwrap_or_default());
        for (key, value) in args.context {
            diagnostic = diagnostic.with_context(key, value);
        }
        request = request.error(diagnostic);
    } else if let Some(message) = args.error_message {
        request = request.error(Fault::opaque(message.as_str()));
    }
    if let Some(reason) = args.reason {
        request = request.reason(reason);
    }
    if let Some(suggestion) = args.suggestion {
        request = request.suggestion(suggestion);
    }

    if let Some(name) = args.exception {
        let mut exception = ExceptionFault::new(name);
        if let Some(reason) = args.exception_reason {
            exception = exception.with_reason(reason);
        }
        request = request.exception(exception.with_captured_backtrace());
    }

    if let Some(format) = args.format {
        request = request.format(format, args.args);
    }

    debug!(
        logger = request.target_logger().unwrap_or("application"),
        level = %request.resolved_level(),
        "Dispatching log call"
    );
    dispatch(request);
    Ok(())
}

fn print_levels()
{
    let inferred = [
        (resolve_level(LogLevel::Any, false, false, true), "an exception"),
        (resolve_level(LogLevel::Any, false, true, false), "an error"),
        (resolve_level(LogLevel::Any, true, false, false), "a message"),
        (resolve_level(LogLevel::Any, false, false, false), "nothing"),
    ];

    println!("{:<8} {:<8} INFERRED FROM", "LEVEL", "EMITTED");
    for level in LogLevel::ALL {
        let source = inferred
            .iter()
            .find(|(inferred_level, _)| *inferred_level == level)
            .map_or("-", |(_, source)| *source);
        let emitted = if level == LogLevel::Off || level == LogLevel::Any { "no" } else { "yes" };
        println!("{:<8} {emitted:<8} {source}", level.name());
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String>
{
    s.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}
