use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::config::load_config;
use commands::label::LabelOptions;
use commands::run::RunOptions;
use commands::{CommandContext, CommandError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(text) => eprintln!("{text}"),
                    Err(_) => eprintln!("{error_json}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug for the
/// tm crates and everything else logs warnings only.
fn init_logging(cli: &Cli) {
    let default_filter = if cli.verbose {
        "warn,tm=debug,telemars_api=debug,telemars_filters=debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .compact()
        .with_env_filter(filter)
        .init();
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    match &cli.command {
        Commands::Label {
            age,
            sex,
            income_level,
            income_group,
            kids_age,
            kids_num,
        } => {
            let opts = LabelOptions {
                age: age.clone(),
                sex: *sex,
                income_level: income_level.clone(),
                income_group: income_group.clone(),
                kids_age: kids_age.clone(),
                kids_num: kids_num.clone(),
            };
            commands::label::execute(&ctx, &opts)
        }
        Commands::Parse { label } => commands::parse::execute(&ctx, label),
        Commands::Compress { values } => commands::compress::execute(&ctx, values),
        Commands::Run {
            file,
            poll_interval,
            timeout,
        } => {
            let token = resolve_token(cli)?;
            let opts = RunOptions {
                file: file.clone(),
                poll_interval: *poll_interval,
                timeout: *timeout,
            };
            commands::run::execute(&ctx, &opts, &token).await
        }
        Commands::Config { command } => match command {
            None | Some(ConfigCommands::Show) => commands::config::execute_show(&ctx),
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx),
            Some(ConfigCommands::Init { force }) => commands::config::execute_init(&ctx, *force),
        },
        Commands::Completions { shell } => Ok(commands::completions::execute(shell)?),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Api(telemars_api::error::Error::Task(_)) => "TASK_ERROR",
        CommandError::Api(telemars_api::error::Error::Filter(_)) => "FILTER_ERROR",
        CommandError::Api(_) => "API_ERROR",
        CommandError::TaskFile(_) => "TASK_FILE_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}

fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Filter(_) => 1,
        CommandError::TaskFile(_) => 1,
        CommandError::Json(_) => 1,
        CommandError::Api(err) => u8::try_from(err.exit_code()).unwrap_or(2),
        CommandError::Io(_) => 3,
        CommandError::Config(_) => 5,
    }
}

/// Resolves the API token with priority: flag > env > config.
///
/// The `--token` flag and the `TELEMARS_TOKEN` environment variable both
/// arrive through `cli.token`; the config file is consulted last.
fn resolve_token_optional(cli: &Cli) -> commands::Result<Option<String>> {
    if let Some(token) = &cli.token {
        return Ok(Some(token.clone()));
    }
    Ok(load_config()?.token)
}

/// Resolves the API token, failing with a hint when none is configured.
fn resolve_token(cli: &Cli) -> commands::Result<String> {
    resolve_token_optional(cli)?.ok_or_else(|| {
        CommandError::Config(
            "no API token: pass --token, set TELEMARS_TOKEN or add token to the config file"
                .to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    /// Helper to create a test CLI with specified token.
    fn cli_with_token(token: Option<String>) -> Cli {
        Cli {
            verbose: false,
            quiet: false,
            json: false,
            no_color: false,
            token,
            command: Commands::Compress { values: vec![1] },
        }
    }

    /// Runs `f` with `TM_CONFIG` pointing at `path`, restoring it afterwards.
    fn with_config<T>(path: &std::path::Path, f: impl FnOnce() -> T) -> T {
        let original = env::var("TM_CONFIG").ok();
        env::set_var("TM_CONFIG", path);
        let result = f();
        match original {
            Some(val) => env::set_var("TM_CONFIG", val),
            None => env::remove_var("TM_CONFIG"),
        }
        result
    }

    #[test]
    fn test_resolve_token_optional_from_flag() {
        let cli = cli_with_token(Some("flag-token".to_string()));
        let result = resolve_token_optional(&cli).unwrap();
        assert_eq!(result, Some("flag-token".to_string()));
    }

    #[test]
    #[serial]
    fn test_resolve_token_missing_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let cli = cli_with_token(None);
        let err = with_config(&path, || resolve_token(&cli)).unwrap_err();
        assert!(matches!(err, CommandError::Config(_)));
    }

    #[test]
    #[serial]
    fn test_resolve_token_optional_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "token = \"config-token\"\n").unwrap();

        let cli = cli_with_token(None);
        let result = with_config(&path, || resolve_token_optional(&cli)).unwrap();
        assert_eq!(result, Some("config-token".to_string()));
    }

    #[test]
    #[serial]
    fn test_resolve_token_optional_flag_overrides_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "token = \"config-token\"\n").unwrap();

        let cli = cli_with_token(Some("flag-token".to_string()));
        let result = with_config(&path, || resolve_token_optional(&cli)).unwrap();
        assert_eq!(result, Some("flag-token".to_string()));
    }

    #[test]
    fn test_error_codes() {
        let filter_err = CommandError::Filter(telemars_filters::FilterError::EmptyCollection {
            field: "locationId",
        });
        assert_eq!(error_code(&filter_err), "FILTER_ERROR");
        assert_eq!(exit_status(&filter_err), 1);

        let config_err = CommandError::Config("bad".to_string());
        assert_eq!(error_code(&config_err), "CONFIG_ERROR");
        assert_eq!(exit_status(&config_err), 5);
    }

    #[test]
    fn test_api_exit_codes_follow_error_kind() {
        let timeout = CommandError::Api(
            telemars_api::error::ApiError::Timeout {
                id: "t-1".to_string(),
                waited_secs: 600,
            }
            .into(),
        );
        assert_eq!(error_code(&timeout), "API_ERROR");
        assert_eq!(exit_status(&timeout), 6);

        let task = CommandError::from(telemars_api::error::TaskError::Invalid(
            "no slices".to_string(),
        ));
        assert_eq!(error_code(&task), "TASK_ERROR");
        assert_eq!(exit_status(&task), 1);
    }
}
