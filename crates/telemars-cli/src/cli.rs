//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the tm CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// tm - build Mediascope TV Index filters and run tasks
#[derive(Parser, Debug)]
#[command(name = "tm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Override API token (default: from env/config)
    #[arg(long, global = true, env = "TELEMARS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build an audience and print its label and expression
    Label {
        /// Age range, e.g. 25-45 or 18+
        #[arg(short, long)]
        age: Option<String>,

        /// Sex of the audience
        #[arg(short, long, value_enum)]
        sex: Option<SexArg>,

        /// Income levels 1-6 (comma-separated)
        #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(u32).range(1..=6))]
        income_level: Vec<u32>,

        /// Income groups A, B or C (comma-separated)
        #[arg(long, value_delimiter = ',')]
        income_group: Vec<char>,

        /// Children age bins 1-7 to require (comma-separated, 1 = no children)
        #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(u32).range(1..=7))]
        kids_age: Vec<u32>,

        /// Number of children in the household (comma-separated)
        #[arg(long, value_delimiter = ',', value_enum)]
        kids_num: Vec<KidsNumArg>,
    },

    /// Parse an audience label such as "W 25-50 IL 1-3"
    Parse {
        /// The label to parse
        label: String,
    },

    /// Compress integers into range notation
    Compress {
        /// Integers to compress
        #[arg(required = true)]
        values: Vec<u32>,
    },

    /// Run a task described in a TOML file
    Run {
        /// Path to the task file
        file: PathBuf,

        /// Seconds between task state checks (overrides config)
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Seconds to wait for the task (overrides config)
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration (default)
    Show,
    /// Print the config file path
    Path,
    /// Write a commented default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Audience sex
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SexArg {
    /// Men
    M,
    /// Women
    W,
}

/// Number of children
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KidsNumArg {
    Zero,
    One,
    Two,
    ThreePlus,
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["tm", "--json", "--no-color", "compress", "1"]).unwrap();
        assert!(cli.json);
        assert!(cli.no_color);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["tm", "-q", "-v", "compress", "1"]).is_err());
    }

    #[test]
    fn test_label_lists() {
        let cli = Cli::try_parse_from([
            "tm",
            "label",
            "--age",
            "25-45",
            "--sex",
            "w",
            "--income-level",
            "1,2,3",
            "--income-group",
            "A,B",
            "--kids-num",
            "one,three-plus",
        ])
        .unwrap();

        if let Commands::Label {
            age,
            sex,
            income_level,
            income_group,
            kids_age,
            kids_num,
        } = cli.command
        {
            assert_eq!(age.as_deref(), Some("25-45"));
            assert_eq!(sex, Some(SexArg::W));
            assert_eq!(income_level, vec![1, 2, 3]);
            assert_eq!(income_group, vec!['A', 'B']);
            assert!(kids_age.is_empty());
            assert_eq!(kids_num, vec![KidsNumArg::One, KidsNumArg::ThreePlus]);
        } else {
            panic!("Expected Label command");
        }
    }

    #[test]
    fn test_income_level_range() {
        assert!(Cli::try_parse_from(["tm", "label", "--income-level", "6"]).is_ok());
        assert!(Cli::try_parse_from(["tm", "label", "--income-level", "7"]).is_err());
        assert!(Cli::try_parse_from(["tm", "label", "--kids-age", "0"]).is_err());
    }

    #[test]
    fn test_compress_requires_values() {
        assert!(Cli::try_parse_from(["tm", "compress"]).is_err());
    }

    #[test]
    fn test_run_overrides() {
        let cli =
            Cli::try_parse_from(["tm", "run", "task.toml", "--poll-interval", "5"]).unwrap();
        if let Commands::Run {
            file,
            poll_interval,
            timeout,
        } = cli.command
        {
            assert_eq!(file, PathBuf::from("task.toml"));
            assert_eq!(poll_interval, Some(5));
            assert_eq!(timeout, None);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::try_parse_from(["tm", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: Some(ConfigCommands::Init { force: true })
            }
        ));
    }

    #[test]
    fn test_completions() {
        let cli = Cli::try_parse_from(["tm", "completions", "zsh"]).unwrap();
        if let Commands::Completions { shell } = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }
}
