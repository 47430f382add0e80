use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cnfdiff::{
    find_config_file, generate_init_file, load_config, merge_compare_options, run_diff,
    run_template, should_use_colors, CliCompareOptions, CnfdiffToml, OutputContext, OutputMode,
};

#[derive(Parser)]
#[command(name = "cnfdiff")]
#[command(version, about = "Normalize and compare MySQL/INI configuration files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a JSON template from a configuration file
    Template {
        /// Path to the MySQL/INI configuration file
        config_file: PathBuf,

        /// Path to the output JSON file
        json_file: PathBuf,

        /// Exclude an extra parameter by name (repeatable)
        #[arg(long, value_name = "KEY")]
        exclude: Vec<String>,

        /// Keep parameters on the builtin denylist (ports, paths, hosts)
        #[arg(long)]
        no_builtin_excludes: bool,

        /// Specify config file path (overrides auto-discovery)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Compare two configuration files or JSON templates
    Diff {
        /// First file (configuration file or JSON template)
        file1: PathBuf,

        /// Second file (configuration file or JSON template)
        file2: PathBuf,

        /// Also list matching parameters
        #[arg(short, long)]
        matches: bool,

        /// Show a unified diff of the canonical renderings instead
        #[arg(short, long)]
        diff: bool,

        /// Output only the names of differing parameters
        #[arg(short, long)]
        quiet: bool,

        /// Exclude an extra parameter by name (repeatable)
        #[arg(long, value_name = "KEY")]
        exclude: Vec<String>,

        /// Keep parameters on the builtin denylist (ports, paths, hosts)
        #[arg(long)]
        no_builtin_excludes: bool,

        /// Force colored output
        #[arg(long)]
        color: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Specify config file path (overrides auto-discovery)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Generate a template cnfdiff.toml configuration file
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Init => handle_init(),
        Command::Template {
            config_file,
            json_file,
            exclude,
            no_builtin_excludes,
            config,
        } => {
            let toml_config = load_configuration(&config, false);
            let cli_options = CliCompareOptions {
                exclude,
                no_builtin_excludes: no_builtin_excludes.then_some(true),
                show_matches: None,
            };
            let options =
                merge_compare_options(&cli_options, toml_config.as_ref().map(|c| &c.compare));

            let ctx = OutputContext::new(
                OutputMode::Normal,
                should_use_colors(false, false),
                false,
            );

            match run_template(&config_file, &json_file, options.excludes, &ctx) {
                Ok(()) => {
                    println!("JSON template written to {}", json_file.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::from(1)
                }
            }
        }
        Command::Diff {
            file1,
            file2,
            matches,
            diff,
            quiet,
            exclude,
            no_builtin_excludes,
            color,
            no_color,
            config,
        } => {
            let toml_config = load_configuration(&config, quiet);
            let cli_options = CliCompareOptions {
                exclude,
                no_builtin_excludes: no_builtin_excludes.then_some(true),
                show_matches: matches.then_some(true),
            };
            let options =
                merge_compare_options(&cli_options, toml_config.as_ref().map(|c| &c.compare));

            let mode = if quiet {
                OutputMode::Quiet
            } else if diff {
                OutputMode::Diff
            } else {
                OutputMode::Normal
            };
            let ctx = OutputContext::new(
                mode,
                should_use_colors(color, no_color),
                options.show_matches,
            );

            let result = run_diff(&file1, &file2, &options, &ctx);
            if result.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
    }
}

fn handle_init() -> ExitCode {
    match generate_init_file() {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn load_configuration(explicit_path: &Option<PathBuf>, quiet: bool) -> Option<CnfdiffToml> {
    let config_path = explicit_path.clone().or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|d| find_config_file(&d))
    });

    config_path.and_then(|p| match load_config(&p) {
        Ok(config) => {
            if !quiet {
                eprintln!("Using config: {}", p.display());
            }
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: Failed to load {}: {}", p.display(), e);
            None
        }
    })
}
