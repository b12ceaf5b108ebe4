//! Command-line interface implementation for exgen.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for exgen.
#[derive(Parser, Debug)]
#[command(author, version, about = "exgen: Express and Sequelize project scaffolding tool", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory the command operates in (the parent directory for `init`,
    /// the project itself for the other commands)
    #[arg(short = 'C', long = "root", value_name = "DIR", default_value = ".", global = true)]
    pub root: PathBuf,

    /// Configuration file to use instead of exgen.json / exgen.yml / exgen.yaml in the root
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Do not run the package manager
    #[arg(long, global = true)]
    pub skip_install: bool,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Initialize a new Node.js project with Express and Sequelize
    Init {
        /// Name of the project directory to create
        #[arg(value_name = "PROJECT_NAME")]
        project_name: String,
    },

    /// Create a new module and register its route
    ModuleNew {
        /// Name of the module (letters, digits and underscores)
        #[arg(value_name = "MODULE_NAME")]
        module_name: String,
    },

    /// Generate swagger documentation for the current project
    DocsGenerate,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument
                || e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
