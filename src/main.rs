//! exgen's main application entry point.
//! Parses the command line, loads the configuration and dispatches to the
//! matching generator command.

use exgen::{
    cli::{get_args, Args, Commands},
    config::get_config,
    error::{default_error_handler, Result},
    generator::Generator,
    installer::{CommandPackageManager, PackageManager, SkipPackageManager},
    logger::init_logger,
    registry::Registration,
    renderer::MiniJinjaRenderer,
    templates::TemplateLibrary,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the configuration from `--config` or the root directory
/// 2. Picks the package manager (or none with `--skip-install`)
/// 3. Runs the requested command
fn run(args: Args) -> Result<()> {
    let config = get_config(&args.root, args.config.as_deref())?;
    let engine = MiniJinjaRenderer::new();
    let templates = TemplateLibrary::new(&engine, &config);

    let packages: Box<dyn PackageManager> = if args.skip_install {
        Box::new(SkipPackageManager)
    } else {
        Box::new(CommandPackageManager::new(&config.package_manager))
    };

    let generator = Generator::new(templates, &*packages, &args.root);

    match args.command {
        Commands::Init { project_name } => {
            generator.init_project(&project_name)?;
        }
        Commands::ModuleNew { module_name } => match generator.new_module(&module_name)? {
            Registration::Added(_) => println!("Module '{module_name}' created."),
            Registration::AlreadyRegistered => {
                println!("Module '{module_name}' created; its route was already registered.")
            }
        },
        Commands::DocsGenerate => {
            let report = generator.generate_docs()?;
            if report.install_failed {
                println!("Documentation packages were not installed, install them manually.");
            }
            println!(
                "Documentation generated for {} model(s) and {} route file(s).",
                report.models.len(),
                report.routes.len()
            );
        }
    }
    Ok(())
}
