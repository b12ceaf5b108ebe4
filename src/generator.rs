//! The three scaffolding commands: `init`, `module-new` and `docs-generate`.

use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::constants::{
    CONFIG_DIR, DATABASE_FILE, DOCS_FILE, ERROR_HANDLER_FILE, EXAMPLE_MODULE, ROUTER_FILE,
    SERVER_FILE,
};
use crate::descriptor::{validate_project_name, ModuleDescriptor};
use crate::docs::{docs_options, mount_docs, scan_project};
use crate::error::{Error, Result};
use crate::ignore::build_ignore_set;
use crate::installer::PackageManager;
use crate::materializer::Materializer;
use crate::registry::{register, Registration, RegistryDocument};
use crate::templates::{GeneratedFile, TemplateLibrary};

/// What `generate_docs` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsReport {
    pub models: Vec<String>,
    pub routes: Vec<PathBuf>,
    /// The docs packages failed to install; the remaining steps still ran
    pub install_failed: bool,
    /// `app.js` was changed; `false` when the docs UI was already mounted
    pub server_patched: bool,
}

/// Runs scaffolding commands against an explicit root directory.
///
/// For `init` the root is the directory the project is created in; for the
/// other commands it is the project itself.
pub struct Generator<'a> {
    templates: TemplateLibrary<'a>,
    packages: &'a dyn PackageManager,
    root: PathBuf,
}

impl<'a> Generator<'a> {
    pub fn new<P: Into<PathBuf>>(
        templates: TemplateLibrary<'a>,
        packages: &'a dyn PackageManager,
        root: P,
    ) -> Self {
        Self { templates, packages, root: root.into() }
    }

    /// Creates `<root>/<project_name>` with the full skeleton and the example module.
    ///
    /// # Errors
    /// * `Error::ValidationError` for an unusable project name
    /// * `Error::TargetExistsError` if the project directory exists
    /// * `Error::SubprocessError` if the package manager fails; nothing after
    ///   that step is written
    pub fn init_project(&self, project_name: &str) -> Result<PathBuf> {
        validate_project_name(project_name)?;

        let project_dir = Materializer::new(&self.root).create_directory(project_name)?;
        info!("Initializing project in {}", project_dir.display());

        self.packages.init(&project_dir)?;
        self.packages.install(&project_dir, &self.templates.config().dependencies)?;

        let project = Materializer::new(&project_dir);
        let example = ModuleDescriptor::new(EXAMPLE_MODULE)?;
        let mut router = RegistryDocument::parse(&self.templates.router_shell()?)?;
        router.register(&example.name);

        project.write_all(&[
            GeneratedFile { path: SERVER_FILE.into(), content: self.templates.server_bootstrap()? },
            GeneratedFile { path: ROUTER_FILE.into(), content: router.to_text() },
            GeneratedFile {
                path: ERROR_HANDLER_FILE.into(),
                content: self.templates.error_handler()?,
            },
        ])?;

        project.create_directory(CONFIG_DIR)?;
        project.write_all(&[GeneratedFile {
            path: Path::new(CONFIG_DIR).join(DATABASE_FILE),
            content: self.templates.database_config(project_name)?,
        }])?;

        project.create_directory(&example.name)?;
        project.write_all(&self.templates.module_files(&example)?)?;

        println!("Project '{}' created in {}.", project_name, project_dir.display());
        Ok(project_dir)
    }

    /// Writes a module quartet and registers its route in `app.route.js`.
    ///
    /// # Errors
    /// * `Error::ValidationError` for an unusable module name
    /// * `Error::ProjectNotFoundError` if the root has no `app.route.js`;
    ///   checked before anything is written
    /// * `Error::TargetExistsError` if the module directory exists
    /// * `Error::MalformedDocumentError` if the router has no export line;
    ///   the module files have already been written at that point
    pub fn new_module(&self, module_name: &str) -> Result<Registration> {
        let module = ModuleDescriptor::new(module_name)?;
        let project = Materializer::new(&self.root);

        let router_path = project.resolve(ROUTER_FILE);
        if !router_path.is_file() {
            return Err(Error::ProjectNotFoundError { path: router_path.display().to_string() });
        }

        project.create_directory(&module.name)?;
        project.write_all(&self.templates.module_files(&module)?)?;

        let registration = register(&module.name, &project.read_file(ROUTER_FILE)?)
            .inspect_err(|e| error!("Module '{}' was written but not registered: {}", module.name, e))?;
        match &registration {
            Registration::Added(text) => {
                project.write_file(ROUTER_FILE, text)?;
                println!("update: '{}'", router_path.display());
            }
            Registration::AlreadyRegistered => {
                warn!("'{}' is already registered in {}, leaving it unchanged", module.name, ROUTER_FILE);
            }
        }
        Ok(registration)
    }

    /// Installs the docs toolkit, writes `swagger.js` and mounts the docs UI in `app.js`.
    ///
    /// A failed install is logged and the remaining steps still run.
    ///
    /// # Errors
    /// * `Error::ProjectNotFoundError` if the root has no `app.js`
    /// * `Error::MalformedDocumentError` if `app.js` has no `app.listen(` line
    pub fn generate_docs(&self) -> Result<DocsReport> {
        let config = self.templates.config();
        let project = Materializer::new(&self.root);

        let server_path = project.resolve(SERVER_FILE);
        if !server_path.is_file() {
            return Err(Error::ProjectNotFoundError { path: server_path.display().to_string() });
        }

        let install_failed = match self.packages.install(&self.root, &config.docs.dependencies) {
            Ok(()) => false,
            Err(e) => {
                error!("Installing documentation packages failed, continuing: {}", e);
                true
            }
        };

        let ignore = build_ignore_set(&config.docs.exclude)?;
        let scan = scan_project(&self.root, &ignore)?;
        info!("Found {} model(s) and {} route file(s)", scan.models.len(), scan.routes.len());

        let docs = self.templates.docs_config(&docs_options(config, &scan))?;
        project.write_all(&[GeneratedFile { path: DOCS_FILE.into(), content: docs }])?;

        let server_patched = match mount_docs(&project.read_file(SERVER_FILE)?, &config.docs.path)? {
            Some(text) => {
                project.write_file(SERVER_FILE, &text)?;
                println!("update: '{}'", server_path.display());
                true
            }
            None => {
                info!("Documentation UI is already mounted in {}", SERVER_FILE);
                false
            }
        };

        Ok(DocsReport {
            models: scan.models.keys().cloned().collect(),
            routes: scan.routes,
            install_failed,
            server_patched,
        })
    }
}
