use exgen::config::Config;
use exgen::error::{Error, Result};
use exgen::generator::Generator;
use exgen::installer::PackageManager;
use exgen::registry::Registration;
use exgen::renderer::MiniJinjaRenderer;
use exgen::templates::TemplateLibrary;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Records every call and optionally fails installs.
#[derive(Default)]
struct RecordingPackageManager {
    calls: RefCell<Vec<String>>,
    fail_install: bool,
}

impl PackageManager for RecordingPackageManager {
    fn init(&self, project_dir: &Path) -> Result<()> {
        assert!(project_dir.is_dir());
        self.calls.borrow_mut().push("init -y".to_string());
        Ok(())
    }

    fn install(&self, _project_dir: &Path, packages: &[String]) -> Result<()> {
        self.calls.borrow_mut().push(format!("install {}", packages.join(" ")));
        if self.fail_install {
            return Err(Error::SubprocessError {
                command: "npm install".to_string(),
                reason: "exited with exit status: 1".to_string(),
            });
        }
        Ok(())
    }
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap()
}

/// Creates `<temp>/shop` and returns its path.
fn init_shop(temp_dir: &TempDir) -> PathBuf {
    let engine = MiniJinjaRenderer::new();
    let config = Config::default();
    let packages = RecordingPackageManager::default();
    let generator = Generator::new(TemplateLibrary::new(&engine, &config), &packages, temp_dir.path());
    generator.init_project("shop").unwrap()
}

#[test_log::test]
fn test_init_project() {
    let temp_dir = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let config = Config::default();
    let packages = RecordingPackageManager::default();
    let generator = Generator::new(TemplateLibrary::new(&engine, &config), &packages, temp_dir.path());

    let project = generator.init_project("shop").unwrap();

    assert_eq!(project, temp_dir.path().join("shop"));
    assert_eq!(*packages.calls.borrow(), ["init -y", "install express sequelize mysql2"]);
    for file in [
        "app.js",
        "app.route.js",
        "error-handler.js",
        "config/database.js",
        "example/example.model.js",
        "example/example.controller.js",
        "example/example.service.js",
        "example/example.route.js",
    ] {
        assert!(project.join(file).is_file(), "{file} was not generated");
    }
    assert_eq!(
        read(&project, "app.route.js"),
        " const express = require('express');
 const router = express.Router();
 const exampleRoutes = require('./example/example.route');

 router.use('/example', exampleRoutes);
 module.exports = router;
"
    );
    assert!(read(&project, "config/database.js").contains(r#"new Sequelize("shop","#));
}

#[test]
fn test_init_project_existing_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("shop")).unwrap();
    let engine = MiniJinjaRenderer::new();
    let config = Config::default();
    let packages = RecordingPackageManager::default();
    let generator = Generator::new(TemplateLibrary::new(&engine, &config), &packages, temp_dir.path());

    assert!(matches!(generator.init_project("shop"), Err(Error::TargetExistsError { .. })));
    assert!(packages.calls.borrow().is_empty());
}

#[test]
fn test_init_project_install_failure_stops_generation() {
    let temp_dir = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let config = Config::default();
    let packages = RecordingPackageManager { fail_install: true, ..Default::default() };
    let generator = Generator::new(TemplateLibrary::new(&engine, &config), &packages, temp_dir.path());

    assert!(matches!(generator.init_project("shop"), Err(Error::SubprocessError { .. })));
    assert!(temp_dir.path().join("shop").is_dir());
    assert!(!temp_dir.path().join("shop/app.js").exists());
}

#[test]
fn test_init_project_invalid_name() {
    let temp_dir = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let config = Config::default();
    let packages = RecordingPackageManager::default();
    let generator = Generator::new(TemplateLibrary::new(&engine, &config), &packages, temp_dir.path());

    assert!(matches!(generator.init_project("../shop"), Err(Error::ValidationError(_))));
}

#[test_log::test]
fn test_new_module() {
    let temp_dir = TempDir::new().unwrap();
    let project = init_shop(&temp_dir);
    let engine = MiniJinjaRenderer::new();
    let config = Config::default();
    let packages = RecordingPackageManager::default();
    let generator = Generator::new(TemplateLibrary::new(&engine, &config), &packages, &project);

    assert!(matches!(generator.new_module("user").unwrap(), Registration::Added(_)));
    assert!(matches!(generator.new_module("order").unwrap(), Registration::Added(_)));

    assert!(project.join("user/user.route.js").is_file());
    assert!(project.join("order/order.model.js").is_file());
    assert_eq!(
        read(&project, "app.route.js"),
        " const express = require('express');
 const router = express.Router();
 const exampleRoutes = require('./example/example.route');
 const userRoutes = require('./user/user.route');
 const orderRoutes = require('./order/order.route');

 router.use('/example', exampleRoutes);
 router.use('/user', userRoutes);
 router.use('/order', orderRoutes);
 module.exports = router;
"
    );
    assert!(packages.calls.borrow().is_empty());
}

#[test]
fn test_new_module_twice_keeps_first_module() {
    let temp_dir = TempDir::new().unwrap();
    let project = init_shop(&temp_dir);
    let engine = MiniJinjaRenderer::new();
    let config = Config::default();
    let packages = RecordingPackageManager::default();
    let generator = Generator::new(TemplateLibrary::new(&engine, &config), &packages, &project);

    generator.new_module("user").unwrap();
    fs::write(project.join("user/user.service.js"), "// edited by hand\n").unwrap();
    let router = read(&project, "app.route.js");

    assert!(matches!(generator.new_module("user"), Err(Error::TargetExistsError { .. })));
    assert_eq!(read(&project, "user/user.service.js"), "// edited by hand\n");
    assert_eq!(read(&project, "app.route.js"), router);
}

#[test]
fn test_new_module_outside_project() {
    let temp_dir = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let config = Config::default();
    let packages = RecordingPackageManager::default();
    let generator = Generator::new(TemplateLibrary::new(&engine, &config), &packages, temp_dir.path());

    assert!(matches!(generator.new_module("user"), Err(Error::ProjectNotFoundError { .. })));
    assert!(!temp_dir.path().join("user").exists());
}

#[test]
fn test_new_module_already_registered() {
    let temp_dir = TempDir::new().unwrap();
    let project = init_shop(&temp_dir);
    let engine = MiniJinjaRenderer::new();
    let config = Config::default();
    let packages = RecordingPackageManager::default();
    let generator = Generator::new(TemplateLibrary::new(&engine, &config), &packages, &project);

    generator.new_module("user").unwrap();
    fs::remove_dir_all(project.join("user")).unwrap();
    let router = read(&project, "app.route.js");

    assert_eq!(generator.new_module("user").unwrap(), Registration::AlreadyRegistered);
    assert_eq!(read(&project, "app.route.js"), router);
}

#[test_log::test]
fn test_generate_docs() {
    let temp_dir = TempDir::new().unwrap();
    let project = init_shop(&temp_dir);
    fs::create_dir_all(project.join("node_modules/pkg")).unwrap();
    fs::write(project.join("node_modules/pkg/pkg.route.js"), "").unwrap();
    let engine = MiniJinjaRenderer::new();
    let config = Config::default();
    let packages = RecordingPackageManager::default();
    let generator = Generator::new(TemplateLibrary::new(&engine, &config), &packages, &project);
    generator.new_module("user").unwrap();

    let report = generator.generate_docs().unwrap();

    assert_eq!(report.models, ["example", "user"]);
    assert_eq!(
        report.routes,
        [PathBuf::from("example/example.route.js"), PathBuf::from("user/user.route.js")]
    );
    assert!(!report.install_failed);
    assert!(report.server_patched);
    assert_eq!(*packages.calls.borrow(), ["install swagger-jsdoc swagger-ui-express"]);

    let docs = read(&project, "swagger.js");
    assert!(docs.contains("\"./*/*.route.js\""));
    assert!(docs.contains("\"User\": {"));
    assert!(docs.contains("\"url\": \"/api\""));

    let app = read(&project, "app.js");
    let mount = app.find("app.use('/api-docs', swaggerUi.serve, swaggerUi.setup(swaggerSpec));").unwrap();
    let listen = app.find("app.listen(PORT").unwrap();
    assert!(mount < listen);

    let second = generator.generate_docs().unwrap();
    assert!(!second.server_patched);
    assert_eq!(read(&project, "app.js"), app);
}

#[test_log::test]
fn test_generate_docs_continues_after_install_failure() {
    let temp_dir = TempDir::new().unwrap();
    let project = init_shop(&temp_dir);
    let engine = MiniJinjaRenderer::new();
    let config = Config::default();
    let packages = RecordingPackageManager { fail_install: true, ..Default::default() };
    let generator = Generator::new(TemplateLibrary::new(&engine, &config), &packages, &project);

    let report = generator.generate_docs().unwrap();

    assert!(report.install_failed);
    assert!(report.server_patched);
    assert!(project.join("swagger.js").is_file());
}

#[test]
fn test_generate_docs_outside_project() {
    let temp_dir = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let config = Config::default();
    let packages = RecordingPackageManager::default();
    let generator = Generator::new(TemplateLibrary::new(&engine, &config), &packages, temp_dir.path());

    assert!(matches!(generator.generate_docs(), Err(Error::ProjectNotFoundError { .. })));
    assert!(packages.calls.borrow().is_empty());
}
