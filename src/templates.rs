//! The fixed Express/Sequelize skeleton emitted by `init` and `module-new`.
//!
//! Each artifact is a MiniJinja source rendered against a small JSON context.
//! Nothing in here touches the filesystem.

use crate::config::Config;
use crate::constants::{CONTROLLER_SUFFIX, MODEL_SUFFIX, ROUTE_SUFFIX, SERVICE_SUFFIX};
use crate::descriptor::ModuleDescriptor;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use std::path::PathBuf;

const SERVER_BOOTSTRAP: &str = r#"const express = require('express');
const routes = require('./app.route');

const app = express();
const PORT = process.env.PORT || {{ port }};

app.use(express.json());
app.use('{{ api_prefix }}', routes);

app.use((err, req, res, next) => {
  res.status(err.statusCode || 500).json({
    success: false,
    message: err.message || 'Internal Server Error',
    stack: process.env.NODE_ENV === 'development' ? err.stack : undefined,
  });
});

app.listen(PORT, () => {
  console.log(`Server is running on port ${PORT}`);
});
"#;

/// Router with no modules registered; `init` registers the example module into it.
const ROUTER_SHELL: &str = r#"const express = require('express');
const router = express.Router();

module.exports = router;
"#;

const ERROR_HANDLER: &str = r#"class AsyncHandler {
  static handle(fn) {
    return (req, res, next) => {
      Promise.resolve(fn(req, res, next)).catch(next);
    };
  }
}

module.exports = AsyncHandler;
"#;

const DATABASE_CONFIG: &str = r#"const { Sequelize } = require('sequelize');

const sequelize = new Sequelize({{ name|tojson }}, {{ username|tojson }}, {{ password|tojson }}, {
  host: {{ host|tojson }},
  dialect: {{ dialect|tojson }},
});

module.exports = sequelize;
"#;

const MODEL: &str = r#"const { DataTypes } = require('sequelize');
const sequelize = require('../config/database');

const {{ capitalized }} = sequelize.define('{{ capitalized }}', {
  name: {
    type: DataTypes.STRING,
    allowNull: false,
  },
});

module.exports = {{ capitalized }};
"#;

const CONTROLLER: &str = r#"const {{ capitalized }} = require('./{{ name }}.model');

exports.getAll{{ capitalized }}s = async (req, res) => {
  const {{ name }}s = await {{ capitalized }}.findAll();
  res.status(200).json({ success: true, payload: { {{ name }}s } });
};
"#;

const SERVICE: &str = r#"const {{ capitalized }} = require('./{{ name }}.model');

exports.create{{ capitalized }} = async (data) => {
  return await {{ capitalized }}.create(data);
};

exports.findAll{{ capitalized }}s = async () => {
  return await {{ capitalized }}.findAll();
};
"#;

const ROUTE: &str = r#"const express = require('express');
const AsyncHandler = require('../error-handler');
const {{ name }}Controller = require('./{{ name }}.controller');

const router = express.Router();

/**
 * @openapi
 * /{{ name }}:
 *   get:
 *     summary: List every {{ capitalized }}
 *     responses:
 *       200:
 *         description: All {{ capitalized }} records
 */
router.get('/', AsyncHandler.handle({{ name }}Controller.getAll{{ capitalized }}s));

module.exports = router;
"#;

const DOCS_CONFIG: &str = r#"const swaggerJsdoc = require('swagger-jsdoc');

const options = {{ options }};

module.exports = swaggerJsdoc(options);
"#;

/// A file produced by the template library, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Renders every artifact kind of the generated skeleton.
pub struct TemplateLibrary<'a> {
    renderer: &'a dyn TemplateRenderer,
    config: &'a Config,
}

impl<'a> TemplateLibrary<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer, config: &'a Config) -> Self {
        Self { renderer, config }
    }

    /// `app.js`: the Express server with the aggregate router mounted.
    pub fn server_bootstrap(&self) -> Result<String> {
        self.renderer.render(
            SERVER_BOOTSTRAP,
            &serde_json::json!({
                "port": self.config.server.port,
                "api_prefix": self.config.server.api_prefix,
            }),
        )
    }

    /// `app.route.js` before any module is registered.
    pub fn router_shell(&self) -> Result<String> {
        self.renderer.render(ROUTER_SHELL, &serde_json::json!({}))
    }

    /// `error-handler.js`: the promise wrapper used by every route.
    pub fn error_handler(&self) -> Result<String> {
        self.renderer.render(ERROR_HANDLER, &serde_json::json!({}))
    }

    /// `config/database.js`, falling back to the project name for the database.
    pub fn database_config(&self, project_name: &str) -> Result<String> {
        let database = &self.config.database;
        self.renderer.render(
            DATABASE_CONFIG,
            &serde_json::json!({
                "name": database.name.as_deref().unwrap_or(project_name),
                "username": database.username,
                "password": database.password,
                "host": database.host,
                "dialect": database.dialect,
            }),
        )
    }

    pub fn model(&self, module: &ModuleDescriptor) -> Result<String> {
        self.renderer.render(MODEL, &module.context())
    }

    pub fn controller(&self, module: &ModuleDescriptor) -> Result<String> {
        self.renderer.render(CONTROLLER, &module.context())
    }

    pub fn service(&self, module: &ModuleDescriptor) -> Result<String> {
        self.renderer.render(SERVICE, &module.context())
    }

    pub fn route(&self, module: &ModuleDescriptor) -> Result<String> {
        self.renderer.render(ROUTE, &module.context())
    }

    /// The model/controller/service/route quartet under `<name>/`.
    pub fn module_files(&self, module: &ModuleDescriptor) -> Result<Vec<GeneratedFile>> {
        let dir = PathBuf::from(&module.name);
        let file = |suffix: &str, content: String| GeneratedFile {
            path: dir.join(format!("{}{}", module.name, suffix)),
            content,
        };

        Ok(vec![
            file(MODEL_SUFFIX, self.model(module)?),
            file(CONTROLLER_SUFFIX, self.controller(module)?),
            file(SERVICE_SUFFIX, self.service(module)?),
            file(ROUTE_SUFFIX, self.route(module)?),
        ])
    }

    /// `swagger.js` exporting the swagger-jsdoc specification.
    ///
    /// # Arguments
    /// * `options` - swagger-jsdoc options object (definition and `apis` globs)
    pub fn docs_config(&self, options: &serde_json::Value) -> Result<String> {
        let options = serde_json::to_string_pretty(options)
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        self.renderer.render(DOCS_CONFIG, &serde_json::json!({ "options": options }))
    }

    pub fn config(&self) -> &Config {
        self.config
    }
}
