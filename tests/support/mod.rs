//! Fakes for the pipeline's external seams
//!
//! The fake tool runner reproduces the on-disk side effects the
//! pipeline relies on (the generator tools create the subproject
//! skeletons) and records every invocation for ordering assertions.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use stackgen_pipeline::{BoilerplateFetcher, PipelineError};
use stackgen_process::{ProcessConfig, ToolOutput, ToolRunner};

/// Tool runner that simulates `uv init` and `npm create vite` and
/// records every command line it sees.
pub struct FakeToolRunner {
    invocations: Mutex<Vec<String>>,
}

impl FakeToolRunner {
    pub fn new() -> Self {
        Self {
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Every invocation so far, as `command arg arg ...` lines
    pub fn commands(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolRunner for FakeToolRunner {
    async fn run(&self, config: ProcessConfig) -> stackgen_process::Result<ToolOutput> {
        let line = format!("{} {}", config.command, config.args.join(" "));
        self.invocations.lock().unwrap().push(line);

        let cwd = config
            .working_dir
            .clone()
            .expect("pipeline tool invocations set a working directory");
        match (config.command.as_str(), config.args.first().map(String::as_str)) {
            ("uv", Some("init")) => scaffold_uv_project(&cwd, &config.args),
            ("npm", Some("create")) => scaffold_vite_project(&cwd, &config.args),
            _ => {}
        }

        Ok(ToolOutput {
            code: 0,
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

fn arg_after(args: &[String], flag: &str) -> String {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
        .unwrap_or_else(|| panic!("missing {flag} argument"))
}

/// Minimal imitation of the tree `uv init --package --build-backend
/// poetry` produces.
fn scaffold_uv_project(cwd: &Path, args: &[String]) {
    let name = arg_after(args, "--package");
    let python = arg_after(args, "--python");
    let package = name.replace('-', "_").to_lowercase();

    let root = cwd.join(&name);
    fs::create_dir_all(root.join("src").join(&package)).unwrap();
    fs::write(
        root.join("src").join(&package).join("__init__.py"),
        format!("def main() -> None:\n    print(\"Hello from {name}!\")\n"),
    )
    .unwrap();
    fs::write(
        root.join("pyproject.toml"),
        format!(
            concat!(
                "[project]\n",
                "name = \"{name}\"\n",
                "version = \"0.1.0\"\n",
                "description = \"Add your description here\"\n",
                "requires-python = \">={python}\"\n",
                "dependencies = []\n",
                "\n",
                "[build-system]\n",
                "requires = [\"poetry-core>=2.0.0,<3.0.0\"]\n",
                "build-backend = \"poetry.core.masonry.api\"\n",
            ),
            name = name,
            python = python,
        ),
    )
    .unwrap();
    fs::write(root.join("README.md"), format!("# {name}\n")).unwrap();
}

/// Minimal imitation of the tree `npm create vite@latest -- --template
/// vue|vue-ts` produces.
fn scaffold_vite_project(cwd: &Path, args: &[String]) {
    let name = args.get(2).expect("npm create passes the app name").clone();
    let template = arg_after(args, "--template");
    let typescript = template == "vue-ts";

    let root = cwd.join(&name);
    let src = root.join("src");
    fs::create_dir_all(src.join("components")).unwrap();
    fs::create_dir_all(src.join("assets")).unwrap();

    fs::write(
        root.join("index.html"),
        concat!(
            "<!doctype html>\n",
            "<html lang=\"en\">\n",
            "  <head>\n",
            "    <meta charset=\"UTF-8\" />\n",
            "    <title>Vite App</title>\n",
            "  </head>\n",
            "  <body>\n",
            "    <div id=\"app\"></div>\n",
            "  </body>\n",
            "</html>\n",
        ),
    )
    .unwrap();
    fs::write(
        root.join("package.json"),
        format!("{{\n  \"name\": \"{name}\",\n  \"private\": true\n}}\n"),
    )
    .unwrap();

    let vite_config = if typescript {
        "vite.config.ts"
    } else {
        "vite.config.js"
    };
    fs::write(
        root.join(vite_config),
        concat!(
            "import { defineConfig } from \"vite\";\n",
            "import vue from \"@vitejs/plugin-vue\";\n",
            "\n",
            "// https://vite.dev/config/\n",
            "export default defineConfig({\n",
            "  plugins: [vue()],\n",
            "});\n",
        ),
    )
    .unwrap();

    let entry = if typescript { "main.ts" } else { "main.js" };
    fs::write(
        src.join(entry),
        concat!(
            "import { createApp } from 'vue'\n",
            "import './style.css'\n",
            "import App from './App.vue'\n",
            "\n",
            "createApp(App).mount('#app')\n",
        ),
    )
    .unwrap();
    fs::write(src.join("style.css"), ":root { color-scheme: light dark; }\n").unwrap();
    fs::write(
        src.join("App.vue"),
        concat!(
            "<script setup>\n",
            "import HelloWorld from './components/HelloWorld.vue'\n",
            "</script>\n",
            "\n",
            "<template>\n",
            "  <img src=\"./assets/vue.svg\" class=\"logo\" alt=\"Vue logo\" />\n",
            "  <HelloWorld msg=\"Vite + Vue\" />\n",
            "</template>\n",
        ),
    )
    .unwrap();
    fs::write(
        src.join("components/HelloWorld.vue"),
        concat!(
            "<script setup>\n",
            "defineProps({ msg: String })\n",
            "</script>\n",
            "\n",
            "<template>\n",
            "  <h1>{{ msg }}</h1>\n",
            "</template>\n",
        ),
    )
    .unwrap();
    fs::write(src.join("assets/vue.svg"), "<svg></svg>\n").unwrap();

    if typescript {
        fs::write(
            root.join("tsconfig.app.json"),
            concat!(
                "{\n",
                "  \"extends\": \"@vue/tsconfig/tsconfig.dom.json\",\n",
                "  \"compilerOptions\": {\n",
                "    \"noEmit\": true\n",
                "  },\n",
                "  \"include\": [\"src/**/*\"]\n",
                "}\n",
            ),
        )
        .unwrap();
    }
}

/// Fetcher returning canned ignore-file text, including the `.env.*`
/// entries the pipeline must strip.
pub struct FakeFetcher;

#[async_trait]
impl BoilerplateFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> stackgen_pipeline::Result<String> {
        if url.contains("Python") {
            Ok("__pycache__/\n.env\n.env.local\ndist/\n".to_string())
        } else {
            Ok("node_modules/\n.env.local\n.env.production\ndist\n".to_string())
        }
    }
}

/// Fetcher that always fails, for failure-path tests
pub struct FailingFetcher;

#[async_trait]
impl BoilerplateFetcher for FailingFetcher {
    async fn fetch(&self, url: &str) -> stackgen_pipeline::Result<String> {
        Err(PipelineError::Fetch {
            url: url.to_string(),
            message: "network unavailable".to_string(),
        })
    }
}
