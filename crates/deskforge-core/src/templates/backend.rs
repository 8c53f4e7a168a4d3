//! Backend flavors and the fragments each one contributes

use super::OsFamily;
use clap::ValueEnum;
use std::fmt;

/// Backend flavor baked into a generated project.
///
/// Each flavor contributes exactly one source file, one
/// dependency-manifest fragment, and one start command per OS family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Minimal Node HTTP responder, no extra dependencies.
    Node,
    /// Python web service (Flask).
    Python,
    /// Go web service (net/http).
    Go,
}

impl Backend {
    pub fn display_name(&self) -> &'static str {
        match self {
            Backend::Node => "Node (minimal HTTP responder)",
            Backend::Python => "Python (Flask service)",
            Backend::Go => "Go (net/http service)",
        }
    }

    /// Relative path of the backend source file.
    pub fn source_path(&self) -> &'static str {
        match self {
            Backend::Node => "backend/server.js",
            Backend::Python => "backend/app.py",
            Backend::Go => "backend/main.go",
        }
    }

    /// Backend source file content.
    pub fn source(&self, project_name: &str) -> String {
        let template = match self {
            Backend::Node => NODE_SERVER,
            Backend::Python => PYTHON_APP,
            Backend::Go => GO_MAIN,
        };
        template.replace("{{project}}", project_name)
    }

    /// Relative path of the backend dependency-manifest fragment.
    pub fn manifest_path(&self) -> &'static str {
        match self {
            Backend::Node => "backend/package.json",
            Backend::Python => "backend/requirements.txt",
            Backend::Go => "backend/go.mod",
        }
    }

    /// Backend dependency-manifest fragment content.
    pub fn manifest(&self, npm_name: &str) -> String {
        match self {
            Backend::Node => format!(
                "{{\n  \"name\": \"{}-backend\",\n  \"version\": \"1.0.0\",\n  \"private\": true\n}}\n",
                npm_name
            ),
            Backend::Python => "flask>=3.0\n".to_string(),
            Backend::Go => format!("module {}/backend\n\ngo 1.22\n", npm_name),
        }
    }

    /// Command the generated start script uses to launch this backend.
    pub fn start_command(&self, os: OsFamily) -> &'static str {
        match (self, os) {
            (Backend::Node, _) => "node backend/server.js",
            (Backend::Python, OsFamily::Posix) => "python3 backend/app.py",
            (Backend::Python, OsFamily::Windows) => "python backend\\app.py",
            (Backend::Go, OsFamily::Posix) => "go run backend/main.go",
            (Backend::Go, OsFamily::Windows) => "go run backend\\main.go",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

const NODE_SERVER: &str = r#"const http = require('http');

const port = process.env.BACKEND_PORT || 7074;

const server = http.createServer((req, res) => {
  res.writeHead(200, { 'Content-Type': 'application/json' });
  res.end(JSON.stringify({ app: '{{project}}', status: 'ok' }));
});

server.listen(port, '127.0.0.1', () => {
  console.log(`[{{project}}] backend listening on http://127.0.0.1:${port}`);
});
"#;

const PYTHON_APP: &str = r#"import os

from flask import Flask, jsonify

app = Flask(__name__)


@app.route("/")
def status():
    return jsonify(app="{{project}}", status="ok")


if __name__ == "__main__":
    app.run(host="127.0.0.1", port=int(os.environ.get("BACKEND_PORT", "7074")))
"#;

const GO_MAIN: &str = r#"package main

import (
	"encoding/json"
	"log"
	"net/http"
	"os"
)

func main() {
	port := os.Getenv("BACKEND_PORT")
	if port == "" {
		port = "7074"
	}

	http.HandleFunc("/", func(w http.ResponseWriter, r *http.Request) {
		w.Header().Set("Content-Type", "application/json")
		json.NewEncoder(w).Encode(map[string]string{"app": "{{project}}", "status": "ok"})
	})

	log.Printf("[{{project}}] backend listening on http://127.0.0.1:%s", port)
	log.Fatal(http.ListenAndServe("127.0.0.1:"+port, nil))
}
"#;
