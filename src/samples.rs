//! Starter content for an empty document root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>chainserve</title>
    <style>
        body { font-family: sans-serif; margin: 40px; }
        .info { background: #f0f0f0; padding: 20px; border-radius: 5px; }
    </style>
</head>
<body>
    <h1>It works!</h1>
    <div class="info">
        <p>This document root is served by chainserve:</p>
        <ul>
            <li>static files</li>
            <li>directory listings</li>
            <li>scripts</li>
        </ul>
        <p>Try <a href="/time.py">/time.py</a> or <a href="/info.py">/info.py</a>.</p>
    </div>
</body>
</html>
"#;

const TIME_PY: &str = r#"#!/usr/bin/env python3
from datetime import datetime

print("""<!DOCTYPE html>
<html>
<head><title>Current Time</title></head>
<body>
    <h1>Current Server Time</h1>
    <p>{}</p>
    <p><a href="/">Back</a></p>
</body>
</html>""".format(datetime.now().strftime("%Y-%m-%d %H:%M:%S")))
"#;

const INFO_PY: &str = r#"#!/usr/bin/env python3
import os
import sys

rows = [
    ("Python Version", sys.version),
    ("Working Directory", os.getcwd()),
    ("Path Info", os.environ.get("PATH_INFO", "Not set")),
    ("Server Name", os.environ.get("SERVER_NAME", "Not set")),
    ("Server Port", os.environ.get("SERVER_PORT", "Not set")),
]

print("<!DOCTYPE html>\n<html>\n<head><title>Server Info</title></head>\n<body>")
print("<h1>Server Information</h1>\n<table>")
for name, value in rows:
    print("<tr><th>{}</th><td>{}</td></tr>".format(name, value))
print('</table>\n<p><a href="/">Back</a></p>\n</body>\n</html>')
"#;

const SAMPLES: &[(&str, &str)] = &[
    ("index.html", INDEX_HTML),
    ("time.py", TIME_PY),
    ("info.py", INFO_PY),
];

/// Write the sample pages into `root`, skipping files that already exist.
///
/// Returns the paths that were written.
pub fn create_sample_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(root)?;
    let mut written = Vec::new();
    for (name, contents) in SAMPLES {
        let path = root.join(name);
        if path.exists() {
            continue;
        }
        fs::write(&path, contents)?;
        info!(path = %path.display(), "sample file created");
        written.push(path);
    }
    Ok(written)
}
