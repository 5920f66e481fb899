//! Embeds the `templates/` tree into the binary.
//! Emits `corpus.rs` into `OUT_DIR` with one `include_bytes!` entry per file,
//! sorted by slash-separated path.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

const TEMPLATES_DIR: &str = "templates";

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let templates_dir = manifest_dir.join(TEMPLATES_DIR);

    println!("cargo:rerun-if-changed={}", templates_dir.display());

    let mut entries: Vec<(String, PathBuf)> = Vec::new();
    for entry in WalkDir::new(&templates_dir).sort_by_file_name() {
        let entry = entry.unwrap();
        if !entry.file_type().is_file() {
            continue;
        }
        println!("cargo:rerun-if-changed={}", entry.path().display());
        entries.push((corpus_key(&templates_dir, entry.path()), entry.path().to_path_buf()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut generated = String::from("pub(crate) static ENTRIES: &[(&str, &[u8])] = &[\n");
    for (key, path) in &entries {
        let abs = path.display().to_string();
        generated.push_str(&format!("    ({key:?}, include_bytes!({abs:?})),\n"));
    }
    generated.push_str("];\n");

    fs::write(out_dir.join("corpus.rs"), generated).unwrap();
}

fn corpus_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap();
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
