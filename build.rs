extern crate walkdir;

use std::env;
use std::fs::{self, DirBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// Stages the assets/ tree next to the compiled executable so that
// Resources::from_relative_exe_path("assets") resolves at run time.
fn main() {
    println!("cargo:rerun-if-changed=assets");

    let out_dir = env::var("OUT_DIR").unwrap();
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();

    let target_dir = match locate_profile_dir(Path::new(&out_dir)) {
        Some(dir) => dir,
        None => return,
    };

    copy_tree(
        &Path::new(&manifest_dir).join("assets"),
        &target_dir.join("assets"),
    );
}

// OUT_DIR is target/<profile>/build/<pkg>-<hash>/out; the profile dir is the
// parent of the "build" ancestor.
fn locate_profile_dir(out_dir: &Path) -> Option<PathBuf> {
    let mut dir = out_dir;
    while let Some(parent) = dir.parent() {
        if dir.file_name().map(|n| n == "build").unwrap_or(false) {
            return Some(parent.to_path_buf());
        }
        dir = parent;
    }
    None
}

fn copy_tree(from: &Path, to: &Path) {
    for entry in WalkDir::new(from).into_iter().filter_map(|e| e.ok()) {
        let rel = match entry.path().strip_prefix(from) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let dest = to.join(rel);

        if entry.file_type().is_dir() {
            let _ = DirBuilder::new().recursive(true).create(&dest);
        } else {
            if let Some(parent) = dest.parent() {
                let _ = DirBuilder::new().recursive(true).create(parent);
            }
            let _ = fs::copy(entry.path(), &dest);
        }
    }
}
