use std;
use std::env;
use std::ffi::CString;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),
    #[fail(display = "File contains an interior nul byte")]
    FileContainsNil,
    #[fail(display = "Failed to get executable path")]
    FailedToGetExePath,
}

impl From<io::Error> for Error {
    fn from(other: io::Error) -> Self {
        Error::Io(other)
    }
}

pub struct Resources {
    root_path: PathBuf,
}

impl Resources {
    pub fn from_relative_exe_path(rel_path: &Path) -> Result<Resources, Error> {
        let exe_file_name = env::current_exe().map_err(|_| Error::FailedToGetExePath)?;
        let exe_path = exe_file_name.parent().ok_or(Error::FailedToGetExePath)?;

        Ok(Resources {
            root_path: exe_path.join(rel_path),
        })
    }

    pub fn from_dir_path(root_path: &Path) -> Resources {
        Resources {
            root_path: root_path.into(),
        }
    }

    // Shader text is handed to the driver as a C string, so interior nul
    // bytes are rejected here rather than at the API boundary.
    pub fn load_cstring(&self, resource_name: &str) -> Result<CString, Error> {
        let mut file = fs::File::open(resource_name_to_path(&self.root_path, resource_name))?;

        let mut buffer: Vec<u8> = Vec::with_capacity(file.metadata()?.len() as usize + 1);
        file.read_to_end(&mut buffer)?;

        if buffer.iter().any(|b| *b == 0) {
            return Err(Error::FileContainsNil);
        }

        Ok(unsafe { CString::from_vec_unchecked(buffer) })
    }
}

// Resource names use forward slashes regardless of platform.
fn resource_name_to_path(root_dir: &Path, location: &str) -> PathBuf {
    let mut path: PathBuf = root_dir.into();

    for part in location.split('/') {
        path = path.join(part);
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets_root() -> Resources {
        Resources::from_dir_path(&Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"))
    }

    #[test]
    fn loads_shader_source_in_full() {
        let res = assets_root();
        let text = res.load_cstring("shaders/triangle.vert").unwrap();
        let text = text.to_str().unwrap();

        assert!(text.starts_with("#version 330 core"));
        assert!(text.contains("gl_Position"));
    }

    #[test]
    fn missing_resource_is_an_io_error() {
        let res = assets_root();
        match res.load_cstring("shaders/no-such-shader.vert") {
            Err(Error::Io(_)) => {}
            other => panic!("expected Io error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn rejects_interior_nul_bytes() {
        use std::io::Write;

        let dir = env::temp_dir().join(format!("vector-engine-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let mut file = fs::File::create(dir.join("nul.bin")).unwrap();
        file.write_all(b"void\0main").unwrap();

        let res = Resources::from_dir_path(&dir);
        match res.load_cstring("nul.bin") {
            Err(Error::FileContainsNil) => {}
            other => panic!("expected FileContainsNil, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn resource_names_map_to_nested_paths() {
        let path = resource_name_to_path(Path::new("root"), "shaders/triangle.vert");
        assert_eq!(path, Path::new("root").join("shaders").join("triangle.vert"));
    }
}
