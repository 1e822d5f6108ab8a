use gl;
use std;
use std::collections::HashMap;
use std::ffi::CString;
use resources::Resources;

// Driver info logs are capped at this many bytes in diagnostics.
const INFO_LOG_CAP: gl::types::GLint = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Geometry,
    Fragment,
}

impl Stage {
    pub fn gl_kind(&self) -> gl::types::GLenum {
        match *self {
            Stage::Vertex => gl::VERTEX_SHADER,
            Stage::Geometry => gl::GEOMETRY_SHADER,
            Stage::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Stage::Vertex => "vertex",
            Stage::Geometry => "geometry",
            Stage::Fragment => "fragment",
        }
    }
}

// A shader source never fails to construct. When the text cannot be
// obtained, the payload degrades to empty source: compiling it then produces
// the driver's own diagnostic, tagged with this source's label.
pub struct ShaderSource {
    text: CString,
    label: String,
    stage: Stage,
}

impl ShaderSource {
    pub fn from_res(res: &Resources, name: &str, stage: Stage) -> ShaderSource {
        match res.load_cstring(name) {
            Ok(text) => ShaderSource {
                text,
                label: name.into(),
                stage,
            },
            Err(e) => {
                emit_diagnostic(name, &format!("{}", e));
                ShaderSource {
                    text: CString::default(),
                    label: name.into(),
                    stage,
                }
            }
        }
    }

    pub fn from_text(text: &str, stage: Stage) -> ShaderSource {
        let label = String::from(stage.name());
        match CString::new(text) {
            Ok(text) => ShaderSource { text, label, stage },
            Err(e) => {
                emit_diagnostic(&label, &format!("{}", e));
                ShaderSource {
                    text: CString::default(),
                    label,
                    stage,
                }
            }
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_empty(&self) -> bool {
        self.text.as_bytes().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec4(f32, f32, f32, f32),
}

pub struct Shader {
    gl: gl::Gl,
    id: gl::types::GLuint,
    stage: Stage,
}

impl Shader {
    // Always returns a unit handle; a compile failure is reported on the
    // diagnostic channel and otherwise only observable when linking.
    pub fn compile(gl: &gl::Gl, source: &ShaderSource) -> Shader {
        let id = unsafe { gl.CreateShader(source.stage().gl_kind()) };

        unsafe {
            gl.ShaderSource(id, 1, &source.text.as_ptr(), std::ptr::null());
            gl.CompileShader(id);
        }

        let mut success: gl::types::GLint = 1;
        unsafe {
            gl.GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            emit_diagnostic(source.label(), &shader_info_log(gl, id));
        }

        Shader {
            gl: gl.clone(),
            id,
            stage: source.stage(),
        }
    }

    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.DeleteShader(self.id);
        }
    }
}

pub struct Program {
    gl: gl::Gl,
    id: gl::types::GLuint,
    uniforms: HashMap<String, gl::types::GLint>,
}

impl Program {
    pub fn from_sources(gl: &gl::Gl, sources: &[ShaderSource]) -> Program {
        let shaders = sources
            .iter()
            .map(|source| Shader::compile(gl, source))
            .collect();

        Program::link(gl, shaders)
    }

    // Takes the compiled units by value: they are attached in the given
    // stage order, then detached and deleted before this returns, whether
    // the link succeeded or not. Always returns the program handle; a link
    // failure is reported on the diagnostic channel, and using the handle
    // then draws nothing.
    pub fn link(gl: &gl::Gl, shaders: Vec<Shader>) -> Program {
        let id = unsafe { gl.CreateProgram() };

        for shader in &shaders {
            unsafe {
                gl.AttachShader(id, shader.id());
            }
        }

        unsafe {
            gl.LinkProgram(id);
        }

        let mut success: gl::types::GLint = 1;
        unsafe {
            gl.GetProgramiv(id, gl::LINK_STATUS, &mut success);
        }

        if success == 0 {
            emit_diagnostic("program", &program_info_log(gl, id));
        }

        for shader in &shaders {
            unsafe {
                gl.DetachShader(id, shader.id());
            }
        }

        let uniforms = if success != 0 {
            active_uniforms(gl, id)
        } else {
            HashMap::new()
        };

        Program {
            gl: gl.clone(),
            id,
            uniforms,
        }
    }

    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }

    pub fn set_used(&self) {
        unsafe {
            self.gl.UseProgram(self.id);
        }
    }

    // The setters write through to the active program. An unknown name does
    // nothing; the program must be bound when a setter is called.
    pub fn set_bool(&self, name: &str, value: bool) {
        self.set_int(name, value as i32);
    }

    pub fn set_int(&self, name: &str, value: i32) {
        if let Some(&location) = self.uniforms.get(name) {
            unsafe {
                self.gl.Uniform1i(location, value);
            }
        }
    }

    pub fn set_float(&self, name: &str, value: f32) {
        if let Some(&location) = self.uniforms.get(name) {
            unsafe {
                self.gl.Uniform1f(location, value);
            }
        }
    }

    pub fn set_vec4(&self, name: &str, x: f32, y: f32, z: f32, w: f32) {
        if let Some(&location) = self.uniforms.get(name) {
            unsafe {
                self.gl.Uniform4f(location, x, y, z, w);
            }
        }
    }

    pub fn set_value(&self, name: &str, value: &UniformValue) {
        match *value {
            UniformValue::Bool(v) => self.set_bool(name, v),
            UniformValue::Int(v) => self.set_int(name, v),
            UniformValue::Float(v) => self.set_float(name, v),
            UniformValue::Vec4(x, y, z, w) => self.set_vec4(name, x, y, z, w),
        }
    }

    pub fn uniform_vec4(&self, name: &str) -> Option<[f32; 4]> {
        let &location = self.uniforms.get(name)?;
        let mut value = [0.0f32; 4];
        unsafe {
            self.gl.GetUniformfv(self.id, location, value.as_mut_ptr());
        }
        Some(value)
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            self.gl.DeleteProgram(self.id);
        }
    }
}

fn active_uniforms(gl: &gl::Gl, id: gl::types::GLuint) -> HashMap<String, gl::types::GLint> {
    let mut uniforms = HashMap::new();

    let mut total: gl::types::GLint = 0;
    unsafe {
        gl.GetProgramiv(id, gl::ACTIVE_UNIFORMS, &mut total);
    }

    for index in 0..total {
        let mut name_buf: Vec<u8> = vec![0; 256];
        let mut name_len: gl::types::GLsizei = 0;
        let mut size: gl::types::GLint = 0;
        let mut kind: gl::types::GLenum = gl::ZERO;

        unsafe {
            gl.GetActiveUniform(
                id,
                index as gl::types::GLuint,
                name_buf.len() as gl::types::GLsizei,
                &mut name_len,
                &mut size,
                &mut kind,
                name_buf.as_mut_ptr() as *mut gl::types::GLchar,
            );
        }

        name_buf.truncate(name_len as usize);
        let c_name = unsafe { CString::from_vec_unchecked(name_buf) };
        let location = unsafe { gl.GetUniformLocation(id, c_name.as_ptr()) };

        if let Ok(name) = c_name.into_string() {
            uniforms.insert(name, location);
        }
    }

    uniforms
}

fn shader_info_log(gl: &gl::Gl, id: gl::types::GLuint) -> String {
    let mut len: gl::types::GLint = 0;
    unsafe {
        gl.GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }

    let len = std::cmp::min(len, INFO_LOG_CAP);
    let log = whitespace_cstring(len as usize);
    unsafe {
        gl.GetShaderInfoLog(
            id,
            len,
            std::ptr::null_mut(),
            log.as_ptr() as *mut gl::types::GLchar,
        );
    }

    trim_log(log)
}

fn program_info_log(gl: &gl::Gl, id: gl::types::GLuint) -> String {
    let mut len: gl::types::GLint = 0;
    unsafe {
        gl.GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }

    let len = std::cmp::min(len, INFO_LOG_CAP);
    let log = whitespace_cstring(len as usize);
    unsafe {
        gl.GetProgramInfoLog(
            id,
            len,
            std::ptr::null_mut(),
            log.as_ptr() as *mut gl::types::GLchar,
        );
    }

    trim_log(log)
}

fn whitespace_cstring(len: usize) -> CString {
    let buffer = vec![b' '; len];
    unsafe { CString::from_vec_unchecked(buffer) }
}

// The driver writes its own nul terminator into the middle of the buffer;
// everything from there on is padding.
fn trim_log(log: CString) -> String {
    log.to_string_lossy()
        .trim_end_matches(|c: char| c == ' ' || c == '\0')
        .to_string()
}

fn emit_diagnostic(label: &str, message: &str) {
    eprintln!("{}: {}", label, message.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn stage_names_match_diagnostic_tags() {
        assert_eq!(Stage::Vertex.name(), "vertex");
        assert_eq!(Stage::Geometry.name(), "geometry");
        assert_eq!(Stage::Fragment.name(), "fragment");
    }

    #[test]
    fn stage_kinds_map_to_gl_enums() {
        assert_eq!(Stage::Vertex.gl_kind(), gl::VERTEX_SHADER);
        assert_eq!(Stage::Geometry.gl_kind(), gl::GEOMETRY_SHADER);
        assert_eq!(Stage::Fragment.gl_kind(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn missing_source_degrades_to_empty_text() {
        let res = Resources::from_dir_path(Path::new("no-such-root"));
        let source = ShaderSource::from_res(&res, "shaders/missing.vert", Stage::Vertex);

        assert!(source.is_empty());
        assert_eq!(source.label(), "shaders/missing.vert");
        assert_eq!(source.stage(), Stage::Vertex);
    }

    #[test]
    fn inline_source_is_labeled_by_stage() {
        let source = ShaderSource::from_text("#version 330 core\n", Stage::Fragment);

        assert!(!source.is_empty());
        assert_eq!(source.label(), "fragment");
    }

    #[test]
    fn inline_source_with_nul_degrades_to_empty_text() {
        let source = ShaderSource::from_text("void\0main", Stage::Vertex);

        assert!(source.is_empty());
        assert_eq!(source.label(), "vertex");
    }

    #[test]
    fn log_padding_is_trimmed() {
        let log = unsafe { CString::from_vec_unchecked(b"error: bad token\0   ".to_vec()) };
        assert_eq!(trim_log(log), "error: bad token");
    }
}
