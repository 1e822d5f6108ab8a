use gl;
use std;

pub struct VertexBuffer {
    gl: gl::Gl,
    id: gl::types::GLuint,
}

impl VertexBuffer {
    pub fn new(gl: &gl::Gl, vertices: &[f32]) -> VertexBuffer {
        let mut id: gl::types::GLuint = 0;

        unsafe {
            gl.GenBuffers(1, &mut id);
            gl.BindBuffer(gl::ARRAY_BUFFER, id);
            gl.BufferData(
                gl::ARRAY_BUFFER,
                (vertices.len() * std::mem::size_of::<f32>()) as gl::types::GLsizeiptr,
                vertices.as_ptr() as *const gl::types::GLvoid,
                gl::STATIC_DRAW,
            );
            gl.BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        VertexBuffer { gl: gl.clone(), id }
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.BindBuffer(gl::ARRAY_BUFFER, self.id);
        }
    }

    pub fn unbind(&self) {
        unsafe {
            self.gl.BindBuffer(gl::ARRAY_BUFFER, 0);
        }
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.DeleteBuffers(1, &self.id);
        }
    }
}

pub struct VertexArray {
    gl: gl::Gl,
    id: gl::types::GLuint,
}

impl VertexArray {
    pub fn new(gl: &gl::Gl) -> VertexArray {
        let mut id: gl::types::GLuint = 0;

        unsafe {
            gl.GenVertexArrays(1, &mut id);
        }

        VertexArray { gl: gl.clone(), id }
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.BindVertexArray(self.id);
        }
    }

    pub fn unbind(&self) {
        unsafe {
            self.gl.BindVertexArray(0);
        }
    }

    // Describes tightly packed float attributes in the currently bound
    // buffer: one attribute index per entry, components per vertex each.
    // Both this array and the data buffer must be bound.
    pub fn describe_attributes(&self, components: &[i32]) {
        let stride: i32 = components.iter().sum();
        let stride_bytes = stride as usize * std::mem::size_of::<f32>();

        let mut offset: usize = 0;
        for (index, &count) in components.iter().enumerate() {
            unsafe {
                self.gl.EnableVertexAttribArray(index as gl::types::GLuint);
                self.gl.VertexAttribPointer(
                    index as gl::types::GLuint,
                    count,
                    gl::FLOAT,
                    gl::FALSE,
                    stride_bytes as gl::types::GLint,
                    (offset * std::mem::size_of::<f32>()) as *const gl::types::GLvoid,
                );
            }
            offset += count as usize;
        }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            self.gl.DeleteVertexArrays(1, &self.id);
        }
    }
}
