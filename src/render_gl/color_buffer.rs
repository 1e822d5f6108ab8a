use gl;

pub struct ColorBuffer {
    pub color: (f32, f32, f32, f32),
}

impl ColorBuffer {
    pub fn from_color(color: (f32, f32, f32, f32)) -> ColorBuffer {
        ColorBuffer { color }
    }

    pub fn set_used(&self, gl: &gl::Gl) {
        unsafe {
            gl.ClearColor(self.color.0, self.color.1, self.color.2, self.color.3);
        }
    }

    pub fn clear(&self, gl: &gl::Gl) {
        unsafe {
            gl.Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}
