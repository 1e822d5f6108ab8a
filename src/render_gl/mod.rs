mod color_buffer;
mod shader;
mod vertex_buffer;
mod viewport;

pub use self::color_buffer::ColorBuffer;
pub use self::shader::{Program, Shader, ShaderSource, Stage, UniformValue};
pub use self::vertex_buffer::{VertexArray, VertexBuffer};
pub use self::viewport::Viewport;
