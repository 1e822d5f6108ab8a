use render_gl::UniformValue;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Unknown demo \"{}\" (available: {})", name, available)]
    UnknownDemo { name: String, available: String },
}

// One demo per entry point of the old tutorial variants; the driver is the
// single render loop they all share.
pub struct DemoConfig {
    pub title: String,
    pub window_size: (u32, u32),
    pub clear_color: (f32, f32, f32, f32),
    pub vertex_shader: String,
    pub geometry_shader: Option<String>,
    pub fragment_shader: String,
    pub vertices: Vec<f32>,
    pub attributes: Vec<i32>,
    pub startup_uniforms: Vec<(String, UniformValue)>,
}

const DEMO_NAMES: [&str; 3] = ["triangle", "colored-triangle", "uniform-color"];

const TRIANGLE_VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0, // left
    0.5, -0.5, 0.0, // right
    0.0, 0.5, 0.0, // top
];

impl DemoConfig {
    pub fn named(name: &str) -> Result<DemoConfig, Error> {
        match name {
            "triangle" => Ok(DemoConfig::triangle()),
            "colored-triangle" => Ok(DemoConfig::colored_triangle()),
            "uniform-color" => Ok(DemoConfig::uniform_color()),
            _ => Err(Error::UnknownDemo {
                name: name.into(),
                available: DEMO_NAMES.join(", "),
            }),
        }
    }

    pub fn triangle() -> DemoConfig {
        DemoConfig {
            title: "Vector Engine".into(),
            window_size: (800, 600),
            clear_color: (0.2, 0.3, 0.3, 1.0),
            vertex_shader: "shaders/triangle.vert".into(),
            geometry_shader: None,
            fragment_shader: "shaders/triangle.frag".into(),
            vertices: TRIANGLE_VERTICES.to_vec(),
            attributes: vec![3],
            startup_uniforms: vec![],
        }
    }

    pub fn colored_triangle() -> DemoConfig {
        DemoConfig {
            vertex_shader: "shaders/colored.vert".into(),
            fragment_shader: "shaders/colored.frag".into(),
            vertices: vec![
                -0.5, -0.5, 0.0, 1.0, 0.0, 0.0, // left, red
                0.5, -0.5, 0.0, 0.0, 1.0, 0.0, // right, green
                0.0, 0.5, 0.0, 0.0, 0.0, 1.0, // top, blue
            ],
            attributes: vec![3, 3],
            ..DemoConfig::triangle()
        }
    }

    pub fn uniform_color() -> DemoConfig {
        DemoConfig {
            fragment_shader: "shaders/uniform_color.frag".into(),
            startup_uniforms: vec![(
                "uColor".into(),
                UniformValue::Vec4(0.0, 0.8, 0.2, 1.0),
            )],
            ..DemoConfig::triangle()
        }
    }

    // Vertices are tightly packed floats; the attribute list fully
    // determines the per-vertex stride.
    pub fn stride(&self) -> usize {
        self.attributes.iter().sum::<i32>() as usize
    }

    pub fn vertex_count(&self) -> i32 {
        let stride = self.stride();
        if stride == 0 {
            return 0;
        }
        (self.vertices.len() / stride) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_demo_resolves() {
        for name in &DEMO_NAMES {
            assert!(DemoConfig::named(name).is_ok(), "demo {} missing", name);
        }
    }

    #[test]
    fn unknown_demo_lists_the_available_ones() {
        let err = DemoConfig::named("spinning-cube").unwrap_err();
        let message = format!("{}", err);

        assert!(message.contains("spinning-cube"));
        assert!(message.contains("triangle"));
        assert!(message.contains("uniform-color"));
    }

    #[test]
    fn triangle_is_three_position_vertices() {
        let config = DemoConfig::triangle();

        assert_eq!(config.stride(), 3);
        assert_eq!(config.vertex_count(), 3);
    }

    #[test]
    fn colored_triangle_interleaves_two_attributes() {
        let config = DemoConfig::colored_triangle();

        assert_eq!(config.stride(), 6);
        assert_eq!(config.vertex_count(), 3);
        assert_eq!(config.attributes, vec![3, 3]);
    }

    #[test]
    fn uniform_color_sets_a_vec4_at_startup() {
        let config = DemoConfig::uniform_color();

        assert_eq!(config.startup_uniforms.len(), 1);
        assert_eq!(config.startup_uniforms[0].0, "uColor");
        assert_eq!(
            config.startup_uniforms[0].1,
            UniformValue::Vec4(0.0, 0.8, 0.2, 1.0)
        );
    }
}
