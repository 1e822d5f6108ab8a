use failure;
use gl;
use sdl2;
use std;
use std::path::Path;

use config::DemoConfig;
use render_gl::{ColorBuffer, Program, ShaderSource, Stage, VertexArray, VertexBuffer, Viewport};
use resources::Resources;

// The one render loop shared by every demo. Window and context failures are
// real errors; shader failures are not (the program builder degrades and
// logs, and a broken program simply draws nothing).
pub fn run(config: DemoConfig) -> Result<(), failure::Error> {
    let res = Resources::from_relative_exe_path(Path::new("assets"))?;

    let sdl = sdl2::init().map_err(failure::err_msg)?;
    let video_subsystem = sdl.video().map_err(failure::err_msg)?;

    let gl_attr = video_subsystem.gl_attr();
    gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
    gl_attr.set_context_version(3, 3);

    let window = video_subsystem
        .window(&config.title, config.window_size.0, config.window_size.1)
        .opengl()
        .resizable()
        .build()?;

    let _gl_context = window.gl_create_context().map_err(failure::err_msg)?;
    let gl = gl::Gl::load_with(|name| {
        video_subsystem.gl_get_proc_address(name) as *const std::os::raw::c_void
    });

    let program = build_program(&gl, &res, &config);

    program.set_used();
    for &(ref name, ref value) in &config.startup_uniforms {
        program.set_value(name, value);
    }

    let vertex_buffer = VertexBuffer::new(&gl, &config.vertices);
    let vertex_array = VertexArray::new(&gl);

    vertex_array.bind();
    vertex_buffer.bind();
    vertex_array.describe_attributes(&config.attributes);
    vertex_buffer.unbind();
    vertex_array.unbind();

    let mut viewport = Viewport::for_window(
        config.window_size.0 as i32,
        config.window_size.1 as i32,
    );
    let color_buffer = ColorBuffer::from_color(config.clear_color);

    viewport.set_used(&gl);
    color_buffer.set_used(&gl);

    let vertex_count = config.vertex_count();
    let mut event_pump = sdl.event_pump().map_err(failure::err_msg)?;

    'main: loop {
        for event in event_pump.poll_iter() {
            match event {
                sdl2::event::Event::Quit { .. } => break 'main,
                sdl2::event::Event::KeyDown {
                    keycode: Some(sdl2::keyboard::Keycode::Escape),
                    ..
                } => break 'main,
                sdl2::event::Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => {
                    viewport.update_size(w, h);
                    viewport.set_used(&gl);
                }
                _ => {}
            }
        }

        color_buffer.clear(&gl);

        program.set_used();
        vertex_array.bind();
        unsafe {
            gl.DrawArrays(gl::TRIANGLES, 0, vertex_count);
        }

        window.gl_swap_window();
    }

    Ok(())
}

// Sources are loaded (degrading to empty text on read failure), compiled in
// stage order, and linked. No status is checked here.
fn build_program(gl: &gl::Gl, res: &Resources, config: &DemoConfig) -> Program {
    let mut sources = Vec::with_capacity(3);

    sources.push(ShaderSource::from_res(res, &config.vertex_shader, Stage::Vertex));
    if let Some(ref name) = config.geometry_shader {
        sources.push(ShaderSource::from_res(res, name, Stage::Geometry));
    }
    sources.push(ShaderSource::from_res(res, &config.fragment_shader, Stage::Fragment));

    Program::from_sources(gl, &sources)
}
