extern crate gl;
extern crate sdl2;
#[macro_use]
extern crate failure;

pub mod config;
pub mod driver;
pub mod render_gl;
pub mod resources;

use std::env;
use std::fmt::Write;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", failure_to_string(&e));
        std::process::exit(1);
    }
}

fn run() -> Result<(), failure::Error> {
    let demo_name = env::args().nth(1).unwrap_or_else(|| "triangle".into());
    let config = config::DemoConfig::named(&demo_name)?;

    driver::run(config)
}

fn failure_to_string(e: &failure::Error) -> String {
    let mut result = String::new();

    for (i, cause) in e.iter_chain().enumerate() {
        if i > 0 {
            let _ = write!(&mut result, "\n  caused by: ");
        }
        let _ = write!(&mut result, "{}", cause);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_chains_render_one_cause_per_line() {
        let inner = format_err!("file not found");
        let outer: failure::Error = inner.context("failed to load demo").into();
        let rendered = failure_to_string(&outer);

        assert!(rendered.starts_with("failed to load demo"));
        assert!(rendered.contains("caused by: file not found"));
    }
}
