use std::path::{Path, PathBuf};

use eframe::glow::{self, HasContext as _};

use crate::error::ShaderError;

#[cfg(target_arch = "wasm32")]
const SHADER_HEADER: &str = "#version 300 es\nprecision mediump float;\n";
#[cfg(not(target_arch = "wasm32"))]
const SHADER_HEADER: &str = "#version 330 core\n";

/// GLSL text of one vertex/fragment pair, without a `#version` line.
#[derive(Clone, Debug)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn load(vertex_path: &Path, fragment_path: &Path) -> Result<Self, ShaderError> {
        Ok(Self {
            vertex: read_source(vertex_path)?,
            fragment: read_source(fragment_path)?,
        })
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source| ShaderError::Source {
        path: PathBuf::from(path),
        source,
    })
}

/// A linked GL program. The handle is taken out on [`ShaderProgram::destroy`],
/// so releasing twice is a no-op.
#[derive(Debug)]
pub struct ShaderProgram {
    raw: Option<glow::Program>,
}

impl ShaderProgram {
    pub fn compile(gl: &glow::Context, source: &ShaderSource) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl.create_program().map_err(ShaderError::Create)?;

            let stages = [
                (glow::VERTEX_SHADER, "vertex", &source.vertex),
                (glow::FRAGMENT_SHADER, "fragment", &source.fragment),
            ];
            let mut shaders = Vec::with_capacity(stages.len());
            for (kind, stage, body) in stages {
                match compile_stage(gl, kind, stage, body) {
                    Ok(shader) => {
                        gl.attach_shader(program, shader);
                        shaders.push(shader);
                    }
                    Err(e) => {
                        for shader in shaders {
                            gl.delete_shader(shader);
                        }
                        gl.delete_program(program);
                        return Err(e);
                    }
                }
            }

            gl.link_program(program);
            let linked = gl.get_program_link_status(program);
            let log = gl.get_program_info_log(program);

            for shader in shaders {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }

            if !linked {
                gl.delete_program(program);
                return Err(ShaderError::Link { log });
            }

            Ok(Self { raw: Some(program) })
        }
    }

    pub(crate) fn from_raw(raw: glow::Program) -> Self {
        Self { raw: Some(raw) }
    }

    pub fn raw(&self) -> Option<glow::Program> {
        self.raw
    }

    pub fn is_live(&self) -> bool {
        self.raw.is_some()
    }

    pub(crate) fn take_raw(&mut self) -> Option<glow::Program> {
        self.raw.take()
    }

    pub fn destroy(&mut self, gl: &glow::Context) {
        if let Some(program) = self.take_raw() {
            unsafe { gl.delete_program(program) };
        }
    }
}

unsafe fn compile_stage(
    gl: &glow::Context,
    kind: u32,
    stage: &'static str,
    body: &str,
) -> Result<glow::Shader, ShaderError> {
    unsafe {
        let shader = gl.create_shader(kind).map_err(ShaderError::Create)?;
        gl.shader_source(shader, &format!("{SHADER_HEADER}{body}"));
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(ShaderError::Compile { stage, log });
        }
        Ok(shader)
    }
}
