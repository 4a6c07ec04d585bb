//! Compiling OpenGL shaders and reporting errors from the process is somewhat
//! involved. Many GL drivers ignore the `#line` markers this crate splices
//! into expanded source, and instead report locations as raw line numbers
//! within the flattened string. On top of that, the log output format is
//! vendor-specific.
//!
//! This module helps with both: [`source_map`] re-reads the emitted `#line`
//! markers and attributes every line of the expanded text back to the file
//! and line it came from, and [`compile_shader`] runs a user-provided
//! compiler callback over the expanded source and rewrites the locations in
//! its log accordingly.
//!
//! An example implementation using `compile_shader` and the `gl_generator`
//! crate:
//!
//! ```rust,ignore
//! fn make_shader(
//!     gl: &gl::Gl,
//!     shader_type: GLenum,
//!     expanded: &str,
//!     origin_file: &str,
//! ) -> anyhow::Result<u32> {
//!     let compiled_shader = compile_shader(expanded, origin_file, |source| unsafe {
//!         let handle = gl.CreateShader(shader_type);
//!
//!         gl.ShaderSource(
//!             handle,
//!             1,
//!             &(source.as_ptr() as *const GLchar),
//!             &(source.len() as GLint),
//!         );
//!         gl.CompileShader(handle);
//!
//!         let mut shader_ok: gl::types::GLint = 1;
//!         gl.GetShaderiv(handle, gl::COMPILE_STATUS, &mut shader_ok);
//!
//!         if shader_ok != 1 {
//!             let log = read_info_log(gl, handle);
//!             gl.DeleteShader(handle);
//!
//!             ShaderCompilerOutput {
//!                 artifact: None,
//!                 log: Some(log),
//!             }
//!         } else {
//!             ShaderCompilerOutput {
//!                 artifact: Some(handle),
//!                 log: None,
//!             }
//!         }
//!     });
//!
//!     if let Some(shader) = compiled_shader.artifact {
//!         Ok(shader)
//!     } else {
//!         anyhow::bail!(
//!             "Shader failed to compile: {}",
//!             compiled_shader.log.as_deref().unwrap_or("Unknown error")
//!         );
//!     }
//! }
//! ```

use crate::line_marker::{LineMarker, SourceId};

/// User-defined output of the shader compiler, along with an info log.
pub struct ShaderCompilerOutput<Artifact> {
    pub artifact: Artifact,
    pub log: Option<String>,
}

/// Where a line of expanded output came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    /// File name for quoted markers; the numeric id rendered as text for
    /// bare-integer markers.
    pub file: String,

    /// Line within `file`.
    pub line: usize,
}

/// Attribute every line of `expanded` to the source it came from, by
/// re-reading the `#line` markers the expansion inserted.
///
/// `origin_file` is what lines before the first marker are attributed to.
/// The returned table has one entry per line of `expanded`, in order.
pub fn source_map(expanded: &str, origin_file: &str) -> Vec<SourceLocation> {
    let mut table = Vec::new();
    let mut file = origin_file.to_string();
    let mut line = 1;

    for text in expanded.lines() {
        table.push(SourceLocation {
            file: file.clone(),
            line,
        });

        if let Some(marker) = LineMarker::parse(text) {
            file = match marker.id {
                SourceId::Named(name) => name,
                SourceId::Index(id) => id.to_string(),
            };
            line = marker.line;
        } else {
            line += 1;
        }
    }

    table
}

/// Compile expanded shader source via a user-provided compiler callback,
/// rewriting locations in the resulting info log.
///
/// `Artifact` is a user-defined output of the shader compiler, e.g.
/// `Option<GLuint>`.
///
/// `compiler_fn` is handed the expanded source; raw line numbers in the log
/// it returns are mapped through [`source_map`] and rewritten as
/// `file(line)`. Both the `ERROR: n:l` (Intel/AMD) and `n(l)` (NVIDIA)
/// formats are recognized; locations that fall outside the expanded text are
/// left untouched.
pub fn compile_shader<Artifact, CompilerFn>(
    expanded: &str,
    origin_file: &str,
    compiler_fn: CompilerFn,
) -> ShaderCompilerOutput<Artifact>
where
    CompilerFn: Fn(&str) -> ShaderCompilerOutput<Artifact>,
{
    let compiler_output = compiler_fn(expanded);
    let table = source_map(expanded, origin_file);

    lazy_static::lazy_static! {
        static ref INTEL_AMD_ERROR_RE: regex::Regex = regex::Regex::new(r"(?m)^ERROR:\s*(\d+):(\d+)").unwrap();
    }

    lazy_static::lazy_static! {
        static ref NV_ERROR_RE: regex::Regex = regex::Regex::new(r"(?m)^(\d+)\((\d+)\)\s*").unwrap();
    }

    let error_replacement = |captures: &regex::Captures| -> String {
        let line = match captures[2].parse::<usize>() {
            Ok(line) => line,
            Err(_) => return captures[0].to_string(),
        };

        match line.checked_sub(1).and_then(|l| table.get(l)) {
            Some(loc) => format!("{}({})", loc.file, loc.line),
            None => captures[0].to_string(),
        }
    };

    let pretty_log = compiler_output.log.map(|log_str| {
        let log_str = INTEL_AMD_ERROR_RE.replace_all(&log_str, error_replacement);
        NV_ERROR_RE
            .replace_all(&log_str, error_replacement)
            .into_owned()
    });

    ShaderCompilerOutput {
        artifact: compiler_output.artifact,
        log: pretty_log,
    }
}
