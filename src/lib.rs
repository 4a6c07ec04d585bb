//! **shader-stitcher** expands `#include` directives in shader source into a
//! single flattened string. It is mostly aimed at shading languages which
//! don't provide include support out of the box.
//!
//! This crate does not implement a full C-like preprocessor, only `#include`
//! expansion. Other directives are copied into the output untouched, so they
//! can be subsequently handled by the shader compiler. Directives that sit
//! behind a `//` on the same line, or inside an unclosed `/* ... */` block,
//! are treated as plain text.
//!
//! Around every spliced file the expander emits `#line` correction markers,
//! so that compiler diagnostics reported against the flattened text still
//! point at the original files. Origin files whose name ends in `cg` get
//! quoted file names in those markers; anything else gets the bare numeric
//! ids (with `0` for "no file name") that GLSL-style compilers accept.
//!
//! The API supports user-driven include file providers, which enable custom
//! virtual file systems, resource groups, and allow build systems to track
//! dependencies.
//!
//! By default the scan is a single pass over the outer source: the text of an
//! included file is spliced verbatim and not re-scanned for further
//! `#include` directives. [`ExpandOptions::expand_nested`] turns on recursive
//! expansion, with cycle detection.
//!
//! # Example
//!
//! ```rust
//! struct FileIncludeProvider;
//!
//! impl shader_stitcher::IncludeProvider for FileIncludeProvider {
//!     type Context = std::path::PathBuf;
//!
//!     fn open(
//!         &mut self,
//!         path: &str,
//!         context: &Self::Context,
//!     ) -> Result<(String, Self::Context), shader_stitcher::BoxedIncludeProviderError> {
//!         let resolved = context.join(path);
//!         let text = std::fs::read_to_string(&resolved)?;
//!         let dir = resolved.parent().map(|p| p.to_owned()).unwrap_or_default();
//!         Ok((text, dir))
//!     }
//! }
//!
//! // ...
//!
//! let expanded = shader_stitcher::process_file(
//!     "myfile.cg",
//!     &mut FileIncludeProvider,
//!     std::path::PathBuf::new(),
//! );
//! ```

mod error;
mod expand;
mod include_provider;
mod line_marker;

#[cfg(feature = "gl_compiler")]
#[cfg_attr(docsrs, doc(cfg(feature = "gl_compiler")))]
pub mod gl_compiler;


pub use crate::error::{BoxedIncludeProviderError, ExpandError};
pub use crate::expand::{expand_source, expand_source_with, process_file, ExpandOptions};
pub use crate::include_provider::IncludeProvider;
pub use crate::line_marker::{LineMarker, SourceId};
