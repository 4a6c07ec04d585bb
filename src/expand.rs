use std::collections::HashSet;

use crate::error::ExpandError;
use crate::include_provider::IncludeProvider;
use crate::line_marker::{LineMarker, SourceId};

/// Tuning for [`expand_source_with`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpandOptions {
    /// Re-scan the text of included files for further `#include` directives.
    ///
    /// Off by default, matching the classic single-pass scan: an included
    /// file is spliced verbatim and only the outer source keeps being
    /// scanned. Turning this on changes the `#line` markers emitted for
    /// shaders whose includes themselves contain includes.
    pub expand_nested: bool,
}

/// Expand `#include` directives in `source` with default [`ExpandOptions`].
///
/// `file_name` decides the flavor of the emitted `#line` markers (quoted
/// file names when it ends in `cg`, bare numeric ids otherwise) and is
/// reported in errors. Included files are fetched through `provider`,
/// resolved against `context`.
pub fn expand_source<C>(
    source: &str,
    file_name: &str,
    provider: &mut dyn IncludeProvider<Context = C>,
    context: C,
) -> Result<String, ExpandError> {
    expand_source_with(source, file_name, provider, context, ExpandOptions::default())
}

/// Expand `#include` directives in `source`, with explicit options.
pub fn expand_source_with<C>(
    source: &str,
    file_name: &str,
    provider: &mut dyn IncludeProvider<Context = C>,
    context: C,
    options: ExpandOptions,
) -> Result<String, ExpandError> {
    let mut expander = Expander {
        provider,
        options,
        prior_includes: HashSet::new(),
    };
    expander.expand(source, file_name, &context)
}

/// Fetch `file_path` through `provider`, then expand it.
pub fn process_file<C>(
    file_path: &str,
    provider: &mut dyn IncludeProvider<Context = C>,
    context: C,
) -> Result<String, ExpandError> {
    let (source, context) = provider.open(file_path, &context).map_err(|e| {
        ExpandError::IncludeProviderError {
            file: file_path.to_string(),
            cause: e,
        }
    })?;
    expand_source(&source, file_path, provider, context)
}

const INCLUDE_TOKEN: &str = "#include";

struct Expander<'p, C> {
    provider: &'p mut dyn IncludeProvider<Context = C>,
    options: ExpandOptions,
    prior_includes: HashSet<String>,
}

impl<'p, C> Expander<'p, C> {
    fn expand(
        &mut self,
        source: &str,
        file_name: &str,
        context: &C,
    ) -> Result<String, ExpandError> {
        // Output will be at least this big.
        let mut out = String::with_capacity(source.len());

        let supports_filename = file_name.ends_with("cg");
        let restore_id = if supports_filename {
            SourceId::Named(file_name.to_string())
        } else {
            SourceId::Index(0)
        };

        let mut start_marker = 0;
        let mut next = source.find(INCLUDE_TOKEN);

        while let Some(include_pos) = next {
            let after_include = include_pos + INCLUDE_TOKEN.len();
            let prefix = &source[..include_pos];
            let newline_before = prefix.rfind('\n');

            // A "//" between the last newline and the token comments it out.
            if let Some(comment_pos) = prefix.rfind("//") {
                if newline_before.map_or(true, |nl| comment_pos > nl) {
                    next = find_token(source, after_include);
                    continue;
                }
            }

            // Likewise a "/*" that has not been closed again yet.
            if let Some(open_pos) = prefix.rfind("/*") {
                if prefix.rfind("*/").map_or(true, |close_pos| close_pos < open_pos) {
                    next = find_token(source, after_include);
                    continue;
                }
            }

            let line_end = source[after_include..]
                .find('\n')
                .map(|p| p + after_include)
                .unwrap_or(source.len());

            let malformed = || ExpandError::MalformedDirective {
                file: file_name.to_string(),
                directive: source[include_pos..line_end].to_string(),
            };

            // Prefer a quoted path; fall back to the angle-bracket form. The
            // opening delimiter must sit before the end of the line.
            let (open_pos, close_delim) = match source[after_include..line_end].find('"') {
                Some(p) => (after_include + p, '"'),
                None => match source[after_include..line_end].find('<') {
                    Some(p) => (after_include + p, '>'),
                    None => return Err(malformed()),
                },
            };

            // The closing delimiter search is not clamped to the line end.
            let close_pos = match source[open_pos + 1..].find(close_delim) {
                Some(p) => open_pos + 1 + p,
                None => return Err(malformed()),
            };

            let path = &source[open_pos + 1..close_pos];

            if self.options.expand_nested && self.prior_includes.contains(path) {
                return Err(ExpandError::RecursiveInclude {
                    file: path.to_string(),
                    from: file_name.to_string(),
                    from_line: prefix.matches('\n').count() + 1,
                });
            }

            let (included, child_context) =
                self.provider.open(path, context).map_err(|e| {
                    ExpandError::IncludeProviderError {
                        file: path.to_string(),
                        cause: e,
                    }
                })?;

            let included = if self.options.expand_nested {
                self.prior_includes.insert(path.to_string());
                let expanded = self.expand(&included, path, &child_context)?;
                self.prior_includes.remove(path);
                expanded
            } else {
                included
            };

            // The whole directive line is replaced; copy up to and including
            // the newline before it.
            if let Some(nl) = newline_before {
                if nl >= start_marker {
                    out.push_str(&source[start_marker..=nl]);
                }
            }

            let line_count = out.matches('\n').count();
            let spliced_id = if supports_filename {
                SourceId::Named(path.to_string())
            } else {
                SourceId::Index(line_count)
            };

            out.push_str(
                &LineMarker {
                    line: 1,
                    id: spliced_id,
                }
                .to_directive(),
            );
            out.push_str(&included);
            out.push('\n');
            out.push_str(
                &LineMarker {
                    line: line_count,
                    id: restore_id.clone(),
                }
                .to_directive(),
            );

            start_marker = line_end;
            next = find_token(source, start_marker);
        }

        out.push_str(&source[start_marker..]);
        Ok(out)
    }
}

fn find_token(source: &str, from: usize) -> Option<usize> {
    source[from..].find(INCLUDE_TOKEN).map(|p| p + from)
}
