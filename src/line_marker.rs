use std::fmt;

/// The source identity a `#line` directive attributes following lines to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceId {
    /// Quoted file name, for compilers whose `#line` accepts strings (Cg).
    Named(String),

    /// Bare numeric id, for compilers that only take integers (GLSL).
    /// `0` conventionally stands for "no file name available".
    Index(usize),
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::Named(name) => write!(f, "\"{}\"", name),
            SourceId::Index(id) => write!(f, "{}", id),
        }
    }
}

/// A line-correction directive spliced into expanded source, telling the
/// downstream compiler to reset its line counter and source identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineMarker {
    /// Line number the next source line should be reported as.
    pub line: usize,

    /// What the following lines should be attributed to.
    pub id: SourceId,
}

impl LineMarker {
    /// Render as a full `#line` directive, newline included.
    pub fn to_directive(&self) -> String {
        format!("#line {} {}\n", self.line, self.id)
    }

    /// Parse a single source line as a line marker. Returns `None` for
    /// anything that is not a `#line` directive of the form this crate emits.
    pub fn parse(text: &str) -> Option<LineMarker> {
        let rest = text.trim_start().strip_prefix("#line")?.trim_start();
        let (number, id_text) = rest.split_at(rest.find(char::is_whitespace)?);
        let line = number.parse().ok()?;

        let id_text = id_text.trim();
        let id = if let Some(name) = id_text
            .strip_prefix('"')
            .and_then(|n| n.strip_suffix('"'))
        {
            SourceId::Named(name.to_string())
        } else {
            SourceId::Index(id_text.parse().ok()?)
        };

        Some(LineMarker { line, id })
    }
}
