pub type BoxedIncludeProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    /// Any error reported by the user-supplied `IncludeProvider`
    #[error("include provider error: \"{cause:?}\" when trying to include {file:?}")]
    IncludeProviderError {
        file: String,
        cause: BoxedIncludeProviderError,
    },

    /// A `#include` token with no parseable `"..."` or `<...>` path
    #[error("badly formed #include directive in {file:?}: {directive:?}")]
    MalformedDirective {
        /// File whose source contained the directive
        file: String,

        /// The raw directive text, up to the end of its line
        directive: String,
    },

    /// Recursively included file, along with information about where it was
    /// encountered. Only raised when nested expansion is enabled.
    #[error("file {file:?} is recursively included; triggered in {from:?} ({from_line:?})")]
    RecursiveInclude {
        /// File which was included recursively
        file: String,

        /// File which included the recursively included one
        from: String,

        /// Line in the `from` file on which the include happened
        from_line: usize,
    },
}
