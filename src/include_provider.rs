use crate::BoxedIncludeProviderError;

/// User-supplied include reader.
///
/// `Context` carries whatever the provider needs to resolve relative
/// includes: a resource group, a search directory, or nothing at all. The
/// expander never inspects it; it only hands the current file's context back
/// to the provider when that file's includes are opened.
pub trait IncludeProvider {
    type Context;

    /// Return the full text of the resource at `path`, along with the
    /// context that includes nested inside it should be resolved against.
    fn open(
        &mut self,
        path: &str,
        context: &Self::Context,
    ) -> Result<(String, Self::Context), BoxedIncludeProviderError>;
}
