use crate::env::StyleEnvironment;

// ResolutionRequest
//
// what a component wants read back: an ordered list of custom properties, an ordered list of
// computed properties, the element to read them from, and whether to bother at all.  names are
// not validated; a bad name simply resolves to the unset sentinel
//
// equality over all four fields is what decides whether an active resolver has to tear down
// and re-subscribe
#[derive(Clone, Debug, PartialEq)]
pub struct ResolutionRequest<E> {
    pub token_names: Vec<String>,
    pub style_properties: Vec<String>,
    pub scope: Option<E>,
    pub enabled: bool,
}

impl<E: Clone> ResolutionRequest<E> {
    pub fn new<T, P>(token_names: T, style_properties: P) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        ResolutionRequest {
            token_names: token_names.into_iter().map(Into::into).collect(),
            style_properties: style_properties.into_iter().map(Into::into).collect(),
            scope: None,
            enabled: true,
        }
    }

    pub fn with_scope(mut self, scope: Option<E>) -> Self {
        self.scope = scope;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    // the element actually read from
    //
    // before the owning component mounts there is no scope, and the document root stands in
    // for it.  outside of a DOM there is no root either, and the answer is None
    pub fn effective_scope<S>(&self, env: &S) -> Option<E>
    where
        S: StyleEnvironment<Element = E> + ?Sized,
    {
        self.scope.clone().or_else(|| env.document_root())
    }

    // every requested name in snapshot order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.token_names
            .iter()
            .chain(self.style_properties.iter())
            .map(String::as_str)
    }
}
