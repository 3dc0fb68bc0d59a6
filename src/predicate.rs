use std::fmt;
use std::sync::Arc;

pub type PredicateFn<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// A compiled, directly callable filter condition over records of type `R`.
///
/// Cloning is cheap and every clone shares the same closure. Calls take no locks and hold no
/// mutable state, so one predicate can be used from many threads at once.
pub struct Predicate<R> {
    function: PredicateFn<R>,
    description: Arc<str>,
}

impl<R> Predicate<R> {
    /// Wrap a native closure, the first of the three ways to obtain a predicate.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        Self::new(Arc::new(f), "<native>")
    }

    pub(crate) fn new(function: PredicateFn<R>, description: impl Into<Arc<str>>) -> Self {
        Self {
            function,
            description: description.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<Arc<str>>) -> Self {
        self.description = description.into();
        self
    }

    #[inline]
    pub fn test(&self, record: &R) -> bool {
        (self.function)(record)
    }

    /// The source the predicate was built from, for diagnostics.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl<R> Clone for Predicate<R> {
    fn clone(&self) -> Self {
        Self {
            function: self.function.clone(),
            description: self.description.clone(),
        }
    }
}

impl<R> fmt::Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.description).finish()
    }
}
