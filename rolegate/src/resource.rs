//! # Resources
//!
//! A resource is anything with a stable textual identity. Grants are keyed by
//! that identity, so two different values rendering the same identity are
//! the same resource.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

/// An entity protected by access control.
///
/// # Example
///
/// ```
/// use rolegate::resource::Resource;
/// use std::borrow::Cow;
///
/// struct Article;
///
/// impl Resource for Article {
///     fn identity(&self) -> Cow<'_, str> {
///         Cow::Borrowed("article")
///     }
/// }
///
/// assert_eq!(Article.identity(), "article".identity());
/// ```
pub trait Resource {
    /// Stable string identity of the resource.
    fn identity(&self) -> Cow<'_, str>;
}

impl Resource for str {
    fn identity(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Resource for String {
    fn identity(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl Resource for Cow<'_, str> {
    fn identity(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_ref())
    }
}

impl<T: Resource + ?Sized> Resource for &T {
    fn identity(&self) -> Cow<'_, str> {
        (**self).identity()
    }
}

impl<T: Resource + ?Sized> Resource for Box<T> {
    fn identity(&self) -> Cow<'_, str> {
        (**self).identity()
    }
}

impl<T: Resource + ?Sized> Resource for Rc<T> {
    fn identity(&self) -> Cow<'_, str> {
        (**self).identity()
    }
}

impl<T: Resource + ?Sized> Resource for Arc<T> {
    fn identity(&self) -> Cow<'_, str> {
        (**self).identity()
    }
}
