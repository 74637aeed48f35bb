use std::fmt;
use std::sync::Arc;

/// Height of one kind of list item: a constant, or a callback of the item's coordinates.
///
/// The callback argument depends on the kind:
/// - header / footer: `()`
/// - section header / section footer: `section`
/// - row: `(section, row)`
///
/// Resolved heights must be finite and non-negative.
pub enum Height<A> {
    Fixed(f64),
    Computed(Arc<dyn Fn(A) -> f64 + Send + Sync>),
}

impl<A> Height<A> {
    pub fn computed(f: impl Fn(A) -> f64 + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }

    /// Returns the constant height, if this is [`Height::Fixed`].
    pub fn fixed_value(&self) -> Option<f64> {
        match self {
            Self::Fixed(v) => Some(sanitize(*v)),
            Self::Computed(_) => None,
        }
    }

    /// Resolves the height for `args`, clamping invalid results to `0.0`.
    pub fn resolve(&self, args: A) -> f64 {
        match self {
            Self::Fixed(v) => sanitize(*v),
            Self::Computed(f) => sanitize(f(args)),
        }
    }
}

fn sanitize(height: f64) -> f64 {
    if height.is_finite() && height >= 0.0 {
        return height;
    }
    vwarn!(height, "Height: resolved height must be finite and non-negative");
    debug_assert!(
        height.is_finite() && height >= 0.0,
        "Height: resolved height must be finite and non-negative (got {height})"
    );
    0.0
}

impl<A> Clone for Height<A> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(v) => Self::Fixed(*v),
            Self::Computed(f) => Self::Computed(Arc::clone(f)),
        }
    }
}

impl<A> Default for Height<A> {
    fn default() -> Self {
        Self::Fixed(0.0)
    }
}

impl<A> From<f64> for Height<A> {
    fn from(value: f64) -> Self {
        Self::Fixed(value)
    }
}

impl<A> fmt::Debug for Height<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
