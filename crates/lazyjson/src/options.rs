/// Configuration options for lazy parsing.
///
/// The options are stored once per parsed document and shared by every value
/// that points into it, so they also govern decoding that happens long after
/// [`parse_with`](crate::parse_with) returned.
///
/// # Examples
///
/// ```rust
/// use lazyjson::{ParseOptions, parse_with};
///
/// let options = ParseOptions {
///     strict_floats: false,
///     ..Default::default()
/// };
/// let value = parse_with("[1.]", options).unwrap();
/// assert_eq!(value.at(0).unwrap().as_f64().unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Whether floats must match the JSON number grammar before they are
    /// handed to the `f64` parser.
    ///
    /// When `false`, any text the standard library accepts as an `f64` is
    /// accepted, e.g. `1.` or `.5`.
    ///
    /// # Default
    ///
    /// `true`
    pub strict_floats: bool,

    /// Maximum nesting depth followed by recursive materialization.
    ///
    /// Scanning a single container never recurses, but forcing a whole
    /// document does. Exceeding the limit yields
    /// [`Error::DepthLimitExceeded`](crate::Error::DepthLimitExceeded)
    /// instead of exhausting the stack.
    ///
    /// # Default
    ///
    /// `512`
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict_floats: true,
            max_depth: 512,
        }
    }
}

/// Tuning for [`Value::materialize_parallel`](crate::Value::materialize_parallel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializeOptions {
    /// Containers whose body is shorter than this many bytes are forced on
    /// the current thread.
    ///
    /// # Default
    ///
    /// `2000`
    pub parallel_threshold: usize,

    /// Maximum number of child values of one container being forced
    /// concurrently.
    ///
    /// # Default
    ///
    /// `3`
    pub capacity: usize,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: 2000,
            capacity: 3,
        }
    }
}
