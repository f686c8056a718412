pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;
pub const DEFAULT_MAX_NESTING: usize = 128;

/// Evaluation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Nested function calls allowed before evaluation fails with
    /// `ErrorKind::RecursionLimit`.
    pub max_call_depth: usize,
    /// Parenthesis, argument and function body nesting the parser accepts.
    /// Operator chains such as `1 + 2 + 3` do not count towards it.
    pub max_nesting: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}
