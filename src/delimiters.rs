/// Default marker opening a call block.
pub const BEGIN_CALL: &str = "----BEGIN_FUNCTION_CALL----";
/// Default marker closing a call block.
pub const END_CALL: &str = "----END_FUNCTION_CALL----";
/// Default marker separating the function name and each argument block.
pub const ARG_SEP: &str = "----ARG----";
/// Default marker separating an argument's name from its value.
pub const VALUE_SEP: &str = "----VALUE----";

/// The four marker strings that frame a call block.
///
/// Markers are matched as literal substrings, never as patterns. The four
/// strings must be distinct and non-overlapping; the defaults satisfy this
/// and are what the response-format instructions document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    /// Opens the call block.
    pub begin: Box<str>,
    /// Closes the call block.
    pub end: Box<str>,
    /// Separates the function name and each argument block.
    pub arg_sep: Box<str>,
    /// Separates an argument's name from its value.
    pub value_sep: Box<str>,
}

impl Delimiters {
    /// Build a delimiter set with alternate markers.
    #[must_use]
    pub fn new(begin: &str, end: &str, arg_sep: &str, value_sep: &str) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
            arg_sep: arg_sep.into(),
            value_sep: value_sep.into(),
        }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new(BEGIN_CALL, END_CALL, ARG_SEP, VALUE_SEP)
    }
}
