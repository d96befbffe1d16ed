/// Call-block parser — extracts the last delimited function call from LLM
/// output.
///
/// The model is instructed (see [`crate::prompt`]) to end its reply with a
/// call block framed by the markers in [`Delimiters`]:
///
/// ```text
/// free-form reasoning...
/// ----BEGIN_FUNCTION_CALL----
/// function_name
/// ----ARG----
/// arg_name
/// ----VALUE----
/// arg_value (may span lines)
/// ----END_FUNCTION_CALL----
/// ```
///
/// Key invariants:
/// - The parser binds to the LAST `begin…end` pair in the text, so delimiter
///   look-alikes earlier in the reasoning cannot shadow the real call.
/// - Absence of a call block is a normal outcome (`None`), never an error.
/// - A malformed argument block is dropped; the rest of the call still
///   parses.
use crate::delimiters::Delimiters;
use memchr::memmem;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::sync::LazyLock;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A function call extracted from the model's text output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedCall {
    /// Free-form reasoning preceding the call block, trimmed.
    pub thought: String,
    /// The function name (non-empty, trimmed).
    pub name: String,
    /// Named arguments in insertion order.
    pub arguments: Arguments,
}

impl ParsedCall {
    /// The arguments as a JSON object string, keys in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` when serialization fails.
    pub fn arguments_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.arguments)
    }
}

/// Insertion-ordered argument map.
///
/// Re-binding an existing name overwrites its value in place: the name keeps
/// its first position in iteration order and only the final value survives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments(SmallVec<[(Box<str>, String); 4]>);

impl Arguments {
    /// Create an empty argument map.
    #[must_use]
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Bind `name` to `value`, overwriting in place when `name` is already
    /// bound.
    pub fn insert(&mut self, name: &str, value: &str) {
        if let Some((_, existing)) = self.0.iter_mut().find(|(n, _)| &**n == name) {
            value.clone_into(existing);
        } else {
            self.0.push((name.into(), value.to_string()));
        }
    }

    /// Look up an argument value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| &**n == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (&**name, value.as_str()))
    }
}

impl Serialize for Arguments {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(&**name, value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

static DEFAULT_EXTRACTOR: LazyLock<Extractor> = LazyLock::new(Extractor::new);

/// Extract the last call block from `text` using the default delimiters.
#[must_use]
pub fn extract_call(text: Option<&str>) -> Option<ParsedCall> {
    DEFAULT_EXTRACTOR.extract(text)
}

/// Extracts the last well-formed call block from model output.
///
/// Holds only the immutable delimiter set, so one instance can be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    delims: Delimiters,
}

impl Extractor {
    /// An extractor using the default delimiters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delims: Delimiters::default(),
        }
    }

    /// An extractor using alternate delimiters.
    #[must_use]
    pub fn with_delimiters(delims: Delimiters) -> Self {
        Self { delims }
    }

    #[must_use]
    pub fn delimiters(&self) -> &Delimiters {
        &self.delims
    }

    /// Extract the last well-formed call block from `text`.
    ///
    /// Returns `None` when `text` is absent or holds no complete call block:
    /// no `end` marker, no `begin` marker fully before the last `end`, empty
    /// body, or empty function name. `None` is the normal "model produced no
    /// call yet" outcome, not an error.
    #[must_use]
    pub fn extract(&self, text: Option<&str>) -> Option<ParsedCall> {
        let text = text?;
        let bytes = text.as_bytes();
        let delims = &self.delims;

        // Bind to the last `end` marker, then to the last `begin` that ends
        // at or before it. Scanning backward keeps delimiter look-alikes
        // earlier in the reasoning from shadowing the real call.
        let end_idx = memmem::rfind(bytes, delims.end.as_bytes())?;
        let begin_idx = memmem::rfind(&bytes[..end_idx], delims.begin.as_bytes())?;

        let thought = text[..begin_idx].trim();
        let body = text[begin_idx + delims.begin.len()..end_idx].trim();
        if body.is_empty() {
            return None;
        }

        let (name, arg_section) = match memmem::find(body.as_bytes(), delims.arg_sep.as_bytes()) {
            None => (body, ""),
            Some(idx) => (body[..idx].trim(), &body[idx + delims.arg_sep.len()..]),
        };
        if name.is_empty() {
            return None;
        }

        let mut arguments = Arguments::new();
        if !arg_section.is_empty() {
            for raw_block in arg_section.split(&*delims.arg_sep) {
                let block = raw_block.trim();
                if block.is_empty() {
                    continue;
                }
                let Some(value_idx) = memmem::find(block.as_bytes(), delims.value_sep.as_bytes())
                else {
                    tracing::debug!("dropping argument block without a value separator");
                    continue;
                };
                let arg_name = block[..value_idx].trim();
                if arg_name.is_empty() {
                    tracing::debug!("dropping argument block with an empty name");
                    continue;
                }
                let raw_value = &block[value_idx + delims.value_sep.len()..];
                // The format puts the value on its own line; eat that one
                // newline but keep any further leading whitespace verbatim.
                let value = raw_value.strip_prefix('\n').unwrap_or(raw_value).trim_end();
                arguments.insert(arg_name, value);
            }
        }

        Some(ParsedCall {
            thought: thought.to_string(),
            name: name.to_string(),
            arguments,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
