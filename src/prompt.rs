/// Response-format instructions and the call-block writer.
///
/// The parser only finds what the model was told to emit; this module
/// renders the telling. [`format_instructions`] produces the skeleton that
/// goes into the system prompt, and [`render_call`] writes a parsed record
/// back into the same syntax (useful for few-shot examples and for
/// round-trip testing).
use std::sync::LazyLock;

use crate::delimiters::Delimiters;
use crate::parser::ParsedCall;

static DEFAULT_FORMAT_INSTRUCTIONS: LazyLock<String> =
    LazyLock::new(|| format_instructions(&Delimiters::default()));

/// Cached format instructions for the default delimiter set.
#[must_use]
pub fn default_format_instructions() -> &'static str {
    &DEFAULT_FORMAT_INSTRUCTIONS
}

/// Render the response-format skeleton for `delims`.
///
/// The text documents, for the model being prompted, the exact syntax the
/// extractor accepts: thoughts first, then one call block with the function
/// name and `arg name / value` pairs each on their own lines.
#[must_use]
pub fn format_instructions(delims: &Delimiters) -> String {
    let Delimiters {
        begin,
        end,
        arg_sep,
        value_sep,
    } = delims;
    format!(
        "your_thoughts_here\n\
         ...\n\
         {begin}\n\
         function_name\n\
         {arg_sep}\n\
         arg1_name\n\
         {value_sep}\n\
         arg1_value (can be multiline)\n\
         {arg_sep}\n\
         arg2_name\n\
         {value_sep}\n\
         arg2_value (can be multiline)\n\
         ...\n\
         {end}"
    )
}

/// Write `call` back into the documented format.
///
/// Re-parsing the rendered text with the same delimiters reproduces the
/// call's name and arguments, and a thought equal to the original trimmed
/// thought. Argument values keep embedded newlines; a value's trailing
/// whitespace does not survive a round trip (the parser trims it).
#[must_use]
pub fn render_call(delims: &Delimiters, call: &ParsedCall) -> String {
    let mut out = String::with_capacity(
        call.thought.len() + call.name.len() + delims.begin.len() + delims.end.len() + 64,
    );
    if !call.thought.is_empty() {
        out.push_str(&call.thought);
        out.push('\n');
    }
    out.push_str(&delims.begin);
    out.push('\n');
    out.push_str(&call.name);
    for (name, value) in call.arguments.iter() {
        out.push('\n');
        out.push_str(&delims.arg_sep);
        out.push('\n');
        out.push_str(name);
        out.push('\n');
        out.push_str(&delims.value_sep);
        out.push('\n');
        out.push_str(value);
    }
    out.push('\n');
    out.push_str(&delims.end);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
