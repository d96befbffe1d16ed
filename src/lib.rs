pub mod delimiters;
pub mod parser;
pub mod prompt;

pub use delimiters::Delimiters;
pub use parser::{extract_call, Arguments, Extractor, ParsedCall};
pub use prompt::{default_format_instructions, format_instructions, render_call};
