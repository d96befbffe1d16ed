use callblock::{
    default_format_instructions, extract_call, render_call, Arguments, Delimiters, Extractor,
    ParsedCall,
};

fn sample_call() -> ParsedCall {
    let mut arguments = Arguments::new();
    arguments.insert("path", "src/main.rs");
    arguments.insert("content", "fn main() {\n    println!(\"hi\");\n}");
    ParsedCall {
        thought: "The file needs a main function.".to_string(),
        name: "write_file".to_string(),
        arguments,
    }
}

#[test]
fn render_and_extract_round_trip() {
    let delims = Delimiters::default();
    let call = sample_call();

    let text = render_call(&delims, &call);
    let reparsed = extract_call(Some(&text)).expect("rendered call must parse");
    assert_eq!(reparsed, call);
}

#[test]
fn round_trip_with_custom_delimiters() {
    let delims = Delimiters::new("[[call]]", "[[/call]]", "[[arg]]", "[[val]]");
    let extractor = Extractor::with_delimiters(delims.clone());
    let call = sample_call();

    let text = render_call(&delims, &call);
    let reparsed = extractor.extract(Some(&text)).expect("rendered call must parse");
    assert_eq!(reparsed, call);
}

#[test]
fn round_trip_trims_value_trailing_whitespace() {
    let mut arguments = Arguments::new();
    arguments.insert("note", "padded   ");
    let call = ParsedCall {
        thought: String::new(),
        name: "remember".to_string(),
        arguments,
    };

    let delims = Delimiters::default();
    let reparsed = extract_call(Some(&render_call(&delims, &call))).expect("must parse");
    assert_eq!(reparsed.arguments.get("note"), Some("padded"));
}

#[test]
fn parsed_call_serializes_with_three_fields() {
    let value = serde_json::to_value(sample_call()).expect("serialize");
    let object = value.as_object().expect("object");
    assert_eq!(object.len(), 3);
    assert_eq!(object["name"], "write_file");
    assert_eq!(object["arguments"]["path"], "src/main.rs");
}

#[test]
fn arguments_json_preserves_insertion_order() {
    let call = sample_call();
    let json = call.arguments_json().expect("serialize");
    assert!(json.starts_with(r#"{"path":"#));

    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(parsed["content"], "fn main() {\n    println!(\"hi\");\n}");
}

#[test]
fn one_extractor_shared_across_threads() {
    let extractor = Extractor::new();
    let text = "pondering\n----BEGIN_FUNCTION_CALL----\nsearch\n\
                ----ARG----\nquery\n----VALUE----\nrust memmem\n\
                ----END_FUNCTION_CALL----";

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let call = extractor.extract(Some(text)).expect("must parse");
                    assert_eq!(call.name, "search");
                    assert_eq!(call.arguments.get("query"), Some("rust memmem"));
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread");
        }
    });
}

#[test]
fn format_instructions_parse_as_documented() {
    // The skeleton itself is a well-formed call block: the placeholder name
    // and arguments must come back out of the extractor. The ellipsis line
    // before the end marker belongs to the last value, values being
    // multiline.
    let call = extract_call(Some(default_format_instructions())).expect("skeleton must parse");
    assert_eq!(call.name, "function_name");
    assert_eq!(
        call.arguments.get("arg1_name"),
        Some("arg1_value (can be multiline)")
    );
    assert_eq!(
        call.arguments.get("arg2_name"),
        Some("arg2_value (can be multiline)\n...")
    );
}
