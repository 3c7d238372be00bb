use jobspec_pointer::{format_json_pointer, get, parse_json_pointer, JsonPointer, PointerError};
use serde_json::json;

#[test]
fn pointer_parse_format_roundtrip_matrix() {
    let cases = [
        "",
        "/",
        "/foo",
        "/foo/bar",
        "/a~0b/c~1d",
        "/arr/0",
        "/~0/~1",
        "/spec/template/spec/containers/0/image",
    ];

    for pointer in cases {
        let parsed = parse_json_pointer(pointer).expect("valid pointer");
        assert_eq!(format_json_pointer(parsed.steps()), pointer);
        assert_eq!(parsed.to_string(), pointer);
    }
}

#[test]
fn pointer_get_matrix() {
    let doc = json!({"foo": {"bar": [10, 20, null]}, "": {"": "empty"}});

    let lookup = |p: &str| get(&doc, &parse_json_pointer(p).unwrap()).cloned();
    assert_eq!(lookup("/foo/bar/0"), Some(json!(10)));
    assert_eq!(lookup("/foo/bar/2"), Some(json!(null)));
    assert_eq!(lookup("/foo/bar/3"), None);
    assert_eq!(lookup("/foo/baz"), None);
    assert_eq!(lookup("//"), Some(json!("empty")));
}

#[test]
fn pointer_errors_are_descriptive() {
    let err = parse_json_pointer("metadata").unwrap_err();
    assert_eq!(err, PointerError::MissingLeadingSlash("metadata".into()));
    assert_eq!(
        err.to_string(),
        "pointer \"metadata\" must be empty or start with '/'"
    );
}

#[test]
fn pointers_sort_by_rendered_text() {
    let mut pointers: Vec<JsonPointer> = ["/metadata/namespace", "/image", "/a~1b"]
        .iter()
        .map(|p| p.parse().unwrap())
        .collect();
    pointers.sort_by_cached_key(|p| p.to_string());
    let rendered: Vec<String> = pointers.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["/a~1b", "/image", "/metadata/namespace"]);
}
