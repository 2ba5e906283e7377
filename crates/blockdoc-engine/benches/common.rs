// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **some** *content* and a [link](https://example.com).\n\n- Bullet point\n  - Nested item\n- Another item\n\n> Quoted text\n\n| A | B |\n| --- | --- |\n| 1 | 2 |\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_simplified_blocks(size: usize) -> serde_json::Value {
    let blocks: Vec<serde_json::Value> = (0..size)
        .flat_map(|i| {
            [
                serde_json::json!({"type": "heading", "level": 2, "text": format!("Section {i}")}),
                serde_json::json!({"type": "paragraph", "text": "Some **bold** text."}),
                serde_json::json!({"type": "list", "items": ["one", {"text": "two", "items": ["nested"]}]}),
                serde_json::json!({"type": "table", "headers": ["Name", "Age"], "rows": [["Alice", 30]]}),
            ]
        })
        .collect();
    serde_json::Value::Array(blocks)
}
