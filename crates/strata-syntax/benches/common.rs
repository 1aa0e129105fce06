// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markup_content(size: usize) -> String {
    let base = "= Title\n\nParagraph with = signs and \\= escapes.\n\n== Section\n  continued over\n  two lines {\nlet x = 1\n}\n\n[= Boxed] and `raw = text`\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_nested_headings(sections: usize, depth: usize) -> String {
    let mut content = String::new();

    for section in 0..sections {
        for level in 1..=depth {
            let indent = "  ".repeat(level - 1);
            let markers = "=".repeat(level);
            content.push_str(&format!("{indent}{markers} Section {section} level {level}\n"));
            content.push_str(&format!("{indent}  body text for level {level}\n"));
        }
        content.push('\n');
    }

    content
}
