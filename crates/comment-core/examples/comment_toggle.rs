use comment_core::{
    CommentCommand, CommentExecutor, LanguageCommentConfig, Selection, VirtualPoint,
};

const CONFIG: &str = r#"
languages:
  rust:
    formats:
      - line: "//"
      - block_start: "/*"
        block_end: "*/"
        allow_nesting: true
"#;

fn main() {
    let config = LanguageCommentConfig::from_yaml_str(CONFIG).unwrap();
    let formats = config.formats_for("rust").unwrap();
    let mut executor =
        CommentExecutor::with_formats("fn main() {\n    println!(\"hi\");\n}\n", formats);

    // Caret on the second line: line comment at its indentation.
    let version = executor.version();
    executor
        .set_selection(Selection::caret(version, VirtualPoint::new(16)))
        .unwrap();
    executor.execute(CommentCommand::CommentSelection).unwrap();
    assert_eq!(executor.text(), "fn main() {\n    //println!(\"hi\");\n}\n");

    executor.execute(CommentCommand::UncommentSelection).unwrap();
    assert_eq!(executor.text(), "fn main() {\n    println!(\"hi\");\n}\n");

    // Part of a line: block comment around the selection.
    let version = executor.version();
    executor
        .set_selection(Selection::new(
            version,
            VirtualPoint::new(3),
            VirtualPoint::new(7),
        ))
        .unwrap();
    executor.execute(CommentCommand::CommentSelection).unwrap();
    assert_eq!(executor.text(), "fn /*main*/() {\n    println!(\"hi\");\n}\n");

    println!("{}", executor.text());
}
