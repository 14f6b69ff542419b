use comment_core::{
    CommandResult, CommentCommand, CommentExecutor, CommentFormat, FormatSet, LanguageCommentConfig,
    Selection, SelectionDirection, TextHost, Version, VirtualPoint, VirtualSpan,
};
use pretty_assertions::assert_eq;

fn c_like(text: &str) -> CommentExecutor {
    CommentExecutor::with_formats(
        text,
        FormatSet::new([
            CommentFormat::line("//").unwrap(),
            CommentFormat::block("/*", "*/").unwrap(),
        ]),
    )
}

fn select(executor: &mut CommentExecutor, anchor: usize, active: usize) {
    let version = executor.version();
    executor
        .set_selection(Selection::new(
            version,
            VirtualPoint::new(anchor),
            VirtualPoint::new(active),
        ))
        .unwrap();
}

#[test]
fn test_toggle_line_comment_multi_line_selection() {
    let mut ex = c_like("a\n  b\nc");
    select(&mut ex, 0, 7);

    ex.execute(CommentCommand::CommentSelection).unwrap();
    assert_eq!(ex.text(), "//a\n//  b\n//c");

    ex.execute(CommentCommand::UncommentSelection).unwrap();
    assert_eq!(ex.text(), "a\n  b\nc");
    assert_eq!(ex.version(), Version(2));
}

#[test]
fn test_selection_follows_result() {
    let mut ex = c_like("    Initial text");
    select(&mut ex, 6, 6);

    let result = ex.execute(CommentCommand::CommentSelection).unwrap();
    let expected = VirtualSpan::from_offsets(Version(1), 0, 18);
    assert_eq!(result, CommandResult::Spans(vec![expected]));
    assert_eq!(
        ex.selections(),
        &[Selection::from_span(expected, SelectionDirection::Forward)]
    );
}

#[test]
fn test_reversed_selection_is_preserved() {
    let mut ex = c_like("one\ntwo\nthree");
    select(&mut ex, 7, 0);

    ex.execute(CommentCommand::CommentSelection).unwrap();
    assert_eq!(ex.text(), "//one\n//two\nthree");

    let primary = *ex.primary_selection().unwrap();
    assert!(primary.is_reversed());
    assert_eq!(primary.anchor, VirtualPoint::new(11));
    assert_eq!(primary.active, VirtualPoint::new(0));
}

#[test]
fn test_box_selection_comments_every_line() {
    let mut ex = c_like("ab\nabcd\nab");
    ex.select_box((0, 0), (2, 0));
    assert_eq!(ex.selections().len(), 3);

    let result = ex.execute(CommentCommand::CommentSelection).unwrap();
    assert_eq!(ex.text(), "//ab\n//abcd\n//ab");
    assert_eq!(
        result,
        CommandResult::Spans(vec![
            VirtualSpan::from_offsets(Version(1), 0, 4),
            VirtualSpan::from_offsets(Version(1), 5, 11),
            VirtualSpan::from_offsets(Version(1), 12, 16),
        ])
    );

    ex.execute(CommentCommand::UncommentSelection).unwrap();
    assert_eq!(ex.text(), "ab\nabcd\nab");
}

#[test]
fn test_box_selection_in_virtual_space() {
    let mut ex = c_like("abcdef\nab");
    ex.select_box((0, 4), (1, 4));
    assert_eq!(
        ex.selections()[1].active,
        VirtualPoint::with_virtual_spaces(9, 2)
    );

    ex.execute(CommentCommand::CommentSelection).unwrap();
    assert_eq!(ex.text(), "//abcdef\n//ab");
}

#[test]
fn test_overlapping_selections_are_merged() {
    let mut ex = c_like("abc");
    ex.set_selections(
        vec![
            Selection::new(Version(0), VirtualPoint::new(0), VirtualPoint::new(2)),
            Selection::new(Version(0), VirtualPoint::new(1), VirtualPoint::new(3)),
        ],
        1,
    )
    .unwrap();
    assert_eq!(ex.selections().len(), 1);

    ex.execute(CommentCommand::CommentSelection).unwrap();
    assert_eq!(ex.text(), "//abc");
}

#[test]
fn test_two_carets_on_one_line_toggle_round_trips() {
    let mut ex = c_like("abc");
    ex.set_selections(
        vec![
            Selection::caret(Version(0), VirtualPoint::new(1)),
            Selection::caret(Version(0), VirtualPoint::new(2)),
        ],
        0,
    )
    .unwrap();
    assert_eq!(ex.selections().len(), 2);

    ex.execute(CommentCommand::CommentSelection).unwrap();
    assert_eq!(ex.text(), "//abc");

    ex.execute(CommentCommand::UncommentSelection).unwrap();
    assert_eq!(ex.text(), "abc");
}

#[test]
fn test_selections_survive_direct_buffer_edits() {
    let mut ex = c_like("abc\ndef");
    select(&mut ex, 5, 5);

    let mut edit = ex.buffer().create_edit();
    edit.insert(0, "x\n");
    ex.buffer_mut().apply(edit).unwrap();

    ex.execute(CommentCommand::CommentSelection).unwrap();
    assert_eq!(ex.text(), "x\nabc\n//def");
}

#[test]
fn test_unchanged_when_nothing_matches() {
    let mut ex = c_like("plain");
    select(&mut ex, 0, 5);

    let result = ex.execute(CommentCommand::UncommentSelection).unwrap();
    assert_eq!(ex.text(), "plain");
    assert_eq!(ex.version(), Version(0));
    assert_eq!(
        result,
        CommandResult::Spans(vec![VirtualSpan::from_offsets(Version(0), 0, 5)])
    );
    assert!(ex.last_text_delta().is_none());
}

#[test]
fn test_execute_batch() {
    let mut ex = c_like("x");
    let results = ex
        .execute_batch(vec![
            CommentCommand::CommentSelection,
            CommentCommand::UncommentSelection,
            CommentCommand::CommentSelection,
        ])
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(ex.text(), "//x");
    assert_eq!(ex.get_command_history().len(), 3);
}

#[test]
fn test_executor_from_yaml_config() {
    let config = LanguageCommentConfig::from_yaml_str(
        r##"
languages:
  python:
    formats:
      - line: "#"
"##,
    )
    .unwrap();

    let mut ex = CommentExecutor::with_formats("def f():\n    pass", config.formats_for("python").unwrap());
    select(&mut ex, 0, 17);
    ex.execute(CommentCommand::CommentSelection).unwrap();
    assert_eq!(ex.text(), "#def f():\n#    pass");
}
