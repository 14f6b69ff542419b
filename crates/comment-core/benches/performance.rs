use comment_core::{
    CommandResult, CommentCommand, CommentExecutor, CommentFormat, Commenter, FormatCommenter,
    FormatSet, TextBuffer, Version, VirtualPoint, VirtualSpan,
};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "    let line_{i:06} = \"the quick brown fox jumps over the lazy dog\";\n"
        ));
    }
    // Remove the final '\n' to avoid creating an extra trailing empty line.
    out.pop();
    out
}

fn c_like() -> FormatSet {
    FormatSet::new([
        CommentFormat::line("//").unwrap(),
        CommentFormat::block("/*", "*/").unwrap(),
    ])
}

fn whole(text: &str) -> VirtualSpan {
    VirtualSpan::from_offsets(Version(0), 0, text.chars().count())
}

fn bench_comment_whole_document(c: &mut Criterion) {
    let text = large_text(50_000);
    let commenter = FormatCommenter::new(c_like());
    c.bench_function("comment_lines/50k_lines", |b| {
        b.iter_batched(
            || TextBuffer::new(&text),
            |mut buffer| {
                let spans = commenter.comment_spans(&mut buffer, &[whole(&text)]).unwrap();
                black_box(spans);
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_uncomment_whole_document(c: &mut Criterion) {
    let text = large_text(50_000);
    let commenter = FormatCommenter::new(c_like());
    let mut commented = TextBuffer::new(&text);
    commenter
        .comment_spans(&mut commented, &[whole(&text)])
        .unwrap();
    let commented = commented.text();

    c.bench_function("uncomment_lines/50k_lines", |b| {
        b.iter_batched(
            || TextBuffer::new(&commented),
            |mut buffer| {
                let spans = commenter
                    .uncomment_spans(&mut buffer, &[whole(&commented)])
                    .unwrap();
                black_box(spans);
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_many_carets(c: &mut Criterion) {
    let text = large_text(10_000);
    let buffer = TextBuffer::new(&text);
    let snapshot = comment_core::TextHost::current_snapshot(&buffer);
    // One caret every tenth line.
    let carets: Vec<VirtualSpan> = (0..snapshot.line_count())
        .step_by(10)
        .map(|line| VirtualSpan::caret(Version(0), VirtualPoint::new(snapshot.line(line).start())))
        .collect();
    let commenter = FormatCommenter::new(c_like());

    c.bench_function("comment_carets/1k_carets", |b| {
        b.iter_batched(
            || buffer.clone(),
            |mut buffer| {
                let spans = commenter.comment_spans(&mut buffer, &carets).unwrap();
                black_box(spans);
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_toggle_command(c: &mut Criterion) {
    let text = large_text(1_000);
    c.bench_function("toggle_command/1k_lines", |b| {
        b.iter_batched(
            || CommentExecutor::with_formats(&text, c_like()),
            |mut executor| {
                let result = executor
                    .execute(CommentCommand::CommentSelection)
                    .unwrap();
                assert!(matches!(result, CommandResult::Spans(_)));
                let result = executor
                    .execute(CommentCommand::UncommentSelection)
                    .unwrap();
                black_box(result);
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_comment_whole_document,
    bench_uncomment_whole_document,
    bench_many_carets,
    bench_toggle_command
);
criterion_main!(benches);
