use soraya_export::layout::{paginate, LineKind};
use soraya_export::styles::DocumentStyles;

fn styles() -> DocumentStyles {
    DocumentStyles::default()
}

#[test]
fn classifies_every_marker_kind() {
    let rendered = "# A\n## B\n- C\nD\n1. E\n! F\n> G\n";
    let layout = paginate(rendered, "note", "v1", &styles());

    let lines = &layout.pages[0].lines;
    let kinds: Vec<LineKind> = lines.iter().map(|line| line.kind).collect();
    assert_eq!(
        kinds,
        vec![
            LineKind::Heading1,
            LineKind::Heading2,
            LineKind::Bullet,
            LineKind::Body,
            LineKind::Numbered,
            LineKind::Highlight,
            LineKind::Note,
        ]
    );

    assert_eq!(lines[0].text, "A");
    assert_eq!(lines[2].text, "C");
    assert_eq!(lines[4].text, "1. E");
    assert_eq!(lines[5].text, "F");
    assert_eq!(lines[6].text, "G");
}

#[test]
fn single_page_document_gets_a_single_footer() {
    let layout = paginate(
        "# Title\n\nBody line\n",
        "Short disclaimer.",
        "Gail v2 (BCRA)",
        &styles(),
    );

    assert_eq!(layout.pages.len(), 1);
    let footer = &layout.pages[0].footer;
    assert_eq!(footer.page_label, "Page 1 of 1");
    assert_eq!(footer.version, "Gail v2 (BCRA)");
    assert_eq!(footer.disclaimer, "Short disclaimer.");
}

#[test]
fn long_documents_break_into_numbered_pages() {
    let rendered: String = (1..=120)
        .map(|i| format!("{i}. Recommendation line {i}\n"))
        .collect();
    let layout = paginate(&rendered, "disclaimer", "v1", &styles());

    let total = layout.pages.len();
    assert!(total >= 2);
    for (index, page) in layout.pages.iter().enumerate() {
        assert!(!page.lines.is_empty());
        assert_eq!(page.footer.page_label, format!("Page {} of {}", index + 1, total));
        assert_eq!(page.footer.version, "v1");
        assert_eq!(page.footer.disclaimer, "disclaimer");
    }
}

#[test]
fn headings_never_end_a_page() {
    for filler in 40..=55 {
        let mut rendered = String::new();
        for i in 0..filler {
            rendered.push_str(&format!("Body line {i}\n"));
        }
        rendered.push_str("## Section\n");
        for i in 0..10 {
            rendered.push_str(&format!("Tail line {i}\n"));
        }

        let layout = paginate(&rendered, "d", "v", &styles());
        for page in &layout.pages {
            let last = page.lines.last().unwrap();
            assert!(
                last.kind != LineKind::Heading1 && last.kind != LineKind::Heading2,
                "page ended with a heading at filler {filler}"
            );
        }
    }
}

#[test]
fn wrapped_lines_keep_their_kind_and_mark_continuations() {
    let long = "word ".repeat(60);
    let rendered = format!("- {long}\n");
    let layout = paginate(&rendered, "d", "v", &styles());

    let bullets: Vec<_> = layout.pages[0]
        .lines
        .iter()
        .filter(|line| line.kind == LineKind::Bullet)
        .collect();
    assert!(bullets.len() >= 2);
    assert!(!bullets[0].continuation);
    assert!(bullets.iter().skip(1).all(|line| line.continuation));
}

#[test]
fn blank_runs_collapse_to_one_spacer() {
    let layout = paginate("First\n\n\n\nSecond\n", "d", "v", &styles());

    let kinds: Vec<LineKind> = layout.pages[0].lines.iter().map(|line| line.kind).collect();
    assert_eq!(kinds, vec![LineKind::Body, LineKind::Spacer, LineKind::Body]);
}

#[test]
fn overlong_token_hard_splits_without_panic() {
    let token = "x".repeat(500);
    let layout = paginate(&token, "d", "v", &styles());

    let lines = &layout.pages[0].lines;
    assert!(lines.len() > 1);
    assert!(lines.iter().all(|line| line.text.chars().count() <= 86));
}

#[test]
fn empty_input_still_yields_one_page() {
    let layout = paginate("", "d", "v", &styles());

    assert_eq!(layout.pages.len(), 1);
    assert!(layout.pages[0].lines.is_empty());
    assert_eq!(layout.pages[0].footer.page_label, "Page 1 of 1");
}

#[test]
fn footer_disclaimer_is_shortened() {
    let disclaimer = "a".repeat(200);
    let layout = paginate("Body\n", &disclaimer, "v", &styles());

    let excerpt = &layout.pages[0].footer.disclaimer;
    assert!(excerpt.chars().count() <= 93);
    assert!(excerpt.ends_with("..."));
}

#[test]
fn footer_version_defaults_when_missing() {
    let layout = paginate("Body\n", "d", "  ", &styles());
    assert_eq!(layout.pages[0].footer.version, "N/A");
}
