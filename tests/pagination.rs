mod common;

use transcript_pdf::surface::{DrawOp, RecordingSurface};
use transcript_pdf::{
    Block, Error, LayoutMetrics, LayoutState, PagePlan, Paginator, ReportType, SectionRenderer,
    TranscriptData, plan_document,
};

const SHAPES: &[&[usize]] = &[
    &[1],
    &[3],
    &[5, 7],
    &[3, 3, 4],
    &[12, 1, 9, 2],
    &[30],
    &[1, 1, 1, 1, 1],
    &[2, 25, 2],
];

/// Upper bound on pages: every page except the first and last carries at
/// least `min_rows_per_page` rows once per-semester overhead is accounted for.
fn max_pages(t: &TranscriptData, m: &LayoutMetrics) -> usize {
    let overhead = m.semester_title_height + m.table_header_height + m.semester_summary_height;
    let largest_fragment = m.min_fragment_height();
    let usable = m.content_height() - largest_fragment - overhead;
    assert!(usable > 0.0, "page too small for the bound");
    let rows = t.total_subjects() as f32 * m.row_height;
    let semesters = t.semesters.len() as f32 * overhead;
    ((rows + semesters) / usable).ceil() as usize + 2
}

fn check_document(t: &TranscriptData, report: ReportType, m: &LayoutMetrics, pages: &[PagePlan]) {
    let range = t.semester_range(report);

    // Completeness: every row exactly once, in document order.
    let rows: Vec<(usize, usize)> = pages.iter().flat_map(|p| p.rows()).collect();
    assert_eq!(rows, common::flattened(t, range.clone()));

    // Continuation flags: true on every page but the last.
    for (i, page) in pages.iter().enumerate() {
        assert_eq!(page.page_number, i + 1);
        assert_eq!(page.more, i + 1 < pages.len());
        assert!(!page.blocks.is_empty());
        for placed in &page.blocks {
            assert!(placed.top + placed.height <= m.content_bottom() + 0.01);
        }
    }

    // Document header once, first on page 1.
    let headers: usize = pages
        .iter()
        .map(|p| p.blocks.iter().filter(|b| b.block == Block::DocumentHeader).count())
        .sum();
    assert_eq!(headers, 1);
    assert_eq!(pages[0].blocks[0].block, Block::DocumentHeader);

    for semester in range.clone() {
        let last = t.semesters[semester].subjects.len() - 1;

        // Summary directly below the semester's last row, on the same page.
        let page = pages
            .iter()
            .find(|p| p.rows().any(|r| r == (semester, last)))
            .expect("last row drawn");
        let pos = page
            .blocks
            .iter()
            .position(|b| matches!(b.block, Block::SubjectRow { semester: s, subject, .. } if s == semester && subject == last))
            .unwrap();
        assert_eq!(page.blocks[pos + 1].block, Block::SemesterSummary { semester });

        // Title exactly once, on the page of the first row.
        let titles: Vec<usize> = pages
            .iter()
            .filter(|p| p.contains(Block::SemesterTitle { semester }))
            .map(|p| p.page_number)
            .collect();
        assert_eq!(titles.len(), 1);
        let first_row_page = pages.iter().find(|p| p.rows().any(|r| r == (semester, 0))).unwrap();
        assert_eq!(titles[0], first_row_page.page_number);

        // Table header precedes the semester's rows on every page they appear.
        for page in pages.iter().filter(|p| p.rows().any(|(s, _)| s == semester)) {
            let header = page
                .blocks
                .iter()
                .position(|b| b.block == Block::TableHeader { semester })
                .expect("table header repeated");
            let first_row = page
                .blocks
                .iter()
                .position(|b| matches!(b.block, Block::SubjectRow { semester: s, .. } if s == semester))
                .unwrap();
            assert_eq!(header + 1, first_row);
        }
    }

    let overall: Vec<(usize, usize)> = pages
        .iter()
        .flat_map(|p| {
            p.blocks
                .iter()
                .enumerate()
                .filter(|(_, b)| b.block == Block::OverallSummary)
                .map(move |(i, _)| (p.page_number, i))
        })
        .collect();
    if report.is_full() {
        let last_page = pages.last().unwrap();
        assert_eq!(overall, vec![(last_page.page_number, last_page.blocks.len() - 1)]);
    } else {
        assert!(overall.is_empty());
    }

    assert!(pages.len() <= max_pages(t, m), "{} pages exceeds bound", pages.len());
}

#[test]
fn invariants_hold_across_page_sizes() {
    common::init_logging();
    for shape in SHAPES {
        let t = common::transcript(shape);
        for content_height in (270..=930).step_by(33) {
            let m = common::metrics_with_content_height(content_height as f32);
            let pages = plan_document(&t, ReportType::Full, &m).unwrap();
            check_document(&t, ReportType::Full, &m, &pages);

            let last = shape.len() - 1;
            for report in [ReportType::Semester(0), ReportType::Semester(last)] {
                let pages = plan_document(&t, report, &m).unwrap();
                check_document(&t, report, &m, &pages);
            }
        }
    }
}

#[test]
fn single_semester_fits_one_page() {
    let t = common::transcript(&[3]);
    let m = LayoutMetrics::default();
    let pages = plan_document(&t, ReportType::Semester(0), &m).unwrap();

    assert_eq!(pages.len(), 1);
    let blocks: Vec<Block> = pages[0].blocks.iter().map(|b| b.block).collect();
    assert_eq!(
        blocks,
        vec![
            Block::DocumentHeader,
            Block::SemesterTitle { semester: 0 },
            Block::TableHeader { semester: 0 },
            Block::SubjectRow { semester: 0, subject: 0, alternate: false },
            Block::SubjectRow { semester: 0, subject: 1, alternate: true },
            Block::SubjectRow { semester: 0, subject: 2, alternate: false },
            Block::SemesterSummary { semester: 0 },
        ]
    );
    assert!(!pages[0].more);
}

#[test]
fn last_row_moves_with_its_summary() {
    // Page 1 holds the header, a title, a table header and four rows; the
    // fifth row would fit alone but not together with the summary.
    let t = common::transcript(&[5, 7]);
    let m = common::metrics_with_content_height(370.0);
    let pages = plan_document(&t, ReportType::Full, &m).unwrap();
    assert_eq!(pages.len(), 3);

    let page1: Vec<(usize, usize)> = pages[0].rows().collect();
    assert_eq!(page1, vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
    assert!(!pages[0].contains(Block::SemesterSummary { semester: 0 }));

    let page2 = &pages[1];
    assert_eq!(page2.blocks[0].block, Block::TableHeader { semester: 0 });
    assert_eq!(
        page2.blocks[1].block,
        Block::SubjectRow { semester: 0, subject: 4, alternate: false }
    );
    assert_eq!(page2.blocks[2].block, Block::SemesterSummary { semester: 0 });
    assert_eq!(page2.blocks[3].block, Block::SemesterTitle { semester: 1 });
    assert_eq!(page2.blocks[4].block, Block::TableHeader { semester: 1 });
    assert_eq!(page2.rows().filter(|&(s, _)| s == 1).count(), 6);

    let page3: Vec<Block> = pages[2].blocks.iter().map(|b| b.block).collect();
    assert_eq!(
        page3,
        vec![
            Block::TableHeader { semester: 1 },
            Block::SubjectRow { semester: 1, subject: 6, alternate: false },
            Block::SemesterSummary { semester: 1 },
            Block::OverallSummary,
        ]
    );
}

#[test]
fn full_report_on_one_page() {
    let t = common::transcript(&[3, 3, 4]);
    let m = LayoutMetrics::default();
    let pages = plan_document(&t, ReportType::Full, &m).unwrap();

    assert_eq!(pages.len(), 1);
    let page = &pages[0];
    for semester in 0..3 {
        assert!(page.contains(Block::SemesterTitle { semester }));
        assert!(page.contains(Block::SemesterSummary { semester }));
    }
    assert_eq!(page.rows().count(), 10);
    assert_eq!(page.blocks.last().unwrap().block, Block::OverallSummary);
}

#[test]
fn overall_summary_can_spill_to_its_own_page() {
    // Header 170 + title 38 + table header 30 + 2 rows + summary 50 = 338.
    let t = common::transcript(&[2]);
    let m = common::metrics_with_content_height(360.0);
    let pages = plan_document(&t, ReportType::Full, &m).unwrap();

    assert_eq!(pages.len(), 2);
    assert!(pages[0].contains(Block::SemesterSummary { semester: 0 }));
    let page2: Vec<Block> = pages[1].blocks.iter().map(|b| b.block).collect();
    assert_eq!(page2, vec![Block::OverallSummary]);
}

#[test]
fn empty_semester_is_an_upstream_error() {
    let t = common::transcript(&[4, 0, 2]);
    let m = LayoutMetrics::default();
    let err = plan_document(&t, ReportType::Full, &m).unwrap_err();
    assert!(matches!(err, Error::EmptySemester { index: 1, .. }));
    assert!(err.is_upstream_data());
}

#[test]
fn no_semesters_is_an_upstream_error() {
    let t = common::transcript(&[]);
    let err = Paginator::new(&t, ReportType::Full, &LayoutMetrics::default())
        .err()
        .unwrap();
    assert!(matches!(err, Error::NoSemesters));
}

#[test]
fn impossible_geometry_fails_before_any_page() {
    let t = common::transcript(&[3]);
    let m = common::metrics_with_content_height(40.0);
    let err = Paginator::new(&t, ReportType::Semester(0), &m).err().unwrap();
    match err {
        Error::PageTooSmall { needed, available } => {
            assert!(needed > available);
            assert_eq!(available, 40.0);
        }
        other => panic!("unexpected {other:?}"),
    }

    let config = common::config(m);
    let err = transcript_pdf::generate_bytes(&t, ReportType::Semester(0), &config).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn negative_header_height_is_rejected() {
    let t = common::transcript(&[3]);
    let m = LayoutMetrics {
        document_header_height: -500.0,
        ..LayoutMetrics::default()
    };
    let err = plan_document(&t, ReportType::Full, &m).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidMetric {
            field: "document_header_height",
            ..
        }
    ));
    assert!(err.is_configuration());
}

#[test]
fn page_after_done_is_rejected() {
    let t = common::transcript(&[2]);
    let m = LayoutMetrics::default();
    let mut paginator = Paginator::new(&t, ReportType::Semester(0), &m).unwrap();

    let page = paginator.next_page().unwrap();
    assert!(!page.more);
    assert!(paginator.is_done());
    assert_eq!(paginator.cursor().state(), LayoutState::Done);
    assert!(matches!(paginator.next_page(), Err(Error::JobFinished)));
    // The iterator view simply ends.
    assert!(paginator.next().is_none());
}

#[test]
fn cursor_resumes_at_first_undrawn_row() {
    let t = common::transcript(&[5, 7]);
    let m = common::metrics_with_content_height(370.0);
    let mut paginator = Paginator::new(&t, ReportType::Full, &m).unwrap();

    paginator.next_page().unwrap();
    assert_eq!(
        paginator.cursor().state(),
        LayoutState::TableRows { semester: 0, subject: 4 }
    );
    assert!(paginator.cursor().header_drawn());
    assert_eq!(paginator.cursor().page_number(), 1);

    paginator.next_page().unwrap();
    assert_eq!(paginator.cursor().position(), Some((1, 6)));
}

#[test]
fn render_page_paints_plan_and_footer() {
    common::init_logging();
    let t = common::transcript(&[5, 7]);
    let config = common::config(common::metrics_with_content_height(370.0));
    let renderer = SectionRenderer::new(&config.metrics, &config.style, &config.options);
    let mut paginator = Paginator::new(&t, ReportType::Full, &config.metrics).unwrap();

    let mut pages = Vec::new();
    loop {
        let mut surface = RecordingSurface::new();
        let more = paginator.render_page(&mut surface, &renderer).unwrap();
        pages.push(surface);
        if !more {
            break;
        }
    }
    assert_eq!(pages.len(), 3);

    for (i, page) in pages.iter().enumerate() {
        assert!(page.contains_text(&format!("Page {}", i + 1)));
        assert!(page.contains_text("Registrar"));
        assert!(page.lowest_y() <= config.metrics.printable().bottom() + 0.01);
    }
    assert!(pages[0].contains_text("ACADEMIC TRANSCRIPT"));
    assert!(!pages[1].contains_text("ACADEMIC TRANSCRIPT"));
    assert!(pages[1].contains_text("Semester GPA: 3.25"));
    assert!(pages[2].contains_text("CGPA: 3.25"));
    assert!(!pages[1].contains_text("CGPA"));

    // Zebra fill on odd rows only: page 1 has rows 0..=3, so two stripes.
    let zebra = pages[0]
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::FillRect { color, .. } if *color == config.style.zebra_fill))
        .count();
    assert_eq!(zebra, 2);
}

#[test]
fn concurrent_jobs_share_only_the_transcript() {
    let t = common::transcript(&[12, 1, 9, 2]);
    let m = common::metrics_with_content_height(420.0);
    let expected = plan_document(&t, ReportType::Full, &m).unwrap();

    let results: Vec<Vec<PagePlan>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| plan_document(&t, ReportType::Full, &m).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for pages in results {
        assert_eq!(pages, expected);
    }

    // Interleaving two jobs on one thread does not disturb either.
    let mut a = Paginator::new(&t, ReportType::Full, &m).unwrap();
    let mut b = Paginator::new(&t, ReportType::Full, &m).unwrap();
    let first_a = a.next_page().unwrap();
    let first_b = b.next_page().unwrap();
    assert_eq!(first_a, first_b);
    let rest_a: Vec<PagePlan> = a.map(Result::unwrap).collect();
    assert_eq!(rest_a, expected[1..]);
}
