mod surface;

use chrono::Datelike;
use pdf_writer::{Date, Filter, Name, Pdf, Rect, Ref, TextStr};

use crate::error::Result;
use crate::fonts::FontFace;
use crate::layout::Paginator;
use crate::metrics::{LayoutMetrics, Style};
use crate::model::{ReportType, TranscriptData};
use crate::sections::{RenderOptions, SectionRenderer};

use surface::PdfSurface;

/// Act as the page sink: request pages from the paginator until it reports
/// no more, then assemble the PDF.
pub fn render(
    transcript: &TranscriptData,
    report: ReportType,
    metrics: &LayoutMetrics,
    style: &Style,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let t0 = std::time::Instant::now();

    let mut paginator = Paginator::new(transcript, report, metrics)?;
    let renderer = SectionRenderer::new(metrics, style, options);

    // Phase 1: produce one content stream per page
    let mut all_contents: Vec<Vec<u8>> = Vec::new();
    loop {
        let mut surface = PdfSurface::new(metrics);
        let more = paginator.render_page(&mut surface, &renderer)?;
        all_contents.push(surface.finish());
        if !more {
            break;
        }
    }
    let t_layout = t0.elapsed();

    // Phase 2: allocate objects now that the page count is known
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();
    let font_refs: Vec<(FontFace, Ref)> = FontFace::ALL.iter().map(|&f| (f, alloc())).collect();
    let n = all_contents.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (face, font_ref) in &font_refs {
        pdf.type1_font(*font_ref)
            .base_font(Name(face.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (i, raw) in all_contents.iter().enumerate() {
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    let width_pt = metrics.page_width * metrics.pdf_scale;
    let height_pt = metrics.page_height * metrics.pdf_scale;
    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, width_pt, height_pt))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for (face, font_ref) in &font_refs {
            fonts.pair(Name(face.pdf_name().as_bytes()), *font_ref);
        }
    }

    let title = format!("Academic Transcript - {}", transcript.student.name);
    let generated = options.generated_on;
    {
        let mut info = pdf.document_info(info_id);
        info.title(TextStr(&title))
            .producer(TextStr(concat!("transcript-pdf ", env!("CARGO_PKG_VERSION"))))
            .creation_date(
                Date::new(generated.year() as u16)
                    .month(generated.month() as u8)
                    .day(generated.day() as u8),
            );
        if !options.institution.is_empty() {
            info.author(TextStr(&options.institution));
        }
    }

    let t_assembly = t0.elapsed();
    log::info!(
        "Render phases: layout={:.1}ms ({} pages), assembly={:.1}ms",
        t_layout.as_secs_f64() * 1000.0,
        n,
        (t_assembly - t_layout).as_secs_f64() * 1000.0,
    );

    Ok(pdf.finish())
}
