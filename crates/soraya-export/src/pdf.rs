use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::info;

use soraya_core::models::report::RenderedReport;

use crate::error::ExportError;
use crate::layout::{self, paginate, DocumentLayout, LineKind, Page, PAGE_HEIGHT_PT, PAGE_WIDTH_PT};
use crate::render::render_report;
use crate::styles::DocumentStyles;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Render, lay out and draw the report as a PDF.
pub fn export_pdf(report: &RenderedReport, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let rendered = render_report(report)?;
    let layout = paginate(&rendered, &report.disclaimer, &report.model_version, styles);
    let bytes = draw(&layout, styles)?;
    info!(pages = layout.pages.len(), bytes = bytes.len(), "report exported");
    Ok(bytes)
}

/// Assemble the laid-out pages into a PDF document.
///
/// A4 media box inherited from the page tree, one shared font resource
/// dictionary referenced by every page, one content stream per page.
pub fn draw(layout: &DocumentLayout, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    // TODO: embed a Unicode font; the builtin Type1 pair is WinAnsi
    // only, so Persian interpretation text does not shape correctly.
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in &layout.pages {
        let content = page_content(page, styles);
        let encoded = content.encode().map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let width = PAGE_WIDTH_PT as i64;
    let height = PAGE_HEIGHT_PT as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(bytes)
}

fn page_content(page: &Page, styles: &DocumentStyles) -> Content {
    let margin = layout::margin_pt(styles) as i64;
    let width = PAGE_WIDTH_PT as i64;
    let body_size = styles.body_size as i64;
    let h1_size = styles.heading1_size as i64;
    let h2_size = styles.heading2_size as i64;
    let footer_size = styles.footer_size as i64;

    let mut ops: Vec<Operation> = Vec::new();
    let mut cursor = PAGE_HEIGHT_PT as i64 - margin;

    let mut i = 0;
    while i < page.lines.len() {
        let line = &page.lines[i];

        if line.kind == LineKind::Note {
            // Boxed note runs get one filled rectangle behind the text.
            let run = page.lines[i..]
                .iter()
                .take_while(|l| l.kind == LineKind::Note)
                .count();
            let lead = layout::leading(LineKind::Note, styles) as i64;

            let box_top = cursor - 1;
            let box_bottom = cursor - run as i64 * lead - 4;
            ops.push(Operation::new("q", vec![]));
            ops.push(Operation::new("g", vec![Object::Real(0.93)]));
            ops.push(Operation::new(
                "re",
                vec![
                    (margin - 6).into(),
                    box_bottom.into(),
                    (width - margin * 2 + 12).into(),
                    (box_top - box_bottom).into(),
                ],
            ));
            ops.push(Operation::new("f", vec![]));
            ops.push(Operation::new("Q", vec![]));

            for note in &page.lines[i..i + run] {
                cursor -= lead;
                text_ops(&mut ops, REGULAR_FONT, body_size, margin + 8, cursor, &note.text);
            }
            i += run;
            continue;
        }

        cursor -= layout::leading(line.kind, styles) as i64;
        match line.kind {
            LineKind::Heading1 => {
                text_ops(&mut ops, BOLD_FONT, h1_size, margin, cursor, &line.text);
            }
            LineKind::Heading2 => {
                text_ops(&mut ops, BOLD_FONT, h2_size, margin, cursor, &line.text);
            }
            LineKind::Body => {
                text_ops(&mut ops, REGULAR_FONT, body_size, margin, cursor, &line.text);
            }
            LineKind::Bullet => {
                let text = if line.continuation {
                    line.text.clone()
                } else {
                    format!("- {}", line.text)
                };
                text_ops(&mut ops, REGULAR_FONT, body_size, margin + 12, cursor, &text);
            }
            LineKind::Numbered => {
                text_ops(&mut ops, REGULAR_FONT, body_size, margin + 12, cursor, &line.text);
            }
            LineKind::Highlight => {
                text_ops(&mut ops, BOLD_FONT, body_size, margin + 12, cursor, &line.text);
            }
            LineKind::Note | LineKind::Spacer => {}
        }
        i += 1;
    }

    let footer = &page.footer;
    if !footer.disclaimer.is_empty() {
        text_ops(&mut ops, REGULAR_FONT, footer_size, margin, 44, &footer.disclaimer);
    }
    text_ops(&mut ops, REGULAR_FONT, footer_size, margin, 30, &footer.page_label);
    let version_width = footer.version.chars().count() as i64 * footer_size / 2;
    let version_x = (width - margin - version_width).max(margin);
    text_ops(&mut ops, REGULAR_FONT, footer_size, version_x, 30, &footer.version);

    Content { operations: ops }
}

fn text_ops(ops: &mut Vec<Operation>, font: &str, size: i64, x: i64, y: i64, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}
