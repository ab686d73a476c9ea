use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, PageMargin, Paragraph, Run, RunFonts, Style, StyleType,
};
use tracing::debug;

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// Generate a DOCX document from rendered report Markdown.
///
/// The `rendered` content uses a simple subset:
/// - `# Heading` → DOCX Heading 1
/// - `## Heading` → DOCX Heading 2
/// - `### Heading` → DOCX Heading 3
/// - `- item` → bullet list item (prefixed with bullet character)
/// - `**bold**` → bold run
/// - `---` or `***` → page break
/// - Everything else → normal paragraph
pub fn generate_docx(rendered: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let margin = styles.margin_twips();
    let mut docx = Docx::new()
        .page_margin(
            PageMargin::new()
                .top(margin)
                .bottom(margin)
                .left(margin)
                .right(margin),
        )
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size));

    let mut paragraphs = 0usize;
    for line in rendered.lines() {
        let trimmed = line.trim();
        paragraphs += 1;
        if trimmed.is_empty() {
            docx = docx.add_paragraph(Paragraph::new());
            continue;
        }

        if let Some(text) = trimmed.strip_prefix("### ") {
            docx = docx.add_paragraph(heading_paragraph(text, "Heading3", styles));
        } else if let Some(text) = trimmed.strip_prefix("## ") {
            docx = docx.add_paragraph(heading_paragraph(text, "Heading2", styles));
        } else if let Some(text) = trimmed.strip_prefix("# ") {
            docx = docx.add_paragraph(heading_paragraph(text, "Heading1", styles));
        } else if let Some(text) = trimmed.strip_prefix("- ") {
            docx = docx.add_paragraph(bullet_paragraph(text, styles));
        } else if trimmed == "---" || trimmed == "***" {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
            );
        } else {
            docx = docx.add_paragraph(body_paragraph(trimmed, styles));
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    let bytes = buf.into_inner();
    debug!(paragraphs, bytes = bytes.len(), "docx packed");
    Ok(bytes)
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
}

fn heading_paragraph(text: &str, style_id: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().style(style_id).add_run(
        Run::new()
            .add_text(text)
            .bold()
            .fonts(RunFonts::new().ascii(&styles.heading_font)),
    )
}

fn bullet_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(body_run("\u{2022} ", styles));

    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }
    para
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new().align(AlignmentType::Left);
    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }
    para
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

/// Split `**bold**` segments into runs. An unclosed `**` is kept as text.
fn parse_inline(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("**") {
        let before = &remaining[..start];
        if !before.is_empty() {
            runs.push(body_run(before, styles));
        }

        let after_start = &remaining[start + 2..];
        let Some(end) = after_start.find("**") else {
            runs.push(body_run(remaining, styles));
            return runs;
        };
        runs.push(body_run(&after_start[..end], styles).bold());
        remaining = &after_start[end + 2..];
    }

    if !remaining.is_empty() {
        runs.push(body_run(remaining, styles));
    }
    runs
}
