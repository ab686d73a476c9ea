use crate::docx::generate_docx;
use crate::error::ExportError;
use crate::render::render_report;
use crate::report::ReportContext;
use crate::styles::DocumentStyles;

pub const SHARE_SUBJECT: &str = "BioScan AI Medical Report";
pub const REPORT_FILE_NAME: &str = "BioScan_Report.docx";
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// What a platform share sheet needs to send the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub subject: &'static str,
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub body: Vec<u8>,
}

/// Render the built-in report and pack it for sharing.
pub fn share_payload(
    report: &ReportContext,
    styles: &DocumentStyles,
) -> Result<SharePayload, ExportError> {
    let rendered = render_report(report)?;
    let body = generate_docx(&rendered, styles)?;
    tracing::info!(file = REPORT_FILE_NAME, bytes = body.len(), "report ready to share");
    Ok(SharePayload {
        subject: SHARE_SUBJECT,
        file_name: REPORT_FILE_NAME,
        mime_type: DOCX_MIME_TYPE,
        body,
    })
}
