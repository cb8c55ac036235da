use aud_core::enums::DocumentKind;
use aud_engine::classify_document;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ClassifyArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ClassifyResponse<'a> {
    content_type: Option<&'a str>,
    file_name: Option<&'a str>,
    kind: DocumentKind,
}

/// Handle `audt classify`.
pub fn handle(args: &ClassifyArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let content_type = args.content_type.as_deref();
    let file_name = args.file_name.as_deref();
    let response = ClassifyResponse {
        content_type,
        file_name,
        kind: classify_document(content_type, file_name),
    };
    output(&response, flags.format)
}
