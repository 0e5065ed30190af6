use std::path::PathBuf;

use tally_core::extraction::pdftotext::PdftotextExtractor;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), tally_core::error::TallyError> {
    let doc_bytes = std::fs::read(&input_file)?;
    let extractor = PdftotextExtractor::new();
    let parsed = tally_core::extract_invoice(&doc_bytes, &extractor)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&parsed)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Extracted {} line item(s), written to {}",
                parsed.items.len(),
                path.display()
            );
            if !parsed.skipped.is_empty() {
                eprintln!("  {} row(s) skipped during extraction", parsed.skipped.len());
            }
        }
        None => match output_format {
            "json" => println!("{}", serde_json::to_string_pretty(&parsed)?),
            _ => print!("{}", output::table::format_parsed(&parsed)),
        },
    }

    Ok(())
}
