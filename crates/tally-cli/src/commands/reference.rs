use std::path::PathBuf;

use tally_core::reference::ReferenceTable;

pub fn run(file: PathBuf) -> Result<(), tally_core::error::TallyError> {
    let table = ReferenceTable::load(&file)?;

    println!("{}: {} reference item(s)", file.display(), table.len());
    for warning in &table.warnings {
        println!("  warning: {} ({})", warning.reason, warning.text);
    }

    Ok(())
}
