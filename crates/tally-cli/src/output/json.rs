use tally_core::error::TallyError;
use tally_core::reconcile::outcome::ReconciliationResult;

pub fn print(result: &ReconciliationResult) -> Result<(), TallyError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
