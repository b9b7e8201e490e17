use crate::error::CliError;
use model::extraction::state::ExtractionState;

fn states_json(states: &[ExtractionState]) -> Result<String, CliError> {
    let json = serde_json::to_string_pretty(states)?;
    Ok(json)
}

pub async fn write_states(states: &[ExtractionState], path: String) -> Result<(), CliError> {
    let report = states_json(states)?;
    tokio::fs::write(path, report).await?;
    Ok(())
}

pub fn print_states(states: &[ExtractionState]) -> Result<(), CliError> {
    let report = states_json(states)?;
    println!("{report}");
    Ok(())
}
