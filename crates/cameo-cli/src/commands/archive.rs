use anyhow::Result;

use super::utils::{parse_persona, service};

pub async fn list(persona: &str) -> Result<()> {
    let kind = parse_persona(persona)?;
    let records = service()?.archive_records(kind).await?;
    if records.is_empty() {
        println!("No records for {kind}.");
        return Ok(());
    }
    for record in &records {
        println!("#{}  {}  {}", record.id, record.timestamp, record.summary);
    }
    println!("{} record(s).", records.len());
    Ok(())
}

pub async fn tail(persona: &str, count: usize) -> Result<()> {
    let kind = parse_persona(persona)?;
    let records = service()?.archive_records(kind).await?;
    if records.is_empty() {
        println!("No records for {kind}.");
        return Ok(());
    }
    let start = records.len().saturating_sub(count);
    for record in &records[start..] {
        println!("#{}  {}", record.id, record.timestamp);
        println!("  {}", record.summary);
        println!("  {}", serde_json::to_string(&record.payload)?);
    }
    Ok(())
}
