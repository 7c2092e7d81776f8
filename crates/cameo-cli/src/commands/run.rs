use anyhow::Result;

use cameo_core::persona::preset_for;

use crate::console::ConsoleDriver;

use super::utils::{parse_persona, service};

pub async fn run(persona: Option<String>) -> Result<()> {
    let service = service()?;
    let kind = match persona {
        Some(name) => parse_persona(&name)?,
        None => service.config().default_persona,
    };
    let preset = preset_for(kind);

    println!("🎭 {} ({})", preset.name, preset.tagline);
    println!("Plain lines are your turns. /tool <name> {{json}} calls a tool, /quit hangs up.");
    println!();

    let mut driver = ConsoleDriver::new();
    let report = service.run(kind, &mut driver).await?;

    println!();
    println!("Session closed. {}", report.usage);
    if let Some(id) = report.archived {
        println!("Archived as record {id}.");
    }
    if let Some(err) = report.save_error {
        println!("⚠️ The archive write failed: {err}");
    }
    Ok(())
}
