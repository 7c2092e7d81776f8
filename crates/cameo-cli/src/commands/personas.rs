use anyhow::Result;
use strum::IntoEnumIterator;

use cameo_core::persona::{preset_for, PersonaKind};

use super::utils::service;

pub async fn list() -> Result<()> {
    let service = service()?;
    for kind in PersonaKind::iter() {
        let persona = preset_for(kind);
        // Opening a session resolves the persona's actual tool surface.
        let open = service.open(kind).await?;
        let tools: Vec<&str> = open
            .runtime
            .specs()
            .iter()
            .map(|spec| spec.name)
            .collect();

        println!("{kind}  \"{}\"  voice {}", persona.name, persona.voice);
        println!("  {}", persona.tagline);
        if tools.is_empty() {
            println!("  tools: none (chat history only)");
        } else {
            println!("  tools: {}", tools.join(", "));
        }
    }
    Ok(())
}
