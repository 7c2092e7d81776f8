use std::str::FromStr;

use anyhow::{bail, Result};
use strum::IntoEnumIterator;

use cameo_application::SessionService;
use cameo_core::persona::PersonaKind;
use cameo_infrastructure::ConfigService;

/// Parses a persona name as given on the command line.
pub fn parse_persona(input: &str) -> Result<PersonaKind> {
    match PersonaKind::from_str(input.trim()) {
        Ok(kind) => Ok(kind),
        Err(_) => {
            let known: Vec<String> = PersonaKind::iter().map(|kind| kind.to_string()).collect();
            bail!(
                "unknown persona '{input}'; expected one of: {}",
                known.join(", ")
            )
        }
    }
}

/// Builds the session service from the on-disk configuration.
pub fn service() -> Result<SessionService> {
    let config = ConfigService::new()?.get_config();
    SessionService::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_persona_accepts_snake_case() {
        assert_eq!(
            parse_persona("wellness_guide").unwrap(),
            PersonaKind::WellnessGuide
        );
        assert_eq!(parse_persona(" game_master ").unwrap(), PersonaKind::GameMaster);
    }

    #[test]
    fn test_parse_persona_error_lists_the_options() {
        let err = parse_persona("barista").unwrap_err().to_string();
        assert!(err.contains("barista"));
        assert!(err.contains("sales_rep"));
    }
}
