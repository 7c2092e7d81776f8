//! Instruction prompt rendering.
//!
//! Persona instruction text is a minijinja template; rendering folds in
//! per-session context such as the recall line from the caller's last
//! archived record. Rendering never fails outward: a bad template or
//! missing context degrades to the raw instruction text.

use minijinja::{context, Environment};
use once_cell::sync::Lazy;
use tracing::{error, warn};

use cameo_core::persona::{default_presets, Persona};

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    for persona in default_presets() {
        let name: &'static str = persona.kind.into();
        if let Err(e) = env.add_template(name, persona.instructions) {
            error!(persona = %persona.kind, error = %e, "invalid instruction template");
        }
    }
    env
});

/// Per-session values available to instruction templates.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    /// "Last time you said ..." line from the newest archive record.
    pub recall: Option<String>,
    /// Company name from the FAQ sheet.
    pub company: Option<String>,
    /// Company tagline from the FAQ sheet.
    pub tagline: Option<String>,
    /// Topic carried in by a handoff.
    pub topic: Option<String>,
}

impl PromptContext {
    pub fn with_recall(mut self, recall: Option<String>) -> Self {
        self.recall = recall;
        self
    }

    pub fn with_company(mut self, company: impl Into<String>, tagline: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self.tagline = Some(tagline.into());
        self
    }

    pub fn with_topic(mut self, topic: Option<String>) -> Self {
        self.topic = topic;
        self
    }
}

/// Renders a persona's instructions with session context.
pub fn render_instructions(persona: &Persona, ctx: &PromptContext) -> String {
    let name: &'static str = persona.kind.into();
    let template = match TEMPLATES.get_template(name) {
        Ok(template) => template,
        Err(e) => {
            warn!(persona = %persona.kind, error = %e, "template missing, using raw instructions");
            return persona.instructions.to_string();
        }
    };
    match template.render(context! {
        recall => ctx.recall,
        company => ctx.company,
        tagline => ctx.tagline,
        topic => ctx.topic,
    }) {
        Ok(rendered) => rendered,
        Err(e) => {
            warn!(persona = %persona.kind, error = %e, "render failed, using raw instructions");
            persona.instructions.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cameo_core::persona::{preset_for, PersonaKind};

    #[test]
    fn test_recall_block_appears_only_when_set() {
        let persona = preset_for(PersonaKind::WellnessGuide);

        let without = render_instructions(persona, &PromptContext::default());
        assert!(!without.contains("history with you"));

        let with = render_instructions(
            persona,
            &PromptContext::default()
                .with_recall(Some("Last time you said: mood: low".to_string())),
        );
        assert!(with.contains("Last time you said: mood: low"));
    }

    #[test]
    fn test_sales_template_fills_company() {
        let persona = preset_for(PersonaKind::SalesRep);
        let rendered = render_instructions(
            persona,
            &PromptContext::default().with_company("Brightpath Labs", "insight digests"),
        );
        assert!(rendered.contains("Brightpath Labs"));
        assert!(rendered.contains("insight digests"));
    }

    #[test]
    fn test_subject_tutor_topic_line() {
        let persona = preset_for(PersonaKind::SubjectTutor);
        let rendered = render_instructions(
            persona,
            &PromptContext::default().with_topic(Some("Fractions".to_string())),
        );
        assert!(rendered.contains("Today's topic: Fractions."));
    }

    #[test]
    fn test_every_preset_renders_without_context() {
        for persona in default_presets() {
            let rendered = render_instructions(persona, &PromptContext::default());
            assert!(!rendered.trim().is_empty(), "{} rendered empty", persona.kind);
        }
    }
}
