//! Tools for the improv host: scene games, a highlight log, and the
//! wrap-up replay.
//!
//! Nothing here persists. Highlights live in session state and are read
//! back once at wrap-up; when the session ends they are gone, which is
//! the point of an improv show.

use async_trait::async_trait;

use cameo_core::catalog::search::{best_match, keyword_tokens, score_text};
use cameo_core::error::Result;

use crate::tool::{
    required_str, unknown_tool, ParamSpec, ToolCall, ToolContext, ToolReply, ToolSpec, Toolset,
};

/// Scene games the host can run: name and the pitch read to the caller.
const GAMES: &[(&str, &str)] = &[
    (
        "Word at a Time",
        "We tell one story together, alternating a single word each.",
    ),
    (
        "Expert Panel",
        "You are the world's only expert on something absurd and I interview you.",
    ),
    (
        "Sales Pitch",
        "You pitch me a product that should not exist, and I want to buy it.",
    ),
    (
        "Movie Trailer",
        "We improvise the trailer for a film that does not exist.",
    ),
];

const SPECS: &[ToolSpec] = &[
    ToolSpec {
        name: "list_games",
        description: "Read out the scene games on offer.",
        params: &[],
    },
    ToolSpec {
        name: "switch_game",
        description: "Start or change to a scene game.",
        params: &[ParamSpec::required(
            "game",
            "The game, by name or in the caller's own words.",
        )],
    },
    ToolSpec {
        name: "log_highlight",
        description: "Save a line that landed, for the wrap-up replay.",
        params: &[ParamSpec::required("line", "The line, as delivered.")],
    },
    ToolSpec {
        name: "wrap_up",
        description: "End the show and replay the session's highlights.",
        params: &[],
    },
];

#[derive(Default)]
pub struct ImprovToolset;

impl ImprovToolset {
    pub fn new() -> Self {
        Self
    }

    fn game_menu() -> String {
        GAMES
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[async_trait]
impl Toolset for ImprovToolset {
    fn specs(&self) -> &'static [ToolSpec] {
        SPECS
    }

    async fn handle(&self, ctx: &mut ToolContext<'_>, call: &ToolCall) -> Result<ToolReply> {
        match call.name.as_str() {
            "list_games" => Ok(ToolReply::say(format!(
                "Tonight's menu: {}. Pick one and we're off.",
                Self::game_menu()
            ))),
            "switch_game" => {
                let wanted = required_str(call, "game")?;
                let tokens = keyword_tokens(wanted);
                let hit = best_match(GAMES.iter(), |(name, pitch)| {
                    score_text(&tokens, name) + score_text(&tokens, pitch)
                });
                match hit {
                    Some((name, pitch)) => {
                        ctx.session.state.set("game", *name)?;
                        Ok(ToolReply::say(format!("{name}! Here's how it works: {pitch}")))
                    }
                    None => Ok(ToolReply::say(format!(
                        "Haven't got that one. I can run: {}.",
                        Self::game_menu()
                    ))),
                }
            }
            "log_highlight" => {
                let line = required_str(call, "line")?;
                ctx.session.state.set("highlights", line)?;
                Ok(ToolReply::say("Oh, that one's going in the highlight reel."))
            }
            "wrap_up" => {
                let highlights = ctx
                    .session
                    .state
                    .get("highlights")
                    .and_then(|value| value.as_items())
                    .unwrap_or_default();
                let text = if highlights.is_empty() {
                    "And that's our show. No reel tonight, but the scenes were all yours. \
                     Come back soon!"
                        .to_string()
                } else {
                    format!(
                        "And that's our show! Tonight's highlight reel: {}. Take a bow \
                         and come back soon!",
                        highlights.join(" ... ")
                    )
                };
                Ok(ToolReply::closing(text))
            }
            _ => Err(unknown_tool("improv", call)),
        }
    }
}
