//! Resume prompt generation
//!
//! Wraps the human-readable view with a target-specific integration note.
//! Framing is all the target ever changes: the summary, key points, open
//! questions and continuation pass through the renderer untouched.

use crate::record::{Record, SourceAi};
use crate::render;
use std::fmt;
use std::str::FromStr;

/// Which system the resume prompt is aimed at.
///
/// Advisory only: an unrecognized target falls back to `Universal` instead
/// of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptTarget {
    #[default]
    Universal,
    System(SourceAi),
}

impl FromStr for PromptTarget {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let source: SourceAi = s.parse()?;
        Ok(match source {
            // "other", "universal" and anything unrecognized all get the
            // universal framing
            SourceAi::Other => PromptTarget::Universal,
            known => PromptTarget::System(known),
        })
    }
}

impl fmt::Display for PromptTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptTarget::Universal => f.write_str("universal"),
            PromptTarget::System(s) => f.write_str(s.as_str()),
        }
    }
}

/// Generate a resume prompt for the given target system.
pub fn generate_prompt(record: &Record, target: PromptTarget) -> String {
    let base = render::render(record);

    let note = match target {
        PromptTarget::System(SourceAi::Claude) => {
            "\n\n[Gossip Integration Note for Claude: This context comes from another AI system. Please maintain the analytical depth and reasoning quality established in the original conversation.]"
        }
        PromptTarget::System(SourceAi::ChatGpt) => {
            "\n\n[Gossip Integration Note for ChatGPT: Continue this conversation with the same level of detail and context awareness as the original AI system.]"
        }
        PromptTarget::System(SourceAi::Gemini) => {
            "\n\n[Gossip Integration Note for Gemini: This is a Gossip context transfer from another AI. Please continue seamlessly from where the previous system left off.]"
        }
        PromptTarget::System(SourceAi::Grok) => {
            "\n\n[Gossip Integration Note for Grok: Picking up from another AI via Gossip. Keep the same energy and depth.]"
        }
        PromptTarget::System(SourceAi::Other) | PromptTarget::Universal => "",
    };

    format!("{}{}", base, note)
}
