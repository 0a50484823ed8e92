//! Human-readable rendering
//!
//! Produces the fixed-section plain-text view meant to be pasted verbatim
//! into a conversational interface. Rendering is a pure function of the
//! record: it never mutates anything and two calls yield byte-identical
//! output. Attachment payloads are listed by name and size only; the bytes
//! stay in the canonical JSON form.

use crate::record::Record;

/// Section delimiter line
fn rule() -> String {
    "═".repeat(63)
}

/// Strip list markers a caller may have left on a bullet entry.
fn bullet(text: &str) -> String {
    format!("• {}", text.trim_start_matches(['-', ' ']))
}

/// Render a record to the fixed-section human-readable layout.
pub fn render(record: &Record) -> String {
    let rule = rule();
    let mut lines = vec![
        format!("# GOSSIP [ID: {}]", record.id),
        rule.clone(),
        "AI Conversation Context Transfer File".to_string(),
        "Created by Gossip - Universal AI Integration Layer".to_string(),
        rule.clone(),
        String::new(),
        format!("**Topic:** {}", record.metadata.topic),
        format!("**Source AI:** {}", record.metadata.source_ai),
        format!(
            "**Created:** {}",
            record.created.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        String::new(),
        rule.clone(),
        "## CONVERSATION CONTEXT".to_string(),
        String::new(),
        record.context.summary.clone(),
        String::new(),
        rule.clone(),
        "## KEY POINTS & DECISIONS".to_string(),
        String::new(),
    ];

    for point in &record.context.key_points {
        lines.push(bullet(point));
    }

    lines.extend([
        String::new(),
        rule.clone(),
        "## OPEN QUESTIONS / NEXT STEPS".to_string(),
        String::new(),
    ]);

    for question in &record.context.open_questions {
        lines.push(bullet(question));
    }

    if !record.files.is_empty() {
        lines.extend([
            String::new(),
            rule.clone(),
            "## ATTACHED FILES".to_string(),
            String::new(),
        ]);
        for file in &record.files {
            lines.push(format!(
                "• {} ({}, {})",
                file.name,
                file.mime_type,
                file.size_display()
            ));
        }
        lines.extend([
            String::new(),
            "[Files are base64-encoded in the full Gossip JSON format]".to_string(),
        ]);
    }

    if let Some(continuation) = &record.continuation {
        lines.extend([
            String::new(),
            rule.clone(),
            "## CONTINUE FROM HERE:".to_string(),
            String::new(),
            continuation.clone(),
        ]);
    }

    let source = record.metadata.source_ai;
    lines.extend([
        String::new(),
        rule.clone(),
        "## INSTRUCTIONS FOR AI SYSTEMS:".to_string(),
        String::new(),
        "This is a Gossip file - a universal context transfer format for AI systems.".to_string(),
        "Please read this entire context carefully. This represents a conversation".to_string(),
        format!("from another AI system ({}) that should continue", source),
        "seamlessly in your system.".to_string(),
        String::new(),
        "Treat this as if you've been having this conversation yourself. Reference".to_string(),
        "the key points and decisions made, acknowledge the open questions, and pick".to_string(),
        "up from the 'Continue from here' section.".to_string(),
        String::new(),
        "If files are referenced but not accessible in your system, acknowledge them".to_string(),
        "and proceed based on the context provided.".to_string(),
        String::new(),
        "Gossip enables AI interoperability. Honor the context and maintain continuity.".to_string(),
        rule,
    ]);

    lines.join("\n")
}
