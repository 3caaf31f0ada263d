//! The `ask` command: assistant pass-through with a canned fallback.

use crate::cli::ui;
use crate::core::offer::AssistantProvider;
use anyhow::Result;
use tracing::debug;

/// Shown when the assistant API is unreachable or misconfigured. The user
/// always gets an answer.
const FALLBACK_REPLY: &str = "I can help you find the best deal! Search for a product to compare \
offers across platforms, and check the price chart to see whether the trend suggests waiting \
for a better price.";

pub async fn run(question: &str, assistant: &(dyn AssistantProvider + Send + Sync)) -> Result<()> {
    let spinner = ui::new_spinner("Thinking...");
    let reply = match assistant.ask(question).await {
        Ok(reply) => reply,
        Err(e) => {
            debug!(error = %e, "Assistant unavailable, using canned reply");
            FALLBACK_REPLY.to_string()
        }
    };
    spinner.finish_and_clear();

    println!("{}", ui::style_text("Assistant", ui::StyleType::Title));
    println!("\n{reply}");
    Ok(())
}
