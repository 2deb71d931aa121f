//! CLI `chat` command: the interactive Virtual Org REPL.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use orgbot::app::{self, AgentKind};
use orgbot::config::OrgbotConfig;

const WELCOME: &str = "Welcome to Virtual Org!. I am Virtual Org Chatbot. \
I can answer to both general and company-specific questions";
const PROMPT: &str = "Enter the query: ";
const FAREWELL: &str = "See you next time...";

/// Read one query per line until `exit` or end of input. Every turn in the
/// session shares one thread.
pub async fn chat(config: &OrgbotConfig, kind: AgentKind, thread: Option<String>) -> Result<()> {
    let session = app::session(config, kind).await?;
    let thread_id = thread
        .or_else(|| config.chat.thread_id.clone())
        .unwrap_or_else(|| uuid::Uuid::now_v7().to_string());
    tracing::info!(thread_id = %thread_id, "chat session started");

    println!("{WELCOME}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let query = line.trim();
        if query == "exit" {
            println!("{FAREWELL}");
            break;
        }
        if query.is_empty() {
            continue;
        }

        let pb = super::spinner("thinking...");
        let printer = pb.clone();
        let outcome = session
            .turn(&thread_id, query, move |stage| {
                printer.suspend(|| {
                    println!("{}", super::stage_banner(stage.node));
                    println!("{}", stage.result);
                    println!("----");
                });
            })
            .await;
        pb.finish_and_clear();

        match outcome {
            Ok(answer) if !session.is_routed() => {
                println!("{answer}");
                println!("----");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "turn failed");
                println!("Error: {e:#}");
                println!("----");
            }
        }
    }

    Ok(())
}
