//! CLI `ask` command: answer one question with a chosen responder.

use anyhow::Result;

use orgbot::app::{self, AgentKind};
use orgbot::config::OrgbotConfig;

pub async fn ask(config: &OrgbotConfig, kind: AgentKind, query: &str) -> Result<()> {
    let session = app::session(config, kind).await?;
    let thread_id = config
        .chat
        .thread_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::now_v7().to_string());

    let pb = super::spinner("thinking...");
    let mut stages = Vec::new();
    let answer = session
        .turn(&thread_id, query, |stage| stages.push(stage.clone()))
        .await;
    pb.finish_and_clear();
    let answer = answer?;

    if !session.is_routed() {
        println!("{answer}");
        return Ok(());
    }
    for stage in &stages {
        println!("{}", super::stage_banner(stage.node));
        println!("{}", stage.result);
        println!("----");
    }
    Ok(())
}
