//! CLI `locate` command: ask the department navigator directly.

use anyhow::Result;

use orgbot::app;
use orgbot::config::OrgbotConfig;
use orgbot::location::LocationIndex;

pub async fn locate(
    config: &OrgbotConfig,
    question: &str,
    k: Option<usize>,
    retrieve_only: bool,
) -> Result<()> {
    if retrieve_only {
        let index = LocationIndex::seeded(app::embedder(config)?).await?;
        let hits = index
            .retrieve_scored(question, k.unwrap_or(config.retrieval.top_k))
            .await?;
        for (i, hit) in hits.iter().enumerate() {
            println!("  {}. {} (distance: {:.4})", i + 1, hit.content, hit.distance);
        }
        return Ok(());
    }

    let mut navigator = app::navigator(config).await?;
    if let Some(k) = k {
        navigator = navigator.with_top_k(k);
    }

    let pb = super::spinner("thinking...");
    let answer = navigator.chat(question).await;
    pb.finish_and_clear();

    println!("{}", answer?);
    Ok(())
}
