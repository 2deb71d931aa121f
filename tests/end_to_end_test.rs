mod helpers;

use std::sync::Arc;

use orgbot::agent::prompts::ORG_CHATBOT_INSTRUCTION;
use orgbot::agent::{ConversationMemory, GeneralistResponder, LocationResponder};
use orgbot::dispatch::{Dispatcher, Node};
use orgbot::llm::ChatResponse;
use orgbot::tools::{DirectoryTool, RouteToNavigatorTool, ToolRegistry};

use helpers::{call, last_tool_output, FnChatModel};

/// Looks up the directory first, then counts Alice's direct reports from the tool output.
fn counting_model() -> Arc<FnChatModel> {
    FnChatModel::new(|messages, _| match last_tool_output(messages) {
        None => ChatResponse::ToolCalls(vec![call("call_1", "get_employees")]),
        Some(output) => {
            let listing: serde_json::Value = serde_json::from_str(output).unwrap();
            let mut reports: Vec<&str> = listing
                .as_object()
                .unwrap()
                .values()
                .filter(|r| r["manager_name"] == "Alice")
                .map(|r| r["name"].as_str().unwrap())
                .collect();
            reports.sort();
            ChatResponse::Final(format!(
                "{} employees report to Alice: {}.",
                reports.len(),
                reports.join(", ")
            ))
        }
    })
}

#[tokio::test]
async fn counts_direct_reports_through_the_directory_tool() {
    let (_tmp, path) = helpers::seeded_store();
    let org_model = counting_model();
    let nav_model = FnChatModel::answering("unused");

    let org = GeneralistResponder::new(
        org_model.clone(),
        ORG_CHATBOT_INSTRUCTION,
        ToolRegistry::new()
            .with(DirectoryTool::new(&path))
            .with(RouteToNavigatorTool),
        Arc::new(ConversationMemory::new()),
    );
    let navigator = LocationResponder::new(helpers::seeded_index().await, nav_model.clone());
    let dispatcher = Dispatcher::new(Arc::new(org), Arc::new(navigator));

    let outcome = dispatcher
        .dispatch("session-1", "How many employees are reporting to Alice?")
        .await
        .unwrap();

    assert_eq!(outcome.final_node, Node::OrgChatbot);
    assert_eq!(
        outcome.result,
        "3 employees report to Alice: Bob, Charlie, David."
    );

    let requests = org_model.requests();
    assert_eq!(requests.len(), 2);
    let mut offered = requests[0].tools.clone();
    offered.sort();
    assert_eq!(offered, ["get_employees", "route_to_department_navigator"]);
    assert!(last_tool_output(&requests[1].messages).is_some());
    assert_eq!(nav_model.calls(), 0);
}
