mod helpers;

use std::sync::Arc;

use orgbot::agent::prompts::{INFOBANK_INSTRUCTION, ORG_CHATBOT_INSTRUCTION};
use orgbot::agent::{ConversationMemory, GeneralistResponder, LocationResponder};
use orgbot::app::ChatSession;
use orgbot::dispatch::{Dispatcher, Node};
use orgbot::tools::{DirectoryTool, ToolRegistry};

use helpers::FnChatModel;

fn single(model: Arc<FnChatModel>, tools: ToolRegistry) -> ChatSession {
    ChatSession::Single(GeneralistResponder::new(
        model,
        INFOBANK_INSTRUCTION,
        tools,
        Arc::new(ConversationMemory::new()),
    ))
}

#[tokio::test]
async fn plain_session_remembers_earlier_turns() {
    let model = FnChatModel::answering("noted");
    let session = single(model.clone(), ToolRegistry::new());

    session.turn("t", "Who is Gandhiji?", |_| {}).await.unwrap();
    session.turn("t", "Who is Alice?", |_| {}).await.unwrap();

    let requests = model.requests();
    assert_eq!(requests.len(), 2);
    let second: Vec<&str> = requests[1]
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(
        second,
        [INFOBANK_INSTRUCTION, "Who is Gandhiji?", "noted", "Who is Alice?"]
    );
}

#[tokio::test]
async fn directory_session_offers_the_tool_and_reports_no_stages() {
    let (_tmp, path) = helpers::seeded_store();
    let model = FnChatModel::answering("Alice is the CEO.");
    let session = single(model.clone(), ToolRegistry::new().with(DirectoryTool::new(&path)));

    let mut stages = 0;
    let answer = session
        .turn("t", "Who is Alice?", |_| stages += 1)
        .await
        .unwrap();

    assert!(!session.is_routed());
    assert_eq!(answer, "Alice is the CEO.");
    assert_eq!(stages, 0);
    assert_eq!(model.requests()[0].tools, ["get_employees"]);
}

#[tokio::test]
async fn routed_session_reports_each_stage() {
    let org = GeneralistResponder::new(
        FnChatModel::answering("Ask department_navigator."),
        ORG_CHATBOT_INSTRUCTION,
        ToolRegistry::new(),
        Arc::new(ConversationMemory::new()),
    );
    let navigator = LocationResponder::new(
        helpers::seeded_index().await,
        FnChatModel::answering("Sales is on the fourth floor."),
    );
    let session = ChatSession::Routed(Dispatcher::new(Arc::new(org), Arc::new(navigator)));

    let mut nodes = Vec::new();
    let answer = session
        .turn("t", "where is Sales?", |stage| nodes.push(stage.node))
        .await
        .unwrap();

    assert!(session.is_routed());
    assert_eq!(answer, "Sales is on the fourth floor.");
    assert_eq!(nodes, [Node::OrgChatbot, Node::DepartmentNavigator]);
}
