//! Terminal commands.

pub mod ask;
pub mod chat;
pub mod directory;
pub mod locate;
pub mod seed;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Stderr spinner shown while a model round-trip is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Banner printed before a node's output, matching the node name.
pub fn stage_banner(node: orgbot::dispatch::Node) -> &'static str {
    use orgbot::dispatch::Node;
    match node {
        Node::OrgChatbot => "Org agent:",
        Node::DepartmentNavigator => "department_navigator agent:",
        Node::Done => "",
    }
}
