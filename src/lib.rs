//! Virtual Org chatbot, an agent over an employee directory and a
//! department floor plan.
//!
//! Four responders of increasing capability share one chat-model seam:
//!
//! | Responder | Backing | Entry point |
//! |-----------|---------|-------------|
//! | Plain | chat model + instruction | [`agent::GeneralistResponder`] with no tools |
//! | Directory | + `get_employees` over SQLite | [`tools::DirectoryTool`] |
//! | Navigator | retrieval over a sqlite-vec index | [`agent::LocationResponder`] |
//! | Org chatbot | routes between the two above | [`dispatch::Dispatcher`] |
//!
//! # Architecture
//!
//! - **Storage**: SQLite (`employee`, `reporting`) seeded with a six-person org
//! - **Retrieval**: in-memory [sqlite-vec](https://github.com/asg017/sqlite-vec)
//!   KNN over embedded location facts
//! - **Models**: OpenAI-compatible chat completions and embeddings over `reqwest`,
//!   with timeouts and bounded retries
//! - **Routing**: a two-node state machine driven by a structured handoff or
//!   the `department_navigator` marker
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`db`]: SQLite initialization and schema
//! - [`directory`]: Employee store seed data and the directory join
//! - [`embedding`]: Text-to-vector providers (hosted and offline hashing)
//! - [`location`]: Department location index
//! - [`llm`]: Chat-model trait, message types, OpenAI client, retry policy
//! - [`tools`]: Capabilities the model may invoke
//! - [`agent`]: Generalist and location responders, conversation memory
//! - [`dispatch`]: The routing state machine
//! - [`app`]: Construction of all of the above from config

pub mod agent;
pub mod app;
pub mod config;
pub mod db;
pub mod directory;
pub mod dispatch;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod location;
pub mod tools;
