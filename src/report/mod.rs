pub mod client;
pub mod prompt;

pub use client::{GroqClient, Summarizer};
pub use prompt::{build_robot_analysis_prompt, SYSTEM_ROLE};
