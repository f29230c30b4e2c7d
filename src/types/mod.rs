//! Core data types shared by drivers and front ends.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Chat message with role and content |
//! | [`MessageRole`] | Message role (system, user) |
//! | [`AnswerResult`] | Answer text plus the raw provider payload |

pub mod answer;
pub mod message;

pub use answer::AnswerResult;
pub use message::{Message, MessageRole};
