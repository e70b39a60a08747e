//! Rule-based FAQ answering: a two-pass question matcher over a fixed
//! catalog, and the chat session that paces its replies.

pub mod builtin;
pub mod catalog;
pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod matcher;
pub mod model;
pub mod output;
pub mod runner;
pub mod session;
pub mod transcript;

pub use catalog::{Catalog, CatalogFile, Strictness};
pub use check::{CheckReport, KeywordStatus, check_catalog};
pub use config::Config;
pub use error::{FaqError, Result};
pub use eval::{EvalCase, EvalSummary, evaluate_cases, load_cases};
pub use matcher::QuestionMatcher;
pub use model::{FaqEntry, KeywordRule, Match, MatchKind, MatchSource};
pub use session::{ChatSession, Feedback, Message, Sender, SessionOptions};
pub use transcript::{Transcript, load_transcript, save_transcript};
