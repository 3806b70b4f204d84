//! BOM generation: models, sample library, fuzzy matcher, prompt templates,
//! response extraction, and the resolution pipeline that orchestrates them.

pub mod extract;
pub mod handlers;
pub mod matcher;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod samples;
