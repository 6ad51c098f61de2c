// Analysis engine: normalization, skill extraction, keyword coverage,
// experience heuristic, artifact-backed scoring, recommendations, and the
// report chat responder. No handler in here touches persistent state.

pub mod chat;
pub mod experience;
pub mod handlers;
pub mod keywords;
pub mod model;
pub mod normalize;
pub mod recommend;
pub mod scoring;
pub mod skills;
