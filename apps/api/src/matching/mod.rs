// Matching API: thin HTTP wrappers over rolefit_core.
// Callers supply plain text (document extraction happens upstream) and any
// embeddings they already have; nothing here persists results.

pub mod handlers;
