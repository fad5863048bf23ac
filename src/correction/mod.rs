//! One-shot model-assisted correction of statements that failed to execute.
//!
//! A failed statement gets exactly one chance: the model sees the engine error, the
//! statement and the schema, and whatever it proposes must pass [`validate`] before
//! it runs. Any failure along the way surfaces the original engine error.
crate::reexport!(provider);
crate::reexport!(llm);
crate::reexport!(prompt);
crate::reexport!(extract);
crate::reexport!(outcome);
crate::reexport!(attempt);
crate::reexport!(guard);
#[cfg(test)]
mod guard_tests;
