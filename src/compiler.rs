//! Pattern compiler.
//!
//! This module turns an ordered set of named fragments into one composite,
//! tagged pattern. It is split the same way the work is:
//!
//! ```text
//! add(name, fragment) ──▶ RuleSet            (rule_set.rs)
//!                            │
//!          Builder::build ───┤ mark + join   (builder.rs)
//!                            │
//!                            ▼
//!                  Resolver::resolve_text    (resolve.rs)
//!                    - expand REF(name) recursively
//!                    - contain cycles with a sentinel, then reject
//!                    - memoize resolved bodies in the RuleSet
//!                            │
//!                            ▼
//!                     CompiledPattern        (compiled_pattern.rs)
//!                    - wire text  #(?|…)#Au
//!                    - per-rule resolved bodies for scanning
//! ```
//!
//! ## Reference syntax
//!
//! A reference is written `(?&name)` where `name` is made of word characters
//! and hyphens. [`Builder::reference`] produces it.
//!
//! ## Invariants
//!
//! - Alternative order in the compiled pattern equals rule insertion order.
//! - Compiling the same rule set twice yields byte-identical text.
//! - An empty rule set compiles to `#(?|)#Au`.

#[path = "compiler/builder.rs"]
mod builder;
#[path = "compiler/compiled_pattern.rs"]
mod compiled_pattern;
#[path = "compiler/resolve.rs"]
mod resolve;
#[path = "compiler/rule_set.rs"]
mod rule_set;

pub use builder::Builder;
pub use compiled_pattern::{CompiledPattern, CompiledRule, Modifiers};
pub use rule_set::RuleSet;
