// Keyword matching: exact token equality plus an optional fuzzy channel.
//
// The fuzzy channel sits behind the FuzzyMatcher trait. Whether a similarity
// backend exists is decided once (FuzzyCapability) and the pipeline carries
// the chosen strategy around; when fuzzy matching is off or unavailable the
// strategy is DisabledFuzzy, which simply finds nothing.

pub mod exact;
pub mod fuzzy;
pub mod traits;

pub use exact::{exact_hits, exact_matches};
pub use fuzzy::{fuzzy_matcher, DisabledFuzzy, FuzzyCapability};
#[cfg(feature = "fuzzy")]
pub use fuzzy::IndelMatcher;
pub use traits::{FuzzyMatcher, MatchHit, EXACT_SIMILARITY};
