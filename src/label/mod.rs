// Label transition: encode a verdict in the file name.
//
// Unlabeled -> Approved | Canceled. Both end states are terminal: a file
// whose stem already ends in a marker is never renamed again, and an
// existing target name is never overwritten. Together these make a second
// run over the same directory a no-op on the file set.

pub mod state;
pub mod transition;

pub use state::{labeled_path, LabelState};
pub use transition::{apply_label, LabelError, LabelOutcome};
