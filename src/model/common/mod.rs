pub mod ballot;
pub mod candidate;
pub mod position;
pub mod results;
pub mod settings;
pub mod voter;

pub use ballot::{Vote, VoteSubmission};
pub use candidate::{Candidate, CandidateId, NewCandidate};
pub use position::{ParsePositionError, Position};
pub use results::{CandidateResult, ElectionResults};
pub use settings::ElectionSettings;
pub use voter::{Voter, VoterSummary};
