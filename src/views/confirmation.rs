use std::fmt::{Display, Formatter};

use super::Page;

pub const HEADING: &str = "Vote Submitted Successfully!";
pub const THANKS: &str = "Thank you for participating in the Alumni Election 2003. \
    Your vote has been recorded and cannot be changed.";
pub const CODE_SPENT: &str = "Your voting code has been used and is no longer valid.";

/// The page shown after a ballot is accepted. It holds no state; the only way
/// on is to the live results or back to code entry.
#[derive(Debug, Default, Copy, Clone)]
pub struct Confirmation;

impl Confirmation {
    pub const NEXT: [Page; 2] = [Page::Results, Page::Login];
}

impl Display for Confirmation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{HEADING}")?;
        writeln!(f)?;
        writeln!(f, "{THANKS}")?;
        writeln!(f, "{CODE_SPENT}")
    }
}
