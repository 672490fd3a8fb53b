mod partition;
mod planner;

pub use partition::{HandPartition, STRAIGHT_LEN};
pub use planner::{FollowPlanner, LEAD_PRIORITY, LeadPlanner, groupings};
