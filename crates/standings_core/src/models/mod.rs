pub mod head_to_head;
pub mod team_record;

pub use head_to_head::{H2hEntry, H2hLine, HeadToHeadTable};
pub use team_record::{RecordLine, TeamId, TeamRecord};
