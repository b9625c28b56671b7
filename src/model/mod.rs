mod causes;
mod condition;
mod instructor;

pub use causes::{CauseRequest, CauseResponse};
pub use condition::Condition;
pub use instructor::Instructor;
