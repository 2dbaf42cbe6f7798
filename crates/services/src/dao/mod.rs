pub mod attempt;
pub mod base;
pub mod challenge;
pub mod completion;
pub mod user;

pub use base::BaseDao;
