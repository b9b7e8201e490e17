pub mod events;
pub mod extraction;
pub mod pagination;
pub mod records;
