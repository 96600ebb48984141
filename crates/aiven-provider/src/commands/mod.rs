pub mod catalog;
pub mod docs;
pub mod duration;
pub mod exists;
pub mod id;
