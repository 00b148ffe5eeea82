//! Moderation state: the set of users the responder ignores.

pub mod block_list;

pub use block_list::BlockList;
