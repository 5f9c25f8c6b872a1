//! Resource handlers.

mod folders;
mod notes;
mod system;
mod tags;
mod validate;

#[cfg(test)]
mod notes_test;
#[cfg(test)]
mod test_support;

pub use folders::*;
pub use notes::*;
pub use system::*;
pub use tags::*;
