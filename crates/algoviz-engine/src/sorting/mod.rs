//! In-place comparison sorts that record their work as a [`Trace`].
//!
//! Every generator copies its input into a private working array and
//! never touches the caller's slice. Replaying a finished trace against the
//! original input yields that input sorted ascending, with every index in
//! the sorted-set.
//!
//! [`Trace`]: crate::Trace

pub mod bubble;
pub mod heap;
pub mod selection;
