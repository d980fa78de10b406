//! Line-level scanning: string literals, legacy call location and argument
//! splitting.
//!
//! Nothing here understands the host language beyond quotes and brackets.
//! Every scanner works on byte offsets and borrows from the input line.

pub mod arguments;
pub mod literal;
pub mod locator;

pub use arguments::{Call, split_arguments};
pub use literal::{is_single_string_literal, skip_literal};
pub use locator::{Invocation, InvocationSpan, locate_invocation};
