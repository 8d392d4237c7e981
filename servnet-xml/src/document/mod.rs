mod element_error;
mod element_ext;
mod lexical;
pub mod schema;

pub use element_error::ElementError;
pub use element_ext::ElementExt;
pub use lexical::{format_hms, format_time, parse_hms, parse_time, split_refs};
