mod bundle;
mod format;
mod render;

pub use bundle::{LANG, has_key};
pub use format::{fmt_date, fmt_datetime};
pub use render::{t, tr};
