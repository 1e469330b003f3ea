mod parse_good;
mod property_escape;
mod property_partition;
pub(crate) mod utils;
