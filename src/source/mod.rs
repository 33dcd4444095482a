pub mod load;
pub mod record;
