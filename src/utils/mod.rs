pub mod naming;
pub mod object_id;
pub mod time;
