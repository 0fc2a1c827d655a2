pub mod colors;
pub mod date;
pub mod formatting;
pub mod ids;
pub mod table;
