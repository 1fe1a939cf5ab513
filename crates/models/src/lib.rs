pub mod account;
pub mod db;
