pub mod chain;
pub mod token;
pub mod token_list;
