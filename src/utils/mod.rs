pub mod crypto;
pub mod reply_parser;
pub mod token;
