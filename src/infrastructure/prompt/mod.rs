//! Interactive prompt adapters

mod inquire;

pub use self::inquire::InquirePrompt;
