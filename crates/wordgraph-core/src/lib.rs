pub mod alphabet;
pub mod dict;
pub mod regexp;
pub mod search;
pub mod settings;
