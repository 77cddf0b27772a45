pub mod deploy;
pub mod inspect;
