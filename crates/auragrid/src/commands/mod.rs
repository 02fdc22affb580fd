pub mod forecast;
pub mod inspect;
