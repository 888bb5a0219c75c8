pub mod companies;
pub mod health;
pub mod reference;
pub mod taxes;
