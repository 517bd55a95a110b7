pub mod health;
pub mod hoas;
pub mod portal;
pub mod saunas;
