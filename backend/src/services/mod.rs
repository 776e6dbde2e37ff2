//! Business logic services for the Espresso Dialer

pub mod shot;

pub use shot::ShotService;
