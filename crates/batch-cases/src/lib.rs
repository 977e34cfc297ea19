mod cases;
mod domain;
mod infra;
mod protocols;
mod run;
#[cfg(test)]
mod tests;

pub use self::run::{run, start};
