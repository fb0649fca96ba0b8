mod automated;

pub use automated::SearchPolicy;
