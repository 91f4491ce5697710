//! Behavior of each locomotion state

pub(crate) mod gait;
pub(crate) mod grounded;
pub(crate) mod jumping;
