use crate::control::Control;

/// A generic container that lays out its children with the dock compositor.
#[derive(Debug, Default, Clone, Copy)]
pub struct Panel;

impl Control for Panel {}
