pub(crate) mod acceptable_adj;
pub(crate) mod lr;
pub(crate) mod orient;
pub(crate) mod structures;
