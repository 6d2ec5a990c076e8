pub(crate) mod bitmap;
pub(crate) mod cache;
pub(crate) mod handle;
pub(crate) mod resolver;
pub(crate) mod shaper;
