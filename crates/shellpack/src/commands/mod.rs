mod pack;

pub use pack::{pack_app, PackAppArgs};
