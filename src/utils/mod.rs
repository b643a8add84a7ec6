pub(crate) mod debug;

pub(crate) use debug::{set_tick_debug, tick_debug_enabled};
