pub mod cli_args;
pub mod frame_timer;
pub mod inspect;
pub mod render;
