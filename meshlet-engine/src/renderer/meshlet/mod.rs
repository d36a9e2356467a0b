pub mod meshlet_draw;
pub mod meshlet_renderer;
pub mod meshlet_select;

#[cfg(test)]
mod tests;
