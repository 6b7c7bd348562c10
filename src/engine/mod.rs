// Engine modules: assets, input, renderer, tick clock

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod renderer;
