use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

mod core;
mod engine;
mod game;

use engine::assets::sheet::{FRAME_HEIGHT, FRAME_WIDTH};
use engine::assets::SheetLibrary;
use engine::game_loop::TickClock;
use engine::input::KeySnapshot;
use engine::renderer::{FrameHandle, Quad, Renderer};
use game::arena::{Arena, ARENA_HEIGHT, ARENA_WIDTH};
use game::characters::{load_archetype, KUNOICHI, SKELETON_SPEARMAN, SKELETON_WARRIOR};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Kunoichi Arena...");

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Kunoichi Arena")
            .with_inner_size(winit::dpi::LogicalSize::new(ARENA_WIDTH, ARENA_HEIGHT))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    let mut renderer = pollster::block_on(Renderer::new(
        window.clone(),
        ARENA_WIDTH as f32,
        ARENA_HEIGHT as f32,
    ))?;

    // Slice every archetype's sheets and upload the frames. A missing sheet
    // aborts right here, before the first tick runs.
    let library = SheetLibrary::new("assets/textures");
    let mut banks: Vec<Vec<FrameHandle>> = Vec::new();
    let mut archetypes = Vec::new();
    for def in [&KUNOICHI, &SKELETON_WARRIOR, &SKELETON_SPEARMAN] {
        let (archetype, frames) = load_archetype(&library, def)?;
        let handles = frames
            .iter()
            .enumerate()
            .map(|(i, img)| renderer.upload_frame(img, &format!("{}#{}", def.name, i)))
            .collect();
        banks.push(handles);
        archetypes.push(archetype);
    }
    let background = renderer.upload_frame(&library.load_image("battleground.png")?, "background");
    info!("{} frames on the GPU", renderer.frame_count());

    let mut arena = Arena::new(
        archetypes[0].clone(),
        archetypes[1].clone(),
        archetypes[2].clone(),
        FRAME_WIDTH as i32,
        FRAME_HEIGHT as i32,
    );

    let mut keys = KeySnapshot::new();
    let mut clock = TickClock::new();
    let mut game_over = false;

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => renderer.resize(size),
                WindowEvent::Focused(false) => keys.reset(),
                WindowEvent::KeyboardInput {
                    event: key_event, ..
                } => {
                    if key_event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                        && key_event.state == ElementState::Pressed
                    {
                        elwt.exit();
                        return;
                    }
                    keys.process_key_event(&key_event);
                }
                WindowEvent::RedrawRequested => {
                    for _ in 0..clock.begin_frame() {
                        if !arena.player_defeated() {
                            arena.step(&keys);
                        } else if !game_over {
                            game_over = true;
                            info!("Player defeated after {} ticks", clock.tick_count());
                        }
                    }

                    // Background first, then entities bottom-up by their top
                    // edge (painter's algorithm)
                    let mut items = arena.draw_items();
                    items.sort_by_key(|item| item.top);

                    let mut quads = vec![Quad {
                        frame: background,
                        x: 0.0,
                        y: 0.0,
                        width: ARENA_WIDTH as f32,
                        height: ARENA_HEIGHT as f32,
                        mirrored: false,
                    }];
                    for item in items {
                        quads.push(Quad {
                            frame: banks[item.sprite_bank][item.frame],
                            x: item.left as f32,
                            y: item.top as f32,
                            width: FRAME_WIDTH as f32,
                            height: FRAME_HEIGHT as f32,
                            mirrored: item.mirrored,
                        });
                    }

                    if let Err(e) = renderer.render(&quads) {
                        error!("render error: {e:#}");
                    }

                    if clock.frame_count() % 300 == 0 {
                        debug!("fps: {:.1}", clock.fps());
                    }
                }
                _ => {}
            },
            Event::AboutToWait => window.request_redraw(),
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
